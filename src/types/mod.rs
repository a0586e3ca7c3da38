pub mod ids;
pub mod money;
pub mod names;
pub mod timestamp;

pub use ids::{BookId, CustomerId, EntryId, UserId};
pub use money::Money;
pub use names::NodeKey;
pub use timestamp::Timestamp;
