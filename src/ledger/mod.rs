pub mod book;
pub mod customer;
pub mod entry;
pub mod filter;

pub use book::{BookRecord, DirectorySummary, KhataBook};
pub use customer::{
    BalanceDirection, Customer, CustomerLedger, CustomerRecord, NetBalance, NetBalancePolicy,
    SortOrder, Totals,
};
pub use entry::{Direction, Entry, EntryDraft, EntryRecord};
pub use filter::DateRange;
