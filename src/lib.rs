//! # Khata Ledger
//!
//! Core of a khata (ledger) book-keeping app: customer-level credit/debit
//! entries, running balances, date-filtered statements exported as
//! printable documents, all persisted in a per-user remote document tree.
//!
//! The [`directory::KhataDirectory`] is the front door; it is constructed
//! from a [`store::TreeStore`] backend, an authenticated
//! [`directory::Session`] and a [`config::LedgerConfig`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use khata_ledger::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let session = Session::new(UserId::new());
//! let directory = KhataDirectory::new(store, session, LedgerConfig::default());
//!
//! directory.create_book("shop").await?;
//! directory.create_customer("shop", "Raju").await?;
//! directory
//!     .record_entry("shop", "Raju", EntryDraft::got(Money::from_rupees(500), today))
//!     .await?;
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod locale;
pub mod observability;
pub mod render;
pub mod statement;
pub mod store;
pub mod types;

pub use config::LedgerConfig;
pub use directory::{BookOverview, KhataDirectory, Session};
pub use error::{Error, Result};
pub use ledger::{
    BalanceDirection, Customer, CustomerLedger, DateRange, Direction, Entry, EntryDraft,
    KhataBook, NetBalance, NetBalancePolicy, SortOrder, Totals,
};
pub use locale::Locale;
pub use render::{DocumentRenderer, HtmlDocumentRenderer, RenderedDocument};
pub use statement::StatementTable;
pub use store::{MemoryStore, TreeStore};
pub use types::{BookId, CustomerId, EntryId, Money, NodeKey, Timestamp, UserId};
