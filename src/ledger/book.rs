use crate::ledger::customer::{Customer, NetBalance, NetBalancePolicy, Totals};
use crate::types::{BookId, Money, NodeKey};
use serde::{Deserialize, Serialize};

/// A named ledger book grouping customers. The name doubles as the store
/// path segment, so it is a validated `NodeKey`.
#[derive(Clone, Debug, PartialEq)]
pub struct KhataBook {
    pub id: BookId,
    pub name: NodeKey,
}

impl KhataBook {
    pub fn new(name: NodeKey) -> Self {
        KhataBook {
            id: BookId::new(),
            name,
        }
    }

    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Stored shape of the khatabook node. Totals are never persisted here;
/// directory headlines are summed from the loaded customers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub name: NodeKey,
}

impl BookRecord {
    pub fn into_book(self) -> KhataBook {
        KhataBook {
            id: self.id,
            name: self.name,
        }
    }
}

/// Book-level headline figures, summed over every customer in the book.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectorySummary {
    pub total_got: Money,
    pub total_gave: Money,
}

impl DirectorySummary {
    pub fn over<'a, I>(customers: I) -> DirectorySummary
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        let mut summary = DirectorySummary::default();
        for customer in customers {
            summary.total_got += customer.total_got;
            summary.total_gave += customer.total_gave;
        }
        summary
    }

    /// The book header always subtracts, whatever per-customer display
    /// policy is configured.
    pub fn net(&self) -> NetBalance {
        NetBalance::from_totals(
            Totals {
                gave: self.total_gave,
                got: self.total_got,
            },
            NetBalancePolicy::Difference,
        )
    }
}
