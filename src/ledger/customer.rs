use crate::ledger::entry::Entry;
use crate::ledger::filter::DateRange;
use crate::types::{CustomerId, Money, NodeKey, Timestamp};
use serde::{Deserialize, Serialize};

/// Ordering for entry listings. Screens show newest first, statements run
/// oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    NewestFirst,
    OldestFirst,
}

/// The pair of running aggregates kept on every customer record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub gave: Money,
    pub got: Money,
}

impl Totals {
    /// Full re-sum over a set of entries. Empty input yields zero totals.
    pub fn over<'a, I>(entries: I) -> Totals
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut totals = Totals::default();
        for entry in entries {
            totals.gave += entry.gave();
            totals.got += entry.got();
        }
        totals
    }
}

/// Who owes whom. `WillGet` means the book owner is owed money, `WillPay`
/// means the owner owes (and also covers the settled case, matching the
/// historical display).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceDirection {
    WillGet,
    WillPay,
}

/// How a customer's headline figure is derived from the two totals. The app
/// has historically shown the larger raw total per customer while the
/// khatabook header subtracts; both conventions stay available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetBalancePolicy {
    #[default]
    Difference,
    LargerTotal,
}

/// A headline amount with its direction label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetBalance {
    pub amount: Money,
    pub direction: BalanceDirection,
}

impl NetBalance {
    /// Single implementation behind both policies. Direction always comes
    /// from comparing the totals; only the displayed amount differs.
    pub fn from_totals(totals: Totals, policy: NetBalancePolicy) -> NetBalance {
        let direction = if totals.got > totals.gave {
            BalanceDirection::WillGet
        } else {
            BalanceDirection::WillPay
        };
        let amount = match policy {
            NetBalancePolicy::Difference => (totals.got - totals.gave).abs(),
            NetBalancePolicy::LargerTotal => totals.got.max(totals.gave),
        };
        NetBalance { amount, direction }
    }
}

/// Customer master data as kept on the directory node. Totals are persisted
/// redundantly so listings render without loading entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: NodeKey,
    /// Most recent activity instant; directory listings sort on it.
    pub date: Timestamp,
    pub total_gave: Money,
    pub total_got: Money,
}

impl Customer {
    pub fn new(name: NodeKey, created: Timestamp) -> Self {
        Customer {
            id: CustomerId::new(),
            name,
            date: created,
            total_gave: Money::zero(),
            total_got: Money::zero(),
        }
    }

    pub fn totals(&self) -> Totals {
        Totals {
            gave: self.total_gave,
            got: self.total_got,
        }
    }

    pub fn net_balance(&self, policy: NetBalancePolicy) -> NetBalance {
        NetBalance::from_totals(self.totals(), policy)
    }

    pub fn to_record(&self) -> CustomerRecord {
        CustomerRecord {
            id: self.id,
            name: self.name.clone(),
            date: self.date,
            total_gave: self.total_gave,
            total_got: self.total_got,
        }
    }
}

/// Stored shape of the customer node (entries hang off a child node and are
/// not part of this record).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub name: NodeKey,
    pub date: Timestamp,
    pub total_gave: Money,
    pub total_got: Money,
}

impl CustomerRecord {
    pub fn into_customer(self) -> Customer {
        Customer {
            id: self.id,
            name: self.name,
            date: self.date,
            total_gave: self.total_gave,
            total_got: self.total_got,
        }
    }
}

/// A customer together with their full entry history, the unit the screens
/// and statement exports work on.
#[derive(Clone, Debug)]
pub struct CustomerLedger {
    pub customer: Customer,
    entries: Vec<Entry>,
}

impl CustomerLedger {
    pub fn new(customer: Customer) -> Self {
        CustomerLedger {
            customer,
            entries: Vec::new(),
        }
    }

    /// Reassembles a ledger loaded from the store. Entries are kept in the
    /// order given; callers sort through `sorted_entries`.
    pub fn from_parts(customer: Customer, entries: Vec<Entry>) -> Self {
        CustomerLedger { customer, entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends the entry and recomputes both totals by re-summing the whole
    /// list, so the aggregates can never drift from the entries. Also bumps
    /// the customer's activity date. Returns the recomputed totals.
    pub fn add_entry(&mut self, entry: Entry) -> Totals {
        self.customer.date = entry.timestamp;
        self.entries.push(entry);
        let totals = Totals::over(&self.entries);
        self.customer.total_gave = totals.gave;
        self.customer.total_got = totals.got;
        totals
    }

    pub fn net_balance(&self, policy: NetBalancePolicy) -> NetBalance {
        self.customer.net_balance(policy)
    }

    /// Entries ordered by creation timestamp. The sort is stable, so equal
    /// timestamps keep their insertion order in both directions.
    pub fn sorted_entries(&self, order: SortOrder) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        match order {
            SortOrder::OldestFirst => sorted.sort_by_key(|entry| entry.timestamp),
            SortOrder::NewestFirst => sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }
        sorted
    }

    /// Entries whose date falls inside the range, in stored order.
    pub fn filtered<'a>(&'a self, range: &'a DateRange) -> impl Iterator<Item = &'a Entry> {
        self.entries.iter().filter(|entry| range.contains(entry.date))
    }

    /// Totals over the range only. Shares the same predicate the statement
    /// rows use, so the on-screen summary and the export always agree.
    pub fn filtered_totals(&self, range: &DateRange) -> Totals {
        Totals::over(self.filtered(range))
    }
}
