use crate::error::{Error, Result};
use crate::types::{EntryId, Money, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which way the money moved: `Gave` is paid out to the customer, `Got` is
/// received from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Gave,
    Got,
}

/// One recorded transaction against a customer. Immutable once recorded;
/// corrections are new entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub amount: Money,
    pub details: Option<String>,
    /// Calendar date of the transaction, picked by the user. Distinct from
    /// `timestamp`, the creation instant.
    pub date: NaiveDate,
    pub image_path: Option<String>,
    pub direction: Direction,
    pub timestamp: Timestamp,
}

impl Entry {
    pub fn is_gave(&self) -> bool {
        self.direction == Direction::Gave
    }

    pub fn is_got(&self) -> bool {
        self.direction == Direction::Got
    }

    /// Amount paid out, zero for received entries.
    pub fn gave(&self) -> Money {
        match self.direction {
            Direction::Gave => self.amount,
            Direction::Got => Money::zero(),
        }
    }

    /// Amount received, zero for paid-out entries.
    pub fn got(&self) -> Money {
        match self.direction {
            Direction::Got => self.amount,
            Direction::Gave => Money::zero(),
        }
    }

    pub fn to_record(&self) -> EntryRecord {
        EntryRecord {
            amount: self.amount,
            details: self.details.clone(),
            date: self.date,
            image_path: self.image_path.clone(),
            is_gave: self.is_gave(),
            is_got: self.is_got(),
            gave: self.gave(),
            got: self.got(),
            timestamp: self.timestamp,
        }
    }
}

/// User input for a new entry, before an id and creation timestamp are
/// minted. The two constructors match the two entry buttons.
#[derive(Clone, Debug)]
pub struct EntryDraft {
    pub amount: Money,
    pub direction: Direction,
    pub details: Option<String>,
    pub date: NaiveDate,
    pub image_path: Option<String>,
}

impl EntryDraft {
    pub fn gave(amount: Money, date: NaiveDate) -> Self {
        EntryDraft {
            amount,
            direction: Direction::Gave,
            details: None,
            date,
            image_path: None,
        }
    }

    pub fn got(amount: Money, date: NaiveDate) -> Self {
        EntryDraft {
            amount,
            direction: Direction::Got,
            details: None,
            date,
            image_path: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Validation gate before anything reaches the store.
    pub fn validate(&self) -> Result<()> {
        if self.amount.is_negative() {
            return Err(Error::Validation(format!(
                "entry amount must not be negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    pub(crate) fn into_entry(self, id: EntryId, timestamp: Timestamp) -> Entry {
        Entry {
            id,
            amount: self.amount,
            details: self.details,
            date: self.date,
            image_path: self.image_path,
            direction: self.direction,
            timestamp,
        }
    }
}

/// Stored shape of an entry, exactly the tree-node layout the app has
/// always written: direction as a flag pair plus direction-gated amount
/// copies.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub is_gave: bool,
    pub is_got: bool,
    pub gave: Money,
    pub got: Money,
    pub timestamp: Timestamp,
}

impl EntryRecord {
    /// Decodes a stored record, enforcing the direction invariant: a
    /// nonzero amount must carry exactly one of the two flags. Zero-amount
    /// records are tolerated whichever way their flags point.
    pub fn into_entry(self, id: EntryId) -> Result<Entry> {
        if self.amount.is_negative() {
            return Err(Error::Validation(format!(
                "stored entry {} has negative amount {}",
                id, self.amount
            )));
        }
        let direction = if self.amount.is_zero() {
            if self.is_got && !self.is_gave {
                Direction::Got
            } else {
                Direction::Gave
            }
        } else {
            match (self.is_gave, self.is_got) {
                (true, false) => Direction::Gave,
                (false, true) => Direction::Got,
                (true, true) => {
                    return Err(Error::Validation(format!(
                        "stored entry {} is flagged both gave and got",
                        id
                    )));
                }
                (false, false) => {
                    return Err(Error::Validation(format!(
                        "stored entry {} has an amount but no direction flag",
                        id
                    )));
                }
            }
        };
        Ok(Entry {
            id,
            amount: self.amount,
            details: self.details,
            date: self.date,
            image_path: self.image_path,
            direction,
            timestamp: self.timestamp,
        })
    }
}
