use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-day window over entry dates. This is the single
/// filtering predicate in the crate: screen totals, export eligibility and
/// statement rows all go through `contains`, so they can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(Error::Validation(format!(
                    "start date {} is after end date {}",
                    s, e
                )));
            }
        }
        Ok(DateRange { start, end })
    }

    /// No bounds: keeps every entry.
    pub fn unbounded() -> Self {
        DateRange::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(s), Some(e)) => date >= s && date <= e,
            (Some(s), None) => date >= s,
            (None, Some(e)) => date <= e,
            (None, None) => true,
        }
    }
}
