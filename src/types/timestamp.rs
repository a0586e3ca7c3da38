use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Creation instant in milliseconds since epoch. Used to tie-break display
/// order when entry dates collide, so `now()` must never hand out the same
/// value twice within the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Self {
        CLOCK.now()
    }

    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0 as i64).unwrap_or_default()
    }

    pub fn date(&self) -> NaiveDate {
        self.to_datetime().date_naive()
    }
}

/// Strictly monotonic wall clock: if the wall clock stalls or steps back,
/// the next reading is bumped one millisecond past the previous one.
pub struct MonotonicClock {
    last: AtomicU64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            last: AtomicU64::new(0),
        }
    }

    pub fn now(&self) -> Timestamp {
        let wall_clock = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        loop {
            let last = self.last.load(Ordering::SeqCst);
            let next = if wall_clock > last { wall_clock } else { last + 1 };

            if self
                .last
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return Timestamp(next);
            }
            // Retry if CAS failed
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    static ref CLOCK: MonotonicClock = MonotonicClock::new();
}
