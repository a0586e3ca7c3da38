use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Monetary amount in paise (1/100 rupee), signed so that balance
/// differences can go below zero. Entry amounts are validated non-negative
/// before they reach the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub fn from_paise(value: i64) -> Self {
        Money(value)
    }

    pub fn from_rupees(value: i64) -> Self {
        Money(value * 100)
    }

    pub fn to_paise(&self) -> i64 {
        self.0
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    /// Whole rupees print bare ("250"), fractional amounts with two
    /// decimals ("250.50"), the rendering the statement tables use.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rupees = self.0 / 100;
        let paise = (self.0 % 100).abs();
        if paise == 0 {
            write!(f, "{}", rupees)
        } else {
            let sign = if self.0 < 0 && rupees == 0 { "-" } else { "" };
            write!(f, "{}{}.{:02}", sign, rupees, paise)
        }
    }
}
