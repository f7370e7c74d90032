//! Shared value types for on-road price computation.
//!
//! All amounts are whole rupees held as integers. Percentages are fixed-point
//! decimals and are only turned back into money through [`Money::multiply_percent`]
//! or [`Money::from_decimal`], both of which round half away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

mod format;
mod fuel;

pub use fuel::FuelCategory;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct Money {
    amount: i64,
}

impl Money {
    pub const fn new(amount: i64) -> Self {
        Self { amount }
    }

    pub const fn zero() -> Self {
        Self { amount: 0 }
    }

    pub const fn amount(&self) -> i64 {
        self.amount
    }

    pub const fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.amount)
    }

    /// Rounds a decimal rupee value to a whole rupee, half away from zero.
    /// Values outside the `i64` range saturate.
    pub fn from_decimal(value: Decimal) -> Self {
        let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let amount = rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        });
        Self { amount }
    }

    /// Exact (unrounded) value of `rate` percent of this amount.
    pub fn percent_exact(&self, rate: Rate) -> Decimal {
        self.to_decimal()
            .checked_mul(rate.fraction())
            .unwrap_or(Decimal::MAX)
    }

    pub fn multiply_percent(&self, rate: Rate) -> Self {
        Self::from_decimal(self.percent_exact(rate))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            amount: self.amount.saturating_add(other.amount),
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.amount = self.amount.saturating_add(other.amount);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            amount: self.amount.saturating_sub(other.amount),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self::new(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.to_indian_string())
    }
}

/// A percentage, e.g. `Rate::percent(dec!(12.5))` is 12.5 %.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    pub const fn percent(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// The rate as a fraction of one (12.5 % -> 0.125).
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Rate {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim().trim_end_matches('%').trim_end()).map(Rate)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
