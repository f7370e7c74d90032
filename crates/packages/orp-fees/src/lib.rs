#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Secondary charges on a vehicle purchase: registration, cess, handling and
//! tax collected at source, built from a small set of configurable fee rules.

use orp_domain::{FuelCategory, Money, Rate};
use orp_tables::{FeeSchedule, StateTaxProfile};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FeeError {
    #[error("Invalid percentage value: {0}. Must be between 0 and 100")]
    InvalidPercentage(Rate),
    #[error("Minimum fee {min} exceeds maximum fee {max}")]
    InvertedBounds { min: Money, max: Money },
    #[error("Negative fee: {0}")]
    NegativeFee(Money),
}

/// Represents a rule for calculating a fee.
#[derive(Debug, Clone, PartialEq)]
pub enum FeeRule<'a> {
    /// A fixed fee amount.
    Fixed(Money),
    /// A percentage of the amount, optionally clamped.
    Percentage {
        rate: Rate,
        min: Option<Money>,
        max: Option<Money>,
    },
    /// A flat fee picked from price bands.
    Banded(&'a FeeSchedule),
    /// A percentage of the whole amount once it reaches `at_or_above`, zero below.
    Threshold { at_or_above: Money, rate: Rate },
}

impl FeeRule<'_> {
    pub fn validate(&self) -> Result<(), FeeError> {
        match self {
            FeeRule::Fixed(fee) if *fee < Money::zero() => Err(FeeError::NegativeFee(*fee)),
            FeeRule::Fixed(_) | FeeRule::Banded(_) => Ok(()),
            FeeRule::Percentage { rate, min, max } => {
                check_percentage(*rate)?;
                match (min, max) {
                    (Some(min), Some(max)) if min > max => Err(FeeError::InvertedBounds {
                        min: *min,
                        max: *max,
                    }),
                    _ => Ok(()),
                }
            }
            FeeRule::Threshold { rate, .. } => check_percentage(*rate),
        }
    }

    /// Calculates the fee for a given amount based on the rule.
    pub fn calculate(&self, amount: Money) -> Money {
        match self {
            FeeRule::Fixed(fee) => *fee,
            FeeRule::Percentage { rate, min, max } => {
                let mut fee = amount.multiply_percent(*rate);
                if let Some(min_fee) = min {
                    fee = fee.max(*min_fee);
                }
                if let Some(max_fee) = max {
                    fee = fee.min(*max_fee);
                }
                fee
            }
            FeeRule::Banded(schedule) => schedule.fee_for(amount),
            FeeRule::Threshold { at_or_above, rate } => {
                if amount >= *at_or_above {
                    amount.multiply_percent(*rate)
                } else {
                    Money::zero()
                }
            }
        }
    }
}

fn check_percentage(rate: Rate) -> Result<(), FeeError> {
    if rate.is_negative() || rate.value() > Decimal::ONE_HUNDRED {
        return Err(FeeError::InvalidPercentage(rate));
    }
    Ok(())
}

/// Calculates the total fee for a given amount by applying a set of fee rules.
pub fn total_fee(amount: Money, rules: &[FeeRule<'_>]) -> Money {
    rules.iter().map(|rule| rule.calculate(amount)).sum()
}

/// A named fixed charge folded into the handling fee (e.g. FASTag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlingCharge {
    pub name: String,
    pub amount: Money,
}

impl HandlingCharge {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount: Money::new(amount),
        }
    }
}

/// Tax collected at source on high-value purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcsRule {
    pub threshold: Money,
    #[serde(rename = "rate_percent")]
    pub rate: Rate,
}

pub const DEFAULT_TCS_THRESHOLD: Money = Money::new(1_000_000);

/// Region-independent fee settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeePolicy {
    handling: Vec<HandlingCharge>,
    tcs: TcsRule,
}

impl FeePolicy {
    pub fn new(handling: Vec<HandlingCharge>, tcs: TcsRule) -> Result<Self, FeeError> {
        for charge in &handling {
            FeeRule::Fixed(charge.amount).validate()?;
        }
        FeeRule::Threshold {
            at_or_above: tcs.threshold,
            rate: tcs.rate,
        }
        .validate()?;
        Ok(Self { handling, tcs })
    }

    pub fn handling_charges(&self) -> &[HandlingCharge] {
        &self.handling
    }

    pub fn tcs(&self) -> TcsRule {
        self.tcs
    }

    fn handling_rules(&self) -> Vec<FeeRule<'static>> {
        self.handling
            .iter()
            .map(|charge| FeeRule::Fixed(charge.amount))
            .collect()
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            handling: vec![
                HandlingCharge::new("hypothecation", 1_500),
                HandlingCharge::new("fastag", 500),
            ],
            tcs: TcsRule {
                threshold: DEFAULT_TCS_THRESHOLD,
                rate: Rate::percent(Decimal::ONE),
            },
        }
    }
}

/// The secondary charges for one purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub registration_fee: Money,
    pub cess: Money,
    pub handling_fee: Money,
    pub tax_collected_at_source: Money,
}

impl FeeBreakdown {
    pub fn total(&self) -> Money {
        self.registration_fee + self.cess + self.handling_fee + self.tax_collected_at_source
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeeAggregator {
    policy: FeePolicy,
}

impl FeeAggregator {
    pub fn new(policy: FeePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FeePolicy {
        &self.policy
    }

    pub fn compute_fees(
        &self,
        profile: &StateTaxProfile,
        ex_showroom_price: Money,
        fuel: FuelCategory,
    ) -> FeeBreakdown {
        let registration_fee = if profile.waives_registration(fuel) {
            Money::zero()
        } else {
            FeeRule::Banded(&profile.registration_fees).calculate(ex_showroom_price)
        };
        let cess = FeeRule::Percentage {
            rate: profile.cess_rate,
            min: None,
            max: None,
        }
        .calculate(ex_showroom_price);
        let handling_fee = total_fee(ex_showroom_price, &self.policy.handling_rules());
        let tax_collected_at_source = FeeRule::Threshold {
            at_or_above: self.policy.tcs.threshold,
            rate: self.policy.tcs.rate,
        }
        .calculate(ex_showroom_price);

        FeeBreakdown {
            registration_fee,
            cess,
            handling_fee,
            tax_collected_at_source,
        }
    }
}
