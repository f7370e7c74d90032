use crate::span;
use orp_domain::Money;
use orp_error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A flat fee charged for prices in `[lower_bound, upper_bound)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBand {
    pub lower_bound: Money,
    #[serde(default)]
    pub upper_bound: Option<Money>,
    pub fee: Money,
}

impl FeeBand {
    pub fn new(lower_bound: i64, upper_bound: Option<i64>, fee: i64) -> Self {
        Self {
            lower_bound: Money::new(lower_bound),
            upper_bound: upper_bound.map(Money::new),
            fee: Money::new(fee),
        }
    }
}

/// Price-banded flat fees (registration fees, third-party premiums).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeSchedule(Vec<FeeBand>);

impl FeeSchedule {
    pub fn new(bands: Vec<FeeBand>) -> Self {
        Self(bands)
    }

    /// One band covering every price.
    pub fn flat(fee: i64) -> Self {
        Self(vec![FeeBand::new(0, None, fee)])
    }

    pub fn bands(&self) -> &[FeeBand] {
        &self.0
    }

    pub fn fee_for(&self, price: Money) -> Money {
        self.0
            .iter()
            .find(|band| span::contains(band.lower_bound, band.upper_bound, price))
            .map(|band| band.fee)
            .unwrap_or_else(Money::zero)
    }

    pub(crate) fn validate(&self, context: &str) -> Result<()> {
        let spans: Vec<_> = self
            .0
            .iter()
            .map(|band| (band.lower_bound, band.upper_bound))
            .collect();
        span::check_contiguous(&spans, context)?;

        if let Some(band) = self.0.iter().find(|band| band.fee < Money::zero()) {
            return Err(Error::invalid_table(
                context,
                format!("negative fee in band starting at {}", band.lower_bound.amount()),
            ));
        }
        if let Some(pair) = self.0.windows(2).find(|pair| pair[1].fee < pair[0].fee) {
            return Err(Error::invalid_table(
                context,
                format!("fee decreases at {}", pair[1].lower_bound.amount()),
            ));
        }
        Ok(())
    }
}
