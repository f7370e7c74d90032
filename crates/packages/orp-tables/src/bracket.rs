use crate::span;
use orp_domain::{Money, Rate};
use orp_error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a profile applies its bracket rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxPolicy {
    /// The matching bracket's rate applies to the whole price.
    Flat,
    /// Each bracket's rate applies only to the slice of the price inside it.
    Marginal,
}

/// One road-tax bracket covering `[lower_bound, upper_bound)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Money,
    #[serde(default)]
    pub upper_bound: Option<Money>,
    #[serde(default)]
    pub rate_percent: Rate,
    /// Levied instead of `rate_percent` when set. Flat profiles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Money>,
}

impl TaxBracket {
    pub fn rate(lower_bound: i64, upper_bound: Option<i64>, rate: Rate) -> Self {
        Self {
            lower_bound: Money::new(lower_bound),
            upper_bound: upper_bound.map(Money::new),
            rate_percent: rate,
            fixed_amount: None,
        }
    }

    pub fn fixed(lower_bound: i64, upper_bound: Option<i64>, amount: i64) -> Self {
        Self {
            lower_bound: Money::new(lower_bound),
            upper_bound: upper_bound.map(Money::new),
            rate_percent: Rate::ZERO,
            fixed_amount: Some(Money::new(amount)),
        }
    }

    pub fn contains(&self, price: Money) -> bool {
        span::contains(self.lower_bound, self.upper_bound, price)
    }

    /// Tax owed on `price` when this bracket applies to the whole price.
    pub fn flat_charge(&self, price: Money) -> Decimal {
        match self.fixed_amount {
            Some(amount) => amount.to_decimal(),
            None => price.percent_exact(self.rate_percent),
        }
    }
}

/// Ordered, contiguous list of brackets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxSchedule(Vec<TaxBracket>);

impl TaxSchedule {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.0
    }

    /// The single bracket whose span contains `price`.
    pub fn find(&self, price: Money) -> Option<(usize, &TaxBracket)> {
        self.0.iter().enumerate().find(|(_, b)| b.contains(price))
    }

    pub(crate) fn validate(&self, policy: TaxPolicy, context: &str) -> Result<()> {
        let spans: Vec<_> = self
            .0
            .iter()
            .map(|b| (b.lower_bound, b.upper_bound))
            .collect();
        span::check_contiguous(&spans, context)?;

        for bracket in &self.0 {
            let at = bracket.lower_bound.amount();
            if bracket.rate_percent.is_negative() {
                return Err(Error::invalid_table(
                    context,
                    format!("negative rate in bracket starting at {at}"),
                ));
            }
            match bracket.fixed_amount {
                Some(amount) if amount < Money::zero() => {
                    return Err(Error::invalid_table(
                        context,
                        format!("negative fixed amount in bracket starting at {at}"),
                    ));
                }
                Some(_) if policy == TaxPolicy::Marginal => {
                    return Err(Error::invalid_table(
                        context,
                        format!("fixed amount in marginal bracket starting at {at}"),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
