use orp_domain::{Money, Rate};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

/// Financing terms for an equated monthly instalment quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiPlan {
    /// Share of the on-road price paid upfront. Clamped to 0..=100.
    pub down_payment_percent: Rate,
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
}

impl Default for EmiPlan {
    fn default() -> Self {
        Self {
            down_payment_percent: Rate::percent(Decimal::from(20)),
            annual_rate_percent: Rate::percent(Decimal::from(8)),
            tenure_months: 84,
        }
    }
}

/// The outcome of financing an on-road price under an [`EmiPlan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmiQuote {
    pub down_payment: Money,
    pub principal: Money,
    pub monthly_installment: Money,
    pub total_payable: Money,
    pub total_interest: Money,
}

impl EmiPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_down_payment(mut self, percent: Rate) -> Self {
        self.down_payment_percent = percent;
        self
    }

    pub fn with_annual_rate(mut self, percent: Rate) -> Self {
        self.annual_rate_percent = percent;
        self
    }

    pub fn with_tenure_months(mut self, months: u32) -> Self {
        self.tenure_months = months;
        self
    }

    /// Quotes the instalment on `on_road_total`.
    ///
    /// Uses the reducing-balance formula `P·r·(1+r)^n / ((1+r)^n − 1)` with a
    /// monthly rate `r`. A zero rate splits the principal evenly and a zero
    /// tenure makes the whole principal due at once.
    pub fn quote(&self, on_road_total: Money) -> EmiQuote {
        let total = on_road_total.max(Money::zero());
        let down_payment = total
            .multiply_percent(self.down_payment_percent)
            .clamp(Money::zero(), total);
        let principal = total - down_payment;

        let months = self.tenure_months;
        let monthly_installment = if months == 0 {
            principal
        } else {
            Money::from_decimal(self.installment(principal.to_decimal(), months))
        };
        let repaid = Money::from_decimal(
            monthly_installment.to_decimal() * Decimal::from(months.max(1)),
        );

        EmiQuote {
            down_payment,
            principal,
            monthly_installment,
            total_payable: down_payment + repaid,
            total_interest: (repaid - principal).max(Money::zero()),
        }
    }

    fn installment(&self, principal: Decimal, months: u32) -> Decimal {
        let n = Decimal::from(months);
        if self.annual_rate_percent.is_negative() || self.annual_rate_percent.is_zero() {
            return principal / n;
        }
        let r = self.annual_rate_percent.fraction() / Decimal::from(12);

        // P·r / (1 − (1+r)^−n)
        match (Decimal::ONE + r).checked_powu(u64::from(months)) {
            Some(growth) if growth > Decimal::ONE => {
                principal * r / (Decimal::ONE - Decimal::ONE / growth)
            }
            Some(_) => principal / n,
            // Past the representable range the instalment is interest only.
            None => principal * r,
        }
    }
}
