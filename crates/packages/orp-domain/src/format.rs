use crate::Money;
use rust_decimal::{Decimal, RoundingStrategy};

const LAKH: i64 = 100_000;

impl Money {
    /// Indian digit grouping: the last three digits, then pairs (`8,70,900`).
    pub fn to_indian_string(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 2 + 1);
        if self.amount < 0 {
            grouped.push('-');
        }
        if digits.len() <= 3 {
            grouped.push_str(&digits);
            return grouped;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let lead = head.len() % 2;
        if lead == 1 {
            grouped.push_str(&head[..1]);
        }
        for (i, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
            if i > 0 || lead == 1 {
                grouped.push(',');
            }
            grouped.extend(pair.iter().map(|b| *b as char));
        }
        grouped.push(',');
        grouped.push_str(tail);
        grouped
    }

    /// Amount in lakh with two decimals, e.g. `8.71 Lakh`.
    pub fn to_lakh_string(&self) -> String {
        let lakh = (Decimal::from(self.amount) / Decimal::from(LAKH))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{lakh:.2} Lakh")
    }
}
