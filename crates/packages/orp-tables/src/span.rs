use orp_domain::Money;
use orp_error::{Error, Result};

/// A half-open price span `[lower, upper)`; `upper == None` is unbounded.
pub(crate) fn contains(lower: Money, upper: Option<Money>, price: Money) -> bool {
    price >= lower && upper.is_none_or(|upper| price < upper)
}

/// Checks that spans start at zero, touch end to end, grow strictly and end
/// unbounded, so every non-negative price falls in exactly one of them.
pub(crate) fn check_contiguous(
    spans: &[(Money, Option<Money>)],
    context: &str,
) -> Result<()> {
    let Some((first_lower, _)) = spans.first() else {
        return Err(Error::invalid_table(context, "no bands defined"));
    };
    if *first_lower != Money::zero() {
        return Err(Error::invalid_table(
            context,
            format!("first band starts at {} instead of 0", first_lower.amount()),
        ));
    }

    for (i, (lower, upper)) in spans.iter().enumerate() {
        let is_last = i + 1 == spans.len();
        match (upper, is_last) {
            (None, true) => {}
            (None, false) => {
                return Err(Error::invalid_table(
                    context,
                    format!("band starting at {} is unbounded but not last", lower.amount()),
                ));
            }
            (Some(upper), true) => {
                return Err(Error::invalid_table(
                    context,
                    format!("last band is capped at {}", upper.amount()),
                ));
            }
            (Some(upper), false) => {
                if upper <= lower {
                    return Err(Error::invalid_table(
                        context,
                        format!("band [{}, {}) is empty", lower.amount(), upper.amount()),
                    ));
                }
                let next_lower = spans[i + 1].0;
                if next_lower != *upper {
                    return Err(Error::invalid_table(
                        context,
                        format!(
                            "gap or overlap between {} and {}",
                            upper.amount(),
                            next_lower.amount()
                        ),
                    ));
                }
            }
        }
    }
    Ok(())
}
