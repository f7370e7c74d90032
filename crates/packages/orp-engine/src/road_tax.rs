use orp_domain::{FuelCategory, Money};
use orp_tables::{Exemption, StateTaxProfile, TaxBracket, TaxPolicy, TaxSchedule};
use rust_decimal::Decimal;

/// Road tax owed on `ex_showroom_price` for `fuel` under `profile`.
///
/// A full exemption short-circuits to zero. Otherwise the tax is computed from
/// the fuel's bracket schedule, scaled by any partial exemption and rounded
/// once to whole rupees.
pub fn resolve_road_tax(
    profile: &StateTaxProfile,
    ex_showroom_price: Money,
    fuel: FuelCategory,
) -> Money {
    let multiplier = match profile.exemption_for(fuel) {
        Some(Exemption::Full) => return Money::zero(),
        Some(Exemption::Partial { multiplier }) => Some(multiplier),
        None => None,
    };
    if !ex_showroom_price.is_positive() {
        return Money::zero();
    }

    let schedule = profile.schedule_for(fuel);
    let tax = match profile.policy {
        TaxPolicy::Flat => flat_tax(schedule, ex_showroom_price),
        TaxPolicy::Marginal => marginal_tax(schedule, ex_showroom_price),
    };

    Money::from_decimal(multiplier.map_or(tax, |m| tax * m))
}

/// The matching bracket's charge, floored at the tax owed one rupee below its
/// lower bound, so a lower-rated upper band never undercuts the band beneath it.
fn flat_tax(schedule: &TaxSchedule, price: Money) -> Decimal {
    let Some((index, bracket)) = schedule.find(price) else {
        return Decimal::ZERO;
    };
    bracket
        .flat_charge(price)
        .max(relief_floor(&schedule.brackets()[..=index]))
}

/// Flat tax at one rupee below the last bracket's lower bound.
fn relief_floor(brackets: &[TaxBracket]) -> Decimal {
    brackets.windows(2).fold(Decimal::ZERO, |floor, pair| {
        let below = Money::new(pair[1].lower_bound.amount() - 1);
        pair[0].flat_charge(below).max(floor)
    })
}

fn marginal_tax(schedule: &TaxSchedule, price: Money) -> Decimal {
    schedule
        .brackets()
        .iter()
        .take_while(|bracket| bracket.lower_bound < price)
        .map(|bracket| {
            let segment_upper = bracket.upper_bound.map_or(price, |upper| upper.min(price));
            (segment_upper - bracket.lower_bound).percent_exact(bracket.rate_percent)
        })
        .sum()
}
