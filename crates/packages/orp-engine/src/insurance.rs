use orp_domain::{FuelCategory, Money};
use orp_tables::InsuranceTariff;
use serde::Serialize;

/// First-year comprehensive premium, itemised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PremiumBreakdown {
    pub own_damage: Money,
    pub third_party: Money,
    pub add_ons: Money,
    pub total: Money,
}

/// Own damage is a percentage of the price, third party is the regulated flat
/// fee for the price band, add-ons are summed in. No-claim bonus never
/// applies to a first purchase.
pub fn estimate(
    tariff: &InsuranceTariff,
    ex_showroom_price: Money,
    fuel: FuelCategory,
) -> PremiumBreakdown {
    if !ex_showroom_price.is_positive() {
        return PremiumBreakdown::default();
    }
    let card = tariff.card_for(fuel);

    let own_damage = ex_showroom_price.multiply_percent(card.own_damage_rate);
    let third_party = card.third_party.fee_for(ex_showroom_price);
    let add_ons = card
        .add_ons
        .iter()
        .map(|cover| ex_showroom_price.multiply_percent(cover.rate))
        .sum();

    PremiumBreakdown {
        own_damage,
        third_party,
        add_ons,
        total: own_damage + third_party + add_ons,
    }
}

pub fn estimate_premium(
    tariff: &InsuranceTariff,
    ex_showroom_price: Money,
    fuel: FuelCategory,
) -> Money {
    estimate(tariff, ex_showroom_price, fuel).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use orp_domain::Rate;
    use orp_tables::{AddOnCover, FeeBand, FeeSchedule, InsuranceRateCard};
    use rust_decimal_macros::dec;

    fn card(own_damage: Rate, third_party: [i64; 2]) -> InsuranceRateCard {
        InsuranceRateCard {
            own_damage_rate: own_damage,
            third_party: FeeSchedule::new(vec![
                FeeBand::new(0, Some(1_000_000), third_party[0]),
                FeeBand::new(1_000_000, None, third_party[1]),
            ]),
            no_claim_bonus: false,
            add_ons: vec![],
        }
    }

    fn tariff() -> InsuranceTariff {
        let fuel_card = card(Rate::percent(dec!(3)), [3_000, 7_000]);
        let mut hybrid = fuel_card.clone();
        hybrid.add_ons.push(AddOnCover {
            name: "zero depreciation".into(),
            rate: Rate::percent(dec!(0.5)),
        });
        InsuranceTariff {
            petrol: fuel_card.clone(),
            diesel: fuel_card.clone(),
            cng: fuel_card,
            electric: card(Rate::percent(dec!(2)), [2_500, 6_000]),
            hybrid,
        }
    }

    #[test]
    fn own_damage_plus_third_party() {
        let premium = estimate(&tariff(), Money::new(800_000), FuelCategory::Petrol);
        assert_eq!(premium.own_damage, Money::new(24_000));
        assert_eq!(premium.third_party, Money::new(3_000));
        assert_eq!(premium.add_ons, Money::zero());
        assert_eq!(premium.total, Money::new(27_000));
    }

    #[test]
    fn third_party_follows_price_band() {
        let premium = estimate(&tariff(), Money::new(1_000_000), FuelCategory::Diesel);
        assert_eq!(premium.third_party, Money::new(7_000));
    }

    #[test]
    fn electric_uses_its_own_card() {
        let premium = estimate(&tariff(), Money::new(1_000_000), FuelCategory::Electric);
        assert_eq!(premium.own_damage, Money::new(20_000));
        assert_eq!(premium.total, Money::new(26_000));
    }

    #[test]
    fn add_ons_are_included() {
        let premium = estimate(&tariff(), Money::new(800_000), FuelCategory::Hybrid);
        assert_eq!(premium.add_ons, Money::new(4_000));
        assert_eq!(
            estimate_premium(&tariff(), Money::new(800_000), FuelCategory::Hybrid),
            Money::new(31_000)
        );
    }

    #[test]
    fn unknown_fuel_priced_as_petrol() {
        let tariff = tariff();
        assert_eq!(
            estimate(&tariff, Money::new(650_000), FuelCategory::Unknown),
            estimate(&tariff, Money::new(650_000), FuelCategory::Petrol)
        );
    }

    #[test]
    fn zero_price_has_no_premium() {
        assert_eq!(
            estimate(&tariff(), Money::zero(), FuelCategory::Petrol),
            PremiumBreakdown::default()
        );
    }
}
