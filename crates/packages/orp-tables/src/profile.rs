use crate::bracket::{TaxPolicy, TaxSchedule};
use crate::region::RegionKey;
use crate::schedule::FeeSchedule;
use orp_domain::{FuelCategory, Rate};
use orp_error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Road-tax relief granted to a fuel category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Exemption {
    /// No road tax at all.
    Full,
    /// Road tax is scaled by `multiplier` (strictly between 0 and 1).
    Partial { multiplier: Decimal },
}

/// Tax rules for one state or union territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxProfile {
    pub region: RegionKey,
    pub display_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub policy: TaxPolicy,
    /// Base schedule; used for petrol and for any fuel without an override.
    pub brackets: TaxSchedule,
    #[serde(default)]
    pub fuel_brackets: BTreeMap<FuelCategory, TaxSchedule>,
    pub registration_fees: FeeSchedule,
    #[serde(default)]
    pub registration_waived: Vec<FuelCategory>,
    #[serde(default, rename = "cess_rate_percent")]
    pub cess_rate: Rate,
    #[serde(default)]
    pub exemptions: BTreeMap<FuelCategory, Exemption>,
}

impl StateTaxProfile {
    pub fn schedule_for(&self, fuel: FuelCategory) -> &TaxSchedule {
        self.fuel_brackets
            .get(&fuel.tariff_basis())
            .unwrap_or(&self.brackets)
    }

    pub fn exemption_for(&self, fuel: FuelCategory) -> Option<Exemption> {
        self.exemptions.get(&fuel.tariff_basis()).copied()
    }

    pub fn waives_registration(&self, fuel: FuelCategory) -> bool {
        self.registration_waived.contains(&fuel.tariff_basis())
    }

    /// Every schedule in the profile, labelled for error messages and scans.
    pub fn schedules(&self) -> impl Iterator<Item = (Option<FuelCategory>, &TaxSchedule)> {
        std::iter::once((None, &self.brackets))
            .chain(self.fuel_brackets.iter().map(|(fuel, s)| (Some(*fuel), s)))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let region = self.region.as_str();
        if self.region.is_empty() {
            return Err(Error::invalid_table("region", "empty region key"));
        }
        if self.display_name.trim().is_empty() {
            return Err(Error::invalid_table(region, "empty display name"));
        }

        for (fuel, schedule) in self.schedules() {
            let context = match fuel {
                Some(fuel) => format!("{region}/{fuel}"),
                None => region.to_string(),
            };
            if fuel == Some(FuelCategory::Unknown) {
                return Err(Error::invalid_table(context, "Unknown has no schedule of its own"));
            }
            schedule.validate(self.policy, &context)?;
        }

        self.registration_fees
            .validate(&format!("{region}/registration"))?;

        if self.cess_rate.is_negative() {
            return Err(Error::invalid_table(region, "negative cess rate"));
        }

        for (fuel, exemption) in &self.exemptions {
            if *fuel == FuelCategory::Unknown {
                return Err(Error::invalid_table(region, "exemption for Unknown fuel"));
            }
            match exemption {
                Exemption::Partial { multiplier }
                    if *multiplier <= Decimal::ZERO || *multiplier >= Decimal::ONE =>
                {
                    return Err(Error::invalid_table(
                        format!("{region}/{fuel}"),
                        format!("partial exemption multiplier {multiplier} outside (0, 1)"),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::TaxBracket;
    use rust_decimal_macros::dec;

    fn profile() -> StateTaxProfile {
        StateTaxProfile {
            region: RegionKey::new("Testland"),
            display_name: "Testland".into(),
            aliases: vec![],
            policy: TaxPolicy::Flat,
            brackets: TaxSchedule::new(vec![TaxBracket::rate(0, None, Rate::percent(dec!(10)))]),
            fuel_brackets: BTreeMap::from([(
                FuelCategory::Diesel,
                TaxSchedule::new(vec![TaxBracket::rate(0, None, Rate::percent(dec!(12)))]),
            )]),
            registration_fees: FeeSchedule::flat(2_000),
            registration_waived: vec![FuelCategory::Electric],
            cess_rate: Rate::ZERO,
            exemptions: BTreeMap::from([(
                FuelCategory::Hybrid,
                Exemption::Partial { multiplier: dec!(0.5) },
            )]),
        }
    }

    #[test]
    fn fuel_override_falls_back_to_base_schedule() {
        let profile = profile();
        assert_eq!(
            profile.schedule_for(FuelCategory::Diesel).brackets()[0].rate_percent,
            Rate::percent(dec!(12))
        );
        assert_eq!(
            profile.schedule_for(FuelCategory::Cng).brackets()[0].rate_percent,
            Rate::percent(dec!(10))
        );
        assert_eq!(
            profile.schedule_for(FuelCategory::Unknown),
            profile.schedule_for(FuelCategory::Petrol)
        );
    }

    #[test]
    fn validates_partial_multiplier_range() {
        let mut profile = profile();
        assert!(profile.validate().is_ok());

        profile
            .exemptions
            .insert(FuelCategory::Hybrid, Exemption::Partial { multiplier: dec!(1) });
        assert!(profile.validate().is_err());

        profile
            .exemptions
            .insert(FuelCategory::Hybrid, Exemption::Partial { multiplier: dec!(0) });
        assert!(profile.validate().is_err());
    }

    #[test]
    fn rejects_rules_keyed_on_unknown_fuel() {
        let mut profile = profile();
        profile.exemptions.insert(FuelCategory::Unknown, Exemption::Full);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn exemption_parses_from_tagged_json() {
        let full: Exemption = serde_json::from_str(r#"{"kind": "full"}"#).unwrap();
        assert_eq!(full, Exemption::Full);
        let partial: Exemption =
            serde_json::from_str(r#"{"kind": "partial", "multiplier": "0.85"}"#).unwrap();
        assert_eq!(partial, Exemption::Partial { multiplier: dec!(0.85) });
    }
}
