use crate::schedule::FeeSchedule;
use orp_domain::{FuelCategory, Rate};
use orp_error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An optional cover priced as a percentage of the ex-showroom price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnCover {
    pub name: String,
    #[serde(rename = "rate_percent")]
    pub rate: Rate,
}

/// First-year comprehensive premium rules for one fuel category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRateCard {
    #[serde(rename = "own_damage_rate_percent")]
    pub own_damage_rate: Rate,
    /// Regulated third-party premium by price band.
    pub third_party: FeeSchedule,
    /// Reserved; a first purchase never earns a no-claim bonus.
    #[serde(default)]
    pub no_claim_bonus: bool,
    #[serde(default)]
    pub add_ons: Vec<AddOnCover>,
}

impl InsuranceRateCard {
    fn validate(&self, fuel: FuelCategory) -> Result<()> {
        let context = format!("insurance/{fuel}");
        if self.own_damage_rate.is_negative() {
            return Err(Error::invalid_table(&context, "negative own-damage rate"));
        }
        if let Some(add_on) = self.add_ons.iter().find(|a| a.rate.is_negative()) {
            return Err(Error::invalid_table(
                &context,
                format!("negative rate for add-on {}", add_on.name),
            ));
        }
        self.third_party.validate(&context)
    }
}

/// One rate card per priced fuel category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceTariff {
    #[serde(rename = "Petrol")]
    pub petrol: InsuranceRateCard,
    #[serde(rename = "Diesel")]
    pub diesel: InsuranceRateCard,
    #[serde(rename = "CNG")]
    pub cng: InsuranceRateCard,
    #[serde(rename = "Electric")]
    pub electric: InsuranceRateCard,
    #[serde(rename = "Hybrid")]
    pub hybrid: InsuranceRateCard,
}

impl InsuranceTariff {
    pub fn card_for(&self, fuel: FuelCategory) -> &InsuranceRateCard {
        match fuel.tariff_basis() {
            FuelCategory::Diesel => &self.diesel,
            FuelCategory::Cng => &self.cng,
            FuelCategory::Electric => &self.electric,
            FuelCategory::Hybrid => &self.hybrid,
            FuelCategory::Petrol | FuelCategory::Unknown => &self.petrol,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        FuelCategory::PRICED
            .into_iter()
            .try_for_each(|fuel| self.card_for(fuel).validate(fuel))
    }
}
