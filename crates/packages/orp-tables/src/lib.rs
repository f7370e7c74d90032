#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Static, versioned reference data for on-road price computation.
//!
//! Tables are parsed from a JSON document, validated once and then shared
//! read-only. Construction is the only fallible step: once a [`TaxTables`]
//! exists every region has a bracket for every non-negative price, every fee
//! schedule is covered and every priced fuel has an insurance rate card.

use orp_error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

mod bracket;
mod insurance;
mod profile;
mod region;
mod schedule;
mod span;

pub use bracket::{TaxBracket, TaxPolicy, TaxSchedule};
pub use insurance::{AddOnCover, InsuranceRateCard, InsuranceTariff};
pub use profile::{Exemption, StateTaxProfile};
pub use region::{RegionKey, normalize_region};
pub use schedule::{FeeBand, FeeSchedule};

/// RTO reference sheet dated 2024-11-28.
const BUILTIN_TABLES: &str = include_str!("../data/rto-2024-11.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityEntry {
    pub city: String,
    pub region: RegionKey,
}

/// The serialized form of the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesDocument {
    pub version: String,
    pub default_region: RegionKey,
    pub regions: Vec<StateTaxProfile>,
    #[serde(default)]
    pub cities: Vec<CityEntry>,
    pub insurance: InsuranceTariff,
}

/// Validated, indexed reference tables.
#[derive(Debug, Clone)]
pub struct TaxTables {
    version: String,
    profiles: Vec<StateTaxProfile>,
    default_region: usize,
    names: HashMap<String, usize>,
    cities: HashMap<String, usize>,
    insurance: InsuranceTariff,
}

impl TaxTables {
    pub fn new(document: TablesDocument) -> Result<Self> {
        let TablesDocument {
            version,
            default_region,
            regions,
            cities: city_entries,
            insurance,
        } = document;

        if regions.is_empty() {
            return Err(Error::invalid_table("regions", "no regions defined"));
        }
        insurance.validate()?;

        let mut names = HashMap::new();
        for (idx, profile) in regions.iter().enumerate() {
            profile.validate()?;
            insert_name(&mut names, profile.region.as_str(), idx, &regions)?;
            insert_name(&mut names, &profile.display_name, idx, &regions)?;
            for alias in &profile.aliases {
                insert_name(&mut names, alias, idx, &regions)?;
            }
        }

        let default_region = *names.get(default_region.as_str()).ok_or_else(|| {
            Error::invalid_table("default_region", format!("{default_region} is not defined"))
        })?;

        let mut cities = HashMap::new();
        for entry in &city_entries {
            let idx = *names.get(entry.region.as_str()).ok_or_else(|| {
                Error::invalid_table(
                    format!("cities/{}", entry.city),
                    format!("unknown region {}", entry.region),
                )
            })?;
            let key = normalize_region(&entry.city);
            match cities.insert(key, idx) {
                Some(previous) if previous != idx => {
                    return Err(Error::invalid_table(
                        format!("cities/{}", entry.city),
                        "city mapped to two regions",
                    ));
                }
                _ => {}
            }
        }

        debug!(
            version = %version,
            regions = regions.len(),
            cities = cities.len(),
            "reference tables loaded"
        );

        Ok(Self {
            version,
            profiles: regions,
            default_region,
            names,
            cities,
            insurance,
        })
    }

    /// Tables shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_TABLES)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let document: TablesDocument = serde_json::from_str(source)
            .map_err(|e| Error::invalid_table("document", e.to_string()))?;
        Self::new(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&source)
    }

    /// Replaces the fallback region; it must already be defined.
    pub fn with_default_region(mut self, name: &str) -> Result<Self> {
        self.default_region = *self
            .names
            .get(&normalize_region(name))
            .ok_or_else(|| Error::NotFound(format!("region {name}")))?;
        Ok(self)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks a region up by canonical key, display name or alias.
    pub fn profile(&self, name: &str) -> Option<&StateTaxProfile> {
        self.names
            .get(&normalize_region(name))
            .map(|&idx| &self.profiles[idx])
    }

    /// Looks a region up through the city directory.
    pub fn profile_for_city(&self, city: &str) -> Option<&StateTaxProfile> {
        self.cities
            .get(&normalize_region(city))
            .map(|&idx| &self.profiles[idx])
    }

    pub fn default_profile(&self) -> &StateTaxProfile {
        &self.profiles[self.default_region]
    }

    pub fn profiles(&self) -> &[StateTaxProfile] {
        &self.profiles
    }

    pub fn insurance(&self) -> &InsuranceTariff {
        &self.insurance
    }
}

fn insert_name(
    names: &mut HashMap<String, usize>,
    name: &str,
    idx: usize,
    regions: &[StateTaxProfile],
) -> Result<()> {
    let key = normalize_region(name);
    if key.is_empty() {
        return Err(Error::invalid_table(regions[idx].region.as_str(), "empty alias"));
    }
    match names.insert(key, idx) {
        Some(previous) if previous != idx => Err(Error::invalid_table(
            regions[idx].region.as_str(),
            format!(
                "name {name} already belongs to {}",
                regions[previous].region
            ),
        )),
        _ => Ok(()),
    }
}
