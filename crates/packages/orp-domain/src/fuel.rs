use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical fuel category used to select tax and insurance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelCategory {
    Petrol,
    Diesel,
    #[serde(rename = "CNG")]
    Cng,
    Electric,
    Hybrid,
    Unknown,
}

impl FuelCategory {
    /// Categories that carry their own rules in the reference tables.
    pub const PRICED: [FuelCategory; 5] = [
        FuelCategory::Petrol,
        FuelCategory::Diesel,
        FuelCategory::Cng,
        FuelCategory::Electric,
        FuelCategory::Hybrid,
    ];

    pub const ALL: [FuelCategory; 6] = [
        FuelCategory::Petrol,
        FuelCategory::Diesel,
        FuelCategory::Cng,
        FuelCategory::Electric,
        FuelCategory::Hybrid,
        FuelCategory::Unknown,
    ];

    /// The category whose rates apply. `Unknown` is priced as petrol.
    pub const fn tariff_basis(self) -> FuelCategory {
        match self {
            FuelCategory::Unknown => FuelCategory::Petrol,
            other => other,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FuelCategory::Petrol => "Petrol",
            FuelCategory::Diesel => "Diesel",
            FuelCategory::Cng => "CNG",
            FuelCategory::Electric => "Electric",
            FuelCategory::Hybrid => "Hybrid",
            FuelCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
