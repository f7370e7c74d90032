use orp_domain::{FuelCategory, Money};
use orp_fees::FeeBreakdown;
use orp_tables::{RegionKey, StateTaxProfile};
use serde::Serialize;

/// Why a breakup was computed on fallback terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// The location matched no region; the default region was used.
    UnknownRegion,
    /// The fuel description was not recognised; petrol rates were used.
    UnclassifiedFuel,
    /// The price was zero or negative and was clamped to zero.
    NonPositivePrice,
}

/// One labelled row of a breakup, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub amount: Money,
}

/// Itemised on-road price. Built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakup {
    ex_showroom_price: Money,
    road_tax: Money,
    registration_fee: Money,
    cess: Money,
    insurance_premium: Money,
    handling_fee: Money,
    tax_collected_at_source: Money,
    total_on_road_price: Money,
    applied_region: RegionKey,
    region_name: String,
    applied_fuel_category: FuelCategory,
    degraded: bool,
    degradations: Vec<Degradation>,
}

impl PriceBreakup {
    pub(crate) fn new(
        ex_showroom_price: Money,
        road_tax: Money,
        fees: FeeBreakdown,
        insurance_premium: Money,
        profile: &StateTaxProfile,
        fuel: FuelCategory,
        degradations: Vec<Degradation>,
    ) -> Self {
        let total_on_road_price = ex_showroom_price
            + road_tax
            + fees.registration_fee
            + fees.cess
            + insurance_premium
            + fees.handling_fee
            + fees.tax_collected_at_source;

        Self {
            ex_showroom_price,
            road_tax,
            registration_fee: fees.registration_fee,
            cess: fees.cess,
            insurance_premium,
            handling_fee: fees.handling_fee,
            tax_collected_at_source: fees.tax_collected_at_source,
            total_on_road_price,
            applied_region: profile.region.clone(),
            region_name: profile.display_name.clone(),
            applied_fuel_category: fuel,
            degraded: !degradations.is_empty(),
            degradations,
        }
    }

    /// An all-zero breakup that still reports the resolved region and fuel.
    pub(crate) fn zero(
        profile: &StateTaxProfile,
        fuel: FuelCategory,
        degradations: Vec<Degradation>,
    ) -> Self {
        Self::new(
            Money::zero(),
            Money::zero(),
            FeeBreakdown::default(),
            Money::zero(),
            profile,
            fuel,
            degradations,
        )
    }

    pub fn ex_showroom_price(&self) -> Money {
        self.ex_showroom_price
    }

    pub fn road_tax(&self) -> Money {
        self.road_tax
    }

    pub fn registration_fee(&self) -> Money {
        self.registration_fee
    }

    pub fn cess(&self) -> Money {
        self.cess
    }

    pub fn insurance_premium(&self) -> Money {
        self.insurance_premium
    }

    pub fn handling_fee(&self) -> Money {
        self.handling_fee
    }

    pub fn tax_collected_at_source(&self) -> Money {
        self.tax_collected_at_source
    }

    pub fn total_on_road_price(&self) -> Money {
        self.total_on_road_price
    }

    pub fn applied_region(&self) -> &RegionKey {
        &self.applied_region
    }

    /// Display name of the applied region, e.g. "Maharashtra".
    pub fn region_name(&self) -> &str {
        &self.region_name
    }

    pub fn applied_fuel_category(&self) -> FuelCategory {
        self.applied_fuel_category
    }

    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    /// Rows for rendering; their amounts sum to the on-road total.
    pub fn line_items(&self) -> [LineItem; 7] {
        [
            LineItem {
                label: "Ex-showroom price",
                amount: self.ex_showroom_price,
            },
            LineItem {
                label: "Road tax",
                amount: self.road_tax,
            },
            LineItem {
                label: "Registration",
                amount: self.registration_fee,
            },
            LineItem {
                label: "Cess",
                amount: self.cess,
            },
            LineItem {
                label: "Insurance",
                amount: self.insurance_premium,
            },
            LineItem {
                label: "Handling charges",
                amount: self.handling_fee,
            },
            LineItem {
                label: "TCS",
                amount: self.tax_collected_at_source,
            },
        ]
    }
}
