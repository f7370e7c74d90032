use crate::breakup::{Degradation, PriceBreakup};
use crate::classifier::classify;
use crate::insurance::estimate_premium;
use crate::region::resolve_region;
use crate::road_tax::resolve_road_tax;
use orp_domain::{FuelCategory, Money};
use orp_error::Result;
use orp_fees::{FeeAggregator, FeePolicy};
use orp_tables::{StateTaxProfile, TaxTables};
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns ex-showroom prices into itemised on-road prices.
///
/// The engine holds only read-only tables and settings, so one instance can
/// be shared across threads and called concurrently. Pricing never fails:
/// bad input degrades to fallback rules and is reported on the breakup.
#[derive(Debug, Clone)]
pub struct OnRoadPriceEngine {
    tables: Arc<TaxTables>,
    fees: FeeAggregator,
}

impl OnRoadPriceEngine {
    pub fn new(tables: Arc<TaxTables>, policy: FeePolicy) -> Self {
        Self {
            tables,
            fees: FeeAggregator::new(policy),
        }
    }

    /// Replaces the region used when a location cannot be resolved.
    pub fn with_default_region(self, name: &str) -> Result<Self> {
        let tables = Arc::unwrap_or_clone(self.tables).with_default_region(name)?;
        Ok(Self {
            tables: Arc::new(tables),
            fees: self.fees,
        })
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    pub fn fee_policy(&self) -> &FeePolicy {
        self.fees.policy()
    }

    pub fn calculate_on_road_price(
        &self,
        ex_showroom_price: Money,
        location: &str,
        raw_fuel_type: &str,
    ) -> PriceBreakup {
        let (profile, region_fallback) = self.resolve(location);
        self.price(ex_showroom_price, profile, region_fallback, raw_fuel_type)
    }

    /// Prices several `(price, fuel)` pairs against a single location, resolving
    /// the location once.
    pub fn quote_batch<I, S>(&self, location: &str, items: I) -> Vec<PriceBreakup>
    where
        I: IntoIterator<Item = (Money, S)>,
        S: AsRef<str>,
    {
        let (profile, region_fallback) = self.resolve(location);
        items
            .into_iter()
            .map(|(price, fuel)| self.price(price, profile, region_fallback, fuel.as_ref()))
            .collect()
    }

    fn resolve(&self, location: &str) -> (&StateTaxProfile, bool) {
        match resolve_region(&self.tables, location) {
            Ok(profile) => (profile, false),
            Err(err) => {
                let fallback = self.tables.default_profile();
                warn!(%err, fallback = %fallback.region, "using default region");
                (fallback, true)
            }
        }
    }

    fn price(
        &self,
        ex_showroom_price: Money,
        profile: &StateTaxProfile,
        region_fallback: bool,
        raw_fuel_type: &str,
    ) -> PriceBreakup {
        let mut degradations = Vec::new();
        if region_fallback {
            degradations.push(Degradation::UnknownRegion);
        }

        let fuel = classify(raw_fuel_type);
        if fuel == FuelCategory::Unknown {
            warn!(fuel = raw_fuel_type, "unrecognised fuel type, using petrol rates");
            degradations.push(Degradation::UnclassifiedFuel);
        }

        if !ex_showroom_price.is_positive() {
            warn!(price = ex_showroom_price.amount(), "non-positive price clamped to zero");
            degradations.push(Degradation::NonPositivePrice);
            return PriceBreakup::zero(profile, fuel, degradations);
        }

        let road_tax = resolve_road_tax(profile, ex_showroom_price, fuel);
        let fees = self.fees.compute_fees(profile, ex_showroom_price, fuel);
        let insurance = estimate_premium(self.tables.insurance(), ex_showroom_price, fuel);

        let breakup = PriceBreakup::new(
            ex_showroom_price,
            road_tax,
            fees,
            insurance,
            profile,
            fuel,
            degradations,
        );
        debug!(
            region = %profile.region,
            %fuel,
            price = ex_showroom_price.amount(),
            total = breakup.total_on_road_price().amount(),
            degraded = breakup.degraded(),
            "on-road price computed"
        );
        breakup
    }
}
