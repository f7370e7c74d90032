#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! On-road price computation.
//!
//! [`OnRoadPriceEngine`] is the single entry point: it resolves a free-form
//! location to a state tax profile, classifies the fuel description, and sums
//! road tax, registration, cess, insurance, handling and TCS into an itemised
//! [`PriceBreakup`]. Pricing is pure and never fails; fallbacks are reported
//! through [`PriceBreakup::degradations`].
//!
//! ```
//! use orp_domain::Money;
//! use orp_engine::OnRoadPriceEngine;
//! use orp_fees::FeePolicy;
//! use orp_tables::TaxTables;
//! use std::sync::Arc;
//!
//! let tables = Arc::new(TaxTables::builtin().unwrap());
//! let engine = OnRoadPriceEngine::new(tables, FeePolicy::default());
//! let breakup = engine.calculate_on_road_price(Money::new(800_000), "Pune, Maharashtra", "Petrol");
//! assert!(breakup.total_on_road_price() > Money::new(800_000));
//! assert!(!breakup.degraded());
//! ```

mod breakup;
mod classifier;
mod emi;
mod engine;
mod insurance;
mod region;
mod road_tax;

pub use breakup::{Degradation, LineItem, PriceBreakup};
pub use classifier::classify;
pub use emi::{EmiPlan, EmiQuote};
pub use engine::OnRoadPriceEngine;
pub use insurance::{PremiumBreakdown, estimate, estimate_premium};
pub use region::{UnknownRegion, resolve_region};
pub use road_tax::resolve_road_tax;
