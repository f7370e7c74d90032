use crate::cli::{BatchArgs, Cli, Command, EmiArgs, PriceArgs};
use anyhow::Context;
use camino::Utf8Path;
use orp_config::Settings;
use orp_domain::{FuelCategory, Money};
use orp_engine::{EmiPlan, EmiQuote, LineItem, OnRoadPriceEngine, PriceBreakup, classify};
use orp_tables::{TaxPolicy, TaxTables};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
struct PriceOutput<'a> {
    tables_version: &'a str,
    #[serde(flatten)]
    breakup: &'a PriceBreakup,
    on_road_price_lakh: String,
    line_items: [LineItem; 7],
    #[serde(skip_serializing_if = "Option::is_none")]
    emi: Option<EmiQuote>,
}

#[derive(Debug, Serialize)]
struct RegionRow<'a> {
    region: &'a str,
    name: &'a str,
    policy: TaxPolicy,
    exempt_fuels: Vec<FuelCategory>,
}

/// Loads tables (override path, configured path or the built-in set) and
/// builds the engine from settings.
pub fn build_engine(
    settings: &Settings,
    tables: Option<&Utf8Path>,
) -> anyhow::Result<OnRoadPriceEngine> {
    let path = tables
        .map(Utf8Path::to_path_buf)
        .or_else(|| settings.tables_path());
    let tables = match path {
        Some(path) => TaxTables::from_path(&path)
            .with_context(|| format!("loading reference tables from {path}"))?,
        None => TaxTables::builtin().context("loading built-in reference tables")?,
    };
    info!(
        version = tables.version(),
        regions = tables.profiles().len(),
        "reference tables ready"
    );

    let engine = OnRoadPriceEngine::new(Arc::new(tables), settings.pricing.fee_policy()?);
    match &settings.pricing.default_region {
        Some(region) => Ok(engine
            .with_default_region(region)
            .with_context(|| format!("pricing.default_region = {region:?}"))?),
        None => Ok(engine),
    }
}

pub fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<Value> {
    let engine = build_engine(settings, cli.tables.as_deref())?;

    let output = match &cli.command {
        Command::Price(args) => price(&engine, settings, args)?,
        Command::Batch(args) => batch(&engine, args)?,
        Command::Regions => regions(engine.tables())?,
        Command::Classify { fuel } => json!({
            "input": fuel,
            "category": classify(fuel),
        }),
    };
    Ok(output)
}

fn price(
    engine: &OnRoadPriceEngine,
    settings: &Settings,
    args: &PriceArgs,
) -> anyhow::Result<Value> {
    let breakup =
        engine.calculate_on_road_price(Money::new(args.price), &args.location, &args.fuel);
    let emi = args
        .emi
        .emi
        .then(|| emi_plan(settings, &args.emi).quote(breakup.total_on_road_price()));
    render(engine, &breakup, emi)
}

fn batch(engine: &OnRoadPriceEngine, args: &BatchArgs) -> anyhow::Result<Value> {
    let items = args.items.iter().map(|item| (item.price, item.fuel.as_str()));
    engine
        .quote_batch(&args.location, items)
        .iter()
        .map(|breakup| render(engine, breakup, None))
        .collect::<anyhow::Result<Vec<_>>>()
        .map(Value::Array)
}

fn regions(tables: &TaxTables) -> anyhow::Result<Value> {
    let rows: Vec<_> = tables
        .profiles()
        .iter()
        .map(|profile| RegionRow {
            region: profile.region.as_str(),
            name: &profile.display_name,
            policy: profile.policy,
            exempt_fuels: profile.exemptions.keys().copied().collect(),
        })
        .collect();
    Ok(serde_json::to_value(rows)?)
}

fn render(
    engine: &OnRoadPriceEngine,
    breakup: &PriceBreakup,
    emi: Option<EmiQuote>,
) -> anyhow::Result<Value> {
    let output = PriceOutput {
        tables_version: engine.tables().version(),
        breakup,
        on_road_price_lakh: breakup.total_on_road_price().to_lakh_string(),
        line_items: breakup.line_items(),
        emi,
    };
    Ok(serde_json::to_value(output)?)
}

fn emi_plan(settings: &Settings, args: &EmiArgs) -> EmiPlan {
    let configured = &settings.emi;
    EmiPlan::new()
        .with_down_payment(args.down_payment.unwrap_or(configured.down_payment_percent))
        .with_annual_rate(args.interest_rate.unwrap_or(configured.annual_rate_percent))
        .with_tenure_months(args.tenure.unwrap_or(configured.tenure_months))
}
