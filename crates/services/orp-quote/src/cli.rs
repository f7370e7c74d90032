use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use orp_domain::{Money, Rate};

#[derive(Parser, Debug)]
#[command(
    name = "orp-quote",
    about = "Itemised on-road price quotes for new car purchases",
    version
)]
pub struct Cli {
    /// Directory containing `config/` (the workspace root under cargo, else the current directory)
    #[arg(long, global = true)]
    pub config_root: Option<Utf8PathBuf>,
    /// Reference tables JSON file, overriding `pricing.tables_path`
    #[arg(long, global = true)]
    pub tables: Option<Utf8PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price a single vehicle
    Price(PriceArgs),
    /// Price several vehicles against one location
    Batch(BatchArgs),
    /// List the regions in the loaded tables
    Regions,
    /// Show which fuel category a description maps to
    Classify {
        /// Free-form fuel description, e.g. "Bi-Fuel"
        fuel: String,
    },
}

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Ex-showroom price in rupees
    #[arg(long, allow_negative_numbers = true)]
    pub price: i64,
    /// "City, State", a state name or a known city
    #[arg(long, short)]
    pub location: String,
    /// Fuel description as listed by the manufacturer
    #[arg(long, short, default_value = "Petrol")]
    pub fuel: String,
    #[command(flatten)]
    pub emi: EmiArgs,
}

#[derive(Args, Debug, Default)]
pub struct EmiArgs {
    /// Add an EMI quote on the on-road total
    #[arg(long)]
    pub emi: bool,
    /// Down payment percent (overrides `emi.down_payment_percent`)
    #[arg(long, requires = "emi")]
    pub down_payment: Option<Rate>,
    /// Annual interest rate percent (overrides `emi.annual_rate_percent`)
    #[arg(long, requires = "emi")]
    pub interest_rate: Option<Rate>,
    /// Loan tenure in months (overrides `emi.tenure_months`)
    #[arg(long, requires = "emi")]
    pub tenure: Option<u32>,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// "City, State", a state name or a known city
    #[arg(long, short)]
    pub location: String,
    /// `PRICE:FUEL` pairs, e.g. `800000:Petrol 1250000:Diesel`
    #[arg(required = true, value_parser = parse_item)]
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub price: Money,
    pub fuel: String,
}

fn parse_item(raw: &str) -> Result<BatchItem, String> {
    let (price, fuel) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected PRICE:FUEL, got {raw:?}"))?;
    let price = price
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid price {price:?}: {e}"))?;
    Ok(BatchItem {
        price: Money::new(price),
        fuel: fuel.trim().to_string(),
    })
}
