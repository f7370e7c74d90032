use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File};
use orp_domain::Rate;
use orp_error::{Error, Result};
use orp_fees::{FeePolicy, HandlingCharge, TcsRule};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

/// Environment variables use this prefix and `__` between nested keys,
/// e.g. `ORP_PRICING__DEFAULT_REGION=Karnataka`.
pub const ENV_PREFIX: &str = "ORP";

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pricing {
    pub default_region: Option<String>,
    pub tables_path: Option<Utf8PathBuf>,
    #[serde(default)]
    pub handling_charges: Vec<HandlingCharge>,
    pub tcs: TcsRule,
}

impl Pricing {
    pub fn fee_policy(&self) -> Result<FeePolicy> {
        FeePolicy::new(self.handling_charges.clone(), self.tcs)
            .map_err(|e| Error::Config(format!("pricing: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Emi {
    pub down_payment_percent: Rate,
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log: Log,
    pub pricing: Pricing,
    pub emi: Emi,
    #[serde(skip)]
    root: Utf8PathBuf,
}

impl Settings {
    /// Loads `config/` under the `RUN_MODE` profile (default `development`), then
    /// applies `ORP_*` environment overrides. The root is the workspace root when
    /// run through cargo and the current directory otherwise.
    pub fn new() -> Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let root = config_root(env::var("CARGO_MANIFEST_DIR").ok())?;

        Self::load(&root, &run_mode, None)
    }

    /// Loads `<root>/config/default.toml`, `<root>/config/<run_mode>.toml` and
    /// `<root>/config/local.toml`, later files winning. Environment overrides
    /// come from `env_vars` when given, from the process environment otherwise.
    pub fn load(
        root: &Utf8Path,
        run_mode: &str,
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let s = Config::builder()
            .add_source(File::with_name(root.join("config/default").as_str()))
            .add_source(
                File::with_name(root.join(format!("config/{run_mode}")).as_str()).required(false),
            )
            .add_source(File::with_name(root.join("config/local").as_str()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env_vars),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        let mut settings: Self = s
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))?;
        settings.root = root.to_owned();
        Ok(settings)
    }

    /// `pricing.tables_path`, resolved against the settings root when relative.
    pub fn tables_path(&self) -> Option<Utf8PathBuf> {
        self.pricing
            .tables_path
            .as_ref()
            .map(|path| self.root.join(path))
    }
}

fn config_root(manifest_dir: Option<String>) -> Result<Utf8PathBuf> {
    match manifest_dir {
        Some(dir) => {
            let mut path = Utf8PathBuf::from(dir);
            path.pop();
            path.pop();
            path.pop();
            Ok(path)
        }
        None => {
            let cwd = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;
            Utf8PathBuf::try_from(cwd).map_err(|e| Error::Config(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orp_domain::Money;
    use rust_decimal_macros::dec;

    fn workspace_root() -> Utf8PathBuf {
        Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../..")
    }

    fn load(overrides: &[(&str, &str)]) -> Result<Settings> {
        let env_vars = overrides
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::load(&workspace_root(), "test", Some(env_vars))
    }

    #[test]
    fn test_new() {
        let settings = Settings::new();
        assert!(settings.is_ok(), "{settings:?}");
    }

    #[test]
    fn test_config_root() {
        let root = config_root(Some(env!("CARGO_MANIFEST_DIR").to_string())).unwrap();
        assert!(root.join("config/default.toml").is_file(), "{root}");

        let cwd = Utf8PathBuf::try_from(env::current_dir().unwrap()).unwrap();
        assert_eq!(config_root(None).unwrap(), cwd);
    }

    #[test]
    fn test_defaults() {
        let settings = load(&[]).unwrap();
        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.pricing.default_region.as_deref(), Some("Maharashtra"));
        assert!(settings.tables_path().is_none());
        assert_eq!(settings.pricing.tcs.threshold, Money::new(1_000_000));
        assert_eq!(settings.pricing.tcs.rate, Rate::percent(dec!(1)));
        assert_eq!(settings.emi.tenure_months, 84);
        assert_eq!(settings.emi.annual_rate_percent, Rate::percent(dec!(8)));

        let policy = settings.pricing.fee_policy().unwrap();
        assert_eq!(policy, FeePolicy::default());
    }

    #[test]
    fn test_env_override() {
        let settings = load(&[
            ("ORP_LOG__LEVEL", "debug"),
            ("ORP_PRICING__DEFAULT_REGION", "Karnataka"),
            ("ORP_PRICING__TABLES_PATH", "tables/custom.json"),
            ("ORP_EMI__TENURE_MONTHS", "60"),
        ])
        .expect("failed to load settings with env override");

        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.pricing.default_region.as_deref(), Some("Karnataka"));
        assert_eq!(settings.emi.tenure_months, 60);
        assert_eq!(
            settings.tables_path(),
            Some(workspace_root().join("tables/custom.json"))
        );
    }

    #[test]
    fn test_invalid_fee_policy_is_a_config_error() {
        let settings = load(&[("ORP_PRICING__TCS__RATE_PERCENT", "250")]).unwrap();
        let err = settings.pricing.fee_policy().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_defaults_file() {
        let err = Settings::load(Utf8Path::new("/nonexistent"), "test", Some(HashMap::new()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
