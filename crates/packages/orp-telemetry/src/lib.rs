use std::error::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

/// Installs the global subscriber: an env filter and a fmt layer on stderr.
///
/// `RUST_LOG` wins when set; otherwise `level` (e.g. `"info"` or
/// `"orp_engine=debug,info"`) is used. Fails if a global subscriber is
/// already installed or the filter does not parse.
pub fn init_subscriber(level: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
