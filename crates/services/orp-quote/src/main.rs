use anyhow::anyhow;
use clap::Parser;
use orp_config::Settings;

mod cli;
mod quote;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let settings = match &cli.config_root {
        Some(root) => {
            let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
            Settings::load(root, &run_mode, None)?
        }
        None => Settings::new()?,
    };
    orp_telemetry::init_subscriber(&settings.log.level).map_err(|e| anyhow!(e))?;

    let output = quote::run(&cli, &settings)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
