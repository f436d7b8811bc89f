use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use eventweather::{AppConfig, LocationWeatherResolver, logging, web};

const USAGE: &str = "Usage: eventweather [--config <path>]";

/// Reads an optional `--config <path>` argument
fn config_path_from_args(mut args: impl Iterator<Item = String>) -> Result<Option<PathBuf>> {
    match args.next().as_deref() {
        None => Ok(None),
        Some("--config") => args
            .next()
            .map(|path| Some(PathBuf::from(path)))
            .context("--config requires a path"),
        Some(other) => anyhow::bail!("Unknown argument '{other}'. {USAGE}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_from_args(std::env::args().skip(1))?;
    let config = AppConfig::load_from_path(config_path)?;
    logging::init(&config.logging)?;

    tracing::info!(
        "Starting eventweather {} (forecast region lat {}..{}, lng {}..{})",
        eventweather::VERSION,
        config.region.min_latitude,
        config.region.max_latitude,
        config.region.min_longitude,
        config.region.max_longitude
    );

    let resolver = LocationWeatherResolver::from_config(&config)
        .with_context(|| "Failed to set up location weather resolver")?;

    web::run(&config.server, Arc::new(resolver)).await
}
