use std::{env, fs};

use anyhow::Context;
use liblife::{LifeConfig, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod renderer;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match env::args().nth(1) {
        Some(config_path) => load_config(&config_path)?,
        None => LifeConfig::default(),
    };

    let session = Session::new(config).context("Invalid config")?;
    info!(
        width = config.width,
        height = config.height,
        tick_interval_ms = config.tick_interval_ms,
        "starting life"
    );

    renderer::run(session)
}

fn load_config(path: &str) -> anyhow::Result<LifeConfig> {
    let config_serialized =
        fs::read(path).with_context(|| format!("Couldn't read config {path}"))?;

    serde_json::from_slice(&config_serialized)
        .with_context(|| format!("Couldn't deserialize config {path}"))
}
