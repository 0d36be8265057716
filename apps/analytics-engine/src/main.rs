//! Analytics Engine Binary
//!
//! Loads a trades JSON file, runs the full analysis and prints the text
//! report. Stands in for the storage layer; the library itself performs
//! no I/O.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin analytics-engine -- trades.json [config.json]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};

use analytics_engine::config::AnalyticsConfig;
use analytics_engine::report::{analyze, render_text};
use analytics_engine::trade::Trade;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(trades_path) = args.get(1) else {
        bail!("usage: analytics-engine <trades.json> [config.json]");
    };

    let trades = load_trades(Path::new(trades_path))?;
    let config = match args.get(2) {
        Some(config_path) => load_config(Path::new(config_path))?,
        None => AnalyticsConfig::default(),
    };
    config
        .validate()
        .context("invalid analytics configuration")?;

    tracing::info!(trades = trades.len(), "loaded trade history");

    let report = analyze(&trades, &config);
    print!("{}", render_text(&report));

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("analytics_engine=info")),
        )
        .init();
}

fn load_trades(path: &Path) -> anyhow::Result<Vec<Trade>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trades file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse trades file {}", path.display()))
}

fn load_config(path: &Path) -> anyhow::Result<AnalyticsConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
