#![warn(missing_docs)]
//! Powerwifi-status components: platform output parsers, command execution
//! and the HTTP layer used by `main`
use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

pub mod battery;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod normalize;
pub mod status;
pub mod web;
pub mod wifiscan;
pub use battery::BatteryRecord;
pub use catalog::{CommandCatalog, Platform};
pub use config::{AppConfig, Args};
pub use error::{ParseError, StatusError};
pub use status::StatusService;
pub use wifiscan::{WifiNetwork, WifiScanResult};

/// Setup logging to stdout
/// (Tracing is a bit more involving to set up but will provide much more feature if needed)
pub fn setup_tracing(args: &Args) -> Result<()> {
    let fmt_layer = fmt::layer().with_target(false);
    let filter_layer =
        EnvFilter::try_new(args.verbose.get_level_filter()).context("Initializing log filter")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}
