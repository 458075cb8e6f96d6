//! Allocate CLI command.
//!
//! Loads OHLCV and sentiment CSV files, runs the allocation rule once and
//! prints the target weights for the next interval.

use crate::report::{AllocationFormatter, AllocationReport};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use sentiment_alloc_core::{AppConfig, ConfigLoader};
use sentiment_alloc_data::CsvStorage;
use sentiment_alloc_strategy::SentimentTrendStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Arguments for the allocate command.
#[derive(Args, Debug, Clone)]
pub struct AllocateArgs {
    /// Config file path (defaults to config/Config.toml with APP_ overrides)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Profile overlay (config/Config.{profile}.toml), ignored with --config
    #[arg(long, env = "APP_PROFILE")]
    pub profile: Option<String>,

    /// OHLCV CSV file (overrides data.ohlcv_path)
    #[arg(long)]
    pub ohlcv: Option<String>,

    /// Sentiment CSV file (overrides data.sentiment_path)
    #[arg(long)]
    pub sentiment: Option<String>,

    /// Ignore data after this instant (RFC 3339, e.g. "2024-03-01T21:00:00Z")
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also write the weights to this CSV file
    #[arg(short, long)]
    pub output: Option<String>,
}

pub(crate) fn load_config(path: Option<&str>, profile: Option<&str>) -> Result<AppConfig> {
    match (path, profile) {
        (Some(path), _) => ConfigLoader::load_from(path),
        (None, Some(profile)) => ConfigLoader::load_with_profile(profile),
        (None, None) => ConfigLoader::load(),
    }
}

/// Runs the allocate command.
///
/// # Errors
/// Returns an error if configuration or data files cannot be loaded, or the
/// output file cannot be written.
pub fn run_allocate(args: AllocateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.profile.as_deref())?;

    let ohlcv_path = args.ohlcv.unwrap_or(config.data.ohlcv_path);
    let sentiment_path = args.sentiment.unwrap_or(config.data.sentiment_path);

    let mut bundle = CsvStorage::load_bundle(&ohlcv_path, &sentiment_path)?;
    if let Some(cutoff) = args.as_of {
        bundle = bundle.as_of(cutoff);
        tracing::info!("Evaluating as of {}", cutoff.to_rfc3339());
    }

    let strategy =
        SentimentTrendStrategy::new(config.strategy).context("invalid strategy configuration")?;
    let report = AllocationReport::build(&strategy, &bundle, args.as_of.or(bundle.last_timestamp()));

    match args.format {
        OutputFormat::Table => print!("{}", AllocationFormatter::format(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = args.output {
        CsvStorage::write_allocation(&path, &report.allocation)?;
        tracing::info!("Wrote allocation to {}", path);
    }

    Ok(())
}
