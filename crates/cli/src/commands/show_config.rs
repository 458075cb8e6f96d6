//! Prints the effective configuration and the feeds the strategy needs.

use super::allocate::load_config;
use anyhow::Result;
use clap::Args;
use sentiment_alloc_core::AllocationStrategy;
use sentiment_alloc_strategy::SentimentTrendStrategy;
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub struct ShowConfigArgs {
    /// Config file path (defaults to config/Config.toml with APP_ overrides)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Profile overlay (config/Config.{profile}.toml), ignored with --config
    #[arg(long, env = "APP_PROFILE")]
    pub profile: Option<String>,
}

/// Runs the show-config command.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn run_show_config(args: ShowConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.profile.as_deref())?;
    let strategy = SentimentTrendStrategy::new(config.strategy.clone())?;

    let summary = json!({
        "strategy": strategy.name(),
        "assets": strategy.assets(),
        "interval": strategy.interval(),
        "data_feeds": strategy.data_feeds(),
        "config": config,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
