use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Parameters of the sentiment/trend allocation rule.
///
/// Immutable once handed to a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Instruments to allocate, in evaluation order.
    pub tickers: Vec<String>,
    /// Rebalancing interval reported to the framework.
    pub interval: String,
    pub short_window: usize,
    pub long_window: usize,
    /// Sentiment above this is bullish, below it bearish.
    pub sentiment_threshold: f64,
    /// Capital fraction split across all tickers on a bullish reading.
    pub bullish_weight: Decimal,
    /// Capital fraction split across all tickers on a neutral reading.
    pub neutral_weight: Decimal,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            tickers: vec!["AAPL".to_string(), "TSLA".to_string()],
            interval: "1day".to_string(),
            short_window: 20,
            long_window: 50,
            sentiment_threshold: 0.5,
            bullish_weight: dec!(0.5),
            neutral_weight: dec!(0.25),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one ticker must be configured")]
    NoTickers,

    #[error("ticker symbols must not be blank")]
    BlankTicker,

    #[error("ticker {0} is listed more than once")]
    DuplicateTicker(String),

    #[error("moving-average windows must be positive")]
    ZeroWindow,

    #[error("short window ({short}) must be shorter than long window ({long})")]
    WindowOrder { short: usize, long: usize },

    #[error("{name} must be within [0, 1], got {value}")]
    WeightOutOfRange { name: &'static str, value: Decimal },

    #[error("neutral weight ({neutral}) must not exceed bullish weight ({bullish})")]
    NeutralAboveBullish { neutral: Decimal, bullish: Decimal },

    #[error("sentiment threshold must be finite")]
    NonFiniteThreshold,
}

impl StrategyConfig {
    /// Checks the invariants the allocation rule relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::NoTickers);
        }
        let mut seen = HashSet::new();
        for ticker in &self.tickers {
            if ticker.trim().is_empty() {
                return Err(ConfigError::BlankTicker);
            }
            if !seen.insert(ticker.as_str()) {
                return Err(ConfigError::DuplicateTicker(ticker.clone()));
            }
        }

        if self.short_window == 0 || self.long_window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.short_window >= self.long_window {
            return Err(ConfigError::WindowOrder {
                short: self.short_window,
                long: self.long_window,
            });
        }

        for (name, value) in [
            ("bullish_weight", self.bullish_weight),
            ("neutral_weight", self.neutral_weight),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::WeightOutOfRange { name, value });
            }
        }
        if self.neutral_weight > self.bullish_weight {
            return Err(ConfigError::NeutralAboveBullish {
                neutral: self.neutral_weight,
                bullish: self.bullish_weight,
            });
        }

        if !self.sentiment_threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold);
        }

        Ok(())
    }
}

/// Locations of the CSV inputs the CLI loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub ohlcv_path: String,
    pub sentiment_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ohlcv_path: "data/ohlcv.csv".to_string(),
            sentiment_path: "data/sentiment.csv".to_string(),
        }
    }
}
