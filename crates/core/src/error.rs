//! Degraded-data reasons reported by allocation rules.
//!
//! None of these are failures of the call: the rule reports the reason and the
//! caller applies a [`MissingDataPolicy`](crate::MissingDataPolicy).

use thiserror::Error;

/// Why an instrument could not be evaluated this interval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingData {
    /// The sentiment feed has no observations for the instrument.
    #[error("no sentiment data available for {symbol}")]
    NoSentimentData { symbol: String },

    /// Not enough price history for a moving average of `window` bars.
    #[error("insufficient moving-average data for {symbol} (window {window})")]
    InsufficientMovingAverage { symbol: String, window: usize },

    /// The latest OHLCV row carries no bar for the instrument.
    #[error("no closing price for {symbol} in latest bar")]
    NoClosePrice { symbol: String },
}

impl MissingData {
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::NoSentimentData { symbol }
            | Self::InsufficientMovingAverage { symbol, .. }
            | Self::NoClosePrice { symbol } => symbol,
        }
    }
}
