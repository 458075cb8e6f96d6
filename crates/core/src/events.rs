use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One OHLCV bar for a single instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl PriceBar {
    /// Bar with every price field set to `close` and zero volume.
    #[must_use]
    pub const fn flat(close: Decimal) -> Self {
        Self {
            open: close,
            high: close,
            low: close,
            close,
            volume: Decimal::ZERO,
        }
    }
}

/// One trading interval of the shared OHLCV sequence, indexable by instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcvRow {
    pub timestamp: DateTime<Utc>,
    pub bars: HashMap<String, PriceBar>,
}

impl OhlcvRow {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            bars: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_bar(mut self, symbol: impl Into<String>, bar: PriceBar) -> Self {
        self.bars.insert(symbol.into(), bar);
        self
    }

    #[must_use]
    pub fn close(&self, symbol: &str) -> Option<Decimal> {
        self.bars.get(symbol).map(|bar| bar.close)
    }
}

/// A single social-sentiment reading for an instrument.
///
/// `score` is pre-normalized by the feed, conceptually in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentObservation {
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "twitterSentiment", alias = "sentiment")]
    pub score: f64,
}

impl SentimentObservation {
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, score: f64) -> Self {
        Self { timestamp, score }
    }
}
