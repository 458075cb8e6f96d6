//! Flat CSV record shapes for price and sentiment files.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sentiment_alloc_core::{PriceBar, SentimentObservation};
use serde::{Deserialize, Serialize};

/// One row of a long-format OHLCV file.
///
/// Format: `timestamp,symbol,open,high,low,close,volume`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl OhlcvRecord {
    #[must_use]
    pub const fn bar(&self) -> PriceBar {
        PriceBar {
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}

/// One row of a sentiment file.
///
/// Format: `timestamp,symbol,sentiment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    #[serde(alias = "twitterSentiment", alias = "score")]
    pub sentiment: f64,
}

impl SentimentRecord {
    #[must_use]
    pub const fn observation(&self) -> SentimentObservation {
        SentimentObservation::new(self.timestamp, self.sentiment)
    }
}

/// One row of an allocation output file.
///
/// Format: `symbol,weight`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub symbol: String,
    pub weight: Decimal,
}
