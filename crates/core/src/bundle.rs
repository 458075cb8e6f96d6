use crate::events::{OhlcvRow, SentimentObservation};
use crate::indicators::sma_series;
use crate::traits::MarketData;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory market data for one evaluation.
///
/// Holds the shared OHLCV sequence and per-instrument sentiment sequences.
/// Both are kept sorted by timestamp.
#[derive(Debug, Clone, Default)]
pub struct DataBundle {
    ohlcv: Vec<OhlcvRow>,
    sentiment: HashMap<String, Vec<SentimentObservation>>,
}

impl DataBundle {
    #[must_use]
    pub fn new(
        mut ohlcv: Vec<OhlcvRow>,
        mut sentiment: HashMap<String, Vec<SentimentObservation>>,
    ) -> Self {
        ohlcv.sort_by_key(|row| row.timestamp);
        for series in sentiment.values_mut() {
            series.sort_by_key(|obs| obs.timestamp);
        }
        Self { ohlcv, sentiment }
    }

    /// Closing prices for `symbol` across the OHLCV sequence, oldest first.
    ///
    /// Rows without a bar for `symbol` are skipped.
    #[must_use]
    pub fn closes(&self, symbol: &str) -> Vec<Decimal> {
        self.ohlcv.iter().filter_map(|row| row.close(symbol)).collect()
    }

    /// Copy of the bundle with everything after `cutoff` dropped.
    #[must_use]
    pub fn as_of(&self, cutoff: DateTime<Utc>) -> Self {
        let ohlcv = self
            .ohlcv
            .iter()
            .filter(|row| row.timestamp <= cutoff)
            .cloned()
            .collect();
        let sentiment = self
            .sentiment
            .iter()
            .map(|(symbol, series)| {
                let kept = series
                    .iter()
                    .filter(|obs| obs.timestamp <= cutoff)
                    .cloned()
                    .collect();
                (symbol.clone(), kept)
            })
            .collect();
        Self { ohlcv, sentiment }
    }

    /// Timestamp of the latest OHLCV row.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.ohlcv.last().map(|row| row.timestamp)
    }
}

impl MarketData for DataBundle {
    fn sentiment(&self, symbol: &str) -> Option<&[SentimentObservation]> {
        self.sentiment.get(symbol).map(Vec::as_slice)
    }

    fn moving_average(&self, symbol: &str, window: usize) -> Option<Vec<Decimal>> {
        sma_series(&self.closes(symbol), window)
    }

    fn latest_close(&self, symbol: &str) -> Option<Decimal> {
        self.ohlcv.last().and_then(|row| row.close(symbol))
    }
}
