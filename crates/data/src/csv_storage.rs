use crate::models::{AllocationRecord, OhlcvRecord, SentimentRecord};
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use sentiment_alloc_core::{DataBundle, OhlcvRow, SentimentObservation, TargetAllocation};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub struct CsvStorage;

impl CsvStorage {
    /// Reads a long-format OHLCV file and groups it into per-interval rows.
    ///
    /// Format: `timestamp,symbol,open,high,low,close,volume`
    ///
    /// Rows that fail to parse are skipped with a warning.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or read
    pub fn read_ohlcv(path: impl AsRef<Path>) -> Result<Vec<OhlcvRow>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open OHLCV file: {}", path.display()))?;
        Self::ohlcv_from_reader(file)
    }

    /// Same as [`read_ohlcv`](Self::read_ohlcv) over any reader.
    ///
    /// # Errors
    /// Returns error if reading fails
    pub fn ohlcv_from_reader<R: Read>(reader: R) -> Result<Vec<OhlcvRow>> {
        let records: Vec<OhlcvRecord> = Self::deserialize_all(reader, "OHLCV")?;

        let mut rows: BTreeMap<_, OhlcvRow> = BTreeMap::new();
        for record in records {
            rows.entry(record.timestamp)
                .or_insert_with(|| OhlcvRow::new(record.timestamp))
                .bars
                .insert(record.symbol.clone(), record.bar());
        }

        Ok(rows.into_values().collect())
    }

    /// Reads a sentiment file into per-symbol series sorted by timestamp.
    ///
    /// Format: `timestamp,symbol,sentiment`
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or read
    pub fn read_sentiment(
        path: impl AsRef<Path>,
    ) -> Result<HashMap<String, Vec<SentimentObservation>>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open sentiment file: {}", path.display()))?;
        Self::sentiment_from_reader(file)
    }

    /// Same as [`read_sentiment`](Self::read_sentiment) over any reader.
    ///
    /// # Errors
    /// Returns error if reading fails
    pub fn sentiment_from_reader<R: Read>(
        reader: R,
    ) -> Result<HashMap<String, Vec<SentimentObservation>>> {
        let records: Vec<SentimentRecord> = Self::deserialize_all(reader, "sentiment")?;

        let mut series: HashMap<String, Vec<SentimentObservation>> = HashMap::new();
        for record in records {
            if !record.sentiment.is_finite() {
                tracing::warn!(symbol = %record.symbol, "Skipping non-finite sentiment score");
                continue;
            }
            series
                .entry(record.symbol.clone())
                .or_default()
                .push(record.observation());
        }
        for observations in series.values_mut() {
            observations.sort_by_key(|obs| obs.timestamp);
        }

        Ok(series)
    }

    /// Loads both files into a [`DataBundle`].
    ///
    /// # Errors
    /// Returns error if either file cannot be read
    pub fn load_bundle(
        ohlcv_path: impl AsRef<Path>,
        sentiment_path: impl AsRef<Path>,
    ) -> Result<DataBundle> {
        let ohlcv = Self::read_ohlcv(ohlcv_path)?;
        let sentiment = Self::read_sentiment(sentiment_path)?;
        tracing::info!(
            bars = ohlcv.len(),
            sentiment_symbols = sentiment.len(),
            "Loaded market data"
        );
        Ok(DataBundle::new(ohlcv, sentiment))
    }

    /// Writes target weights as `symbol,weight`.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_allocation(path: impl AsRef<Path>, allocation: &TargetAllocation) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        let mut writer = Writer::from_writer(file);

        for (symbol, weight) in allocation.iter() {
            writer.serialize(AllocationRecord {
                symbol: symbol.to_string(),
                weight,
            })?;
        }

        writer.flush()?;
        Ok(())
    }

    fn deserialize_all<R: Read, T: DeserializeOwned>(reader: R, kind: &str) -> Result<Vec<T>> {
        let mut reader = Reader::from_reader(reader);
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for result in reader.deserialize::<T>() {
            match result {
                Ok(record) => records.push(record),
                Err(e) if e.is_io_error() => {
                    return Err(e).with_context(|| format!("Failed to read {kind} data"));
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping malformed {} row: {}", kind, e);
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed {} rows", skipped, kind);
        }
        Ok(records)
    }
}
