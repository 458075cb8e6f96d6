//! File-backed market data for the allocation rule.
//!
//! This crate provides:
//! - CSV record models for OHLCV bars, sentiment readings and allocations
//! - Loaders that assemble a [`DataBundle`](sentiment_alloc_core::DataBundle)
//! - An allocation CSV writer

pub mod csv_storage;
pub mod models;

pub use csv_storage::CsvStorage;
pub use models::{AllocationRecord, OhlcvRecord, SentimentRecord};
