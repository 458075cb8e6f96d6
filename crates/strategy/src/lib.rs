pub mod sentiment_trend;

pub use sentiment_trend::{Decision, Regime, SentimentTrendStrategy, Snapshot};
