use crate::allocation::TargetAllocation;
use crate::events::SentimentObservation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only view of the market data supplied for one interval.
pub trait MarketData: Send + Sync {
    /// Sentiment observations for `symbol`, oldest first.
    fn sentiment(&self, symbol: &str) -> Option<&[SentimentObservation]>;

    /// Simple moving average of closes over `window` bars, oldest first.
    ///
    /// `None` when there are fewer than `window` closes for `symbol`.
    fn moving_average(&self, symbol: &str, window: usize) -> Option<Vec<Decimal>>;

    /// Close of the most recent bar for `symbol`.
    fn latest_close(&self, symbol: &str) -> Option<Decimal>;
}

/// Auxiliary data feed a strategy asks the framework to supply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "symbol", rename_all = "snake_case")]
pub enum DataFeed {
    SocialSentiment(String),
}

/// A rebalancing rule that turns one interval's data into target weights.
pub trait AllocationStrategy: Send + Sync {
    /// Instruments the strategy trades.
    fn assets(&self) -> &[String];

    /// Rebalancing interval, e.g. `"1day"`.
    fn interval(&self) -> &str;

    /// Feeds that must be present in the data handed to [`run`](Self::run).
    fn data_feeds(&self) -> Vec<DataFeed>;

    /// Target allocation for the next interval.
    fn run(&self, data: &dyn MarketData) -> TargetAllocation;

    fn name(&self) -> &str;
}
