pub mod allocation;
pub mod bundle;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod events;
pub mod indicators;
pub mod traits;

pub use allocation::{MissingDataPolicy, TargetAllocation};
pub use bundle::DataBundle;
pub use config::{AppConfig, ConfigError, DataConfig, StrategyConfig};
pub use config_loader::ConfigLoader;
pub use error::MissingData;
pub use events::{OhlcvRow, PriceBar, SentimentObservation};
pub use traits::{AllocationStrategy, DataFeed, MarketData};
