use rust_decimal::Decimal;
use sentiment_alloc_core::{
    AllocationStrategy, ConfigError, DataFeed, MarketData, MissingData, MissingDataPolicy,
    StrategyConfig, TargetAllocation,
};
use serde::Serialize;

/// Market read for one instrument on one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Sentiment above threshold and short MA above long MA.
    Bullish,
    /// Sentiment below threshold, or price under the long MA.
    Bearish,
    /// Everything else.
    Neutral,
}

/// Latest values the rule looks at for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub sentiment: f64,
    pub price: Decimal,
    pub short_ma: Decimal,
    pub long_ma: Decimal,
}

/// Outcome of evaluating one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    pub regime: Regime,
    pub weight: Decimal,
    pub snapshot: Snapshot,
}

/// Social-sentiment and moving-average trend allocation rule.
///
/// For every configured ticker:
/// - **Bullish** (`sentiment > threshold` and `short MA > long MA`):
///   `bullish_weight / N`
/// - **Bearish** (`sentiment < threshold` or `price < long MA`): zero
/// - **Neutral** otherwise: `neutral_weight / N`
///
/// The checks run in that order, so a strong-sentiment instrument trading
/// under its long MA is still liquidated. Instruments missing sentiment or
/// price history get the [`MissingDataPolicy`] weight.
///
/// Defaults: AAPL and TSLA, 20/50 MAs, threshold 0.5, weights 0.5 and 0.25.
#[derive(Debug, Clone)]
pub struct SentimentTrendStrategy {
    config: StrategyConfig,
    policy: MissingDataPolicy,
}

impl SentimentTrendStrategy {
    /// Creates the strategy after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is inconsistent.
    pub fn new(config: StrategyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: MissingDataPolicy::default(),
        })
    }

    /// Applies the bullish, bearish, neutral checks in order.
    #[must_use]
    pub fn classify(&self, snapshot: &Snapshot) -> Regime {
        let threshold = self.config.sentiment_threshold;

        if snapshot.sentiment > threshold && snapshot.short_ma > snapshot.long_ma {
            Regime::Bullish
        } else if snapshot.sentiment < threshold || snapshot.price < snapshot.long_ma {
            Regime::Bearish
        } else {
            Regime::Neutral
        }
    }

    /// Per-instrument weight for `regime`, split evenly across the tracked tickers.
    #[must_use]
    pub fn weight_for(&self, regime: Regime) -> Decimal {
        let count = Decimal::from(self.config.tickers.len());
        match regime {
            Regime::Bullish => self.config.bullish_weight / count,
            Regime::Bearish => Decimal::ZERO,
            Regime::Neutral => self.config.neutral_weight / count,
        }
    }

    /// Gathers the latest inputs for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns the first missing input: sentiment, then the short and long
    /// moving averages, then the latest close.
    pub fn snapshot(&self, symbol: &str, data: &dyn MarketData) -> Result<Snapshot, MissingData> {
        let sentiment = data
            .sentiment(symbol)
            .and_then(|series| series.last())
            .map(|obs| obs.score)
            .ok_or_else(|| MissingData::NoSentimentData {
                symbol: symbol.to_string(),
            })?;

        let short_ma = Self::latest_ma(symbol, data, self.config.short_window)?;
        let long_ma = Self::latest_ma(symbol, data, self.config.long_window)?;

        let price = data
            .latest_close(symbol)
            .ok_or_else(|| MissingData::NoClosePrice {
                symbol: symbol.to_string(),
            })?;

        Ok(Snapshot {
            sentiment,
            price,
            short_ma,
            long_ma,
        })
    }

    /// Evaluates one instrument without applying the missing-data policy.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData`] when sentiment, moving averages, or the latest
    /// close are unavailable.
    pub fn evaluate(&self, symbol: &str, data: &dyn MarketData) -> Result<Decision, MissingData> {
        let snapshot = self.snapshot(symbol, data)?;
        let regime = self.classify(&snapshot);
        Ok(Decision {
            regime,
            weight: self.weight_for(regime),
            snapshot,
        })
    }

    /// Weight to hold for one evaluation outcome.
    ///
    /// Missing data is logged and mapped through the [`MissingDataPolicy`].
    #[must_use]
    pub fn resolve(&self, outcome: &Result<Decision, MissingData>) -> Decimal {
        match outcome {
            Ok(decision) => {
                tracing::debug!(
                    regime = ?decision.regime,
                    sentiment = decision.snapshot.sentiment,
                    price = %decision.snapshot.price,
                    short_ma = %decision.snapshot.short_ma,
                    long_ma = %decision.snapshot.long_ma,
                    weight = %decision.weight,
                    "Allocation decided"
                );
                decision.weight
            }
            Err(reason) => {
                tracing::info!(symbol = %reason.symbol(), "{reason}");
                self.policy.resolve(reason)
            }
        }
    }

    fn latest_ma(symbol: &str, data: &dyn MarketData, window: usize) -> Result<Decimal, MissingData> {
        data.moving_average(symbol, window)
            .and_then(|series| series.last().copied())
            .ok_or_else(|| MissingData::InsufficientMovingAverage {
                symbol: symbol.to_string(),
                window,
            })
    }
}

impl AllocationStrategy for SentimentTrendStrategy {
    fn assets(&self) -> &[String] {
        &self.config.tickers
    }

    fn interval(&self) -> &str {
        &self.config.interval
    }

    fn data_feeds(&self) -> Vec<DataFeed> {
        self.config
            .tickers
            .iter()
            .map(|ticker| DataFeed::SocialSentiment(ticker.clone()))
            .collect()
    }

    fn run(&self, data: &dyn MarketData) -> TargetAllocation {
        self.config
            .tickers
            .iter()
            .map(|symbol| {
                let span = tracing::debug_span!("evaluate", symbol = %symbol);
                let _guard = span.enter();
                let weight = self.resolve(&self.evaluate(symbol, data));
                (symbol.clone(), weight)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "Sentiment Trend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sentiment_alloc_core::SentimentObservation;
    use std::collections::HashMap;

    /// Market data with fixed latest values per symbol.
    #[derive(Default)]
    struct FixedData {
        sentiment: HashMap<String, Vec<SentimentObservation>>,
        short_ma: HashMap<String, Decimal>,
        long_ma: HashMap<String, Decimal>,
        close: HashMap<String, Decimal>,
    }

    impl FixedData {
        fn with(
            mut self,
            symbol: &str,
            sentiment: f64,
            price: Decimal,
            short_ma: Decimal,
            long_ma: Decimal,
        ) -> Self {
            self.sentiment.insert(
                symbol.to_string(),
                vec![SentimentObservation::new(Utc::now(), sentiment)],
            );
            self.close.insert(symbol.to_string(), price);
            self.short_ma.insert(symbol.to_string(), short_ma);
            self.long_ma.insert(symbol.to_string(), long_ma);
            self
        }
    }

    impl MarketData for FixedData {
        fn sentiment(&self, symbol: &str) -> Option<&[SentimentObservation]> {
            self.sentiment.get(symbol).map(Vec::as_slice)
        }

        fn moving_average(&self, symbol: &str, window: usize) -> Option<Vec<Decimal>> {
            let source = if window == 20 { &self.short_ma } else { &self.long_ma };
            source.get(symbol).map(|v| vec![*v])
        }

        fn latest_close(&self, symbol: &str) -> Option<Decimal> {
            self.close.get(symbol).copied()
        }
    }

    fn strategy() -> SentimentTrendStrategy {
        SentimentTrendStrategy::new(StrategyConfig::default()).unwrap()
    }

    #[test]
    fn test_bullish_allocates_half_split() {
        let data = FixedData::default().with("AAPL", 0.7, dec!(112), dec!(110), dec!(100));

        let decision = strategy().evaluate("AAPL", &data).unwrap();

        assert_eq!(decision.regime, Regime::Bullish);
        assert_eq!(decision.weight, dec!(0.25)); // 0.5 / 2
    }

    #[test]
    fn test_low_sentiment_is_bearish_regardless_of_trend() {
        let data = FixedData::default().with("AAPL", 0.2, dec!(150), dec!(140), dec!(100));

        let decision = strategy().evaluate("AAPL", &data).unwrap();

        assert_eq!(decision.regime, Regime::Bearish);
        assert_eq!(decision.weight, Decimal::ZERO);
    }

    #[test]
    fn test_price_under_long_ma_is_bearish() {
        // short <= long so not bullish; sentiment >= 0.5 but price dips
        let data = FixedData::default().with("AAPL", 0.6, dec!(90), dec!(95), dec!(100));

        let decision = strategy().evaluate("AAPL", &data).unwrap();

        assert_eq!(decision.regime, Regime::Bearish);
        assert_eq!(decision.weight, Decimal::ZERO);
    }

    #[test]
    fn test_neutral_residual() {
        let data = FixedData::default().with("AAPL", 0.55, dec!(105), dec!(90), dec!(100));

        let decision = strategy().evaluate("AAPL", &data).unwrap();

        assert_eq!(decision.regime, Regime::Neutral);
        assert_eq!(decision.weight, dec!(0.125)); // 0.25 / 2
    }

    #[test]
    fn test_sentiment_exactly_at_threshold() {
        // Not bullish (strict >), not bearish on sentiment (strict <)
        let s = strategy();
        let snapshot = Snapshot {
            sentiment: 0.5,
            price: dec!(120),
            short_ma: dec!(110),
            long_ma: dec!(100),
        };
        assert_eq!(s.classify(&snapshot), Regime::Neutral);

        let dipped = Snapshot {
            price: dec!(99),
            ..snapshot
        };
        assert_eq!(s.classify(&dipped), Regime::Bearish);
    }

    #[test]
    fn test_bullish_checked_before_price_dip() {
        // Bullish wins even though price < long MA
        let snapshot = Snapshot {
            sentiment: 0.9,
            price: dec!(80),
            short_ma: dec!(110),
            long_ma: dec!(100),
        };
        assert_eq!(strategy().classify(&snapshot), Regime::Bullish);
    }

    #[test]
    fn test_missing_sentiment_reason() {
        let data = FixedData::default();

        let err = strategy().evaluate("AAPL", &data).unwrap_err();

        assert_eq!(
            err,
            MissingData::NoSentimentData {
                symbol: "AAPL".to_string()
            }
        );
    }

    #[test]
    fn test_empty_sentiment_reason() {
        let mut data = FixedData::default().with("AAPL", 0.7, dec!(1), dec!(1), dec!(1));
        data.sentiment.insert("AAPL".to_string(), vec![]);

        let err = strategy().evaluate("AAPL", &data).unwrap_err();

        assert!(matches!(err, MissingData::NoSentimentData { .. }));
    }

    #[test]
    fn test_missing_long_ma_reason() {
        let mut data = FixedData::default().with("AAPL", 0.7, dec!(1), dec!(1), dec!(1));
        data.long_ma.clear();

        let err = strategy().evaluate("AAPL", &data).unwrap_err();

        assert_eq!(
            err,
            MissingData::InsufficientMovingAverage {
                symbol: "AAPL".to_string(),
                window: 50
            }
        );
    }

    #[test]
    fn test_run_covers_every_ticker() {
        let data = FixedData::default().with("AAPL", 0.7, dec!(112), dec!(110), dec!(100));

        let allocation = strategy().run(&data);

        assert_eq!(allocation.len(), 2);
        assert_eq!(allocation.weight("AAPL"), dec!(0.25));
        assert!(allocation.contains("TSLA"));
        assert_eq!(allocation.weight("TSLA"), Decimal::ZERO);
    }

    #[test]
    fn test_weights_scale_with_ticker_count() {
        let config = StrategyConfig {
            tickers: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            ..StrategyConfig::default()
        };
        let s = SentimentTrendStrategy::new(config).unwrap();

        assert_eq!(s.weight_for(Regime::Bullish), dec!(0.125));
        assert_eq!(s.weight_for(Regime::Neutral), dec!(0.0625));
        assert_eq!(s.weight_for(Regime::Bearish), Decimal::ZERO);
    }

    #[test]
    fn test_framework_surface() {
        let s = strategy();

        assert_eq!(s.assets(), ["AAPL".to_string(), "TSLA".to_string()]);
        assert_eq!(s.interval(), "1day");
        assert_eq!(
            s.data_feeds(),
            vec![
                DataFeed::SocialSentiment("AAPL".to_string()),
                DataFeed::SocialSentiment("TSLA".to_string()),
            ]
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = StrategyConfig {
            tickers: vec![],
            ..StrategyConfig::default()
        };
        assert_eq!(
            SentimentTrendStrategy::new(config).unwrap_err(),
            ConfigError::NoTickers
        );
    }
}
