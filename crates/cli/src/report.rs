#![allow(clippy::format_push_string)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sentiment_alloc_core::{AllocationStrategy, MarketData, TargetAllocation};
use sentiment_alloc_strategy::{Regime, SentimentTrendStrategy, Snapshot};
use serde::Serialize;

/// Allocation plus the per-instrument reasoning behind it.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    pub strategy: String,
    pub interval: String,
    pub as_of: Option<DateTime<Utc>>,
    pub allocation: TargetAllocation,
    pub instruments: Vec<InstrumentReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstrumentReport {
    pub symbol: String,
    pub weight: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regime: Option<Regime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
}

impl AllocationReport {
    #[must_use]
    pub fn build(
        strategy: &SentimentTrendStrategy,
        data: &dyn MarketData,
        as_of: Option<DateTime<Utc>>,
    ) -> Self {
        let mut allocation = TargetAllocation::new();
        let mut instruments = Vec::with_capacity(strategy.assets().len());

        for symbol in strategy.assets() {
            let outcome = strategy.evaluate(symbol, data);
            let weight = strategy.resolve(&outcome);
            allocation.set(symbol.clone(), weight);

            instruments.push(match outcome {
                Ok(decision) => InstrumentReport {
                    symbol: symbol.clone(),
                    weight,
                    regime: Some(decision.regime),
                    snapshot: Some(decision.snapshot),
                    missing: None,
                },
                Err(reason) => InstrumentReport {
                    symbol: symbol.clone(),
                    weight,
                    regime: None,
                    snapshot: None,
                    missing: Some(reason.to_string()),
                },
            });
        }

        Self {
            strategy: strategy.name().to_string(),
            interval: strategy.interval().to_string(),
            as_of,
            allocation,
            instruments,
        }
    }
}

pub struct AllocationFormatter;

impl AllocationFormatter {
    #[must_use]
    pub fn format(report: &AllocationReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    TARGET ALLOCATION                          \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str(&format!("Strategy:              {}\n", report.strategy));
        output.push_str(&format!("Interval:              {}\n", report.interval));
        match report.as_of {
            Some(ts) => output.push_str(&format!(
                "As Of:                 {}\n",
                ts.format("%Y-%m-%d %H:%M:%S UTC")
            )),
            None => output.push_str("As Of:                 latest\n"),
        }
        output.push('\n');

        output.push_str("Instruments\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "{:<8} {:>8} {:<9} {:>9} {:>10} {:>10} {:>10}\n",
            "Symbol", "Weight", "Regime", "Sentiment", "Price", "Short MA", "Long MA"
        ));
        for instrument in &report.instruments {
            let weight = format!("{:.2}%", instrument.weight * Decimal::from(100));
            match (&instrument.regime, &instrument.snapshot) {
                (Some(regime), Some(snap)) => output.push_str(&format!(
                    "{:<8} {:>8} {:<9} {:>9.3} {:>10.2} {:>10.2} {:>10.2}\n",
                    instrument.symbol,
                    weight,
                    format!("{regime:?}"),
                    snap.sentiment,
                    snap.price,
                    snap.short_ma,
                    snap.long_ma
                )),
                _ => output.push_str(&format!(
                    "{:<8} {:>8} {}\n",
                    instrument.symbol,
                    weight,
                    instrument.missing.as_deref().unwrap_or("not evaluated")
                )),
            }
        }
        output.push('\n');

        output.push_str(&format!(
            "Total Allocated:       {:.2}%\n",
            report.allocation.total() * Decimal::from(100)
        ));
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        if report.allocation.total() == Decimal::ZERO {
            output.push_str("\n⚠️  Nothing allocated this interval.\n\n");
        }

        output
    }
}
