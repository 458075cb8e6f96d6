use crate::error::MissingData;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target portfolio weights for the next interval.
///
/// Weights are fractions of total capital. They need not sum to one; an
/// instrument absent from the map is implicitly zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetAllocation {
    weights: BTreeMap<String, Decimal>,
}

impl TargetAllocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight for `symbol`, replacing any previous entry.
    pub fn set(&mut self, symbol: impl Into<String>, weight: Decimal) {
        self.weights.insert(symbol.into(), weight);
    }

    /// Weight for `symbol`, zero when absent.
    #[must_use]
    pub fn weight(&self, symbol: &str) -> Decimal {
        self.weights.get(symbol).copied().unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.weights.contains_key(symbol)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }
}

impl FromIterator<(String, Decimal)> for TargetAllocation {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// What to allocate when an instrument cannot be evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Hold nothing in the instrument for the interval.
    #[default]
    ZeroAllocation,
}

impl MissingDataPolicy {
    #[must_use]
    pub const fn resolve(self, _reason: &MissingData) -> Decimal {
        match self {
            Self::ZeroAllocation => Decimal::ZERO,
        }
    }
}
