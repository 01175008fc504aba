//! Market identity and per-market shared context.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exchange market identifier, e.g. `1.234567`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(pub String);

impl MarketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarketId {
    fn from(id: &str) -> Self {
        MarketId(id.to_string())
    }
}

impl From<String> for MarketId {
    fn from(id: String) -> Self {
        MarketId(id)
    }
}

impl std::fmt::Display for MarketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exchange selection (runner) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionId(pub u64);

impl From<u64> for SelectionId {
    fn from(id: u64) -> Self {
        SelectionId(id)
    }
}

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selections blocked per strategy, then per market, in rejection order.
pub type OverLimitSelections = HashMap<String, HashMap<MarketId, Vec<SelectionId>>>;

/// Mutable key-value store shared by everything trading one market.
///
/// Arbitrary entries are kept as JSON values. The selections rejected for
/// breaching their selection exposure cap have a typed, append-only slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketContext {
    #[serde(default)]
    strategies_over_limit: OverLimitSelections,
    #[serde(default, flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl MarketContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `selection_id` was blocked for `strategy` in `market_id`.
    ///
    /// Entries are never deduplicated or pruned.
    pub fn record_over_limit(
        &mut self,
        strategy: &str,
        market_id: &MarketId,
        selection_id: SelectionId,
    ) {
        self.strategies_over_limit
            .entry(strategy.to_string())
            .or_default()
            .entry(market_id.clone())
            .or_default()
            .push(selection_id);
    }

    /// Selections blocked for `strategy` in `market_id`, oldest first.
    pub fn over_limit(&self, strategy: &str, market_id: &MarketId) -> &[SelectionId] {
        self.strategies_over_limit
            .get(strategy)
            .and_then(|markets| markets.get(market_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `selection_id` has been blocked for `strategy` in `market_id`.
    pub fn is_over_limit(
        &self,
        strategy: &str,
        market_id: &MarketId,
        selection_id: SelectionId,
    ) -> bool {
        self.over_limit(strategy, market_id).contains(&selection_id)
    }

    /// The full over-limit record.
    pub fn strategies_over_limit(&self) -> &OverLimitSelections {
        &self.strategies_over_limit
    }
}

/// A market as seen by the controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub market_id: MarketId,
    /// Classification used to look up tiered limits (venue type, region, ...)
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub context: MarketContext,
}

impl Market {
    pub fn new(market_id: impl Into<MarketId>) -> Self {
        Self {
            market_id: market_id.into(),
            classification: None,
            context: MarketContext::new(),
        }
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_limit_is_created_lazily() {
        let context = MarketContext::new();
        let market_id = MarketId::from("1.1");
        assert!(context.over_limit("s", &market_id).is_empty());
        assert!(context.strategies_over_limit().is_empty());
    }

    #[test]
    fn test_over_limit_appends_without_dedup() {
        let mut context = MarketContext::new();
        let market_id = MarketId::from("1.1");
        context.record_over_limit("s", &market_id, SelectionId(666));
        context.record_over_limit("s", &market_id, SelectionId(7));
        context.record_over_limit("s", &market_id, SelectionId(666));

        assert_eq!(
            context.over_limit("s", &market_id),
            &[SelectionId(666), SelectionId(7), SelectionId(666)]
        );
        assert!(context.is_over_limit("s", &market_id, SelectionId(7)));
        assert!(!context.is_over_limit("other", &market_id, SelectionId(7)));
        assert!(!context.is_over_limit("s", &MarketId::from("1.2"), SelectionId(7)));
    }

    #[test]
    fn test_other_values_are_untouched() {
        let mut context: MarketContext =
            serde_json::from_value(serde_json::json!({ "seen": 3 })).unwrap();
        context.record_over_limit("s", &MarketId::from("1.1"), SelectionId(1));

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["seen"], 3);
        assert_eq!(json["strategies_over_limit"]["s"]["1.1"], serde_json::json!([1]));
    }
}
