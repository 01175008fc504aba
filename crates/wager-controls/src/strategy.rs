//! Strategy built from configuration.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wager_core::traits::Strategy;
use wager_core::types::{Market, MarketId, Order, RunnerContext, SelectionId, StrategyLimits};

/// Runner-level pre-check limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerLimits {
    /// Trades allowed per selection before a reset
    #[serde(default)]
    pub max_trade_count: Option<usize>,
    /// Trades allowed to be live at once per selection
    #[serde(default)]
    pub max_live_trade_count: Option<usize>,
    /// Minimum pause between placements on a selection
    #[serde(default)]
    pub place_reset_seconds: u64,
}

/// A strategy whose limits come from configuration.
///
/// Holds one runner context per (market, selection) and passes its
/// pre-check while the runner is executable under [`RunnerLimits`].
#[derive(Debug, Clone)]
pub struct ConfiguredStrategy {
    name: String,
    limits: StrategyLimits,
    runner_limits: RunnerLimits,
    runner_contexts: HashMap<(MarketId, SelectionId), RunnerContext>,
}

impl ConfiguredStrategy {
    pub fn new(name: impl Into<String>, limits: StrategyLimits) -> Self {
        Self {
            name: name.into(),
            limits,
            runner_limits: RunnerLimits::default(),
            runner_contexts: HashMap::new(),
        }
    }

    pub fn with_runner_limits(mut self, runner_limits: RunnerLimits) -> Self {
        self.runner_limits = runner_limits;
        self
    }

    pub fn runner_limits(&self) -> &RunnerLimits {
        &self.runner_limits
    }

    /// Mutable runner context, for recording placements and completions.
    pub fn runner_context_mut(
        &mut self,
        market_id: &MarketId,
        selection_id: SelectionId,
    ) -> &mut RunnerContext {
        self.runner_contexts
            .entry((market_id.clone(), selection_id))
            .or_insert_with(|| RunnerContext::new(selection_id))
    }
}

impl Strategy for ConfiguredStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn limits(&self) -> &StrategyLimits {
        &self.limits
    }

    fn runner_context(&mut self, market: &Market, order: &Order) -> RunnerContext {
        self.runner_context_mut(&market.market_id, order.selection_id)
            .clone()
    }

    fn validate_order(&self, runner_context: &RunnerContext, _order: &Order) -> bool {
        runner_context.executable(
            self.runner_limits.max_trade_count,
            self.runner_limits.max_live_trade_count,
            self.runner_limits.place_reset_seconds,
            Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;
    use wager_core::types::{OrderAmount, Side};

    #[test]
    fn test_runner_context_is_created_once() {
        let mut strategy = ConfiguredStrategy::new("s", StrategyLimits::default());
        let market = Market::new("1.1");
        let order = Order::new("s", "1.1", 3u64, Side::Back, OrderAmount::limit(dec!(2), dec!(3)));

        let context = strategy.runner_context(&market, &order);
        assert_eq!(context.selection_id, SelectionId(3));
        assert_eq!(context.trade_count(), 0);

        strategy
            .runner_context_mut(&market.market_id, SelectionId(3))
            .place(Uuid::new_v4(), Utc::now());
        assert_eq!(strategy.runner_context(&market, &order).trade_count(), 1);
    }

    #[test]
    fn test_validate_order_uses_runner_limits() {
        let mut strategy = ConfiguredStrategy::new("s", StrategyLimits::default())
            .with_runner_limits(RunnerLimits {
                max_live_trade_count: Some(1),
                ..Default::default()
            });
        let market = Market::new("1.1");
        let order = Order::new("s", "1.1", 3u64, Side::Lay, OrderAmount::limit(dec!(2), dec!(3)));

        let context = strategy.runner_context(&market, &order);
        assert!(strategy.validate_order(&context, &order));

        strategy
            .runner_context_mut(&market.market_id, SelectionId(3))
            .place(Uuid::new_v4(), Utc::now());
        let context = strategy.runner_context(&market, &order);
        assert!(!strategy.validate_order(&context, &order));
    }
}
