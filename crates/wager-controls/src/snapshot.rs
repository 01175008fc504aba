//! In-memory matched exposure.

use std::collections::HashMap;
use wager_core::traits::ExposureCalculator;
use wager_core::types::{Market, MarketId, Order, SelectionExposures, SelectionId};

/// Matched exposure per (strategy, market, selection), as last reported by
/// the blotter. Unknown selections have no exposure.
#[derive(Debug, Clone, Default)]
pub struct ExposureSnapshot {
    exposures: HashMap<(String, MarketId, SelectionId), SelectionExposures>,
}

impl ExposureSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        strategy: impl Into<String>,
        market_id: impl Into<MarketId>,
        selection_id: impl Into<SelectionId>,
        exposures: SelectionExposures,
    ) {
        self.exposures.insert(
            (strategy.into(), market_id.into(), selection_id.into()),
            exposures,
        );
    }

    pub fn get(
        &self,
        strategy: &str,
        market_id: &MarketId,
        selection_id: SelectionId,
    ) -> Option<&SelectionExposures> {
        self.exposures
            .get(&(strategy.to_string(), market_id.clone(), selection_id))
    }

    pub fn len(&self) -> usize {
        self.exposures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exposures.is_empty()
    }
}

impl ExposureCalculator for ExposureSnapshot {
    fn exposures(&self, strategy: &str, _market: &Market, order: &Order) -> SelectionExposures {
        self.get(strategy, &order.market_id, order.selection_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use wager_core::types::{OrderAmount, Side};

    #[test]
    fn test_known_and_unknown_selections() {
        let mut snapshot = ExposureSnapshot::new();
        snapshot.set("s", "1.1", 5u64, SelectionExposures::matched(dec!(-40)));
        assert_eq!(snapshot.len(), 1);

        let market = Market::new("1.1");
        let amount = OrderAmount::limit(dec!(5), dec!(11));
        let known = Order::new("s", "1.1", 5u64, Side::Lay, amount);
        let other = Order::new("s", "1.1", 6u64, Side::Lay, amount);

        assert_eq!(
            snapshot.exposures("s", &market, &known).matched_profit_if_win,
            dec!(-40)
        );
        assert_eq!(
            snapshot.exposures("s", &market, &other).matched_profit_if_win,
            Decimal::ZERO
        );
        assert_eq!(
            snapshot.exposures("t", &market, &known).matched_profit_if_win,
            Decimal::ZERO
        );
    }
}
