//! Exposure cap resolution.

use rust_decimal::Decimal;

use crate::traits::Strategy;
use crate::types::{LimitKind, Market, Order};

/// Resolves the cap of `kind` that applies to an order.
pub trait LimitResolver: Send + Sync {
    fn resolve_limit(
        &self,
        strategy: &dyn Strategy,
        market: &Market,
        order: &Order,
        kind: LimitKind,
    ) -> Decimal;
}

/// Per-side constants from the strategy limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLimits;

impl LimitResolver for FlatLimits {
    fn resolve_limit(
        &self,
        strategy: &dyn Strategy,
        _market: &Market,
        order: &Order,
        kind: LimitKind,
    ) -> Decimal {
        strategy.limits().flat(order.side, kind)
    }
}

/// Caps looked up by the market's classification.
///
/// Markets with no classification, or one missing from the table, use the
/// table's fallback entry and then the flat caps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationLimits;

impl LimitResolver for ClassificationLimits {
    fn resolve_limit(
        &self,
        strategy: &dyn Strategy,
        market: &Market,
        order: &Order,
        kind: LimitKind,
    ) -> Decimal {
        let limits = strategy.limits();
        limits
            .exposure_settings
            .as_ref()
            .and_then(|settings| settings.lookup(market.classification.as_deref()))
            .map(|tier| tier.side(order.side).get(kind))
            .unwrap_or_else(|| limits.flat(order.side, kind))
    }
}
