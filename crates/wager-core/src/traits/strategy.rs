//! Strategy trait definitions.

use crate::traits::limit_resolver::{ClassificationLimits, FlatLimits, LimitResolver};
use crate::types::{Market, Order, RunnerContext, StrategyLimits};

/// The strategy side of the pre-trade controls.
///
/// Strategies own their exposure limits and per-selection runner state. The
/// controls only read limits, fetch a runner context and ask the strategy to
/// vet its own order before any exposure checks run.
pub trait Strategy: Send + Sync {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Exposure limits for this strategy.
    fn limits(&self) -> &StrategyLimits;

    /// Get (creating if needed) the runner context for the order's selection.
    fn runner_context(&mut self, market: &Market, order: &Order) -> RunnerContext;

    /// Strategy-specific pre-check.
    ///
    /// Returning `false` rejects the order; the order's `violation_msg` is
    /// reported as the reason.
    fn validate_order(&self, runner_context: &RunnerContext, order: &Order) -> bool;

    /// How order and selection caps are resolved.
    ///
    /// Uses the classification table when the limits carry one, the flat
    /// per-side caps otherwise.
    fn limit_resolver(&self) -> &dyn LimitResolver {
        if self.limits().exposure_settings.is_some() {
            &ClassificationLimits
        } else {
            &FlatLimits
        }
    }
}
