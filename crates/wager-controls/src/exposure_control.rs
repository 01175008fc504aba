//! Strategy exposure control.
//!
//! Runs immediately before an order is sent to the market. In order:
//!
//! 1. the strategy's own pre-check (rejects),
//! 2. the stake cap (clamps size or liability to `max_stake`),
//! 3. the per-order exposure cap (clamps),
//! 4. the per-selection exposure cap (rejects when there is no room left,
//!    clamps otherwise).
//!
//! Rejections go to the [`ErrorSink`]; adjustments come back in the
//! [`ControlDecision`] as a new copy of the order.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use wager_core::traits::{ErrorSink, ExposureCalculator, Strategy};
use wager_core::types::{LimitKind, Market, Order, OrderAmount, OrderPackageType};

use crate::clamp::clamp_to_exposure;
use crate::exposure::{order_exposure, order_stake, potential_selection_exposure};

/// Exposure control configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Orders are rejected when the selection's remaining exposure room is at
    /// or below this amount.
    pub rejection_threshold: Decimal,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rejection_threshold: Decimal::ONE,
        }
    }
}

/// Step of the control that acted on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStage {
    StrategyCheck,
    Stake,
    OrderExposure,
    SelectionExposure,
}

impl std::fmt::Display for ControlStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlStage::StrategyCheck => write!(f, "strategy_check"),
            ControlStage::Stake => write!(f, "max_stake"),
            ControlStage::OrderExposure => write!(f, "max_order_exposure"),
            ControlStage::SelectionExposure => write!(f, "max_selection_exposure"),
        }
    }
}

/// A size or liability reduction applied by one stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub stage: ControlStage,
    pub from: Decimal,
    pub to: Decimal,
}

/// Decision from the exposure control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ControlDecision {
    /// Order passes unchanged
    Approved { order: Order },
    /// Order passes with a reduced size or liability
    Modified {
        order: Order,
        adjustments: Vec<Adjustment>,
    },
    /// Order must not be sent
    Rejected { stage: ControlStage, reason: String },
}

impl ControlDecision {
    pub fn is_approved(&self) -> bool {
        matches!(
            self,
            ControlDecision::Approved { .. } | ControlDecision::Modified { .. }
        )
    }

    /// The order to send, if any.
    pub fn order(&self) -> Option<&Order> {
        match self {
            ControlDecision::Approved { order } => Some(order),
            ControlDecision::Modified { order, .. } => Some(order),
            ControlDecision::Rejected { .. } => None,
        }
    }

    pub fn into_order(self) -> Option<Order> {
        match self {
            ControlDecision::Approved { order } | ControlDecision::Modified { order, .. } => {
                Some(order)
            }
            ControlDecision::Rejected { .. } => None,
        }
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        match self {
            ControlDecision::Modified { adjustments, .. } => adjustments,
            _ => &[],
        }
    }
}

const CONTROL_NAME: &str = "STRATEGY_EXPOSURE";

/// Pre-trade control enforcing a strategy's stake, order and selection caps.
pub struct ExposureControl<C> {
    config: ControlConfig,
    exposures: C,
}

impl<C: ExposureCalculator> ExposureControl<C> {
    /// Create a new exposure control reading matched exposure from `exposures`.
    pub fn new(config: ControlConfig, exposures: C) -> Self {
        Self { config, exposures }
    }

    pub fn exposures(&self) -> &C {
        &self.exposures
    }

    pub fn exposures_mut(&mut self) -> &mut C {
        &mut self.exposures
    }

    /// Validate an order about to be sent in `package_type`.
    ///
    /// Cancels and updates cannot add exposure and pass untouched. Any
    /// rejection is also reported to `errors`; a selection rejected for lack of
    /// room is recorded in the market context's over-limit list.
    pub fn validate(
        &self,
        order: &Order,
        package_type: OrderPackageType,
        strategy: &mut dyn Strategy,
        market: &mut Market,
        errors: &mut dyn ErrorSink,
    ) -> ControlDecision {
        if !package_type.adds_exposure() {
            trace!(order_id = %order.id, ?package_type, "skipping exposure checks");
            return ControlDecision::Approved {
                order: order.clone(),
            };
        }

        let runner_context = strategy.runner_context(market, order);
        if !strategy.validate_order(&runner_context, order) {
            let reason = order.violation_msg.clone().unwrap_or_else(|| {
                format!("strategy.validate_order failed for {}", strategy.name())
            });
            return reject(order, ControlStage::StrategyCheck, reason, errors);
        }

        let strategy: &dyn Strategy = strategy;
        let mut amount = order.amount;
        let mut adjustments = Vec::new();

        // Stake cap: the raw amount, not scaled by price
        let max_stake = strategy.limits().max_stake;
        if order_stake(&amount) > max_stake {
            amount = apply(
                order,
                amount,
                amount.with_amount(max_stake),
                ControlStage::Stake,
                &mut adjustments,
            );
        }

        let resolver = strategy.limit_resolver();

        let order_cap =
            resolver.resolve_limit(strategy, market, order, LimitKind::MaxOrderExposure);
        if order_exposure(order.side, &amount) > order_cap {
            amount = apply(
                order,
                amount,
                clamp_to_exposure(order.side, amount, order_cap),
                ControlStage::OrderExposure,
                &mut adjustments,
            );
        }

        let selection_cap =
            resolver.resolve_limit(strategy, market, order, LimitKind::MaxSelectionExposure);
        let matched = self
            .exposures
            .exposures(strategy.name(), market, order)
            .matched_profit_if_win;
        let remaining = selection_cap - matched.abs();
        let potential = potential_selection_exposure(matched, order.side, &amount);

        if remaining <= self.config.rejection_threshold {
            market
                .context
                .record_over_limit(strategy.name(), &order.market_id, order.selection_id);
            let reason = format!(
                "Potential selection exposure ({:.2}) for {} is greater than the strategy.max_selection_exposure ({})",
                potential.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
                strategy.name(),
                selection_cap.normalize(),
            );
            return reject(order, ControlStage::SelectionExposure, reason, errors);
        }

        if potential > selection_cap {
            amount = apply(
                order,
                amount,
                clamp_to_exposure(order.side, amount, remaining),
                ControlStage::SelectionExposure,
                &mut adjustments,
            );
        }

        if adjustments.is_empty() {
            trace!(order_id = %order.id, "order within all exposure limits");
            ControlDecision::Approved {
                order: order.clone(),
            }
        } else {
            ControlDecision::Modified {
                order: order.with_amount(amount),
                adjustments,
            }
        }
    }
}

/// Record a reduction from `current` to `adjusted`, if there is one.
fn apply(
    order: &Order,
    current: OrderAmount,
    adjusted: OrderAmount,
    stage: ControlStage,
    adjustments: &mut Vec<Adjustment>,
) -> OrderAmount {
    let (from, to) = (current.amount(), adjusted.amount());
    if to >= from {
        return current;
    }
    debug!(
        order_id = %order.id,
        market_id = %order.market_id,
        selection_id = %order.selection_id,
        %stage,
        field = current.amount_field(),
        %from,
        %to,
        "order reduced"
    );
    adjustments.push(Adjustment { stage, from, to });
    adjusted
}

fn reject(
    order: &Order,
    stage: ControlStage,
    reason: String,
    errors: &mut dyn ErrorSink,
) -> ControlDecision {
    warn!(
        control = CONTROL_NAME,
        order_id = %order.id,
        strategy = %order.strategy_name,
        market_id = %order.market_id,
        selection_id = %order.selection_id,
        %stage,
        %reason,
        "order rejected"
    );
    errors.on_error(order, &reason);
    ControlDecision::Rejected { stage, reason }
}
