//! Core data types for the wager controls.

mod limits;
mod market;
mod order;
mod runner;

pub use limits::{
    ExposureSettings, LimitKind, SelectionExposures, SideLimits, StrategyLimits, TierLimits,
};
pub use market::{Market, MarketContext, MarketId, OverLimitSelections, SelectionId};
pub use order::{Order, OrderAmount, OrderPackageType, OrderViolation, Side};
pub use runner::RunnerContext;
