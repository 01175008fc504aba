//! Pre-trade exposure controls.
//!
//! Provides the exposure formulas, the exposure clamp and the strategy
//! exposure control that cascades stake, order and selection caps.

pub mod clamp;
pub mod exposure;
mod exposure_control;
mod snapshot;
mod strategy;

pub use clamp::{clamp_to_exposure, max_amount_for_exposure};
pub use exposure::{
    order_exposure, order_stake, potential_selection_exposure, signed_order_exposure,
};
pub use exposure_control::{
    Adjustment, ControlConfig, ControlDecision, ControlStage, ExposureControl,
};
pub use snapshot::ExposureSnapshot;
pub use strategy::{ConfiguredStrategy, RunnerLimits};
