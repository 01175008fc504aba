//! Capability traits used by the controls.

mod exposure;
mod limit_resolver;
mod strategy;

pub use exposure::{ErrorSink, ExposureCalculator};
pub use limit_resolver::{ClassificationLimits, FlatLimits, LimitResolver};
pub use strategy::Strategy;
