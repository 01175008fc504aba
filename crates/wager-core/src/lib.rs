//! Core types and traits for the wager controls.
//!
//! This crate provides the foundational building blocks including:
//! - Order, market and runner context types
//! - Strategy exposure limits and classification tables
//! - Capability traits for strategies, limit resolution, exposure sources and error sinks

pub mod types;
pub mod traits;
pub mod error;

pub use error::{LimitError, WagerError, WagerResult};
pub use types::*;
pub use traits::*;
