//! Error types for the wager controls.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum WagerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Limit error: {0}")]
    Limit(#[from] LimitError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Invalid exposure limit configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimitError {
    #[error("{name} must not be negative (got {value})")]
    Negative { name: String, value: Decimal },

    #[error("Unknown classification: {0}")]
    UnknownClassification(String),
}

/// Result type alias for wager operations.
pub type WagerResult<T> = Result<T, WagerError>;
