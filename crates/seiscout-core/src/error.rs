//! Error types for seiscout-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Address is empty")]
    EmptyAddress,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    #[error("Unknown variant: {0}")]
    UnknownVariant(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
