//! Foundation error types.

use thiserror::Error;

/// Result type for foundation operations
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors raised while constructing foundation values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),
}
