//! Domain-level errors.
//!
//! These errors represent business rule violations.
//! They are independent of infrastructure concerns (HTTP, storage).

use rust_decimal::Decimal;
use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Account balance would become negative
    #[error("Invalid account balance: {0}")]
    InvalidBalance(Decimal),

    /// Username too short
    #[error("Invalid username: '{0}' must be longer than 6 characters")]
    InvalidUsername(String),

    /// Amount passed to a balance mutator was negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),
}

impl DomainError {
    /// Create an invalid username error
    pub fn invalid_username(username: impl Into<String>) -> Self {
        DomainError::InvalidUsername(username.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
