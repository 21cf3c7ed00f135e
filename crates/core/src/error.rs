//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every fallible marketplace operation fails with one of these before it
/// mutates anything. Looking up something that is not there is never an error;
/// queries return empty collections or zero instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A price string was not of the form `<symbol><digits>.<digits>`.
    #[error("invalid price format: {0}")]
    InvalidPriceFormat(String),

    /// A stock quantity was negative or would overflow the running total.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A value failed a basic shape check (e.g. a blank name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn invalid_price(msg: impl Into<String>) -> Self {
        Self::InvalidPriceFormat(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
