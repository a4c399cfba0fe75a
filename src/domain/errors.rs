//! # Domain Errors
//!
//! Violations of the shipping data model's invariants.

use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A monetary amount was negative where only non-negative amounts are allowed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Amounts in different currencies were combined.
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency established by the first amount.
        expected: String,
        /// Conflicting currency.
        actual: String,
    },

    /// Weights in different units were combined.
    #[error("weight unit mismatch: expected {expected}, got {actual}")]
    WeightUnitMismatch {
        /// Unit established by the first weight.
        expected: String,
        /// Conflicting unit.
        actual: String,
    },

    /// A commodity carries neither a customs value nor a unit price.
    #[error("commodity {index} has no customs value or unit price")]
    MissingValuation {
        /// Position of the commodity in the shipment.
        index: usize,
    },

    /// Arithmetic overflow while aggregating amounts.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl DomainError {
    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount(message.into())
    }

    /// Creates a currency mismatch error.
    #[must_use]
    pub fn currency_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::CurrencyMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
