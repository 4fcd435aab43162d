//! Rating domain errors
//!
//! The rating engine is total over well-formed input: the only errors it
//! raises are malformed numeric inputs and unusable tariff books. Issued
//! policies add status transition errors.

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the rating domain
#[derive(Debug, Error)]
pub enum RatingError {
    /// An input value is negative, not a number, or otherwise unusable
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        field: String,
        reason: String,
    },

    /// A tariff book could not be loaded or failed validation
    #[error("Tariff error: {0}")]
    Tariff(String),

    /// A policy was asked to move to a status it cannot reach
    #[error("Invalid policy status transition from {from} to {to}")]
    InvalidPolicyTransition {
        from: String,
        to: String,
    },

    /// Financial calculation error
    #[error("Financial error: {0}")]
    Money(#[from] MoneyError),
}

impl RatingError {
    /// Creates an invalid input error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RatingError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a tariff error
    pub fn tariff(message: impl Into<String>) -> Self {
        RatingError::Tariff(message.into())
    }
}
