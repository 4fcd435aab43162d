//! Claims domain errors
//!
//! Business outcomes (inactive policy, automation disabled, claim already
//! decided) are not errors; they come back as dispositions or skip results.

use thiserror::Error;

use core_kernel::{CoreError, PortError, TemporalError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// ML output outside its documented range
    #[error("Invalid ML assessment: {0}")]
    InvalidAssessment(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Date arithmetic error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Port error: {0}")]
    Port(#[from] PortError),
}

impl ClaimError {
    pub fn invalid_assessment(message: impl Into<String>) -> Self {
        ClaimError::InvalidAssessment(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_keeps_its_own_label() {
        let error: ClaimError = CoreError::validation("min_confidence must be between 0 and 1").into();
        assert_eq!(
            error.to_string(),
            "Core error: Validation error: min_confidence must be between 0 and 1"
        );
    }
}
