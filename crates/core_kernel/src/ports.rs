//! Ports and Adapters Infrastructure
//!
//! The rating and disposition engines are pure; everything they need from
//! the outside world (stored policies, claim history, conditional claim
//! updates) arrives through port traits defined in the domain crates.
//! This module holds the shared error type and marker trait those ports
//! build on.
//!
//! ```rust,ignore
//! // In domain_claims/src/ports.rs
//! #[async_trait]
//! pub trait ClaimsPort: DomainPort {
//!     async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError>;
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Adapters (database, in-memory mocks) report lookups that miss and
/// conditional writes that lose through this type.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A conditional write lost against a concurrent writer
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across tasks behind `Arc<dyn ...>`, so every
/// implementation must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Policy", "POL-123");
        assert!(matches!(error, PortError::NotFound { .. }));
        assert!(error.to_string().contains("Policy"));
        assert!(error.to_string().contains("POL-123"));
    }

    #[test]
    fn test_port_error_conflict_display() {
        let error = PortError::conflict("claim CLM-1 is no longer Submitted");
        assert_eq!(error.to_string(), "Conflict: claim CLM-1 is no longer Submitted");
    }
}
