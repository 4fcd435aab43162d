//! Claims Domain Ports
//!
//! The automation service reads claims, policies and claim history, and
//! writes decisions, through [`ClaimsPort`]. Adapters decide where that data
//! lives; the service only relies on the contract documented here.
//!
//! # Atomic decisions
//!
//! Two workers may try to decide the same claim at once. Both conditional
//! writes must check the claim's stored status and write the decision as a
//! single step (a conditional `UPDATE ... WHERE status = 'Submitted'`, or a
//! write lock held across check and write), so that at most one of them
//! succeeds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, DomainPort, PolicyId, PortError, UserId};
use domain_rating::Policy;

use crate::claim::{Claim, ClaimDecision};

/// Data access required by claim automation
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Retrieves a claim, or `PortError::NotFound`
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Retrieves a policy; a missing policy is `Ok(None)`, not an error
    async fn get_policy(&self, id: PolicyId) -> Result<Option<Policy>, PortError>;

    /// Counts the user's claims submitted at or after `since`
    async fn count_user_claims_since(&self, user_id: UserId, since: DateTime<Utc>) -> Result<u32, PortError>;

    /// Records `decision` only if the claim is still `Submitted`
    ///
    /// Returns `Ok(false)` when the claim had already left `Submitted`.
    async fn apply_decision_if_submitted(&self, id: ClaimId, decision: ClaimDecision) -> Result<bool, PortError>;

    /// Records a reviewer's `decision` only if the claim is `Submitted` or
    /// `InReview`
    ///
    /// Returns `Ok(false)` when the claim was already approved or rejected.
    async fn apply_review_if_open(&self, id: ClaimId, decision: ClaimDecision) -> Result<bool, PortError>;
}

/// Mock implementation of ClaimsPort for testing
///
/// Claims and policies live in memory; conditional writes hold the claims
/// write lock across the status check and the update.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::claim::ClaimStatus;

    /// In-memory mock implementation of ClaimsPort
    #[derive(Debug, Default, Clone)]
    pub struct MockClaimsPort {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
        policies: Arc<RwLock<HashMap<PolicyId, Policy>>>,
    }

    impl MockClaimsPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores or replaces a claim
        pub async fn insert_claim(&self, claim: Claim) {
            self.claims.write().await.insert(claim.id, claim);
        }

        /// Stores or replaces a policy
        pub async fn insert_policy(&self, policy: Policy) {
            self.policies.write().await.insert(policy.id(), policy);
        }

        /// Returns a stored claim
        pub async fn claim(&self, id: ClaimId) -> Option<Claim> {
            self.claims.read().await.get(&id).cloned()
        }

        async fn apply_if(
            &self,
            id: ClaimId,
            decision: ClaimDecision,
            allowed: &[ClaimStatus],
        ) -> Result<bool, PortError> {
            let mut claims = self.claims.write().await;
            let claim = claims
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Claim", id))?;
            if !allowed.contains(&claim.status) {
                return Ok(false);
            }
            claim
                .record_decision(decision)
                .map_err(|e| PortError::conflict(e.to_string()))?;
            Ok(true)
        }
    }

    impl DomainPort for MockClaimsPort {}

    #[async_trait]
    impl ClaimsPort for MockClaimsPort {
        async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
            self.claims
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn get_policy(&self, id: PolicyId) -> Result<Option<Policy>, PortError> {
            Ok(self.policies.read().await.get(&id).cloned())
        }

        async fn count_user_claims_since(&self, user_id: UserId, since: DateTime<Utc>) -> Result<u32, PortError> {
            let count = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.user_id == user_id && c.submitted_at >= since)
                .count();
            Ok(u32::try_from(count).unwrap_or(u32::MAX))
        }

        async fn apply_decision_if_submitted(&self, id: ClaimId, decision: ClaimDecision) -> Result<bool, PortError> {
            self.apply_if(id, decision, &[ClaimStatus::Submitted]).await
        }

        async fn apply_review_if_open(&self, id: ClaimId, decision: ClaimDecision) -> Result<bool, PortError> {
            self.apply_if(id, decision, &[ClaimStatus::Submitted, ClaimStatus::InReview])
                .await
        }
    }
}
