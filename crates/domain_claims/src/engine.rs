//! Disposition engine
//!
//! Pure and synchronous: given a claim, its policy, the user's recent claim
//! count and a config snapshot, produce a disposition and, for decided
//! outcomes, a payout. Persisting the result is the caller's job.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use domain_rating::Policy;

use crate::claim::{Claim, ClaimStatus};
use crate::config::AutomationConfig;
use crate::disposition::{DecisionResult, Disposition};
use crate::payout::{compute_payout, Payout};
use crate::rules::{evaluate_chain, DecisionContext};

/// Applies the disposition chain under one configuration snapshot
#[derive(Debug, Clone, Default)]
pub struct DispositionEngine {
    config: Arc<AutomationConfig>,
}

impl DispositionEngine {
    pub fn new(config: Arc<AutomationConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    /// Decides a submitted claim
    ///
    /// Returns `Disabled` when automation is off and `AlreadyDecided` when
    /// the claim has left `Submitted`; neither touches the claim.
    pub fn decide(
        &self,
        claim: &Claim,
        policy: Option<&Policy>,
        recent_claims: u32,
        now: DateTime<Utc>,
    ) -> DecisionResult {
        if !self.config.enabled {
            return DecisionResult::Disabled;
        }
        if claim.status != ClaimStatus::Submitted {
            return DecisionResult::AlreadyDecided { status: claim.status };
        }

        let ctx = DecisionContext {
            claim,
            policy,
            recent_claims,
            now,
            config: &self.config,
        };
        let disposition = evaluate_chain(&ctx);

        debug!(
            claim_id = %claim.id,
            rule = ?disposition.rule,
            outcome = %disposition.outcome,
            "Disposition rule fired"
        );

        DecisionResult::Decided(disposition)
    }

    /// Payout owed for a disposition, `None` while the claim is in review
    pub fn payout(&self, disposition: &Disposition, policy: Option<&Policy>, claim: &Claim) -> Option<Payout> {
        let currency = policy.map(|p| p.premium().currency()).unwrap_or_default();
        compute_payout(disposition.outcome, claim.assessment.severity, policy, currency)
    }
}
