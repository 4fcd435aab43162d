//! Claim automation service
//!
//! Loads everything a disposition needs through a [`ClaimsPort`], runs the
//! [`DispositionEngine`] against the current configuration snapshot and
//! writes the result back with a conditional update.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use core_kernel::{months_before, ClaimId, PortError};

use crate::claim::{Claim, ClaimDecision, ClaimStatus};
use crate::config::AutomationConfig;
use crate::disposition::{DecisionResult, Disposition};
use crate::engine::DispositionEngine;
use crate::error::ClaimError;
use crate::payout::Payout;
use crate::ports::ClaimsPort;
use crate::review::ReviewDecision;

/// Why an automatic decision was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Automation is switched off
    Disabled,
    /// The claim had already left `Submitted` when it was loaded
    AlreadyDecided { status: ClaimStatus },
    /// Another worker decided the claim between load and write
    Superseded,
}

/// Result of [`ClaimAutomationService::apply_auto_decision`]
#[derive(Debug, Clone, PartialEq)]
pub enum AutomationOutcome {
    Applied {
        disposition: Disposition,
        payout: Option<Payout>,
    },
    Skipped(SkipReason),
}

impl AutomationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AutomationOutcome::Applied { .. })
    }
}

/// Applies automatic and manual decisions to stored claims
pub struct ClaimAutomationService {
    port: Arc<dyn ClaimsPort>,
    config: RwLock<Arc<AutomationConfig>>,
}

impl ClaimAutomationService {
    pub fn new(port: Arc<dyn ClaimsPort>, config: AutomationConfig) -> Self {
        Self {
            port,
            config: RwLock::new(Arc::new(config)),
        }
    }

    /// Current configuration snapshot
    pub async fn config(&self) -> Arc<AutomationConfig> {
        self.config.read().await.clone()
    }

    /// Replaces the whole configuration
    ///
    /// Decisions already in flight finish under the snapshot they started
    /// with.
    pub async fn update_config(&self, config: AutomationConfig) -> Result<(), ClaimError> {
        config.validate()?;
        *self.config.write().await = Arc::new(config);
        info!("Claim automation configuration updated");
        Ok(())
    }

    /// Decides a submitted claim and records the decision
    ///
    /// # Errors
    ///
    /// `ClaimNotFound` when the claim does not exist, `Port` for storage
    /// failures. Disabled automation, an already decided claim and a lost
    /// race all come back as [`AutomationOutcome::Skipped`].
    #[instrument(skip(self), fields(claim_id = %claim_id))]
    pub async fn apply_auto_decision(
        &self,
        claim_id: ClaimId,
        now: DateTime<Utc>,
    ) -> Result<AutomationOutcome, ClaimError> {
        let claim = self.load_claim(claim_id).await?;
        if claim.status != ClaimStatus::Submitted {
            return Ok(AutomationOutcome::Skipped(SkipReason::AlreadyDecided {
                status: claim.status,
            }));
        }

        let engine = DispositionEngine::new(self.config().await);
        if !engine.config().enabled {
            return Ok(AutomationOutcome::Skipped(SkipReason::Disabled));
        }

        let policy = self.port.get_policy(claim.policy_id).await?;
        let since = months_before(now, engine.config().history_window_months)?;
        let recent_claims = self.port.count_user_claims_since(claim.user_id, since).await?;

        let disposition = match engine.decide(&claim, policy.as_ref(), recent_claims, now) {
            DecisionResult::Decided(disposition) => disposition,
            DecisionResult::Disabled => return Ok(AutomationOutcome::Skipped(SkipReason::Disabled)),
            DecisionResult::AlreadyDecided { status } => {
                return Ok(AutomationOutcome::Skipped(SkipReason::AlreadyDecided { status }))
            }
        };

        let payout = engine.payout(&disposition, policy.as_ref(), &claim);
        let decision = ClaimDecision::automated(&disposition, payout, now);

        if !self.port.apply_decision_if_submitted(claim_id, decision).await? {
            warn!("Claim was decided concurrently; automatic decision discarded");
            return Ok(AutomationOutcome::Skipped(SkipReason::Superseded));
        }

        info!(
            claim_number = %claim.claim_number,
            outcome = %disposition.outcome,
            confidence = disposition.confidence,
            payout = ?payout.map(|p| p.amount.amount()),
            reason = %disposition.reason,
            "Automatic claim decision applied"
        );

        Ok(AutomationOutcome::Applied { disposition, payout })
    }

    /// Records a reviewer's decision and returns the updated claim
    ///
    /// # Errors
    ///
    /// `InvalidStatusTransition` when the claim is already approved or
    /// rejected, including when that happened concurrently.
    #[instrument(skip(self, review), fields(claim_id = %claim_id, reviewer = %review.reviewer))]
    pub async fn review_claim(
        &self,
        claim_id: ClaimId,
        review: ReviewDecision,
        now: DateTime<Utc>,
    ) -> Result<Claim, ClaimError> {
        let claim = self.load_claim(claim_id).await?;
        let policy = self.port.get_policy(claim.policy_id).await?;
        let decision = review.to_claim_decision(&claim, policy.as_ref(), now);
        let target = decision.status;

        if claim.status.is_terminal() || !self.port.apply_review_if_open(claim_id, decision).await? {
            let current = self.load_claim(claim_id).await?;
            return Err(ClaimError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: target.to_string(),
            });
        }

        info!(status = %target, "Manual claim review recorded");
        self.load_claim(claim_id).await
    }

    async fn load_claim(&self, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        self.port.get_claim(claim_id).await.map_err(|e| match e {
            PortError::NotFound { .. } => ClaimError::ClaimNotFound(claim_id.to_string()),
            other => ClaimError::Port(other),
        })
    }
}
