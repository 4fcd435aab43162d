//! Manual review
//!
//! Reviewers settle claims the chain held back, and may also decide a
//! submitted claim directly. Approval pays by the same bands as automatic
//! approval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_rating::Policy;

use crate::claim::{Claim, ClaimDecision, DecisionSource};
use crate::disposition::Outcome;
use crate::payout::{compute_payout, Payout};

/// What the reviewer decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewOutcome {
    Approve,
    Reject,
}

impl ReviewOutcome {
    fn outcome(&self) -> Outcome {
        match self {
            ReviewOutcome::Approve => Outcome::Approved,
            ReviewOutcome::Reject => Outcome::Rejected,
        }
    }
}

/// A human decision on a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub outcome: ReviewOutcome,
    pub reviewer: String,
    pub notes: Option<String>,
}

impl ReviewDecision {
    pub fn approve(reviewer: impl Into<String>) -> Self {
        Self {
            outcome: ReviewOutcome::Approve,
            reviewer: reviewer.into(),
            notes: None,
        }
    }

    pub fn reject(reviewer: impl Into<String>) -> Self {
        Self {
            outcome: ReviewOutcome::Reject,
            reviewer: reviewer.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the decision to record on `claim`, payout included
    pub fn to_claim_decision(
        &self,
        claim: &Claim,
        policy: Option<&Policy>,
        decided_at: DateTime<Utc>,
    ) -> ClaimDecision {
        let outcome = self.outcome.outcome();
        let currency = policy.map(|p| p.premium().currency()).unwrap_or_default();
        let payout: Option<Payout> = compute_payout(outcome, claim.assessment.severity, policy, currency);

        ClaimDecision {
            status: outcome.status(),
            source: DecisionSource::Manual {
                reviewer: self.reviewer.clone(),
            },
            reason: self.notes.clone().unwrap_or_default(),
            confidence: 1.0,
            payout,
            decided_at,
        }
    }
}
