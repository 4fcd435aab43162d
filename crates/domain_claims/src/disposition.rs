//! Disposition results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::claim::ClaimStatus;
use crate::rules::DispositionRule;

/// Outcome assigned to a submitted claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Approved,
    Rejected,
    #[serde(rename = "In Review")]
    InReview,
}

impl Outcome {
    /// Claim status this outcome moves the claim to
    pub fn status(&self) -> ClaimStatus {
        match self {
            Outcome::Approved => ClaimStatus::Approved,
            Outcome::Rejected => ClaimStatus::Rejected,
            Outcome::InReview => ClaimStatus::InReview,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.status(), f)
    }
}

/// Decision produced by the rule chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disposition {
    pub outcome: Outcome,
    /// Audit text explaining why the rule fired
    pub reason: String,
    pub confidence: f64,
    pub requires_review: bool,
    /// The rule that produced this disposition
    pub rule: DispositionRule,
}

impl Disposition {
    pub(crate) fn new(rule: DispositionRule, outcome: Outcome, confidence: f64, reason: String) -> Self {
        Self {
            outcome,
            reason,
            confidence,
            requires_review: outcome == Outcome::InReview,
            rule,
        }
    }
}

/// Result of asking the engine to decide a claim
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionResult {
    /// The chain produced a disposition
    Decided(Disposition),
    /// Automation is switched off; the claim must be left untouched
    Disabled,
    /// The claim is no longer `Submitted`
    AlreadyDecided { status: ClaimStatus },
}

impl DecisionResult {
    pub fn disposition(&self) -> Option<&Disposition> {
        match self {
            DecisionResult::Decided(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_no_op(&self) -> bool {
        !matches!(self, DecisionResult::Decided(_))
    }
}
