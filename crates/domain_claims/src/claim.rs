//! Claim aggregate
//!
//! # Status transitions
//!
//! ```text
//! Submitted -> InReview | Approved | Rejected   (automated or manual)
//! InReview  -> Approved | Rejected              (manual only)
//! ```
//!
//! Approved and Rejected are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use core_kernel::{ClaimId, PolicyId, UserId};

use crate::disposition::Disposition;
use crate::error::ClaimError;
use crate::payout::Payout;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Awaiting a disposition
    Submitted,
    /// Held for a human reviewer
    #[serde(rename = "In Review")]
    InReview,
    Approved,
    Rejected,
}

impl ClaimStatus {
    /// Approved and Rejected claims never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::InReview => "In Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// Who moved a claim to its current status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionSource {
    /// The disposition rule chain
    Automated,
    /// A human reviewer
    Manual { reviewer: String },
}

/// Output of the external damage-assessment pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlAssessment {
    /// Damage severity 0-100
    pub severity: Option<u8>,
    /// Model confidence 0.0-1.0
    pub confidence: Option<f64>,
    /// Free-text names of damaged parts
    pub damage_parts: BTreeSet<String>,
    /// Set when the assessment pass itself failed
    pub validation_error: Option<String>,
}

impl MlAssessment {
    /// Creates an assessment, rejecting out-of-range values
    pub fn new(
        severity: Option<u8>,
        confidence: Option<f64>,
        damage_parts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ClaimError> {
        let assessment = Self {
            severity,
            confidence,
            damage_parts: damage_parts.into_iter().map(Into::into).collect(),
            validation_error: None,
        };
        assessment.validate()?;
        Ok(assessment)
    }

    /// An assessment whose pass failed with `error`
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            validation_error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClaimError> {
        if let Some(severity) = self.severity {
            if severity > 100 {
                return Err(ClaimError::invalid_assessment(format!(
                    "severity must be 0-100, got {}",
                    severity
                )));
            }
        }
        if let Some(confidence) = self.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ClaimError::invalid_assessment(format!(
                    "confidence must be 0.0-1.0, got {}",
                    confidence
                )));
            }
        }
        Ok(())
    }

    /// Confidence with absent or non-finite values read as zero
    pub fn effective_confidence(&self) -> f64 {
        self.confidence.filter(|c| c.is_finite()).unwrap_or(0.0)
    }
}

/// Audit trail of an automated decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationRecord {
    pub auto: bool,
    pub reason: String,
    pub confidence: f64,
    pub decided_at: DateTime<Utc>,
}

/// Audit trail of a manual review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewer: String,
    pub notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

/// Status change with everything persisted alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDecision {
    pub status: ClaimStatus,
    pub source: DecisionSource,
    pub reason: String,
    pub confidence: f64,
    pub payout: Option<Payout>,
    pub decided_at: DateTime<Utc>,
}

impl ClaimDecision {
    /// The decision recorded for an automated disposition
    pub fn automated(disposition: &Disposition, payout: Option<Payout>, decided_at: DateTime<Utc>) -> Self {
        Self {
            status: disposition.outcome.status(),
            source: DecisionSource::Automated,
            reason: disposition.reason.clone(),
            confidence: disposition.confidence,
            payout,
            decided_at,
        }
    }
}

/// A motor claim against an issued policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub claim_number: String,
    pub policy_id: PolicyId,
    pub user_id: UserId,
    pub description: String,
    pub submitted_at: DateTime<Utc>,
    pub status: ClaimStatus,
    pub assessment: MlAssessment,
    pub automation: Option<AutomationRecord>,
    pub review: Option<ReviewRecord>,
    pub payout: Option<Payout>,
    /// True once approved, false once rejected, unset before either
    pub verified: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a submitted claim with no assessment yet
    pub fn submit(
        policy_id: PolicyId,
        user_id: UserId,
        description: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let id = ClaimId::new_v7();

        Self {
            id,
            claim_number: generate_claim_number(&id, submitted_at),
            policy_id,
            user_id,
            description: description.into(),
            submitted_at,
            status: ClaimStatus::Submitted,
            assessment: MlAssessment::default(),
            automation: None,
            review: None,
            payout: None,
            verified: None,
            updated_at: submitted_at,
        }
    }

    /// Attaches the damage assessment
    pub fn with_assessment(mut self, assessment: MlAssessment) -> Self {
        self.assessment = assessment;
        self
    }

    /// Records a status change with its audit trail and payout
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` when the source may not make this
    /// move from the current status.
    pub fn record_decision(&mut self, decision: ClaimDecision) -> Result<(), ClaimError> {
        if !self.can_transition_to(decision.status, &decision.source) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: decision.status.to_string(),
            });
        }

        match decision.source {
            DecisionSource::Automated => {
                self.automation = Some(AutomationRecord {
                    auto: true,
                    reason: decision.reason,
                    confidence: decision.confidence,
                    decided_at: decision.decided_at,
                });
            }
            DecisionSource::Manual { reviewer } => {
                self.review = Some(ReviewRecord {
                    reviewer,
                    notes: Some(decision.reason).filter(|r| !r.is_empty()),
                    reviewed_at: decision.decided_at,
                });
            }
        }

        self.status = decision.status;
        self.verified = match decision.status {
            ClaimStatus::Approved => Some(true),
            ClaimStatus::Rejected => Some(false),
            _ => self.verified,
        };
        if decision.payout.is_some() {
            self.payout = decision.payout;
        }
        self.updated_at = decision.decided_at;
        Ok(())
    }

    fn can_transition_to(&self, target: ClaimStatus, source: &DecisionSource) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target, source),
            (Submitted, InReview | Approved | Rejected, _)
                | (InReview, Approved | Rejected, DecisionSource::Manual { .. })
        )
    }
}

/// Format: CLM-{YEAR}{MONTH}{DAY}-{first 8 hex digits of the id}
fn generate_claim_number(id: &ClaimId, submitted_at: DateTime<Utc>) -> String {
    format!(
        "CLM-{}-{:08X}",
        submitted_at.format("%Y%m%d"),
        id.as_uuid().as_fields().0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(status: ClaimStatus, source: DecisionSource) -> ClaimDecision {
        ClaimDecision {
            status,
            source,
            reason: "test".to_string(),
            confidence: 1.0,
            payout: None,
            decided_at: Utc::now(),
        }
    }

    fn manual() -> DecisionSource {
        DecisionSource::Manual { reviewer: "adjuster-7".to_string() }
    }

    #[test]
    fn test_assessment_rejects_out_of_range_values() {
        assert!(MlAssessment::new(Some(101), Some(0.5), ["bumper"]).is_err());
        assert!(MlAssessment::new(Some(50), Some(1.5), ["bumper"]).is_err());
        assert!(MlAssessment::new(Some(50), Some(f64::NAN), ["bumper"]).is_err());
        assert!(MlAssessment::new(None, None, Vec::<String>::new()).is_ok());
    }

    #[test]
    fn test_automated_decision_from_submitted() {
        let mut claim = Claim::submit(PolicyId::new(), UserId::new(), "rear-ended", Utc::now());
        claim.record_decision(decision(ClaimStatus::Approved, DecisionSource::Automated)).unwrap();

        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.verified, Some(true));
        assert!(claim.automation.as_ref().unwrap().auto);
    }

    #[test]
    fn test_automation_cannot_leave_review() {
        let mut claim = Claim::submit(PolicyId::new(), UserId::new(), "hail", Utc::now());
        claim.record_decision(decision(ClaimStatus::InReview, DecisionSource::Automated)).unwrap();

        let result = claim.record_decision(decision(ClaimStatus::Approved, DecisionSource::Automated));
        assert!(matches!(result, Err(ClaimError::InvalidStatusTransition { .. })));

        claim.record_decision(decision(ClaimStatus::Rejected, manual())).unwrap();
        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(claim.verified, Some(false));
        assert_eq!(claim.review.as_ref().unwrap().reviewer, "adjuster-7");
    }

    #[test]
    fn test_terminal_status_is_final() {
        let mut claim = Claim::submit(PolicyId::new(), UserId::new(), "flood", Utc::now());
        claim.record_decision(decision(ClaimStatus::Rejected, DecisionSource::Automated)).unwrap();

        assert!(claim.status.is_terminal());
        assert!(claim.record_decision(decision(ClaimStatus::Approved, manual())).is_err());
    }

    #[test]
    fn test_in_review_serializes_with_space() {
        assert_eq!(serde_json::to_string(&ClaimStatus::InReview).unwrap(), "\"In Review\"");
    }
}
