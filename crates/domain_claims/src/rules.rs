//! Disposition rule chain
//!
//! Rules are evaluated in [`DISPOSITION_CHAIN`] order and the first rule
//! that produces a disposition wins. Later rules may assume every earlier
//! rule declined: by the time `ConfidenceBelowMinimum` runs a severity is
//! known to be present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_rating::Policy;

use crate::claim::Claim;
use crate::config::AutomationConfig;
use crate::disposition::{Disposition, Outcome};

/// One step of the disposition chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispositionRule {
    AssessmentFailed,
    PolicyInactive,
    SuspiciousFrequency,
    HighFrequency,
    AssessmentMissing,
    ConfidenceBelowMinimum,
    CriticalDamage,
    TooMinor,
    HighSeverity,
    MidSeverity,
}

/// The rule chain in evaluation order
pub const DISPOSITION_CHAIN: [DispositionRule; 10] = [
    DispositionRule::AssessmentFailed,
    DispositionRule::PolicyInactive,
    DispositionRule::SuspiciousFrequency,
    DispositionRule::HighFrequency,
    DispositionRule::AssessmentMissing,
    DispositionRule::ConfidenceBelowMinimum,
    DispositionRule::CriticalDamage,
    DispositionRule::TooMinor,
    DispositionRule::HighSeverity,
    DispositionRule::MidSeverity,
];

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub claim: &'a Claim,
    pub policy: Option<&'a Policy>,
    /// The user's claims inside the history window
    pub recent_claims: u32,
    pub now: DateTime<Utc>,
    pub config: &'a AutomationConfig,
}

impl DispositionRule {
    /// Returns a disposition when the rule fires
    pub fn evaluate(&self, ctx: &DecisionContext<'_>) -> Option<Disposition> {
        let assessment = &ctx.claim.assessment;
        let config = ctx.config;
        let confidence = assessment.effective_confidence();

        match self {
            DispositionRule::AssessmentFailed => assessment.validation_error.as_ref().map(|error| {
                self.fire(Outcome::Rejected, 1.0, format!("ML validation failed: {}", error))
            }),

            DispositionRule::PolicyInactive => {
                if !config.require_active_policy {
                    return None;
                }
                match ctx.policy {
                    None => Some(self.fire(Outcome::Rejected, 1.0, "Policy not found".to_string())),
                    Some(policy) if !policy.is_active_at(ctx.now) => Some(self.fire(
                        Outcome::Rejected,
                        1.0,
                        format!(
                            "Policy {} is not active (status {}, cover {} to {})",
                            policy.policy_number(),
                            policy.status(),
                            policy.period().start.date_naive(),
                            policy.period().end.date_naive()
                        ),
                    )),
                    Some(_) => None,
                }
            }

            DispositionRule::SuspiciousFrequency => (ctx.recent_claims >= config.suspicious_claim_count).then(|| {
                self.fire(
                    Outcome::Rejected,
                    0.9,
                    format!(
                        "Suspicious claim frequency: {} claims in last {} months",
                        ctx.recent_claims, config.history_window_months
                    ),
                )
            }),

            DispositionRule::HighFrequency => (ctx.recent_claims >= config.high_frequency_claim_count).then(|| {
                self.fire(
                    Outcome::InReview,
                    0.7,
                    format!(
                        "High claim frequency: {} claims in last {} months - requires manual review",
                        ctx.recent_claims, config.history_window_months
                    ),
                )
            }),

            DispositionRule::AssessmentMissing => assessment.severity.is_none().then(|| {
                self.fire(
                    Outcome::InReview,
                    0.0,
                    "ML analysis unavailable - requires manual review".to_string(),
                )
            }),

            DispositionRule::ConfidenceBelowMinimum => (confidence < config.min_confidence).then(|| {
                self.fire(
                    Outcome::InReview,
                    confidence,
                    format!(
                        "Low ML confidence ({:.1}%) - requires manual review",
                        confidence * 100.0
                    ),
                )
            }),

            DispositionRule::CriticalDamage => config.critical_part_in(&assessment.damage_parts).map(|keyword| {
                let parts: Vec<&str> = assessment.damage_parts.iter().map(String::as_str).collect();
                self.fire(
                    Outcome::InReview,
                    confidence,
                    format!(
                        "Critical damage ({}) in parts: {} - requires manual review",
                        keyword,
                        parts.join(", ")
                    ),
                )
            }),

            DispositionRule::TooMinor => assessment
                .severity
                .filter(|s| *s <= config.low_severity_ceiling)
                .map(|severity| {
                    self.fire(
                        Outcome::Rejected,
                        confidence,
                        format!("Severity {}/100 is too minor to be a genuine claim", severity),
                    )
                }),

            DispositionRule::HighSeverity => assessment
                .severity
                .filter(|s| *s > config.high_severity_floor)
                .map(|severity| {
                    self.fire(
                        Outcome::Approved,
                        confidence,
                        format!(
                            "Severity {}/100 with {:.1}% confidence qualifies for automatic approval",
                            severity,
                            confidence * 100.0
                        ),
                    )
                }),

            DispositionRule::MidSeverity => Some(self.fire(
                Outcome::InReview,
                confidence,
                format!(
                    "Medium severity damage ({}/100) requires manual assessment",
                    assessment.severity.unwrap_or_default()
                ),
            )),
        }
    }

    fn fire(&self, outcome: Outcome, confidence: f64, reason: String) -> Disposition {
        Disposition::new(*self, outcome, confidence, reason)
    }
}

/// Runs the chain and returns the first disposition
///
/// `MidSeverity` always fires, so the chain is total.
pub fn evaluate_chain(ctx: &DecisionContext<'_>) -> Disposition {
    DISPOSITION_CHAIN
        .iter()
        .find_map(|rule| rule.evaluate(ctx))
        .unwrap_or_else(|| {
            Disposition::new(
                DispositionRule::MidSeverity,
                Outcome::InReview,
                0.0,
                "No rule matched - requires manual review".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::MlAssessment;
    use core_kernel::{PolicyId, UserId};

    fn config() -> AutomationConfig {
        AutomationConfig {
            require_active_policy: false,
            ..AutomationConfig::default()
        }
    }

    fn claim(assessment: MlAssessment) -> Claim {
        Claim::submit(PolicyId::new(), UserId::new(), "side impact", Utc::now()).with_assessment(assessment)
    }

    fn run(claim: &Claim, recent_claims: u32, config: &AutomationConfig) -> Disposition {
        evaluate_chain(&DecisionContext {
            claim,
            policy: None,
            recent_claims,
            now: Utc::now(),
            config,
        })
    }

    #[test]
    fn test_validation_error_beats_high_severity() {
        let mut assessment = MlAssessment::new(Some(95), Some(0.99), ["door"]).unwrap();
        assessment.validation_error = Some("image unreadable".to_string());

        let d = run(&claim(assessment), 0, &config());
        assert_eq!(d.rule, DispositionRule::AssessmentFailed);
        assert_eq!(d.outcome, Outcome::Rejected);
        assert_eq!(d.reason, "ML validation failed: image unreadable");
    }

    #[test]
    fn test_missing_policy_rejected_when_required() {
        let claim = claim(MlAssessment::new(Some(60), Some(0.9), ["door"]).unwrap());
        let d = run(&claim, 1, &AutomationConfig::default());

        assert_eq!(d.rule, DispositionRule::PolicyInactive);
        assert_eq!(d.reason, "Policy not found");
    }

    #[test]
    fn test_frequency_thresholds() {
        let claim = claim(MlAssessment::new(Some(60), Some(0.9), ["door"]).unwrap());

        assert_eq!(run(&claim, 5, &config()).rule, DispositionRule::SuspiciousFrequency);
        assert_eq!(run(&claim, 5, &config()).outcome, Outcome::Rejected);
        assert_eq!(run(&claim, 3, &config()).rule, DispositionRule::HighFrequency);
        assert!(run(&claim, 3, &config()).requires_review);
        assert_eq!(run(&claim, 2, &config()).rule, DispositionRule::HighSeverity);
    }

    #[test]
    fn test_absent_severity_needs_review() {
        let d = run(&claim(MlAssessment::default()), 1, &config());
        assert_eq!(d.rule, DispositionRule::AssessmentMissing);
        assert_eq!(d.confidence, 0.0);
    }

    #[test]
    fn test_absent_confidence_reads_as_zero() {
        let d = run(&claim(MlAssessment::new(Some(80), None, ["door"]).unwrap()), 1, &config());
        assert_eq!(d.rule, DispositionRule::ConfidenceBelowMinimum);
        assert_eq!(d.outcome, Outcome::InReview);
    }

    #[test]
    fn test_critical_part_matches_substring_case_insensitively() {
        let d = run(
            &claim(MlAssessment::new(Some(80), Some(0.95), ["Front Chassis Rail"]).unwrap()),
            1,
            &config(),
        );
        assert_eq!(d.rule, DispositionRule::CriticalDamage);
        assert!(d.reason.contains("chassis"));
    }

    #[test]
    fn test_severity_bands() {
        let at = |severity| run(&claim(MlAssessment::new(Some(severity), Some(0.9), ["bumper"]).unwrap()), 1, &config());

        assert_eq!(at(10).outcome, Outcome::Rejected);
        assert_eq!(at(11).outcome, Outcome::InReview);
        assert_eq!(at(45).rule, DispositionRule::MidSeverity);
        assert_eq!(at(46).outcome, Outcome::Approved);
        assert!(!at(46).requires_review);
    }

    #[test]
    fn test_min_confidence_boundary_is_inclusive() {
        let at = |confidence| run(&claim(MlAssessment::new(Some(60), Some(confidence), ["bumper"]).unwrap()), 1, &config());

        let at_minimum = at(0.7);
        assert_eq!(at_minimum.rule, DispositionRule::HighSeverity);
        assert_eq!(at_minimum.outcome, Outcome::Approved);

        let just_below = at(0.6999);
        assert_eq!(just_below.rule, DispositionRule::ConfidenceBelowMinimum);
        assert!(just_below.requires_review);
    }
}
