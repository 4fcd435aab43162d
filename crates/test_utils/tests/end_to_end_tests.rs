//! End-to-End Tests
//!
//! These tests drive a vehicle from quote through policy issue to an
//! automatically or manually decided claim, using the shared fixtures.

use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::UserId;
use domain_claims::{
    AutomationConfig, AutomationOutcome, ClaimAutomationService, ClaimStatus, DispositionEngine,
    DispositionRule, MockClaimsPort, Outcome, ReviewDecision,
};
use domain_rating::{CoverageKind, RatingEngine};
use test_utils::{
    assert_breakdown_consistent, assert_claim_settled, assert_disposition_consistent,
    assert_money_approx_eq, init_test_tracing, ClaimBuilder, ClaimFixtures, PolicyFixtures,
    TemporalFixtures, VehicleBuilder,
};

async fn service_with(
    policy: &domain_rating::Policy,
    claims: &[domain_claims::Claim],
) -> (ClaimAutomationService, Arc<MockClaimsPort>) {
    let port = Arc::new(MockClaimsPort::new());
    port.insert_policy(policy.clone()).await;
    for claim in claims {
        port.insert_claim(claim.clone()).await;
    }
    (ClaimAutomationService::new(port.clone(), AutomationConfig::default()), port)
}

// ============================================================================
// Quote to Policy
// ============================================================================

mod quote_to_policy {
    use super::*;

    #[test]
    fn test_issued_policy_keeps_quoted_price() {
        init_test_tracing();
        let quote = PolicyFixtures::comprehensive_quote();
        let policy = PolicyFixtures::active_policy(UserId::new());

        assert_breakdown_consistent(&quote.breakdown, dec!(0.18));
        assert_eq!(policy.premium(), quote.final_premium());
        assert_eq!(policy.coverage(), CoverageKind::Comprehensive);
        assert!(policy.is_active_at(TemporalFixtures::now()));
        assert!(policy.policy_number().starts_with("MTR-"));
    }

    #[test]
    fn test_breakdown_serializes_for_display() {
        let quote = PolicyFixtures::comprehensive_quote();
        let json = serde_json::to_value(&quote.breakdown).unwrap();

        assert!(json.get("final_premium").is_some());
        assert!(json.get("ncb_discount").is_some());
    }

    #[test]
    fn test_builder_vehicle_quotes_third_party_only() {
        let request = VehicleBuilder::new().engine_cc(dec!(1800)).request("Third Party Liability");
        let quote = RatingEngine::default().quote(&request, TemporalFixtures::now()).unwrap();

        assert_eq!(quote.coverage.kind, CoverageKind::ThirdParty);
        assert!(quote.breakdown.od_premium.is_zero());
        assert_breakdown_consistent(&quote.breakdown, dec!(0.18));
    }
}

// ============================================================================
// Policy to Claim
// ============================================================================

mod policy_to_claim {
    use super::*;

    #[tokio::test]
    async fn test_approvable_claim_paid_from_premium() {
        init_test_tracing();
        let policy = PolicyFixtures::active_policy(UserId::new());
        let claim = ClaimFixtures::approvable(&policy);
        let (service, port) = service_with(&policy, &[claim.clone()]).await;

        let outcome = service
            .apply_auto_decision(claim.id, TemporalFixtures::now())
            .await
            .unwrap();

        let AutomationOutcome::Applied { disposition, payout } = outcome else {
            panic!("expected an applied decision");
        };
        assert_disposition_consistent(&disposition);
        assert_eq!(disposition.outcome, Outcome::Approved);
        assert_money_approx_eq(
            &payout.unwrap().amount,
            &policy.premium().multiply(dec!(0.50)),
            dec!(0.5),
        );

        assert_claim_settled(&port.claim(claim.id).await.unwrap(), ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_trivial_claim_rejected() {
        let policy = PolicyFixtures::active_policy(UserId::new());
        let claim = ClaimFixtures::trivial(&policy);
        let (service, port) = service_with(&policy, &[claim.clone()]).await;

        service
            .apply_auto_decision(claim.id, TemporalFixtures::now())
            .await
            .unwrap();
        assert_claim_settled(&port.claim(claim.id).await.unwrap(), ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_failed_assessment_rejected_on_lapsed_policy() {
        let policy = PolicyFixtures::lapsed_policy(UserId::new());
        let claim = ClaimFixtures::unassessable(&policy);
        let (service, port) = service_with(&policy, &[claim.clone()]).await;

        let outcome = service
            .apply_auto_decision(claim.id, TemporalFixtures::now())
            .await
            .unwrap();
        let AutomationOutcome::Applied { disposition, .. } = outcome else {
            panic!("expected an applied decision");
        };
        assert_eq!(disposition.rule, DispositionRule::AssessmentFailed);
        assert_claim_settled(&port.claim(claim.id).await.unwrap(), ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_critical_claim_held_then_reviewed() {
        let policy = PolicyFixtures::active_policy(UserId::new());
        let claim = ClaimFixtures::critical(&policy);
        let (service, port) = service_with(&policy, &[claim.clone()]).await;

        service
            .apply_auto_decision(claim.id, TemporalFixtures::now())
            .await
            .unwrap();
        assert_claim_settled(&port.claim(claim.id).await.unwrap(), ClaimStatus::InReview);

        let reviewed = service
            .review_claim(
                claim.id,
                ReviewDecision::approve("surveyor-12").with_notes("engine damage confirmed on inspection"),
                TemporalFixtures::now(),
            )
            .await
            .unwrap();
        assert_claim_settled(&reviewed, ClaimStatus::Approved);
        assert!(reviewed.automation.is_some());
        assert!(reviewed.review.is_some());
    }

    #[tokio::test]
    async fn test_frequent_claimant_sent_to_review() {
        let policy = PolicyFixtures::active_policy(UserId::new());
        let earlier: Vec<_> = (1..=2)
            .map(|weeks| {
                ClaimBuilder::new()
                    .on_policy(policy.id(), policy.user_id())
                    .submitted_at(TemporalFixtures::now() - chrono::Duration::weeks(weeks))
                    .severity(30)
                    .confidence(0.8)
                    .damaged("tail lamp")
                    .build()
            })
            .collect();
        let claim = ClaimFixtures::approvable(&policy);
        let mut all = earlier.clone();
        all.push(claim.clone());
        let (service, port) = service_with(&policy, &all).await;

        let outcome = service
            .apply_auto_decision(claim.id, TemporalFixtures::now())
            .await
            .unwrap();
        let AutomationOutcome::Applied { disposition, .. } = outcome else {
            panic!("expected an applied decision");
        };
        assert_eq!(disposition.rule, DispositionRule::HighFrequency);
        assert_claim_settled(&port.claim(claim.id).await.unwrap(), ClaimStatus::InReview);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;
    use domain_claims::DecisionResult;
    use test_utils::{
        assessment_strategy, claim_status_strategy, ncb_percent_strategy, policy_label_strategy,
        vehicle_strategy,
    };

    proptest! {
        #[test]
        fn every_quote_is_consistent(
            vehicle in vehicle_strategy(),
            label in policy_label_strategy(),
            ncb in ncb_percent_strategy(),
        ) {
            let request = domain_rating::PolicyRequest::new(label, vehicle).with_ncb_percent(ncb);
            let quote = RatingEngine::default().quote(&request, TemporalFixtures::now()).unwrap();
            assert_breakdown_consistent(&quote.breakdown, dec!(0.18));
            prop_assert!(quote.final_premium().is_positive());
        }

        #[test]
        fn every_assessment_gets_a_consistent_disposition(
            assessment in assessment_strategy(),
            recent in 0u32..7,
        ) {
            let policy = PolicyFixtures::active_policy(UserId::new());
            let claim = ClaimFixtures::approvable(&policy).with_assessment(assessment);
            let result = DispositionEngine::default().decide(&claim, Some(&policy), recent, TemporalFixtures::now());
            let disposition = result.disposition().unwrap();
            assert_disposition_consistent(disposition);
        }

        #[test]
        fn disabled_engine_never_decides(
            assessment in assessment_strategy(),
            status in claim_status_strategy(),
            recent in 0u32..10,
            with_policy in any::<bool>(),
        ) {
            let policy = PolicyFixtures::active_policy(UserId::new());
            let mut claim = ClaimFixtures::approvable(&policy).with_assessment(assessment);
            claim.status = status;
            let engine = DispositionEngine::new(Arc::new(AutomationConfig {
                enabled: false,
                ..AutomationConfig::default()
            }));

            let result = engine.decide(&claim, with_policy.then_some(&policy), recent, TemporalFixtures::now());
            prop_assert_eq!(result, DecisionResult::Disabled);
        }
    }
}
