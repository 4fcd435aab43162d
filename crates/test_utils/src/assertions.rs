//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_claims::{Claim, ClaimStatus, Disposition, PayoutStatus};
use domain_rating::PremiumBreakdown;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a Money value is a whole number of currency units
pub fn assert_whole_units(money: &Money) {
    assert_eq!(
        money.amount().fract(),
        Decimal::ZERO,
        "Expected whole currency units, got {}",
        money
    );
}

/// Asserts the arithmetic identities every breakdown must satisfy
///
/// - base = TP + OD (after NCB) + add-ons
/// - GST = round(rate x base)
/// - final = base + GST
/// - every component whole and non-negative
pub fn assert_breakdown_consistent(breakdown: &PremiumBreakdown, gst_rate: Decimal) {
    let b = breakdown;
    for (name, part) in [
        ("idv", b.idv),
        ("tp_premium", b.tp_premium),
        ("od_premium", b.od_premium),
        ("add_ons_premium", b.add_ons_premium),
        ("ncb_discount", b.ncb_discount),
        ("base_premium", b.base_premium),
        ("gst", b.gst),
        ("final_premium", b.final_premium),
    ] {
        assert!(!part.is_negative(), "{} is negative: {}", name, part);
        assert_whole_units(&part);
    }

    assert_eq!(
        b.base_premium.amount(),
        b.tp_premium.amount() + b.od_premium.amount() + b.add_ons_premium.amount(),
        "base premium does not add up: {:?}",
        b
    );
    let expected_gst = Money::new(b.base_premium.amount() * gst_rate, b.gst.currency()).round_whole();
    assert_eq!(b.gst, expected_gst, "GST is not {} of base: {:?}", gst_rate, b);
    assert_eq!(
        b.final_premium.amount(),
        b.base_premium.amount() + b.gst.amount(),
        "final premium is not base + GST: {:?}",
        b
    );
}

/// Asserts a disposition's review flag agrees with its outcome
pub fn assert_disposition_consistent(disposition: &Disposition) {
    assert_eq!(
        disposition.requires_review,
        disposition.outcome == domain_claims::Outcome::InReview,
        "requires_review disagrees with outcome: {:?}",
        disposition
    );
    assert!(
        (0.0..=1.0).contains(&disposition.confidence),
        "confidence out of range: {:?}",
        disposition
    );
}

/// Asserts a stored claim carries the audit trail and payout of its status
pub fn assert_claim_settled(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(claim.status, expected, "unexpected status for {}", claim.claim_number);
    match expected {
        ClaimStatus::Approved => {
            assert_eq!(claim.verified, Some(true));
            let payout = claim.payout.expect("approved claim without payout");
            assert_ne!(payout.status, PayoutStatus::Rejected);
        }
        ClaimStatus::Rejected => {
            assert_eq!(claim.verified, Some(false));
            let payout = claim.payout.expect("rejected claim without payout");
            assert!(payout.amount.is_zero());
            assert_eq!(payout.status, PayoutStatus::Rejected);
        }
        ClaimStatus::InReview => assert!(claim.payout.is_none()),
        ClaimStatus::Submitted => assert!(claim.automation.is_none() && claim.review.is_none()),
    }
}
