//! Issued motor policies
//!
//! A [`Policy`] freezes the quote it was bought at. Claims scale their
//! payout by the stored final premium, so the breakdown is never re-rated
//! after issue.
//!
//! # Status transitions
//!
//! - Active -> Cancelled (via cancel)
//! - Active -> Expired (via expire)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CoveragePeriod, Money, PolicyId, UserId};

use crate::coverage::CoverageKind;
use crate::error::RatingError;
use crate::premium::{PremiumBreakdown, Quote};
use crate::vehicle::VehicleProfile;

/// Lifecycle status of an issued policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A priced and issued motor policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    id: PolicyId,
    user_id: UserId,
    /// Human-readable policy number
    policy_number: String,
    period: CoveragePeriod,
    status: PolicyStatus,
    coverage: CoverageKind,
    vehicle: VehicleProfile,
    breakdown: PremiumBreakdown,
    issued_at: DateTime<Utc>,
}

impl Policy {
    /// Issues a policy at the price of `quote`
    pub fn issue(
        user_id: UserId,
        vehicle: VehicleProfile,
        quote: &Quote,
        period: CoveragePeriod,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let id = PolicyId::new_v7();
        Self {
            id,
            user_id,
            policy_number: generate_policy_number(&id, issued_at),
            period,
            status: PolicyStatus::Active,
            coverage: quote.coverage.kind,
            vehicle,
            breakdown: quote.breakdown.clone(),
            issued_at,
        }
    }

    pub fn id(&self) -> PolicyId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn policy_number(&self) -> &str {
        &self.policy_number
    }

    pub fn period(&self) -> &CoveragePeriod {
        &self.period
    }

    pub fn status(&self) -> PolicyStatus {
        self.status
    }

    pub fn coverage(&self) -> CoverageKind {
        self.coverage
    }

    pub fn vehicle(&self) -> &VehicleProfile {
        &self.vehicle
    }

    pub fn breakdown(&self) -> &PremiumBreakdown {
        &self.breakdown
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// The stored final premium
    pub fn premium(&self) -> Money {
        self.breakdown.final_premium
    }

    /// True when `at` lies within the coverage period and the policy has
    /// not been cancelled
    ///
    /// An `Expired` status is not consulted; the period bounds decide.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.status != PolicyStatus::Cancelled && self.period.contains(at)
    }

    /// Cancels an active policy
    pub fn cancel(&mut self) -> Result<(), RatingError> {
        self.transition(PolicyStatus::Cancelled)
    }

    /// Marks an active policy as expired
    pub fn expire(&mut self) -> Result<(), RatingError> {
        self.transition(PolicyStatus::Expired)
    }

    fn transition(&mut self, to: PolicyStatus) -> Result<(), RatingError> {
        if self.status != PolicyStatus::Active {
            return Err(RatingError::InvalidPolicyTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Format: MTR-{YEAR}{MONTH}-{first 8 hex digits of the id}
fn generate_policy_number(id: &PolicyId, issued_at: DateTime<Utc>) -> String {
    format!(
        "MTR-{}-{:08X}",
        issued_at.format("%Y%m"),
        id.as_uuid().as_fields().0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RatingEngine;
    use crate::vehicle::{FuelType, PolicyRequest, VehicleCategory};
    use chrono::{Duration, NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn issued_policy() -> Policy {
        let vehicle = VehicleProfile::new(
            VehicleCategory::TwoWheeler,
            dec!(110),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Money::inr(dec!(90000)),
            FuelType::Petrol,
        );
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let quote = RatingEngine::default()
            .quote(&PolicyRequest::new("Comprehensive", vehicle.clone()), now)
            .unwrap();
        let period = CoveragePeriod::for_months(now, 12).unwrap();
        Policy::issue(UserId::new(), vehicle, &quote, period, now)
    }

    #[test]
    fn test_issue_stores_quoted_premium() {
        let policy = issued_policy();

        assert_eq!(policy.status(), PolicyStatus::Active);
        assert_eq!(policy.premium(), policy.breakdown().final_premium);
        assert!(policy.premium().is_positive());
        assert!(policy.policy_number().starts_with("MTR-202501-"));
    }

    #[test]
    fn test_activity_follows_period_and_status() {
        let mut policy = issued_policy();
        let start = policy.period().start;

        assert!(policy.is_active_at(start));
        assert!(!policy.is_active_at(start - Duration::seconds(1)));
        assert!(!policy.is_active_at(policy.period().end + Duration::days(1)));

        policy.cancel().unwrap();
        assert!(!policy.is_active_at(start));
    }

    #[test]
    fn test_cancelled_policy_cannot_expire() {
        let mut policy = issued_policy();
        policy.cancel().unwrap();

        assert!(matches!(
            policy.expire(),
            Err(RatingError::InvalidPolicyTransition { .. })
        ));
    }
}
