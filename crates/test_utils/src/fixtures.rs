//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for vehicles, policies and claims.
//! Dates are fixed so results are predictable across runs.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

use core_kernel::{CoveragePeriod, Currency, Money, UserId};
use domain_claims::{Claim, MlAssessment};
use domain_rating::{
    FuelType, Policy, PolicyRequest, Quote, RatingEngine, VehicleCategory, VehicleProfile,
};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard rating and decision instant (Mar 20, 2025)
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 9, 30, 0).unwrap()
    }

    /// Rating date as a calendar date
    pub fn today() -> NaiveDate {
        Self::now().date_naive()
    }

    /// Registered thirteen months before [`now`](Self::now)
    pub fn thirteen_months_ago() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
    }

    /// Registered more than five years before [`now`](Self::now)
    pub fn six_years_ago() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 15).unwrap()
    }

    /// Policy issue instant, a month before [`now`](Self::now)
    pub fn policy_issued() -> DateTime<Utc> {
        Self::now() - Duration::days(30)
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Ex-showroom price of a mid-size car
    pub fn car_price() -> Money {
        Money::inr(dec!(800000))
    }

    /// Ex-showroom price of a commuter motorcycle
    pub fn bike_price() -> Money {
        Money::inr(dec!(100000))
    }

    /// Ex-showroom price of a light goods vehicle
    pub fn commercial_price() -> Money {
        Money::inr(dec!(1500000))
    }

    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }
}

/// Fixture for vehicle profiles
pub struct VehicleFixtures;

impl VehicleFixtures {
    /// 1200cc petrol car registered thirteen months ago
    pub fn hatchback() -> VehicleProfile {
        VehicleProfile::new(
            VehicleCategory::FourWheeler,
            dec!(1200),
            TemporalFixtures::thirteen_months_ago(),
            MoneyFixtures::car_price(),
            FuelType::Petrol,
        )
    }

    /// 150cc motorcycle registered a few months ago
    pub fn motorcycle() -> VehicleProfile {
        VehicleProfile::new(
            VehicleCategory::TwoWheeler,
            dec!(150),
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            MoneyFixtures::bike_price(),
            FuelType::Petrol,
        )
    }

    /// Diesel goods carrier older than five years
    pub fn goods_carrier() -> VehicleProfile {
        VehicleProfile::new(
            VehicleCategory::Commercial,
            dec!(2500),
            TemporalFixtures::six_years_ago(),
            MoneyFixtures::commercial_price(),
            FuelType::Diesel,
        )
    }
}

/// Fixture for quotes and issued policies
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// Comprehensive request for [`VehicleFixtures::hatchback`] with 20% NCB
    pub fn comprehensive_request() -> PolicyRequest {
        PolicyRequest::new("Comprehensive", VehicleFixtures::hatchback()).with_ncb_percent(dec!(20))
    }

    /// Quote for [`comprehensive_request`](Self::comprehensive_request)
    pub fn comprehensive_quote() -> Quote {
        RatingEngine::default()
            .quote(&Self::comprehensive_request(), TemporalFixtures::policy_issued())
            .unwrap()
    }

    /// Twelve-month comprehensive policy, active at [`TemporalFixtures::now`]
    pub fn active_policy(user_id: UserId) -> Policy {
        let issued_at = TemporalFixtures::policy_issued();
        let period = CoveragePeriod::for_months(issued_at, 12).unwrap();
        Policy::issue(
            user_id,
            VehicleFixtures::hatchback(),
            &Self::comprehensive_quote(),
            period,
            issued_at,
        )
    }

    /// Policy whose cover ended before [`TemporalFixtures::now`]
    pub fn lapsed_policy(user_id: UserId) -> Policy {
        let issued_at = TemporalFixtures::now() - Duration::days(400);
        let period = CoveragePeriod::for_months(issued_at, 12).unwrap();
        Policy::issue(
            user_id,
            VehicleFixtures::hatchback(),
            &Self::comprehensive_quote(),
            period,
            issued_at,
        )
    }
}

/// Fixture for claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Bumper damage that qualifies for automatic approval
    pub fn approvable(policy: &Policy) -> Claim {
        Self::assessed(policy, MlAssessment::new(Some(50), Some(0.9), ["bumper"]).unwrap())
    }

    /// Scratch too minor to pay
    pub fn trivial(policy: &Policy) -> Claim {
        Self::assessed(policy, MlAssessment::new(Some(5), Some(0.9), ["left mirror"]).unwrap())
    }

    /// Engine damage that always goes to a reviewer
    pub fn critical(policy: &Policy) -> Claim {
        Self::assessed(policy, MlAssessment::new(Some(80), Some(0.92), ["engine block", "radiator"]).unwrap())
    }

    /// Claim whose assessment pass failed
    pub fn unassessable(policy: &Policy) -> Claim {
        Self::assessed(policy, MlAssessment::failed("no vehicle detected in images"))
    }

    fn assessed(policy: &Policy, assessment: MlAssessment) -> Claim {
        Claim::submit(
            policy.id(),
            policy.user_id(),
            "Damage reported after collision",
            TemporalFixtures::now() - Duration::hours(3),
        )
        .with_assessment(assessment)
    }
}
