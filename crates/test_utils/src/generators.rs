//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating rating inputs and damage
//! assessments that stay inside their documented ranges.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Money;
use domain_claims::{ClaimStatus, MlAssessment};
use domain_rating::{FuelType, VehicleCategory, VehicleProfile};

use crate::fixtures::TemporalFixtures;

pub fn category_strategy() -> impl Strategy<Value = VehicleCategory> {
    prop_oneof![
        Just(VehicleCategory::TwoWheeler),
        Just(VehicleCategory::FourWheeler),
        Just(VehicleCategory::Commercial),
    ]
}

pub fn fuel_strategy() -> impl Strategy<Value = FuelType> {
    prop_oneof![
        Just(FuelType::Petrol),
        Just(FuelType::Diesel),
        Just(FuelType::Cng),
        Just(FuelType::Electric),
    ]
}

/// Whole-rupee prices from 20,000 to 50,00,000
pub fn price_strategy() -> impl Strategy<Value = Money> {
    (20_000i64..5_000_000i64).prop_map(|units| Money::inr(Decimal::from(units)))
}

/// Engine capacities from 50cc to 5000cc
pub fn engine_cc_strategy() -> impl Strategy<Value = Decimal> {
    (50u32..5000u32).prop_map(Decimal::from)
}

/// Registration dates from today back roughly fifteen years
pub fn registration_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..5500i64).prop_map(|days| TemporalFixtures::today() - Duration::days(days))
}

/// NCB percentages including values between slabs
pub fn ncb_percent_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=60u32).prop_map(Decimal::from)
}

pub fn vehicle_strategy() -> impl Strategy<Value = VehicleProfile> {
    (
        category_strategy(),
        engine_cc_strategy(),
        registration_date_strategy(),
        price_strategy(),
        fuel_strategy(),
    )
        .prop_map(|(category, cc, registered, price, fuel)| {
            VehicleProfile::new(category, cc, registered, price, fuel)
        })
}

/// Policy-type labels, recognised and not
pub fn policy_label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Comprehensive".to_string()),
        Just("Third Party Only".to_string()),
        Just("Standalone OD".to_string()),
        Just("Own Damage Cover".to_string()),
        Just("Bumper to Bumper".to_string()),
        "[A-Za-z ]{0,20}",
    ]
}

/// Damage-part names, some of which contain critical keywords
pub fn damage_part_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("front bumper".to_string()),
        Just("headlamp".to_string()),
        Just("door panel".to_string()),
        Just("windscreen".to_string()),
        Just("engine mount".to_string()),
        Just("chassis rail".to_string()),
        Just("Brake System".to_string()),
    ]
}

/// Valid assessments, with severity or confidence occasionally missing
pub fn assessment_strategy() -> impl Strategy<Value = MlAssessment> {
    (
        proptest::option::weighted(0.9, 0u8..=100),
        proptest::option::weighted(0.9, 0.0f64..=1.0),
        proptest::collection::btree_set(damage_part_strategy(), 0..4),
    )
        .prop_map(|(severity, confidence, damage_parts)| MlAssessment {
            severity,
            confidence,
            damage_parts,
            validation_error: None,
        })
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::InReview),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
    ]
}
