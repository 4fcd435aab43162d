//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use core_kernel::{Money, PolicyId, UserId};
use domain_claims::{Claim, MlAssessment};
use domain_rating::{FuelType, PolicyRequest, VehicleCategory, VehicleProfile};

use crate::fixtures::{TemporalFixtures, VehicleFixtures};

/// Builder for vehicle profiles, starting from the standard hatchback
pub struct VehicleBuilder {
    profile: VehicleProfile,
}

impl Default for VehicleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleBuilder {
    pub fn new() -> Self {
        Self {
            profile: VehicleFixtures::hatchback(),
        }
    }

    pub fn category(mut self, category: VehicleCategory) -> Self {
        self.profile.category = category;
        self
    }

    pub fn engine_cc(mut self, cc: Decimal) -> Self {
        self.profile.engine_capacity_cc = cc;
        self
    }

    pub fn registered(mut self, date: NaiveDate) -> Self {
        self.profile.registration_date = date;
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.profile.ex_showroom_price = price;
        self
    }

    pub fn fuel(mut self, fuel: FuelType) -> Self {
        self.profile.fuel_type = fuel;
        self
    }

    pub fn build(self) -> VehicleProfile {
        self.profile
    }

    /// Wraps the vehicle in a request for `policy_type`
    pub fn request(self, policy_type: &str) -> PolicyRequest {
        PolicyRequest::new(policy_type, self.profile)
    }
}

/// Builder for submitted claims
pub struct ClaimBuilder {
    policy_id: PolicyId,
    user_id: UserId,
    description: String,
    submitted_at: DateTime<Utc>,
    severity: Option<u8>,
    confidence: Option<f64>,
    damage_parts: BTreeSet<String>,
    validation_error: Option<String>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a builder for an unassessed claim on a fresh policy
    pub fn new() -> Self {
        Self {
            policy_id: PolicyId::new(),
            user_id: UserId::new(),
            description: "Test claim".to_string(),
            submitted_at: TemporalFixtures::now(),
            severity: None,
            confidence: None,
            damage_parts: BTreeSet::new(),
            validation_error: None,
        }
    }

    /// Files the claim against `policy_id` on behalf of `user_id`
    pub fn on_policy(mut self, policy_id: PolicyId, user_id: UserId) -> Self {
        self.policy_id = policy_id;
        self.user_id = user_id;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }

    pub fn severity(mut self, severity: u8) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn damaged(mut self, part: impl Into<String>) -> Self {
        self.damage_parts.insert(part.into());
        self
    }

    pub fn validation_error(mut self, error: impl Into<String>) -> Self {
        self.validation_error = Some(error.into());
        self
    }

    /// Builds the claim; out-of-range values are kept as given
    pub fn build(self) -> Claim {
        let assessment = MlAssessment {
            severity: self.severity,
            confidence: self.confidence,
            damage_parts: self.damage_parts,
            validation_error: self.validation_error,
        };
        Claim::submit(self.policy_id, self.user_id, self.description, self.submitted_at)
            .with_assessment(assessment)
    }
}
