//! Vehicle profiles and rating requests
//!
//! A [`VehicleProfile`] describes the insured vehicle; a [`PolicyRequest`]
//! pairs it with the coverage the customer asked for. Neither is persisted
//! as-is: a request is priced into a quote, and the issued policy keeps a
//! copy of the profile.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use core_kernel::{years_between, Money};
use crate::error::RatingError;

/// Tariff category of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleCategory {
    #[serde(alias = "2W")]
    TwoWheeler,
    #[serde(alias = "4W")]
    FourWheeler,
    Commercial,
}

impl VehicleCategory {
    /// Short code used on proposal forms
    pub fn code(&self) -> &'static str {
        match self {
            VehicleCategory::TwoWheeler => "2W",
            VehicleCategory::FourWheeler => "4W",
            VehicleCategory::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for VehicleCategory {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2w" | "twowheeler" | "two-wheeler" | "two wheeler" => Ok(VehicleCategory::TwoWheeler),
            "4w" | "fourwheeler" | "four-wheeler" | "four wheeler" => Ok(VehicleCategory::FourWheeler),
            "commercial" => Ok(VehicleCategory::Commercial),
            other => Err(RatingError::invalid_input(
                "vehicle_category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

/// Fuel type of the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    #[serde(alias = "CNG")]
    Cng,
    #[serde(alias = "LPG")]
    Lpg,
    Electric,
    Hybrid,
}

/// The insured vehicle as priced by the tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Tariff category
    pub category: VehicleCategory,
    /// Engine displacement in cc
    pub engine_capacity_cc: Decimal,
    /// First registration date
    pub registration_date: NaiveDate,
    /// Ex-showroom price when new
    pub ex_showroom_price: Money,
    /// Fuel type
    pub fuel_type: FuelType,
    /// Year of manufacture, when known
    pub year_of_manufacture: Option<i32>,
}

impl VehicleProfile {
    /// Creates a vehicle profile
    pub fn new(
        category: VehicleCategory,
        engine_capacity_cc: Decimal,
        registration_date: NaiveDate,
        ex_showroom_price: Money,
        fuel_type: FuelType,
    ) -> Self {
        Self {
            category,
            engine_capacity_cc,
            registration_date,
            ex_showroom_price,
            fuel_type,
            year_of_manufacture: None,
        }
    }

    /// Creates a profile from floating-point form values
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when either number is NaN, infinite or negative.
    pub fn from_raw(
        category: VehicleCategory,
        engine_capacity_cc: f64,
        registration_date: NaiveDate,
        ex_showroom_price: f64,
        currency: core_kernel::Currency,
        fuel_type: FuelType,
    ) -> Result<Self, RatingError> {
        let cc = decimal_from_f64("engine_capacity_cc", engine_capacity_cc)?;
        let price = decimal_from_f64("ex_showroom_price", ex_showroom_price)?;
        let profile = Self::new(
            category,
            cc,
            registration_date,
            Money::new(price, currency),
            fuel_type,
        );
        profile.validate()?;
        Ok(profile)
    }

    /// Sets the year of manufacture
    pub fn with_year_of_manufacture(mut self, year: i32) -> Self {
        self.year_of_manufacture = Some(year);
        self
    }

    /// Rejects negative capacity or price
    pub fn validate(&self) -> Result<(), RatingError> {
        if self.engine_capacity_cc < Decimal::ZERO {
            return Err(RatingError::invalid_input(
                "engine_capacity_cc",
                format!("must not be negative, got {}", self.engine_capacity_cc),
            ));
        }
        if self.ex_showroom_price.is_negative() {
            return Err(RatingError::invalid_input(
                "ex_showroom_price",
                format!("must not be negative, got {}", self.ex_showroom_price),
            ));
        }
        Ok(())
    }

    /// Vehicle age in calendar years as of `today`
    ///
    /// Counted from the year of manufacture when known, otherwise from
    /// the registration year.
    pub fn age_years(&self, today: NaiveDate) -> i32 {
        match self.year_of_manufacture {
            Some(year) => today.year() - year,
            None => years_between(self.registration_date, today),
        }
    }
}

fn decimal_from_f64(field: &str, value: f64) -> Result<Decimal, RatingError> {
    if !value.is_finite() {
        return Err(RatingError::invalid_input(field, format!("not a finite number: {}", value)));
    }
    Decimal::try_from(value)
        .map_err(|e| RatingError::invalid_input(field, e.to_string()))
}

/// A request to price a policy for a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRequest {
    /// Free-text policy type label, e.g. "Comprehensive" or "Third-Party Only"
    pub policy_type: String,
    /// No-claim bonus carried over from the previous policy, in percent
    #[serde(default)]
    pub previous_ncb_percent: Decimal,
    /// Selected add-on identifiers
    #[serde(default)]
    pub add_ons: BTreeSet<String>,
    /// The vehicle being insured
    pub vehicle: VehicleProfile,
    /// Own-damage rate to use instead of the tariff's category rate
    #[serde(default)]
    pub od_rate_override: Option<core_kernel::Rate>,
}

impl PolicyRequest {
    /// Creates a request with no NCB and no add-ons
    pub fn new(policy_type: impl Into<String>, vehicle: VehicleProfile) -> Self {
        Self {
            policy_type: policy_type.into(),
            previous_ncb_percent: Decimal::ZERO,
            add_ons: BTreeSet::new(),
            vehicle,
            od_rate_override: None,
        }
    }

    /// Sets the carried-over NCB percentage
    pub fn with_ncb_percent(mut self, percent: Decimal) -> Self {
        self.previous_ncb_percent = percent;
        self
    }

    /// Adds an add-on identifier
    pub fn with_add_on(mut self, id: impl Into<String>) -> Self {
        self.add_ons.insert(id.into());
        self
    }

    /// Overrides the tariff's own-damage rate
    pub fn with_od_rate(mut self, rate: core_kernel::Rate) -> Self {
        self.od_rate_override = Some(rate);
        self
    }
}
