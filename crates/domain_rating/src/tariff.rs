//! Tariff book
//!
//! Every figure the rating engine uses lives in a [`TariffBook`]. The
//! [`Default`] book carries the current motor tariff; rate revisions are
//! shipped as JSON and loaded with [`TariffBook::load_from_str`] or
//! [`TariffBook::load_from_file`].
//!
//! Bracketed tables are ordered and scanned top to bottom; the first entry
//! whose bound exceeds the looked-up value wins.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use core_kernel::{Currency, Money, Rate};

use crate::addons::AddOn;
use crate::error::RatingError;
use crate::vehicle::VehicleCategory;

/// Third-party premium for engines below a capacity bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TpBracket {
    /// Exclusive upper capacity bound in cc; `None` for the open top bracket
    pub below_cc: Option<Decimal>,
    /// Annual TP premium in whole currency units
    pub premium: Decimal,
}

impl TpBracket {
    fn bounded(below_cc: Decimal, premium: Decimal) -> Self {
        Self { below_cc: Some(below_cc), premium }
    }

    fn open(premium: Decimal) -> Self {
        Self { below_cc: None, premium }
    }

    fn matches(&self, capacity_cc: Decimal) -> bool {
        self.below_cc.map_or(true, |bound| capacity_cc < bound)
    }
}

/// Depreciation applied to vehicles registered fewer than `below_months` ago
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationBand {
    pub below_months: i32,
    pub rate: Rate,
}

/// Flat depreciation once a vehicle reaches a calendar age in years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatDepreciation {
    pub from_years: i32,
    pub rate: Rate,
}

/// OD premium multiplier for vehicles older than `above_years`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeLoading {
    pub above_years: i32,
    pub factor: Decimal,
}

/// Rate tables for motor rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffBook {
    /// Currency all tariff amounts are expressed in
    pub currency: Currency,
    /// TP brackets per category, ascending by capacity
    pub tp_brackets: BTreeMap<VehicleCategory, Vec<TpBracket>>,
    /// Personal-accident cover bundled with every TP premium
    pub pa_cover: Decimal,
    /// OD base rate as a share of IDV
    pub od_base_rates: BTreeMap<VehicleCategory, Rate>,
    /// OD age loadings, checked in order
    pub age_loadings: Vec<AgeLoading>,
    /// Depreciation bands, ascending by month bound
    pub depreciation_bands: Vec<DepreciationBand>,
    /// Depreciation that overrides the bands for old vehicles
    pub flat_depreciation: FlatDepreciation,
    /// Add-on price as a share of the NCB-adjusted OD premium
    pub add_on_rates: BTreeMap<AddOn, Rate>,
    /// Goods and services tax on the base premium
    pub gst_rate: Rate,
    /// Floor used when a category has no TP bracket to fall back on
    pub category_minimums: BTreeMap<VehicleCategory, Decimal>,
}

impl Default for TariffBook {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            tp_brackets: BTreeMap::from([
                (
                    VehicleCategory::TwoWheeler,
                    vec![
                        TpBracket::bounded(dec!(75), dec!(482)),
                        TpBracket::bounded(dec!(150), dec!(752)),
                        TpBracket::bounded(dec!(350), dec!(1193)),
                        TpBracket::open(dec!(2323)),
                    ],
                ),
                (
                    VehicleCategory::FourWheeler,
                    vec![
                        TpBracket::bounded(dec!(1000), dec!(2094)),
                        TpBracket::bounded(dec!(1500), dec!(3423)),
                        TpBracket::bounded(dec!(2000), dec!(7890)),
                        TpBracket::open(dec!(12872)),
                    ],
                ),
                // Goods carriers below 7500 kg GVW
                (VehicleCategory::Commercial, vec![TpBracket::open(dec!(5858))]),
            ]),
            pa_cover: dec!(375),
            od_base_rates: BTreeMap::from([
                (VehicleCategory::TwoWheeler, Rate::new(dec!(0.025))),
                (VehicleCategory::FourWheeler, Rate::new(dec!(0.03))),
                (VehicleCategory::Commercial, Rate::new(dec!(0.03))),
            ]),
            age_loadings: vec![
                AgeLoading { above_years: 5, factor: dec!(1.2) },
                AgeLoading { above_years: 3, factor: dec!(1.1) },
            ],
            depreciation_bands: vec![
                DepreciationBand { below_months: 6, rate: Rate::new(dec!(0.05)) },
                DepreciationBand { below_months: 12, rate: Rate::new(dec!(0.15)) },
                DepreciationBand { below_months: 24, rate: Rate::new(dec!(0.20)) },
                DepreciationBand { below_months: 36, rate: Rate::new(dec!(0.30)) },
                DepreciationBand { below_months: 48, rate: Rate::new(dec!(0.40)) },
                DepreciationBand { below_months: 60, rate: Rate::new(dec!(0.50)) },
            ],
            flat_depreciation: FlatDepreciation { from_years: 5, rate: Rate::new(dec!(0.50)) },
            add_on_rates: BTreeMap::from([
                (AddOn::ZeroDepreciation, Rate::new(dec!(0.15))),
                (AddOn::EngineProtector, Rate::new(dec!(0.05))),
                (AddOn::ReturnToInvoice, Rate::new(dec!(0.10))),
                (AddOn::NcbProtector, Rate::new(dec!(0.02))),
                (AddOn::RoadsideAssistance, Rate::new(dec!(0.01))),
                (AddOn::KeyLockCover, Rate::new(dec!(0.01))),
                (AddOn::TyreProtection, Rate::new(dec!(0.02))),
                (AddOn::ConsumablesCover, Rate::new(dec!(0.01))),
            ]),
            gst_rate: Rate::from_percentage(dec!(18)),
            category_minimums: BTreeMap::from([
                (VehicleCategory::TwoWheeler, dec!(500)),
                (VehicleCategory::FourWheeler, dec!(2000)),
                (VehicleCategory::Commercial, dec!(5000)),
            ]),
        }
    }
}

impl TariffBook {
    /// Parses and validates a tariff book from JSON
    pub fn load_from_str(json: &str) -> Result<Self, RatingError> {
        let book: TariffBook = serde_json::from_str(json)
            .map_err(|e| RatingError::tariff(format!("Malformed tariff book: {}", e)))?;
        book.validate()?;
        Ok(book)
    }

    /// Reads, parses and validates a tariff book file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, RatingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RatingError::tariff(format!("Cannot read tariff book {}: {}", path.display(), e))
        })?;
        Self::load_from_str(&json)
    }

    /// Checks the tables are ordered and every rate is a sensible share
    pub fn validate(&self) -> Result<(), RatingError> {
        if self.depreciation_bands.is_empty() {
            return Err(RatingError::tariff("Depreciation bands must not be empty"));
        }
        if !self
            .depreciation_bands
            .windows(2)
            .all(|w| w[0].below_months < w[1].below_months)
        {
            return Err(RatingError::tariff("Depreciation bands must ascend by month bound"));
        }

        let depreciation_rates = self
            .depreciation_bands
            .iter()
            .map(|b| &b.rate)
            .chain(std::iter::once(&self.flat_depreciation.rate));
        for rate in depreciation_rates {
            ensure_share("depreciation", rate)?;
        }

        for (category, brackets) in &self.tp_brackets {
            let bounds: Vec<_> = brackets.iter().map(|b| b.below_cc).collect();
            let open_only_last = bounds
                .iter()
                .enumerate()
                .all(|(i, b)| b.is_some() || i == bounds.len() - 1);
            let ascending = bounds
                .windows(2)
                .all(|w| matches!((w[0], w[1]), (Some(a), Some(b)) if a < b) || w[1].is_none());
            if !open_only_last || !ascending {
                return Err(RatingError::tariff(format!(
                    "TP brackets for {} must ascend with only the last bracket open",
                    category
                )));
            }
            if brackets.iter().any(|b| b.premium < Decimal::ZERO) {
                return Err(RatingError::tariff(format!("Negative TP premium for {}", category)));
            }
        }

        for (category, rate) in &self.od_base_rates {
            ensure_share(&format!("OD rate for {}", category), rate)?;
        }
        for (add_on, rate) in &self.add_on_rates {
            ensure_share(&format!("add-on rate for {}", add_on), rate)?;
        }
        if self.gst_rate.as_decimal() < Decimal::ZERO {
            return Err(RatingError::tariff("GST rate must not be negative"));
        }
        if self.age_loadings.iter().any(|l| l.factor < Decimal::ZERO) {
            return Err(RatingError::tariff("Age loading factors must not be negative"));
        }
        if self.pa_cover < Decimal::ZERO || self.category_minimums.values().any(|m| *m < Decimal::ZERO) {
            return Err(RatingError::tariff("Fixed amounts must not be negative"));
        }
        Ok(())
    }

    /// TP tariff premium for a vehicle, `None` when the category has no brackets
    pub fn tp_tariff(&self, category: VehicleCategory, capacity_cc: Decimal) -> Option<Money> {
        self.tp_brackets
            .get(&category)?
            .iter()
            .find(|b| b.matches(capacity_cc))
            .map(|b| Money::new(b.premium, self.currency))
    }

    /// Personal-accident cover
    pub fn pa_cover(&self) -> Money {
        Money::new(self.pa_cover, self.currency)
    }

    /// OD base rate for a category, zero when the tariff does not rate it
    pub fn od_base_rate(&self, category: VehicleCategory) -> Rate {
        self.od_base_rates.get(&category).copied().unwrap_or_else(Rate::zero)
    }

    /// First age loading whose threshold the vehicle exceeds, 1 otherwise
    pub fn age_factor(&self, age_years: i32) -> Decimal {
        self.age_loadings
            .iter()
            .find(|l| age_years > l.above_years)
            .map_or(Decimal::ONE, |l| l.factor)
    }

    /// Depreciation rate for a vehicle's age in calendar months and years
    ///
    /// Months past the last band take the last band's rate.
    pub fn depreciation_rate(&self, months: i32, years: i32) -> Rate {
        if years >= self.flat_depreciation.from_years {
            return self.flat_depreciation.rate;
        }
        self.depreciation_bands
            .iter()
            .find(|b| months < b.below_months)
            .or_else(|| self.depreciation_bands.last())
            .map_or_else(Rate::zero, |b| b.rate)
    }

    /// Minimum premium for a category, zero when none is configured
    pub fn category_minimum(&self, category: VehicleCategory) -> Money {
        let amount = self.category_minimums.get(&category).copied().unwrap_or_default();
        Money::new(amount, self.currency)
    }
}

fn ensure_share(what: &str, rate: &Rate) -> Result<(), RatingError> {
    let value = rate.as_decimal();
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(RatingError::tariff(format!("{} must be between 0 and 1, got {}", what, value)));
    }
    Ok(())
}
