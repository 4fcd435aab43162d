//! Insured Declared Value
//!
//! IDV is the ex-showroom price less age-based depreciation. Age is counted
//! in calendar months for the bands and in calendar years for the flat
//! cut-off, so a vehicle registered on 31 December is a month old on
//! 1 January.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{months_between, years_between, Money, Rate};

use crate::tariff::TariffBook;

/// Result of an IDV computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdvAssessment {
    /// Depreciated value in whole currency units
    pub idv: Money,
    /// Depreciation rate that was applied
    pub depreciation_rate: Rate,
    /// Calendar months between registration and the rating date
    pub months_since_registration: i32,
}

/// Computes the IDV of a vehicle as of `today`
///
/// The result never exceeds the price and is never negative for a
/// non-negative price. A registration date in the future counts as a new
/// vehicle.
pub fn compute_idv(
    tariff: &TariffBook,
    ex_showroom_price: &Money,
    registration_date: NaiveDate,
    today: NaiveDate,
) -> IdvAssessment {
    let months = months_between(registration_date, today);
    let years = years_between(registration_date, today);
    let rate = tariff.depreciation_rate(months, years);
    let idv = rate.complement().apply_whole(ex_showroom_price).clamp_non_negative();

    debug!(
        months,
        years,
        depreciation = %rate,
        idv = %idv,
        "Computed IDV"
    );

    IdvAssessment {
        idv,
        depreciation_rate: rate,
        months_since_registration: months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_vehicle_loses_five_percent() {
        let price = Money::inr(dec!(800000));
        let a = compute_idv(&TariffBook::default(), &price, date(2025, 1, 15), date(2025, 3, 1));

        assert_eq!(a.months_since_registration, 2);
        assert_eq!(a.depreciation_rate.as_decimal(), dec!(0.05));
        assert_eq!(a.idv.amount(), dec!(760000));
    }

    #[test]
    fn test_thirteen_months_is_twenty_percent() {
        let price = Money::inr(dec!(800000));
        let a = compute_idv(&TariffBook::default(), &price, date(2024, 1, 10), date(2025, 2, 1));

        assert_eq!(a.months_since_registration, 13);
        assert_eq!(a.idv.amount(), dec!(640000));
    }

    #[test]
    fn test_five_calendar_years_is_half_price() {
        let price = Money::inr(dec!(99999));
        let a = compute_idv(&TariffBook::default(), &price, date(2020, 12, 31), date(2025, 1, 1));

        assert_eq!(a.depreciation_rate.as_decimal(), dec!(0.50));
        // 49999.5 rounds away from zero
        assert_eq!(a.idv.amount(), dec!(50000));
    }

    #[test]
    fn test_future_registration_counts_as_new() {
        let price = Money::inr(dec!(100000));
        let a = compute_idv(&TariffBook::default(), &price, date(2026, 1, 1), date(2025, 1, 1));

        assert!(a.months_since_registration < 0);
        assert_eq!(a.idv.amount(), dec!(95000));
    }
}
