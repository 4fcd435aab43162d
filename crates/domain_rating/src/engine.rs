//! Rating engine
//!
//! Turns a [`PolicyRequest`] into a [`Quote`]. The engine is a pure function
//! of its tariff book, the request and the rating instant: it performs no
//! I/O and reads no clock.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use core_kernel::{Money, Rate};

use crate::addons::{price_add_ons, AddOnPricing};
use crate::coverage::classify_coverage;
use crate::depreciation::{compute_idv, IdvAssessment};
use crate::error::RatingError;
use crate::ncb::ncb_discount;
use crate::premium::{PremiumBreakdown, PricingFallback, Quote, QuoteDiagnostics};
use crate::tariff::TariffBook;
use crate::vehicle::{PolicyRequest, VehicleCategory, VehicleProfile};

/// Motor premium calculator
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    tariff: TariffBook,
}

impl RatingEngine {
    /// Creates an engine over a tariff book
    pub fn new(tariff: TariffBook) -> Self {
        Self { tariff }
    }

    /// Returns the tariff book in use
    pub fn tariff(&self) -> &TariffBook {
        &self.tariff
    }

    /// Prices a policy request as of `now`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative capacity or price, or when the
    /// price is not in the tariff's currency.
    pub fn quote(&self, request: &PolicyRequest, now: DateTime<Utc>) -> Result<Quote, RatingError> {
        let vehicle = &request.vehicle;
        vehicle.validate()?;
        self.ensure_tariff_currency(&vehicle.ex_showroom_price)?;

        let today = now.date_naive();
        let currency = self.tariff.currency;
        let zero = Money::zero(currency);

        let coverage = classify_coverage(&request.policy_type);
        if coverage.defaulted {
            warn!(
                policy_type = %request.policy_type,
                "Policy type matched no coverage keyword, pricing as comprehensive"
            );
        }

        let idv = self.assess_idv(vehicle, today).idv;

        let tp_premium = if coverage.third_party() {
            self.tp_premium(vehicle.category, vehicle.engine_capacity_cc)?
        } else {
            zero
        };

        let (od_premium, ncb, add_ons) = if coverage.own_damage() {
            let gross = self.od_premium(
                &idv,
                vehicle.age_years(today),
                vehicle.category,
                request.od_rate_override,
            );
            let ncb = ncb_discount(&gross, request.previous_ncb_percent)?;
            let net = gross.checked_sub(&ncb)?.clamp_non_negative();
            let add_ons = price_add_ons(&net, &request.add_ons, &self.tariff.add_on_rates)?;
            debug!(od_gross = %gross, ncb = %ncb, od_net = %net, add_ons = %add_ons.total, "Rated own damage");
            (net, ncb, add_ons)
        } else {
            let add_ons = AddOnPricing {
                costs: BTreeMap::new(),
                total: zero,
                ignored: request.add_ons.iter().cloned().collect(),
            };
            (zero, zero, add_ons)
        };

        let breakdown = PremiumBreakdown::assemble(
            idv,
            tp_premium,
            od_premium,
            add_ons.total,
            ncb,
            self.tariff.gst_rate,
        )?;

        let mut diagnostics = QuoteDiagnostics {
            coverage_defaulted: coverage.defaulted,
            fallback: None,
            ignored_add_ons: add_ons.ignored,
        };

        if breakdown.is_zero_priced() {
            let (breakdown, fallback) = self.fallback_breakdown(vehicle, idv)?;
            warn!(
                category = %vehicle.category,
                fallback = ?fallback,
                final_premium = %breakdown.final_premium,
                "Computed premium was zero, falling back"
            );
            diagnostics.fallback = Some(fallback);
            return Ok(Quote {
                breakdown,
                add_on_costs: BTreeMap::new(),
                ncb_percent: Decimal::ZERO,
                coverage,
                diagnostics,
            });
        }

        debug!(
            coverage = %coverage.kind,
            base = %breakdown.base_premium,
            gst = %breakdown.gst,
            final_premium = %breakdown.final_premium,
            "Quote priced"
        );

        Ok(Quote {
            breakdown,
            add_on_costs: add_ons.costs,
            ncb_percent: request.previous_ncb_percent,
            coverage,
            diagnostics,
        })
    }

    /// IDV of a vehicle as of `today`
    pub fn assess_idv(&self, vehicle: &VehicleProfile, today: NaiveDate) -> IdvAssessment {
        compute_idv(
            &self.tariff,
            &vehicle.ex_showroom_price,
            vehicle.registration_date,
            today,
        )
    }

    /// TP tariff plus personal-accident cover
    ///
    /// A category without TP brackets contributes only the PA cover.
    pub fn tp_premium(&self, category: VehicleCategory, capacity_cc: Decimal) -> Result<Money, RatingError> {
        let tariff = self
            .tariff
            .tp_tariff(category, capacity_cc)
            .unwrap_or_else(|| Money::zero(self.tariff.currency));
        Ok(tariff.checked_add(&self.tariff.pa_cover())?)
    }

    /// OD premium before NCB, rounded to whole units
    pub fn od_premium(
        &self,
        idv: &Money,
        vehicle_age_years: i32,
        category: VehicleCategory,
        rate_override: Option<Rate>,
    ) -> Money {
        let rate = rate_override.unwrap_or_else(|| self.tariff.od_base_rate(category));
        let factor = self.tariff.age_factor(vehicle_age_years);
        idv.multiply(rate.as_decimal() * factor).round_whole()
    }

    fn fallback_breakdown(
        &self,
        vehicle: &VehicleProfile,
        idv: Money,
    ) -> Result<(PremiumBreakdown, PricingFallback), RatingError> {
        let zero = Money::zero(self.tariff.currency);
        let tp_only = match self.tariff.tp_tariff(vehicle.category, vehicle.engine_capacity_cc) {
            Some(tariff) => Some(tariff.checked_add(&self.tariff.pa_cover())?),
            None => None,
        };

        let (tp, fallback) = match tp_only {
            Some(tp) if tp.is_positive() => (tp, PricingFallback::TpOnly),
            _ => (
                self.tariff.category_minimum(vehicle.category),
                PricingFallback::CategoryMinimum,
            ),
        };

        let breakdown = PremiumBreakdown::assemble(idv, tp, zero, zero, zero, self.tariff.gst_rate)?;
        Ok((breakdown, fallback))
    }

    fn ensure_tariff_currency(&self, price: &Money) -> Result<(), RatingError> {
        if price.currency() != self.tariff.currency {
            return Err(RatingError::invalid_input(
                "ex_showroom_price",
                format!(
                    "priced in {} but the tariff is in {}",
                    price.currency(),
                    self.tariff.currency
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::FuelType;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 14, 10, 0, 0).unwrap()
    }

    fn car(price: Decimal) -> VehicleProfile {
        VehicleProfile::new(
            VehicleCategory::FourWheeler,
            dec!(1200),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Money::inr(price),
            FuelType::Petrol,
        )
    }

    #[test]
    fn test_comprehensive_car_breakdown() {
        let engine = RatingEngine::default();
        let request = PolicyRequest::new("Comprehensive", car(dec!(800000))).with_ncb_percent(dec!(20));

        let quote = engine.quote(&request, now()).unwrap();
        let b = &quote.breakdown;

        assert_eq!(b.idv.amount(), dec!(640000));
        assert_eq!(b.tp_premium.amount(), dec!(3798));
        // 640000 * 3%, age 1 so no loading
        assert_eq!(b.ncb_discount.amount(), dec!(3840));
        assert_eq!(b.od_premium.amount(), dec!(15360));
        assert_eq!(b.base_premium.amount(), dec!(19158));
        assert_eq!(b.gst.amount(), dec!(3448));
        assert_eq!(b.final_premium.amount(), dec!(22606));
        assert!(quote.diagnostics.fallback.is_none());
    }

    #[test]
    fn test_third_party_only_skips_od_and_add_ons() {
        let engine = RatingEngine::default();
        let request = PolicyRequest::new("Third Party Only", car(dec!(800000)))
            .with_ncb_percent(dec!(50))
            .with_add_on("zeroDepreciation");

        let quote = engine.quote(&request, now()).unwrap();

        assert!(quote.breakdown.od_premium.is_zero());
        assert!(quote.breakdown.ncb_discount.is_zero());
        assert!(quote.add_on_costs.is_empty());
        assert_eq!(quote.diagnostics.ignored_add_ons, vec!["zeroDepreciation".to_string()]);
        assert_eq!(quote.breakdown.final_premium.amount(), dec!(4482));
    }

    #[test]
    fn test_age_loading_uses_manufacture_year() {
        let engine = RatingEngine::default();
        let idv = Money::inr(dec!(100000));

        assert_eq!(engine.od_premium(&idv, 2, VehicleCategory::FourWheeler, None).amount(), dec!(3000));
        assert_eq!(engine.od_premium(&idv, 4, VehicleCategory::FourWheeler, None).amount(), dec!(3300));
        assert_eq!(engine.od_premium(&idv, 6, VehicleCategory::TwoWheeler, None).amount(), dec!(3000));
        assert_eq!(
            engine
                .od_premium(&idv, 0, VehicleCategory::FourWheeler, Some(Rate::new(dec!(0.02))))
                .amount(),
            dec!(2000)
        );
    }

    #[test]
    fn test_zero_priced_standalone_falls_back_to_tp() {
        let engine = RatingEngine::default();
        let request = PolicyRequest::new("Standalone OD", car(dec!(0)));

        let quote = engine.quote(&request, now()).unwrap();

        assert_eq!(quote.diagnostics.fallback, Some(PricingFallback::TpOnly));
        assert_eq!(quote.breakdown.tp_premium.amount(), dec!(3798));
        assert!(quote.breakdown.od_premium.is_zero());
        assert!(quote.breakdown.final_premium.is_positive());
    }

    #[test]
    fn test_fallback_to_category_minimum_without_tp_tariff() {
        let mut tariff = TariffBook::default();
        tariff.tp_brackets.remove(&VehicleCategory::FourWheeler);
        let engine = RatingEngine::new(tariff);
        let request = PolicyRequest::new("Standalone OD", car(dec!(0)));

        let quote = engine.quote(&request, now()).unwrap();

        assert_eq!(quote.diagnostics.fallback, Some(PricingFallback::CategoryMinimum));
        assert_eq!(quote.breakdown.base_premium.amount(), dec!(2000));
        assert_eq!(quote.breakdown.final_premium.amount(), dec!(2360));
    }

    #[test]
    fn test_foreign_currency_price_is_rejected() {
        let engine = RatingEngine::default();
        let mut vehicle = car(dec!(10000));
        vehicle.ex_showroom_price = Money::new(dec!(10000), core_kernel::Currency::USD);

        let result = engine.quote(&PolicyRequest::new("Comprehensive", vehicle), now());
        assert!(matches!(result, Err(RatingError::InvalidInput { .. })));
    }
}
