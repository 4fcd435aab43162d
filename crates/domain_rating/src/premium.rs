//! Premium breakdowns and quotes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{Money, MoneyError, Rate};

use crate::addons::AddOn;
use crate::coverage::CoverageClassification;

/// Components of a priced policy
///
/// `base_premium` is always `tp_premium + od_premium + add_ons_premium` and
/// `final_premium` is always `base_premium + gst`. Only [`PremiumBreakdown::assemble`]
/// builds one, so the identities hold for every breakdown in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    /// Insured Declared Value the OD premium was rated on
    pub idv: Money,
    /// TP tariff premium including personal-accident cover
    pub tp_premium: Money,
    /// OD premium after the NCB discount
    pub od_premium: Money,
    pub add_ons_premium: Money,
    pub ncb_discount: Money,
    pub base_premium: Money,
    pub gst: Money,
    pub final_premium: Money,
}

impl PremiumBreakdown {
    /// Sums the components and applies GST, rounded to whole units
    pub fn assemble(
        idv: Money,
        tp_premium: Money,
        od_premium: Money,
        add_ons_premium: Money,
        ncb_discount: Money,
        gst_rate: Rate,
    ) -> Result<Self, MoneyError> {
        let base_premium = tp_premium.checked_add(&od_premium)?.checked_add(&add_ons_premium)?;
        let gst = gst_rate.apply_whole(&base_premium);
        let final_premium = base_premium.checked_add(&gst)?;

        Ok(Self {
            idv,
            tp_premium,
            od_premium,
            add_ons_premium,
            ncb_discount,
            base_premium,
            gst,
            final_premium,
        })
    }

    /// True when either the base or the final premium came out as zero
    pub fn is_zero_priced(&self) -> bool {
        self.base_premium.is_zero() || self.final_premium.is_zero()
    }
}

/// How a zero-priced quote was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingFallback {
    /// Re-priced as third-party cover only
    TpOnly,
    /// The category had no TP tariff, so the category minimum was charged
    CategoryMinimum,
}

/// Notes on how a quote was produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDiagnostics {
    /// The policy type label matched no keyword and comprehensive was assumed
    pub coverage_defaulted: bool,
    /// Set when the zero-premium guard replaced the computed breakdown
    pub fallback: Option<PricingFallback>,
    /// Add-on identifiers that were not priced
    pub ignored_add_ons: Vec<String>,
}

/// A priced policy request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub breakdown: PremiumBreakdown,
    /// Cost of each priced add-on
    pub add_on_costs: BTreeMap<AddOn, Money>,
    /// NCB percentage that was applied to the OD premium
    pub ncb_percent: Decimal,
    pub coverage: CoverageClassification,
    pub diagnostics: QuoteDiagnostics,
}

impl Quote {
    /// Amount payable by the customer
    pub fn final_premium(&self) -> Money {
        self.breakdown.final_premium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assemble_applies_gst_to_base() {
        let b = PremiumBreakdown::assemble(
            Money::inr(dec!(640000)),
            Money::inr(dec!(3798)),
            Money::inr(dec!(16896)),
            Money::zero(Default::default()),
            Money::inr(dec!(4224)),
            Rate::from_percentage(dec!(18)),
        )
        .unwrap();

        assert_eq!(b.base_premium.amount(), dec!(20694));
        assert_eq!(b.gst.amount(), dec!(3725));
        assert_eq!(b.final_premium.amount(), dec!(24419));
        assert!(!b.is_zero_priced());
    }

    #[test]
    fn test_zero_components_are_zero_priced() {
        let zero = Money::zero(Default::default());
        let b = PremiumBreakdown::assemble(zero, zero, zero, zero, zero, Rate::from_percentage(dec!(18))).unwrap();

        assert!(b.is_zero_priced());
    }
}
