//! No-claim bonus
//!
//! NCB is earned per claim-free policy year and discounts the own-damage
//! premium only.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, MoneyError, Rate};

/// NCB slab earned after a run of claim-free years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NcbSlab {
    None,
    Twenty,
    TwentyFive,
    ThirtyFive,
    FortyFive,
    Fifty,
}

impl NcbSlab {
    /// Slab for a number of consecutive claim-free years
    pub fn for_claim_free_years(years: u32) -> Self {
        match years {
            0 => NcbSlab::None,
            1 => NcbSlab::Twenty,
            2 => NcbSlab::TwentyFive,
            3 => NcbSlab::ThirtyFive,
            4 => NcbSlab::FortyFive,
            _ => NcbSlab::Fifty,
        }
    }

    /// Discount percentage
    pub fn percent(&self) -> Decimal {
        match self {
            NcbSlab::None => dec!(0),
            NcbSlab::Twenty => dec!(20),
            NcbSlab::TwentyFive => dec!(25),
            NcbSlab::ThirtyFive => dec!(35),
            NcbSlab::FortyFive => dec!(45),
            NcbSlab::Fifty => dec!(50),
        }
    }
}

/// Discount for an NCB percentage, rounded to whole units
///
/// Zero or negative percentages give no discount; the discount never
/// exceeds the OD premium it applies to.
pub fn ncb_discount(od_premium: &Money, percent: Decimal) -> Result<Money, MoneyError> {
    if percent <= Decimal::ZERO {
        return Ok(Money::zero(od_premium.currency()));
    }
    Rate::from_percentage(percent)
        .apply_whole(od_premium)
        .min(&od_premium.clamp_non_negative())
}
