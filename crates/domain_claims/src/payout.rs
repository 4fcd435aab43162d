//! Payout bands
//!
//! An approved claim pays a share of the policy's final premium. The share
//! starts as `severity / 100` and is clamped into the band the severity
//! falls in.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, Rate};
use domain_rating::Policy;

use crate::disposition::Outcome;

/// Payout status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutStatus {
    /// Approved but nothing to pay yet
    Pending,
    Approved,
    Rejected,
}

/// Amount owed on a decided claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub amount: Money,
    pub status: PayoutStatus,
}

impl Payout {
    pub fn rejected(currency: Currency) -> Self {
        Self {
            amount: Money::zero(currency),
            status: PayoutStatus::Rejected,
        }
    }

    pub fn pending(currency: Currency) -> Self {
        Self {
            amount: Money::zero(currency),
            status: PayoutStatus::Pending,
        }
    }
}

/// Multiplier bounds for severities at or above `from_severity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutBand {
    pub from_severity: u8,
    pub floor: Decimal,
    pub cap: Decimal,
}

/// Payout bands, highest severity first
pub const PAYOUT_BANDS: [PayoutBand; 4] = [
    PayoutBand { from_severity: 90, floor: dec!(0), cap: dec!(0.95) },
    PayoutBand { from_severity: 75, floor: dec!(0.70), cap: dec!(0.85) },
    PayoutBand { from_severity: 60, floor: dec!(0.50), cap: dec!(0.70) },
    PayoutBand { from_severity: 45, floor: dec!(0.30), cap: dec!(0.50) },
];

/// Share of the premium paid for a severity
///
/// Severities below the lowest band keep `severity / 100` unclamped.
pub fn payout_multiplier(severity: u8) -> Rate {
    let raw = Decimal::from(severity) / dec!(100);
    let clamped = PAYOUT_BANDS
        .iter()
        .find(|band| severity >= band.from_severity)
        .map_or(raw, |band| raw.clamp(band.floor, band.cap));
    Rate::new(clamped)
}

/// Payout for a decided claim
///
/// `InReview` has no payout. A missing policy on approval pays nothing and
/// stays `Pending`.
pub fn compute_payout(
    outcome: Outcome,
    severity: Option<u8>,
    policy: Option<&Policy>,
    currency: Currency,
) -> Option<Payout> {
    match outcome {
        Outcome::InReview => None,
        Outcome::Rejected => Some(Payout::rejected(currency)),
        Outcome::Approved => {
            let Some(policy) = policy else {
                return Some(Payout::pending(currency));
            };
            let multiplier = payout_multiplier(severity.unwrap_or(0));
            let amount = multiplier.apply_whole(&policy.premium());
            let status = if amount.is_positive() {
                PayoutStatus::Approved
            } else {
                PayoutStatus::Pending
            };
            Some(Payout { amount, status })
        }
    }
}
