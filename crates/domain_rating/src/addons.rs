//! Optional add-on covers
//!
//! Each add-on is priced as a fixed share of the NCB-adjusted own-damage
//! premium. The shares live in the [`TariffBook`](crate::tariff::TariffBook);
//! this module only knows the identifiers and how to price a selection.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

use core_kernel::{Money, Rate};

/// Add-on covers offered alongside own-damage cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddOn {
    ZeroDepreciation,
    EngineProtector,
    ReturnToInvoice,
    NcbProtector,
    RoadsideAssistance,
    KeyLockCover,
    TyreProtection,
    ConsumablesCover,
}

impl AddOn {
    /// All add-ons in display order
    pub const ALL: [AddOn; 8] = [
        AddOn::ZeroDepreciation,
        AddOn::EngineProtector,
        AddOn::ReturnToInvoice,
        AddOn::NcbProtector,
        AddOn::RoadsideAssistance,
        AddOn::KeyLockCover,
        AddOn::TyreProtection,
        AddOn::ConsumablesCover,
    ];

    /// Canonical identifier as submitted by proposal forms
    pub fn id(&self) -> &'static str {
        match self {
            AddOn::ZeroDepreciation => "zeroDepreciation",
            AddOn::EngineProtector => "engineProtector",
            AddOn::ReturnToInvoice => "returnToInvoice",
            AddOn::NcbProtector => "ncbProtector",
            AddOn::RoadsideAssistance => "roadsideAssistance",
            AddOn::KeyLockCover => "keyLockCover",
            AddOn::TyreProtection => "tyreProtection",
            AddOn::ConsumablesCover => "consumablesCover",
        }
    }

    /// Resolves an identifier, ignoring case and `_`, `-` or space separators
    ///
    /// `zeroDepreciation`, `zero_depreciation` and `Zero-Depreciation` all
    /// resolve to [`AddOn::ZeroDepreciation`]. Unknown identifiers yield `None`.
    pub fn from_id(id: &str) -> Option<AddOn> {
        let wanted = normalize(id);
        AddOn::ALL.into_iter().find(|a| normalize(a.id()) == wanted)
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn normalize(id: &str) -> String {
    id.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Priced add-on selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnPricing {
    /// Cost of each recognised add-on
    pub costs: BTreeMap<AddOn, Money>,
    /// Sum of all costs
    pub total: Money,
    /// Identifiers that did not match any known add-on
    pub ignored: Vec<String>,
}

/// Prices the selected add-ons against the NCB-adjusted OD premium
///
/// Each cost is rounded to whole units before summing. Identifiers without a
/// tariff rate are skipped, not rejected.
pub fn price_add_ons(
    od_premium: &Money,
    selected: &BTreeSet<String>,
    rates: &BTreeMap<AddOn, Rate>,
) -> Result<AddOnPricing, core_kernel::MoneyError> {
    let mut costs = BTreeMap::new();
    let mut ignored = Vec::new();

    for id in selected {
        match AddOn::from_id(id).and_then(|a| rates.get(&a).map(|r| (a, r))) {
            Some((add_on, rate)) => {
                costs.insert(add_on, rate.apply_whole(od_premium));
            }
            None => {
                debug!(add_on = %id, "Ignoring unrecognised add-on");
                ignored.push(id.clone());
            }
        }
    }

    let total = Money::sum(od_premium.currency(), costs.values())?;
    Ok(AddOnPricing { costs, total, ignored })
}
