//! Motor Rating Domain
//!
//! This crate prices motor policies: it turns a vehicle profile and the
//! requested coverage into a [`PremiumBreakdown`] and freezes it on an
//! issued [`Policy`].
//!
//! # Rating Pipeline
//!
//! ```text
//! price + registration -> IDV -> OD premium -> NCB -> add-ons \
//!                                                              -> base -> GST -> final
//! category + capacity -> TP tariff + PA cover ----------------/
//! ```
//!
//! All figures come from a [`TariffBook`]; the engine holds no other state.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_rating::{RatingEngine, PolicyRequest};
//!
//! let engine = RatingEngine::default();
//! let request = PolicyRequest::new("Comprehensive", vehicle).with_ncb_percent(dec!(20));
//! let quote = engine.quote(&request, Utc::now())?;
//! println!("Payable: {}", quote.final_premium());
//! ```

pub mod addons;
pub mod coverage;
pub mod depreciation;
pub mod engine;
pub mod error;
pub mod ncb;
pub mod policy;
pub mod premium;
pub mod tariff;
pub mod vehicle;

pub use addons::{AddOn, AddOnPricing};
pub use coverage::{classify_coverage, CoverageClassification, CoverageKind};
pub use depreciation::{compute_idv, IdvAssessment};
pub use engine::RatingEngine;
pub use error::RatingError;
pub use ncb::{ncb_discount, NcbSlab};
pub use policy::{Policy, PolicyStatus};
pub use premium::{PremiumBreakdown, PricingFallback, Quote, QuoteDiagnostics};
pub use tariff::{AgeLoading, DepreciationBand, FlatDepreciation, TariffBook, TpBracket};
pub use vehicle::{FuelType, PolicyRequest, VehicleCategory, VehicleProfile};
