//! Claims Disposition Domain
//!
//! This crate decides motor claims from the output of an external damage
//! assessment, prices the payout of approved claims and records manual
//! reviews.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> Approved | Rejected          (rule chain or reviewer)
//! Submitted -> In Review -> Approved | Rejected   (reviewer only)
//! ```
//!
//! The rule chain runs once per claim; a claim that has left `Submitted` is
//! never decided automatically again.

pub mod claim;
pub mod config;
pub mod disposition;
pub mod engine;
pub mod error;
pub mod payout;
pub mod ports;
pub mod review;
pub mod rules;
pub mod service;

pub use claim::{AutomationRecord, Claim, ClaimDecision, ClaimStatus, DecisionSource, MlAssessment, ReviewRecord};
pub use config::AutomationConfig;
pub use disposition::{DecisionResult, Disposition, Outcome};
pub use engine::DispositionEngine;
pub use error::ClaimError;
pub use payout::{compute_payout, payout_multiplier, Payout, PayoutBand, PayoutStatus, PAYOUT_BANDS};
pub use ports::ClaimsPort;
pub use review::{ReviewDecision, ReviewOutcome};
pub use rules::{evaluate_chain, DecisionContext, DispositionRule, DISPOSITION_CHAIN};
pub use service::{AutomationOutcome, ClaimAutomationService, SkipReason};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClaimsPort;
