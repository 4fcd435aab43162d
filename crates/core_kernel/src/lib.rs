//! Core Kernel - Foundational types for the motor insurance engines
//!
//! This crate provides the building blocks shared by the rating and claims
//! domains:
//! - Money and rates with precise decimal arithmetic
//! - Calendar arithmetic for depreciation and policy periods
//! - Strongly typed identifiers
//! - Port infrastructure for collaborator contracts

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{CoveragePeriod, TemporalError, months_between, months_before, years_between};
pub use identifiers::{PolicyId, ClaimId, UserId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort};
