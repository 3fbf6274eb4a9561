//! Core Kernel - Foundational types for the quotation system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Money in exact integer minor units
//! - Clocks and validity windows
//! - Identifiers for rule tables and leads
//! - Port error types for outbound collaborators

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, SystemClock, FixedClock, ValidityWindow, Timezone, TemporalError};
pub use identifiers::{RuleTableVersion, LeadId, IdentifierError};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, OperationMetadata};
