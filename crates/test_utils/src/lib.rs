//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! quotation engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: The shipped rule table, a fixed clock and contacts
//! - `builders`: Rule tables covering every combination, with holes on demand
//! - `assertions`: Quotation-level invariant checks
//! - `generators`: Property-based request generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
