//! Business-Setup Quotation Domain
//!
//! This crate turns a structured business-setup request (jurisdiction,
//! emirate, activities, headcount, office needs) into a priced, itemized
//! quotation. It performs no I/O on the computation path: the rule table is
//! supplied as an immutable snapshot and the current time comes from an
//! injected clock.
//!
//! # Architecture
//!
//! - **Rule Resolver**: validates structural invariants and selects rules
//! - **Fee Calculator**: turns rules into category-tagged line items
//! - **Quotation Assembler**: totals the lines and stamps validity
//! - **Rule tables**: typed keys, JSON loading, atomic version snapshots
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_quotation::{compute, QuotationRequest, RuleTableLoader};
//!
//! let table = RuleTableLoader::from_file("config/rule_tables/standard.json")?;
//! let request = QuotationRequest::builder()
//!     .activity(ActivityCategory::Trading)
//!     .contact(contact)
//!     .build()?;
//!
//! let quotation = compute(&request, &table, &SystemClock)?;
//! ```

pub mod request;
pub mod rule_table;
pub mod loader;
pub mod store;
pub mod resolver;
pub mod calculator;
pub mod assembler;
pub mod quotation;
pub mod error;
pub mod services;

pub use request::{
    ActivityCategory, ContactDetails, Emirate, JurisdictionType, OfficeSpace, QuotationRequest,
    QuotationRequestBuilder, RequestField, SHAREHOLDER_RANGE, VISA_RANGE,
};
pub use rule_table::{
    ActivityFee, BaseFee, FeeDefinition, OfficeSpaceSurcharge, RuleKey, RuleKind, RuleRef,
    RuleTable, RuleTableBuilder, RuleTableError, RuleTableMetadata,
};
pub use loader::{RuleTableLoader, RulesError};
pub use store::{RuleTableSet, RuleTableStore, StoreError};
pub use resolver::{resolve, validate, OfficeSpaceResolution, ResolvedRule, ResolvedRuleSet};
pub use calculator::{calculate, FeeBreakdown, LineCategory, LineItem, UnitBasis};
pub use assembler::assemble;
pub use quotation::{BreakdownEntry, OfficeSpaceOutcome, Quotation, ValidityPolicy};
pub use error::{ConfigurationError, EngineError, ValidationError};
pub use services::{compute, QuotationEngine};
