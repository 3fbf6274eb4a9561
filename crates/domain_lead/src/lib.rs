//! Lead Hand-off Domain
//!
//! Prepares captured enquiries and computed quotations for an external CRM.
//! The quotation engine never sees anything in this crate.
//!
//! # Flow
//!
//! ```text
//! QuotationRequest ──► LeadRecord::enquiry ──► CrmFieldMap ──► LeadSink
//!        │                    ▲
//!        ▼                    │ with_quotation
//!     compute ──► Quotation ──┘
//! ```

pub mod contact;
pub mod record;
pub mod fields;
pub mod ports;
pub mod services;
pub mod error;

pub use contact::LeadContact;
pub use record::{LeadDefaults, LeadRecord};
pub use fields::{CrmFieldMap, LeadField, LeadPayload};
pub use ports::{LeadReceipt, LeadSink};
pub use services::LeadHandoff;
pub use error::{ContactIssue, LeadError};
