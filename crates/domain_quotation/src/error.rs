//! Quotation engine errors
//!
//! The engine fails in exactly two ways. A [`ValidationError`] means the
//! request is structurally inconsistent and the caller must fix it. A
//! [`ConfigurationError`] means the request is fine but the rule table does
//! not price it; that is a data defect and must reach operations, not the
//! end user.

use thiserror::Error;

use core_kernel::RuleTableVersion;
use crate::request::RequestField;
use crate::rule_table::RuleKey;

/// The request violates a structural invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    /// Offending request field
    pub field: RequestField,
    /// Human readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: RequestField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The rule table has no coverage for a well-formed request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Rule table {table_version} has no rule for {missing}")]
pub struct ConfigurationError {
    /// Version of the table that was consulted
    pub table_version: RuleTableVersion,
    /// Key that was looked up and not found
    pub missing: RuleKey,
}

/// Errors returned by `compute`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl EngineError {
    /// Neither kind succeeds on retry: validation needs a new request,
    /// configuration needs a new rule table.
    pub fn is_retryable(&self) -> bool {
        false
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::Configuration(_))
    }

    /// Request field at fault, for validation failures
    pub fn field(&self) -> Option<RequestField> {
        match self {
            EngineError::Validation(e) => Some(e.field),
            EngineError::Configuration(_) => None,
        }
    }
}
