//! Lead hand-off errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use core_kernel::PortError;

/// One failed contact rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ContactIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur while handing a lead to the CRM
#[derive(Debug, Error)]
pub enum LeadError {
    /// Contact details failed validation
    #[error("Invalid contact details: {}", join_issues(.0))]
    InvalidContact(Vec<ContactIssue>),

    /// The sink refused or failed to take the lead
    #[error("Lead sink error: {0}")]
    Sink(#[from] PortError),
}

impl LeadError {
    /// Returns true if resubmitting may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            LeadError::InvalidContact(_) => false,
            LeadError::Sink(e) => e.is_transient(),
        }
    }
}

fn join_issues(issues: &[ContactIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_contact_display() {
        let err = LeadError::InvalidContact(vec![
            ContactIssue {
                field: "email".to_string(),
                message: "Please enter a valid email address".to_string(),
            },
            ContactIssue {
                field: "mobile".to_string(),
                message: "Mobile number must be at least 8 characters".to_string(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid contact details: email: Please enter a valid email address; mobile: Mobile number must be at least 8 characters"
        );
        assert!(!err.is_transient());
    }

    #[test]
    fn test_sink_error_transience() {
        let err: LeadError = PortError::ServiceUnavailable {
            service: "crm".to_string(),
        }
        .into();
        assert!(err.is_transient());
    }
}
