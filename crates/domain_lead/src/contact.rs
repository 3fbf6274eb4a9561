//! Contact validation
//!
//! The pricing engine carries contact details through untouched. Before a
//! lead leaves the system they are trimmed and checked against the same
//! rules the enquiry form applies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_quotation::ContactDetails;
use crate::error::{ContactIssue, LeadError};

/// Validated contact details of a prospect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LeadContact {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Country code is required"))]
    pub country_code: String,
    #[validate(length(min = 8, message = "Mobile number must be at least 8 characters"))]
    pub mobile: String,
    #[validate(length(min = 1, message = "Nationality is required"))]
    pub nationality: String,
}

impl LeadContact {
    /// Trims and validates raw contact details.
    ///
    /// All violations are reported at once, ordered by field name.
    pub fn from_details(details: &ContactDetails) -> Result<Self, LeadError> {
        let contact = Self {
            first_name: details.first_name.trim().to_string(),
            last_name: details.last_name.trim().to_string(),
            email: details.email.trim().to_string(),
            country_code: details.country_code.trim().to_string(),
            mobile: details.mobile.trim().to_string(),
            nationality: details.nationality.trim().to_string(),
        };

        if let Err(errors) = contact.validate() {
            let mut issues: Vec<ContactIssue> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| ContactIssue {
                        field: field.to_string(),
                        message: e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    })
                })
                .collect();
            issues.sort_by(|a, b| a.field.cmp(&b.field));
            return Err(LeadError::InvalidContact(issues));
        }

        Ok(contact)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Mobile number with its country code, as the CRM expects it
    pub fn full_mobile(&self) -> String {
        format!("{} {}", self.country_code, self.mobile)
    }
}
