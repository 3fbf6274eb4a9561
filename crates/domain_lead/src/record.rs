//! Typed lead records
//!
//! A [`LeadRecord`] is the CRM-neutral form of a lead: contact, the
//! business-setup answers and, once a quotation exists, its total. Field
//! names of any particular CRM live in [`crate::fields`], never here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{LeadId, Money, Timezone};
use domain_quotation::{
    ActivityCategory, Emirate, JurisdictionType, OfficeSpace, Quotation, QuotationRequest,
};
use crate::contact::LeadContact;
use crate::error::LeadError;

/// Marketing attribution and rendering defaults for outgoing leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDefaults {
    /// Value of the lead-source field
    pub lead_source: String,
    /// Campaign the enquiry is attributed to, if any
    pub campaign_name: Option<String>,
    /// Timezone used to render the "valid until" date
    pub timezone: Timezone,
}

impl Default for LeadDefaults {
    fn default() -> Self {
        Self {
            lead_source: "Cost Calculator".to_string(),
            campaign_name: None,
            timezone: Timezone::gulf(),
        }
    }
}

/// A lead ready to be mapped onto a CRM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    pub lead_id: LeadId,
    pub contact: LeadContact,
    pub jurisdiction_type: JurisdictionType,
    pub emirate: Emirate,
    pub activities: Vec<ActivityCategory>,
    pub office_space: OfficeSpace,
    pub shareholders: u32,
    pub visas: u32,
    pub lead_source: String,
    pub campaign_name: Option<String>,
    quoted_total: Option<Money>,
    valid_until: Option<NaiveDate>,
    provisional: bool,
}

impl LeadRecord {
    /// Builds the enquiry part of a lead from the captured request.
    ///
    /// # Errors
    ///
    /// Returns `LeadError::InvalidContact` if the contact details fail the
    /// form rules.
    pub fn enquiry(request: &QuotationRequest, defaults: &LeadDefaults) -> Result<Self, LeadError> {
        let contact = LeadContact::from_details(request.contact())?;

        Ok(Self {
            lead_id: LeadId::new_v7(),
            contact,
            jurisdiction_type: request.jurisdiction_type(),
            emirate: request.emirate(),
            activities: request.activities().to_vec(),
            office_space: request.office_space(),
            shareholders: request.shareholders(),
            visas: request.visas(),
            lead_source: defaults.lead_source.clone(),
            campaign_name: defaults.campaign_name.clone(),
            quoted_total: None,
            valid_until: None,
            provisional: false,
        })
    }

    /// Attaches a computed quotation.
    ///
    /// This is the only way a total reaches a lead, so a total can only be
    /// present once pricing has succeeded.
    pub fn with_quotation(mut self, quotation: &Quotation, timezone: &Timezone) -> Self {
        self.quoted_total = Some(quotation.total());
        self.valid_until = Some(timezone.local_date(quotation.valid_until()));
        self.provisional = quotation.is_provisional();
        self
    }

    pub fn quoted_total(&self) -> Option<Money> {
        self.quoted_total
    }

    pub fn valid_until(&self) -> Option<NaiveDate> {
        self.valid_until
    }

    /// True when the attached quotation left office space unpriced
    pub fn is_provisional(&self) -> bool {
        self.provisional
    }
}
