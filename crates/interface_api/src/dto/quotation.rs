//! Quotation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, RuleTableVersion};
use domain_quotation::{
    ActivityCategory, ContactDetails, LineItem, OfficeSpaceOutcome, Quotation, QuotationRequest, ValidationError,
};

/// Body of `POST /api/v1/quotations`
///
/// Enumerations arrive as the labels the form submits ("Freezone",
/// "Abu Dhabi", "Services or Consultancy"). Omitted headcount and office
/// fields take the form's defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuotationRequest {
    pub jurisdiction_type: String,
    pub emirate: String,
    pub activities: Vec<String>,
    pub office_space: Option<String>,
    pub shareholders: Option<u32>,
    pub visas: Option<u32>,
    pub contact: ContactRequest,
    /// Prices against a specific table instead of the active one
    pub rule_table_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub mobile: String,
    pub nationality: String,
}

impl From<ContactRequest> for ContactDetails {
    fn from(contact: ContactRequest) -> Self {
        ContactDetails {
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            country_code: contact.country_code,
            mobile: contact.mobile,
            nationality: contact.nationality,
        }
    }
}

impl CreateQuotationRequest {
    /// Parses labels into a domain request
    ///
    /// Unknown labels fail here; structural checks (activity count,
    /// headcount ranges) are left to the engine.
    pub fn into_request(self) -> Result<QuotationRequest, ValidationError> {
        let mut builder = QuotationRequest::builder()
            .jurisdiction_type(self.jurisdiction_type.parse()?)
            .emirate(self.emirate.parse()?)
            .activities(
                self.activities
                    .iter()
                    .map(|a| a.parse::<ActivityCategory>())
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .contact(self.contact.into());

        if let Some(office_space) = self.office_space {
            builder = builder.office_space(office_space.parse()?);
        }
        if let Some(shareholders) = self.shareholders {
            builder = builder.shareholders(shareholders);
        }
        if let Some(visas) = self.visas {
            builder = builder.visas(visas);
        }

        builder.build()
    }
}

/// Amount in minor units with its two-decimal major rendering
#[derive(Debug, Clone, Serialize)]
pub struct AmountResponse {
    pub minor: u64,
    pub major: String,
    pub currency: String,
}

impl From<Money> for AmountResponse {
    fn from(money: Money) -> Self {
        Self {
            minor: money.minor(),
            major: format!("{:.2}", money.to_major()),
            currency: money.currency().code().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItemResponse {
    pub code: String,
    pub category: String,
    pub description: String,
    pub amount: AmountResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount: Option<AmountResponse>,
    /// Rule that produced the line
    pub rule_id: String,
}

impl From<&LineItem> for LineItemResponse {
    fn from(line: &LineItem) -> Self {
        Self {
            code: line.code.clone(),
            category: line.category.slug().to_string(),
            description: line.description.clone(),
            amount: line.amount.into(),
            units: line.basis.map(|b| b.units),
            unit_amount: line.basis.map(|b| b.unit_amount.into()),
            rule_id: line.rule.rule.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotationResponse {
    pub line_items: Vec<LineItemResponse>,
    pub total: AmountResponse,
    pub currency: String,
    pub rule_table_version: RuleTableVersion,
    pub computed_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub office_space: OfficeSpaceOutcome,
    pub provisional: bool,
}

impl From<&Quotation> for QuotationResponse {
    fn from(quotation: &Quotation) -> Self {
        Self {
            line_items: quotation.line_items().iter().map(LineItemResponse::from).collect(),
            total: quotation.total().into(),
            currency: quotation.currency().code().to_string(),
            rule_table_version: quotation.table_version().clone(),
            computed_at: quotation.computed_at(),
            valid_until: quotation.valid_until(),
            office_space: quotation.office_space(),
            provisional: quotation.is_provisional(),
        }
    }
}
