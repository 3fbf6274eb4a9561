//! CRM field mapping
//!
//! Maps each [`LeadField`] of a record onto the key an external CRM expects.
//! The default map targets the web-to-lead form used by the enquiry page;
//! custom fields there are opaque `LEADCF*` keys.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use core_kernel::LeadId;
use domain_quotation::OfficeSpace;
use crate::record::LeadRecord;

/// Every value a lead record can contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeadField {
    FirstName,
    LastName,
    Email,
    Mobile,
    Nationality,
    Emirate,
    JurisdictionType,
    Activities,
    OfficeSpace,
    Shareholders,
    Visas,
    LeadSource,
    CampaignName,
    QuotedTotal,
    ValidUntil,
}

impl LeadField {
    /// Payload order
    pub const ALL: [LeadField; 15] = [
        LeadField::FirstName,
        LeadField::LastName,
        LeadField::Email,
        LeadField::Mobile,
        LeadField::Nationality,
        LeadField::Emirate,
        LeadField::JurisdictionType,
        LeadField::Activities,
        LeadField::OfficeSpace,
        LeadField::Shareholders,
        LeadField::Visas,
        LeadField::LeadSource,
        LeadField::CampaignName,
        LeadField::QuotedTotal,
        LeadField::ValidUntil,
    ];

    /// Renders this field of `record`, or `None` when it has no value yet
    pub fn value_of(&self, record: &LeadRecord) -> Option<String> {
        match self {
            LeadField::FirstName => Some(record.contact.first_name.clone()),
            LeadField::LastName => Some(record.contact.last_name.clone()),
            LeadField::Email => Some(record.contact.email.clone()),
            LeadField::Mobile => Some(record.contact.full_mobile()),
            LeadField::Nationality => Some(record.contact.nationality.clone()),
            LeadField::Emirate => Some(record.emirate.to_string()),
            LeadField::JurisdictionType => Some(record.jurisdiction_type.to_string()),
            LeadField::Activities => Some(
                record
                    .activities
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            LeadField::OfficeSpace => Some(
                match record.office_space {
                    OfficeSpace::Undecided => "Not decided yet",
                    other => other.label(),
                }
                .to_string(),
            ),
            LeadField::Shareholders => Some(record.shareholders.to_string()),
            LeadField::Visas => Some(record.visas.to_string()),
            LeadField::LeadSource => Some(record.lead_source.clone()),
            LeadField::CampaignName => record.campaign_name.clone(),
            LeadField::QuotedTotal => record.quoted_total().map(|total| {
                format!(
                    "{:.dp$}",
                    total.to_major(),
                    dp = total.currency().decimal_places() as usize
                )
            }),
            LeadField::ValidUntil => record.valid_until().map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Ordered key/value pairs handed to a lead sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadPayload {
    lead_id: LeadId,
    entries: Vec<(String, String)>,
}

impl LeadPayload {
    pub fn new(lead_id: LeadId, entries: Vec<(String, String)>) -> Self {
        Self { lead_id, entries }
    }

    pub fn lead_id(&self) -> LeadId {
        self.lead_id
    }

    /// Value stored under an external key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LeadPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// External key for each lead field
///
/// Fields without a key are left out of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmFieldMap {
    keys: BTreeMap<LeadField, String>,
}

impl CrmFieldMap {
    /// A map with no keys
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Keys of the web-to-lead form behind the enquiry page
    pub fn web_to_lead() -> Self {
        Self::empty()
            .with_key(LeadField::FirstName, "First Name")
            .with_key(LeadField::LastName, "Last Name")
            .with_key(LeadField::Email, "Email")
            .with_key(LeadField::Mobile, "Mobile")
            .with_key(LeadField::Nationality, "LEADCF6")
            .with_key(LeadField::Emirate, "LEADCF1")
            .with_key(LeadField::JurisdictionType, "LEADCF4")
            .with_key(LeadField::Activities, "LEADCF3")
            .with_key(LeadField::OfficeSpace, "LEADCF5")
            .with_key(LeadField::Shareholders, "LEADCF2")
            .with_key(LeadField::Visas, "LEADCF7")
            .with_key(LeadField::LeadSource, "Lead Source")
            .with_key(LeadField::CampaignName, "Campaign Name")
            .with_key(LeadField::QuotedTotal, "Quotation Total")
    }

    /// Sets or replaces the key of a field
    pub fn with_key(mut self, field: LeadField, key: impl Into<String>) -> Self {
        self.keys.insert(field, key.into());
        self
    }

    /// Stops sending a field
    pub fn without(mut self, field: LeadField) -> Self {
        self.keys.remove(&field);
        self
    }

    pub fn key(&self, field: LeadField) -> Option<&str> {
        self.keys.get(&field).map(String::as_str)
    }

    /// Maps a record onto external keys in [`LeadField::ALL`] order
    pub fn to_payload(&self, record: &LeadRecord) -> LeadPayload {
        let entries = LeadField::ALL
            .iter()
            .filter_map(|field| {
                let key = self.key(*field)?;
                let value = field.value_of(record)?;
                Some((key.to_string(), value))
            })
            .collect();

        LeadPayload::new(record.lead_id, entries)
    }
}

impl Default for CrmFieldMap {
    fn default() -> Self {
        Self::web_to_lead()
    }
}
