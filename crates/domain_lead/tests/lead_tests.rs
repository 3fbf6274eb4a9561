//! Lead Hand-off Tests
//!
//! Exercises the public API with a sink implemented outside the crate, the
//! way a CRM adapter would be.
//!
//! # Test Organization
//!
//! - `enquiries` - Leads sent before pricing
//! - `custom_sinks` - Third-party `LeadSink` implementations

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use core_kernel::{DomainPort, OperationMetadata, PortError};
use domain_lead::{
    CrmFieldMap, LeadDefaults, LeadError, LeadField, LeadHandoff, LeadPayload, LeadReceipt,
    LeadRecord, LeadSink,
};
use domain_quotation::{ActivityCategory, ContactDetails, Emirate, JurisdictionType, OfficeSpace, QuotationRequest};

/// Sink that keeps payloads and can reject duplicates by email
#[derive(Default)]
struct RecordingSink {
    payloads: Mutex<Vec<LeadPayload>>,
}

impl DomainPort for RecordingSink {}

#[async_trait]
impl LeadSink for RecordingSink {
    async fn submit(
        &self,
        payload: LeadPayload,
        _metadata: OperationMetadata,
    ) -> Result<LeadReceipt, PortError> {
        let mut payloads = self.payloads.lock().unwrap();
        let email = payload.get("Email").map(str::to_string);
        if payloads.iter().any(|p| p.get("Email").map(str::to_string) == email) {
            return Err(PortError::rejected("recording-sink", "duplicate lead"));
        }

        let receipt = LeadReceipt {
            lead_id: payload.lead_id(),
            external_reference: None,
            accepted_at: Utc::now(),
        };
        payloads.push(payload);
        Ok(receipt)
    }
}

fn mainland_request() -> QuotationRequest {
    QuotationRequest::builder()
        .jurisdiction_type(JurisdictionType::Mainland)
        .emirate(Emirate::RasAlKhaimah)
        .activity(ActivityCategory::ServicesOrConsultancy)
        .office_space(OfficeSpace::Yes)
        .shareholders(4)
        .visas(6)
        .contact(ContactDetails {
            first_name: "Tomás".to_string(),
            last_name: "Ortega".to_string(),
            email: "tomas.ortega@example.com".to_string(),
            country_code: "+34".to_string(),
            mobile: "612345678".to_string(),
            nationality: "Spain".to_string(),
        })
        .build()
        .unwrap()
}

mod enquiries {
    use super::*;

    #[test]
    fn test_enquiry_record_echoes_request() {
        let record = LeadRecord::enquiry(&mainland_request(), &LeadDefaults::default()).unwrap();

        assert_eq!(record.emirate, Emirate::RasAlKhaimah);
        assert_eq!(record.shareholders, 4);
        assert_eq!(record.quoted_total(), None);
        assert!(!record.is_provisional());
    }

    #[test]
    fn test_enquiry_payload_uses_form_labels() {
        let record = LeadRecord::enquiry(&mainland_request(), &LeadDefaults::default()).unwrap();
        let payload = CrmFieldMap::default().to_payload(&record);

        assert_eq!(payload.get("LEADCF1"), Some("RAK"));
        assert_eq!(payload.get("LEADCF4"), Some("Mainland"));
        assert_eq!(payload.get("LEADCF5"), Some("Yes"));
        assert_eq!(payload.get("LEADCF6"), Some("Spain"));
        assert_eq!(payload.get("Last Name"), Some("Ortega"));
    }

    #[test]
    fn test_every_mapped_field_has_a_key() {
        let map = CrmFieldMap::web_to_lead();
        let unmapped: Vec<LeadField> = LeadField::ALL
            .iter()
            .copied()
            .filter(|f| map.key(*f).is_none())
            .collect();

        assert_eq!(unmapped, vec![LeadField::ValidUntil]);
    }
}

mod custom_sinks {
    use super::*;

    #[tokio::test]
    async fn test_third_party_sink_receives_enquiry() {
        let sink = Arc::new(RecordingSink::default());
        let handoff = LeadHandoff::new(sink.clone(), CrmFieldMap::default(), LeadDefaults::default());

        let receipt = handoff
            .submit_enquiry(&mainland_request(), OperationMetadata::default())
            .await
            .unwrap();

        let payloads = sink.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].lead_id(), receipt.lead_id);
    }

    #[tokio::test]
    async fn test_rejection_is_not_transient() {
        let sink = Arc::new(RecordingSink::default());
        let handoff = LeadHandoff::new(sink, CrmFieldMap::default(), LeadDefaults::default());

        handoff
            .submit_enquiry(&mainland_request(), OperationMetadata::default())
            .await
            .unwrap();
        let err = handoff
            .submit_enquiry(&mainland_request(), OperationMetadata::default())
            .await
            .unwrap_err();

        match err {
            LeadError::Sink(PortError::Rejected { reason, .. }) => assert_eq!(reason, "duplicate lead"),
            other => panic!("Expected rejection, got {:?}", other),
        }
    }
}
