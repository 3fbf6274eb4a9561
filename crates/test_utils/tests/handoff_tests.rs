//! End-to-End Tests: Quotation to Lead
//!
//! Prices requests against the shipped table and hands the result to an
//! in-memory lead sink, the way the HTTP layer does.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{OperationMetadata, Timezone};
use domain_lead::ports::mock::InMemoryLeadSink;
use domain_lead::{CrmFieldMap, LeadDefaults, LeadField, LeadHandoff};
use domain_quotation::{compute, ActivityCategory, Emirate, JurisdictionType, OfficeSpace};
use test_utils::*;

fn handoff(sink: &InMemoryLeadSink) -> LeadHandoff {
    LeadHandoff::new(
        Arc::new(sink.clone()),
        CrmFieldMap::web_to_lead(),
        LeadDefaults {
            lead_source: "Cost Calculator".to_string(),
            campaign_name: None,
            timezone: Timezone::gulf(),
        },
    )
}

#[tokio::test]
async fn test_quotation_reaches_sink_with_total() {
    let request = request()
        .jurisdiction_type(JurisdictionType::Freezone)
        .emirate(Emirate::Dubai)
        .activities([ActivityCategory::Trading, ActivityCategory::Manufacturing])
        .office_space(OfficeSpace::Yes)
        .shareholders(2)
        .visas(3)
        .build()
        .unwrap();

    let quotation = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();
    assert_total_is_sum_of_lines(&quotation);

    // 10,000 + 3,000 + 5,000 + 2,000 + 3 x 1,500 + 15,000
    assert_eq!(quotation.total(), aed(39_500));

    let sink = InMemoryLeadSink::new();
    handoff(&sink)
        .submit_quotation(&quotation, OperationMetadata::with_correlation_id("e2e-1"))
        .await
        .unwrap();

    let submissions = sink.submissions().await;
    assert_eq!(submissions.len(), 1);

    let (payload, _) = &submissions[0];
    assert_eq!(payload.get("Quotation Total"), Some("39500.00"));
    assert_eq!(payload.get("LEADCF3"), Some("Trading, Manufacturing"));
    assert_eq!(payload.get("LEADCF5"), Some("Yes"));
    assert_eq!(payload.get("LEADCF2"), Some("2"));
    assert_eq!(payload.get("LEADCF7"), Some("3"));
    assert_eq!(payload.get("Campaign Name"), None);
}

#[tokio::test]
async fn test_enquiry_and_quotation_share_request_fields() {
    let request = request()
        .activity(ActivityCategory::ServicesOrConsultancy)
        .build()
        .unwrap();
    let quotation = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();

    let sink = InMemoryLeadSink::new();
    let leads = handoff(&sink);
    leads.submit_enquiry(&request, OperationMetadata::default()).await.unwrap();
    leads.submit_quotation(&quotation, OperationMetadata::default()).await.unwrap();

    let submissions = sink.submissions().await;
    let (enquiry, _) = &submissions[0];
    let (quoted, _) = &submissions[1];

    assert_ne!(enquiry.lead_id(), quoted.lead_id());
    for field in [LeadField::Email, LeadField::Emirate, LeadField::Activities, LeadField::OfficeSpace] {
        let key = CrmFieldMap::web_to_lead().key(field).unwrap().to_string();
        assert_eq!(enquiry.get(&key), quoted.get(&key), "{} differs", key);
    }
    assert_eq!(enquiry.get("Quotation Total"), None);
    assert_eq!(quoted.get("LEADCF5"), Some("Not decided yet"));
}

#[test]
fn test_valid_until_is_gulf_local_date() {
    let request = request().activity(ActivityCategory::Trading).build().unwrap();
    let quotation = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();

    // 08:00 UTC is 12:00 in Dubai, so the local date matches the UTC date
    let local = Timezone::gulf().local_date(quotation.valid_until());
    assert_eq!(local, NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
}
