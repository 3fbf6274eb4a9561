//! Shared fixtures for domain_quotation integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{Currency, FixedClock, Money, RuleTableVersion};
use domain_quotation::{
    ActivityCategory, BaseFee, ContactDetails, Emirate, JurisdictionType, OfficeSpaceSurcharge,
    QuotationRequestBuilder, QuotationRequest, RuleTable, RuleTableMetadata,
};

/// Shipped rule table, relative to this crate
pub const STANDARD_TABLE_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/rule_tables/standard-2025.json");

pub fn aed(major: u64) -> Money {
    Money::from_minor(major * 100, Currency::AED)
}

pub fn version(v: &str) -> RuleTableVersion {
    RuleTableVersion::new(v).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap())
}

pub fn contact() -> ContactDetails {
    ContactDetails {
        first_name: "Layla".to_string(),
        last_name: "Haddad".to_string(),
        email: "layla.haddad@example.com".to_string(),
        country_code: "+971".to_string(),
        mobile: "501234567".to_string(),
        nationality: "Jordan".to_string(),
    }
}

pub fn request() -> QuotationRequestBuilder {
    QuotationRequest::builder().contact(contact())
}

/// Freezone Dubai and Mainland Abu Dhabi only
///
/// Freezone Dubai: base 10,000, one shareholder included, 2,000 per extra
/// shareholder, 1,500 per visa, Trading 3,000, Manufacturing 5,000, fixed
/// office space 15,000.
pub fn small_table() -> RuleTable {
    RuleTable::builder(RuleTableMetadata {
        version: version("small-1"),
        currency: Currency::AED,
        effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        description: Some("Integration fixture".to_string()),
    })
    .jurisdiction_base(
        JurisdictionType::Freezone,
        Emirate::Dubai,
        BaseFee {
            base: aed(10_000),
            included_shareholders: 1,
            per_shareholder: aed(2_000),
            per_visa: aed(1_500),
        },
    )
    .activity(JurisdictionType::Freezone, Emirate::Dubai, ActivityCategory::Trading, aed(3_000))
    .activity(JurisdictionType::Freezone, Emirate::Dubai, ActivityCategory::Manufacturing, aed(5_000))
    .office_space(
        JurisdictionType::Freezone,
        Emirate::Dubai,
        OfficeSpaceSurcharge::Fixed { amount: aed(15_000) },
    )
    .jurisdiction_base(
        JurisdictionType::Mainland,
        Emirate::AbuDhabi,
        BaseFee {
            base: aed(16_500),
            included_shareholders: 2,
            per_shareholder: aed(3_000),
            per_visa: aed(2_200),
        },
    )
    .activity(JurisdictionType::Mainland, Emirate::AbuDhabi, ActivityCategory::Trading, aed(4_500))
    .build()
    .unwrap()
}
