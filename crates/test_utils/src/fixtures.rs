//! Pre-built Test Fixtures
//!
//! Ready-to-use data shared by the workspace test suites. Everything here is
//! deterministic except the `fake_*` helpers.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use fake::faker::address::en::CountryName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use once_cell::sync::Lazy;

use core_kernel::{Currency, FixedClock, Money};
use domain_quotation::{ContactDetails, QuotationRequest, QuotationRequestBuilder, RuleTable, RuleTableLoader};

/// Rule table shipped with the service
pub const STANDARD_TABLE_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/rule_tables/standard-2025.json");

/// The shipped table, loaded once per test binary
pub static STANDARD_TABLE: Lazy<Arc<RuleTable>> = Lazy::new(|| {
    Arc::new(
        RuleTableLoader::from_file(STANDARD_TABLE_PATH)
            .expect("shipped rule table must load"),
    )
});

/// Instant every fixed clock reports: 15 Jan 2025, 08:00 UTC
pub fn quote_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap()
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(quote_time())
}

pub fn aed(major: u64) -> Money {
    Money::from_minor(major * 100, Currency::AED)
}

/// A contact that passes lead validation
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

/// A randomly generated contact
///
/// Names come from faker word lists and are not guaranteed to satisfy lead
/// validation; use [`contact`] where the hand-off must succeed.
pub fn fake_contact() -> ContactDetails {
    ContactDetails {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: SafeEmail().fake(),
        country_code: "+971".to_string(),
        mobile: (500_000_000u64..600_000_000u64).fake::<u64>().to_string(),
        nationality: CountryName().fake(),
    }
}

/// Request builder preloaded with [`contact`]
pub fn request() -> QuotationRequestBuilder {
    QuotationRequest::builder().contact(contact())
}
