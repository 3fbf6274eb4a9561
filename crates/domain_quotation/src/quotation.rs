//! The quotation value
//!
//! A quotation is created once per computation and never changes. It has no
//! identity of its own; two quotations with equal contents are the same
//! quotation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, RuleTableVersion, TemporalError, ValidityWindow};
use crate::calculator::LineItem;
use crate::request::QuotationRequest;

/// Reporting outcome of the office-space requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfficeSpaceOutcome {
    /// A surcharge line is part of the quotation
    Included,
    /// No office space needed
    NotRequired,
    /// Requirement undecided; the office-space component is not priced yet
    Provisional,
}

/// How long a quoted price holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    duration: Duration,
}

impl ValidityPolicy {
    pub const DEFAULT_DAYS: u32 = 30;

    /// A policy of `days` whole days; zero is rejected
    pub fn days(days: u32) -> Result<Self, TemporalError> {
        if days == 0 {
            return Err(TemporalError::InvalidDuration(
                "validity must be at least one day".to_string(),
            ));
        }
        Ok(Self {
            duration: Duration::days(i64::from(days)),
        })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Window opening at `computed_at`
    pub fn window_from(&self, computed_at: DateTime<Utc>) -> ValidityWindow {
        ValidityWindow {
            starts_at: computed_at,
            expires_at: computed_at + self.duration,
        }
    }
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self {
            duration: Duration::days(i64::from(Self::DEFAULT_DAYS)),
        }
    }
}

/// Flat key / label / amount triple for downstream consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub key: String,
    pub label: String,
    pub amount: Money,
}

/// A priced, itemized quotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quotation {
    line_items: Vec<LineItem>,
    total: Money,
    currency: Currency,
    table_version: RuleTableVersion,
    computed_at: DateTime<Utc>,
    validity: ValidityWindow,
    office_space: OfficeSpaceOutcome,
    request: QuotationRequest,
}

impl Quotation {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        line_items: Vec<LineItem>,
        total: Money,
        currency: Currency,
        table_version: RuleTableVersion,
        computed_at: DateTime<Utc>,
        validity: ValidityWindow,
        office_space: OfficeSpaceOutcome,
        request: QuotationRequest,
    ) -> Self {
        Self {
            line_items,
            total,
            currency,
            table_version,
            computed_at,
            validity,
            office_space,
            request,
        }
    }

    /// Line items in computation order
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Version of the rule table that priced this quotation
    pub fn table_version(&self) -> &RuleTableVersion {
        &self.table_version
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    pub fn validity(&self) -> &ValidityWindow {
        &self.validity
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.validity.expires_at
    }

    pub fn office_space(&self) -> OfficeSpaceOutcome {
        self.office_space
    }

    /// True when office space was left undecided
    pub fn is_provisional(&self) -> bool {
        self.office_space == OfficeSpaceOutcome::Provisional
    }

    /// The request this quotation answers
    pub fn request(&self) -> &QuotationRequest {
        &self.request
    }

    /// Line items as flat entries followed by a `total` entry
    pub fn breakdown_entries(&self) -> Vec<BreakdownEntry> {
        self.line_items
            .iter()
            .map(|line| BreakdownEntry {
                key: line.code.clone(),
                label: line.description.clone(),
                amount: line.amount,
            })
            .chain(std::iter::once(BreakdownEntry {
                key: "total".to_string(),
                label: "Total".to_string(),
                amount: self.total,
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validity_policy() {
        let at = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let window = ValidityPolicy::default().window_from(at);

        assert_eq!(window.starts_at, at);
        assert_eq!(window.expires_at, Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_validity_policy_rejects_zero_days() {
        assert!(ValidityPolicy::days(0).is_err());
        assert_eq!(
            ValidityPolicy::days(7).unwrap().duration(),
            Duration::days(7)
        );
    }
}
