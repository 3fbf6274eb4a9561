//! Fee Calculator
//!
//! Turns resolved rules into category-tagged line items. All arithmetic runs
//! on integer minor units; there is no rounding step because nothing is ever
//! fractional.
//!
//! Line order is fixed and meaningful for display:
//!
//! ```text
//! jurisdiction-base -> activity (request order) -> shareholder -> visa -> office-space
//! ```

use serde::Serialize;
use std::fmt;

use core_kernel::{Currency, Money, RuleTableVersion};
use crate::quotation::OfficeSpaceOutcome;
use crate::request::QuotationRequest;
use crate::resolver::{OfficeSpaceResolution, ResolvedRuleSet};
use crate::rule_table::RuleRef;

/// Category tag of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCategory {
    JurisdictionBase,
    Activity,
    Shareholder,
    Visa,
    OfficeSpace,
}

impl LineCategory {
    pub fn slug(&self) -> &'static str {
        match self {
            LineCategory::JurisdictionBase => "jurisdiction-base",
            LineCategory::Activity => "activity",
            LineCategory::Shareholder => "shareholder",
            LineCategory::Visa => "visa",
            LineCategory::OfficeSpace => "office-space",
        }
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Unit count and unit price behind a per-head line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitBasis {
    pub units: u32,
    pub unit_amount: Money,
}

/// One priced component of a quotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Flat key, unique within a quotation (e.g. `activity:trading`)
    pub code: String,
    pub category: LineCategory,
    pub description: String,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<UnitBasis>,
    pub rule: RuleRef,
}

/// Ordered line items produced for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBreakdown {
    lines: Vec<LineItem>,
    currency: Currency,
    table_version: RuleTableVersion,
    office_space: OfficeSpaceOutcome,
}

impl FeeBreakdown {
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn table_version(&self) -> &RuleTableVersion {
        &self.table_version
    }

    pub fn office_space(&self) -> OfficeSpaceOutcome {
        self.office_space
    }

    pub(crate) fn into_parts(self) -> (Vec<LineItem>, Currency, RuleTableVersion, OfficeSpaceOutcome) {
        (self.lines, self.currency, self.table_version, self.office_space)
    }
}

/// Prices the resolved rules for `request`.
///
/// Zero-amount shareholder and visa lines are still emitted. Arithmetic
/// overflow panics; no realistic rule table can reach it.
pub fn calculate(resolved: &ResolvedRuleSet, request: &QuotationRequest) -> FeeBreakdown {
    let base = resolved.base();
    let mut lines = Vec::with_capacity(resolved.activities().len() + 4);

    lines.push(LineItem {
        code: LineCategory::JurisdictionBase.slug().to_string(),
        category: LineCategory::JurisdictionBase,
        description: format!(
            "{} licence, {}",
            request.jurisdiction_type(),
            request.emirate()
        ),
        amount: base.fee.base,
        basis: None,
        rule: resolved.rule_ref(base.key),
    });

    for (activity, rule) in resolved.activities() {
        lines.push(LineItem {
            code: format!("{}:{}", LineCategory::Activity, activity.slug()),
            category: LineCategory::Activity,
            description: format!("Activity: {}", activity),
            amount: rule.fee.amount,
            basis: None,
            rule: resolved.rule_ref(rule.key),
        });
    }

    let extra_shareholders = request
        .shareholders()
        .saturating_sub(base.fee.included_shareholders);
    lines.push(LineItem {
        code: LineCategory::Shareholder.slug().to_string(),
        category: LineCategory::Shareholder,
        description: format!(
            "Shareholders ({} beyond {} included)",
            extra_shareholders, base.fee.included_shareholders
        ),
        amount: base.fee.per_shareholder * extra_shareholders,
        basis: Some(UnitBasis {
            units: extra_shareholders,
            unit_amount: base.fee.per_shareholder,
        }),
        rule: resolved.rule_ref(base.key),
    });

    lines.push(LineItem {
        code: LineCategory::Visa.slug().to_string(),
        category: LineCategory::Visa,
        description: format!("Visas ({} x {})", request.visas(), base.fee.per_visa),
        amount: base.fee.per_visa * request.visas(),
        basis: Some(UnitBasis {
            units: request.visas(),
            unit_amount: base.fee.per_visa,
        }),
        rule: resolved.rule_ref(base.key),
    });

    if let OfficeSpaceResolution::Surcharge(rule) = resolved.office_space() {
        lines.push(LineItem {
            code: LineCategory::OfficeSpace.slug().to_string(),
            category: LineCategory::OfficeSpace,
            description: "Office space".to_string(),
            amount: rule.fee.amount_for(request.visas()),
            basis: None,
            rule: resolved.rule_ref(rule.key),
        });
    }

    FeeBreakdown {
        lines,
        currency: resolved.currency(),
        table_version: resolved.table_version().clone(),
        office_space: resolved.office_space().outcome(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::request::{ActivityCategory, ContactDetails, Emirate, JurisdictionType, OfficeSpace};
    use crate::resolver::resolve;
    use crate::rule_table::{BaseFee, OfficeSpaceSurcharge, RuleTable, RuleTableMetadata};

    fn aed(major: u64) -> Money {
        Money::from_minor(major * 100, Currency::AED)
    }

    fn table() -> RuleTable {
        RuleTable::builder(RuleTableMetadata {
            version: RuleTableVersion::new("calc-test").unwrap(),
            currency: Currency::AED,
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            description: None,
        })
        .jurisdiction_base(
            JurisdictionType::Freezone,
            Emirate::Sharjah,
            BaseFee {
                base: aed(8_000),
                included_shareholders: 2,
                per_shareholder: aed(1_000),
                per_visa: aed(1_500),
            },
        )
        .activity(JurisdictionType::Freezone, Emirate::Sharjah, ActivityCategory::Trading, aed(3_000))
        .activity(
            JurisdictionType::Freezone,
            Emirate::Sharjah,
            ActivityCategory::ServicesOrConsultancy,
            aed(2_500),
        )
        .office_space(
            JurisdictionType::Freezone,
            Emirate::Sharjah,
            OfficeSpaceSurcharge::PerVisa {
                base: aed(12_000),
                per_visa: aed(1_000),
            },
        )
        .build()
        .unwrap()
    }

    fn request(shareholders: u32, visas: u32, office_space: OfficeSpace) -> QuotationRequest {
        QuotationRequest::builder()
            .emirate(Emirate::Sharjah)
            .activities([ActivityCategory::ServicesOrConsultancy, ActivityCategory::Trading])
            .shareholders(shareholders)
            .visas(visas)
            .office_space(office_space)
            .contact(ContactDetails {
                first_name: "Priya".to_string(),
                last_name: "Nair".to_string(),
                email: "priya@example.com".to_string(),
                country_code: "+91".to_string(),
                mobile: "9876543210".to_string(),
                nationality: "India".to_string(),
            })
            .build()
            .unwrap()
    }

    fn breakdown(request: &QuotationRequest) -> FeeBreakdown {
        let resolved = resolve(request, &table()).unwrap();
        calculate(&resolved, request)
    }

    #[test]
    fn test_line_order() {
        let req = request(1, 0, OfficeSpace::Yes);
        let categories: Vec<LineCategory> = breakdown(&req).lines().iter().map(|l| l.category).collect();

        assert_eq!(
            categories,
            vec![
                LineCategory::JurisdictionBase,
                LineCategory::Activity,
                LineCategory::Activity,
                LineCategory::Shareholder,
                LineCategory::Visa,
                LineCategory::OfficeSpace,
            ]
        );
    }

    #[test]
    fn test_shareholders_below_included_yield_zero_line() {
        let req = request(1, 0, OfficeSpace::No);
        let b = breakdown(&req);
        let line = b.lines().iter().find(|l| l.category == LineCategory::Shareholder).unwrap();

        assert!(line.amount.is_zero());
        assert_eq!(line.basis.unwrap().units, 0);
    }

    #[test]
    fn test_shareholders_beyond_included_are_charged() {
        let req = request(5, 0, OfficeSpace::No);
        let b = breakdown(&req);
        let line = b.lines().iter().find(|l| l.category == LineCategory::Shareholder).unwrap();

        assert_eq!(line.amount, aed(3_000));
    }

    #[test]
    fn test_per_visa_office_space() {
        let req = request(1, 3, OfficeSpace::Yes);
        let b = breakdown(&req);
        let office = b.lines().last().unwrap();

        assert_eq!(office.category, LineCategory::OfficeSpace);
        assert_eq!(office.amount, aed(15_000));
        assert_eq!(b.office_space(), OfficeSpaceOutcome::Included);
    }

    #[test]
    fn test_no_office_line_when_undecided() {
        let req = request(1, 0, OfficeSpace::Undecided);
        let b = breakdown(&req);

        assert!(b.lines().iter().all(|l| l.category != LineCategory::OfficeSpace));
        assert_eq!(b.office_space(), OfficeSpaceOutcome::Provisional);
    }

    #[test]
    fn test_lines_reference_their_rules() {
        let req = request(1, 0, OfficeSpace::No);
        let b = breakdown(&req);

        assert_eq!(b.lines()[1].code, "activity:services-or-consultancy");
        assert_eq!(
            b.lines()[1].rule.to_string(),
            "activity:freezone:sharjah:services-or-consultancy@calc-test"
        );
    }
}
