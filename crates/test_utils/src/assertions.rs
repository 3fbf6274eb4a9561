//! Custom Test Assertions
//!
//! Quotation-level invariant checks with messages that name the offending
//! line.

use core_kernel::Money;
use domain_quotation::{LineCategory, OfficeSpace, Quotation, RuleTable};

/// Asserts that the total equals the sum of the line items
///
/// # Panics
///
/// Panics if the sum differs from the total or any line is in another currency
pub fn assert_total_is_sum_of_lines(quotation: &Quotation) {
    for line in quotation.line_items() {
        assert_eq!(
            line.amount.currency(),
            quotation.currency(),
            "Line {} is in {} but the quotation is in {}",
            line.code,
            line.amount.currency(),
            quotation.currency()
        );
    }

    let sum = Money::sum(
        quotation.line_items().iter().map(|l| &l.amount),
        quotation.currency(),
    )
    .expect("line items must sum without overflow");

    assert_eq!(
        sum,
        quotation.total(),
        "Total {} does not equal the sum of the lines {}",
        quotation.total(),
        sum
    );
}

/// Asserts that every line references a rule present in `table` under the
/// quotation's table version
pub fn assert_rules_come_from(quotation: &Quotation, table: &RuleTable) {
    assert_eq!(quotation.table_version(), table.version());

    for line in quotation.line_items() {
        assert_eq!(
            &line.rule.table_version,
            table.version(),
            "Line {} cites table {}",
            line.code,
            line.rule.table_version
        );
        assert!(
            table.get(&line.rule.rule).is_some(),
            "Line {} cites missing rule {}",
            line.code,
            line.rule.rule
        );
    }
}

/// Asserts the number and order of line categories for the quotation's request
///
/// One base line, one line per activity, one shareholder line, one visa line,
/// and an office-space line only when office space was requested.
pub fn assert_line_shape(quotation: &Quotation) {
    let request = quotation.request();

    let mut expected = vec![LineCategory::JurisdictionBase];
    expected.extend(request.activities().iter().map(|_| LineCategory::Activity));
    expected.push(LineCategory::Shareholder);
    expected.push(LineCategory::Visa);
    if request.office_space() == OfficeSpace::Yes {
        expected.push(LineCategory::OfficeSpace);
    }

    let actual: Vec<LineCategory> = quotation.line_items().iter().map(|l| l.category).collect();
    assert_eq!(actual, expected, "Unexpected line categories");

    let mut codes: Vec<&str> = quotation.line_items().iter().map(|l| l.code.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(
        codes.len(),
        quotation.line_items().len(),
        "Line codes must be unique"
    );
}
