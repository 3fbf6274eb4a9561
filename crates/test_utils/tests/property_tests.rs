//! Property-Based Tests for the Quotation Engine
//!
//! Uses proptest to check invariants that must hold for every valid request
//! against complete rule tables.

use chrono::Duration;
use proptest::prelude::*;

use domain_quotation::{
    compute, EngineError, OfficeSpace, OfficeSpaceOutcome, QuotationEngine, RequestField, RuleKey,
    ValidityPolicy,
};
use test_utils::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Same request, table and clock give byte-identical quotations
    #[test]
    fn compute_is_deterministic(request in valid_request_strategy()) {
        let first = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();
        let second = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();

        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    /// The total is exactly the sum of the lines
    #[test]
    fn total_is_conserved(request in valid_request_strategy()) {
        let quotation = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();
        assert_total_is_sum_of_lines(&quotation);
    }

    /// Lines cite rules of the table that priced them
    #[test]
    fn lines_are_traceable(request in valid_request_strategy()) {
        let quotation = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();
        assert_rules_come_from(&quotation, &STANDARD_TABLE);
    }

    #[test]
    fn line_shape_follows_request(request in valid_request_strategy()) {
        let quotation = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();
        assert_line_shape(&quotation);
    }

    #[test]
    fn office_outcome_follows_request(request in valid_request_strategy()) {
        let quotation = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();

        let expected = match request.office_space() {
            OfficeSpace::Yes => OfficeSpaceOutcome::Included,
            OfficeSpace::No => OfficeSpaceOutcome::NotRequired,
            OfficeSpace::Undecided => OfficeSpaceOutcome::Provisional,
        };
        prop_assert_eq!(quotation.office_space(), expected);
        prop_assert_eq!(quotation.is_provisional(), request.office_space() == OfficeSpace::Undecided);
    }

    #[test]
    fn validity_window_starts_at_clock(request in valid_request_strategy(), days in 1u32..=90) {
        let engine = QuotationEngine::new(ValidityPolicy::days(days).unwrap());
        let quotation = engine.compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap();

        prop_assert_eq!(quotation.computed_at(), quote_time());
        prop_assert_eq!(
            quotation.valid_until() - quotation.computed_at(),
            Duration::days(i64::from(days))
        );
    }

    /// Adding a visa never lowers the total
    #[test]
    fn more_visas_never_cheaper(request in valid_request_strategy()) {
        prop_assume!(request.visas() < 15);

        let more = request.with_visas(request.visas() + 1);
        let base_total = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap().total();
        let more_total = compute(&more, &STANDARD_TABLE, &fixed_clock()).unwrap().total();

        prop_assert!(more_total.minor() >= base_total.minor());
    }

    /// Mainland takes exactly one activity, Freezone at least one
    #[test]
    fn activity_cardinality_enforced(request in bad_activity_count_strategy()) {
        let err = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap_err();
        prop_assert!(err.is_validation(), "expected validation error, got {:?}", err);
        prop_assert_eq!(err.field(), Some(RequestField::Activities));
    }

    #[test]
    fn shareholders_out_of_range_rejected(request in out_of_range_shareholders_strategy()) {
        let err = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap_err();
        prop_assert_eq!(err.field(), Some(RequestField::Shareholders));
    }

    #[test]
    fn visas_out_of_range_rejected(request in out_of_range_visas_strategy()) {
        let err = compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap_err();
        prop_assert_eq!(err.field(), Some(RequestField::Visas));
    }

    /// A missing base rule surfaces as a configuration error naming it
    #[test]
    fn missing_base_rule_is_reported(request in valid_request_strategy()) {
        let key = RuleKey::jurisdiction_base(request.jurisdiction_type(), request.emirate());
        let table = TestRuleTableBuilder::new().without(key).build();

        match compute(&request, &table, &fixed_clock()) {
            Err(EngineError::Configuration(e)) => {
                prop_assert_eq!(e.missing, key);
                prop_assert_eq!(&e.table_version, table.version());
            }
            other => prop_assert!(false, "expected configuration error, got {:?}", other),
        }
    }

    /// Office space is only looked up when it was requested
    #[test]
    fn office_rule_only_needed_when_requested(request in valid_request_strategy()) {
        let key = RuleKey::office_space(request.jurisdiction_type(), request.emirate());
        let table = TestRuleTableBuilder::new().without(key).build();

        let result = compute(&request, &table, &fixed_clock());
        if request.office_space() == OfficeSpace::Yes {
            prop_assert!(matches!(result, Err(EngineError::Configuration(_))));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

/// Copies a request with a different visa count
trait QuotationRequestExt {
    fn with_visas(&self, visas: u32) -> Self;
}

impl QuotationRequestExt for domain_quotation::QuotationRequest {
    fn with_visas(&self, visas: u32) -> Self {
        domain_quotation::QuotationRequest::builder()
            .jurisdiction_type(self.jurisdiction_type())
            .emirate(self.emirate())
            .activities(self.activities().iter().copied())
            .office_space(self.office_space())
            .shareholders(self.shareholders())
            .visas(visas)
            .contact(self.contact().clone())
            .build()
            .unwrap()
    }
}

#[test]
fn shipped_table_is_complete() {
    assert_eq!(STANDARD_TABLE.len(), all_rule_keys().len());
    for key in all_rule_keys() {
        assert!(STANDARD_TABLE.get(&key).is_some(), "Shipped table is missing {}", key);
    }
}

#[test]
fn fake_contacts_do_not_affect_price() {
    let priced = |contact| {
        let request = domain_quotation::QuotationRequest::builder()
            .activity(domain_quotation::ActivityCategory::Trading)
            .contact(contact)
            .build()
            .unwrap();
        compute(&request, &STANDARD_TABLE, &fixed_clock()).unwrap()
    };

    let first = priced(fake_contact());
    let second = priced(fake_contact());

    assert_eq!(first.line_items(), second.line_items());
    assert_eq!(first.total(), aed(13_000));
}
