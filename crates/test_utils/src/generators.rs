//! Property-Based Test Generators
//!
//! Provides proptest strategies for quotation requests. `valid_request_strategy`
//! only produces requests the resolver accepts; the `out_of_range_*`
//! strategies break exactly one headcount bound.

use proptest::prelude::*;

use domain_quotation::{
    ActivityCategory, Emirate, JurisdictionType, OfficeSpace, QuotationRequest, SHAREHOLDER_RANGE,
    VISA_RANGE,
};

use crate::fixtures::contact;

pub fn jurisdiction_strategy() -> impl Strategy<Value = JurisdictionType> {
    proptest::sample::select(JurisdictionType::ALL)
}

pub fn emirate_strategy() -> impl Strategy<Value = Emirate> {
    proptest::sample::select(Emirate::ALL)
}

pub fn office_space_strategy() -> impl Strategy<Value = OfficeSpace> {
    proptest::sample::select(OfficeSpace::ALL)
}

/// Distinct activities in random order, sized for the jurisdiction
///
/// Mainland licences carry exactly one activity; Freezone licences carry one
/// or more.
pub fn activities_strategy(jurisdiction: JurisdictionType) -> impl Strategy<Value = Vec<ActivityCategory>> {
    let max = match jurisdiction {
        JurisdictionType::Mainland => 1,
        JurisdictionType::Freezone => ActivityCategory::ALL.len(),
    };
    proptest::sample::subsequence(ActivityCategory::ALL.to_vec(), 1..=max).prop_shuffle()
}

pub fn shareholders_strategy() -> impl Strategy<Value = u32> {
    SHAREHOLDER_RANGE
}

pub fn visas_strategy() -> impl Strategy<Value = u32> {
    VISA_RANGE
}

/// Strategy for requests that pass structural validation
pub fn valid_request_strategy() -> impl Strategy<Value = QuotationRequest> {
    jurisdiction_strategy().prop_flat_map(|jurisdiction| {
        (
            Just(jurisdiction),
            emirate_strategy(),
            activities_strategy(jurisdiction),
            office_space_strategy(),
            shareholders_strategy(),
            visas_strategy(),
        )
            .prop_map(|(jurisdiction, emirate, activities, office_space, shareholders, visas)| {
                QuotationRequest::builder()
                    .jurisdiction_type(jurisdiction)
                    .emirate(emirate)
                    .activities(activities)
                    .office_space(office_space)
                    .shareholders(shareholders)
                    .visas(visas)
                    .contact(contact())
                    .build()
                    .unwrap()
            })
    })
}

/// Requests whose activity count breaks the jurisdiction's cardinality rule
///
/// Mainland with zero, two or three activities, or Freezone with none.
pub fn bad_activity_count_strategy() -> impl Strategy<Value = QuotationRequest> {
    let activities = prop_oneof![
        (Just(JurisdictionType::Mainland), Just(Vec::new())),
        (
            Just(JurisdictionType::Mainland),
            proptest::sample::subsequence(ActivityCategory::ALL.to_vec(), 2..=ActivityCategory::ALL.len())
                .prop_shuffle(),
        ),
        (Just(JurisdictionType::Freezone), Just(Vec::new())),
    ];

    (valid_request_strategy(), activities, emirate_strategy()).prop_map(
        |(request, (jurisdiction, activities), emirate)| {
            rebuild(&request)
                .jurisdiction_type(jurisdiction)
                .emirate(emirate)
                .activities(activities)
                .build()
                .unwrap()
        },
    )
}

/// Valid in every field except a shareholder count outside the allowed range
pub fn out_of_range_shareholders_strategy() -> impl Strategy<Value = QuotationRequest> {
    (
        valid_request_strategy(),
        prop_oneof![Just(0u32), (*SHAREHOLDER_RANGE.end() + 1)..=50u32],
    )
        .prop_map(|(request, shareholders)| rebuild(&request).shareholders(shareholders).build().unwrap())
}

/// Valid in every field except a visa count above the allowed range
pub fn out_of_range_visas_strategy() -> impl Strategy<Value = QuotationRequest> {
    (valid_request_strategy(), (*VISA_RANGE.end() + 1)..=100u32)
        .prop_map(|(request, visas)| rebuild(&request).visas(visas).build().unwrap())
}

fn rebuild(request: &QuotationRequest) -> domain_quotation::QuotationRequestBuilder {
    QuotationRequest::builder()
        .jurisdiction_type(request.jurisdiction_type())
        .emirate(request.emirate())
        .activities(request.activities().iter().copied())
        .office_space(request.office_space())
        .shareholders(request.shareholders())
        .visas(request.visas())
        .contact(request.contact().clone())
}
