//! Rule Resolver
//!
//! Maps a request onto the rules that price it. Structural validation always
//! runs before the first lookup, so a malformed request never touches the
//! table. Resolution is a pure function of the request and the table.

use std::collections::BTreeSet;
use tracing::debug;

use core_kernel::{Currency, RuleTableVersion};
use crate::error::{ConfigurationError, EngineError, ValidationError};
use crate::quotation::OfficeSpaceOutcome;
use crate::request::{
    ActivityCategory, JurisdictionType, OfficeSpace, QuotationRequest, RequestField,
    SHAREHOLDER_RANGE, VISA_RANGE,
};
use crate::rule_table::{
    ActivityFee, BaseFee, FeeDefinition, OfficeSpaceSurcharge, RuleKey, RuleRef, RuleTable,
};

/// A fee definition together with the key it was found under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRule<F> {
    pub key: RuleKey,
    pub fee: F,
}

/// How the office-space requirement was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficeSpaceResolution {
    /// Office space requested and priced by a surcharge rule
    Surcharge(ResolvedRule<OfficeSpaceSurcharge>),
    /// Explicitly not needed
    NotRequired,
    /// Not decided yet; no surcharge but the quotation is provisional
    Undecided,
}

impl OfficeSpaceResolution {
    pub fn outcome(&self) -> OfficeSpaceOutcome {
        match self {
            OfficeSpaceResolution::Surcharge(_) => OfficeSpaceOutcome::Included,
            OfficeSpaceResolution::NotRequired => OfficeSpaceOutcome::NotRequired,
            OfficeSpaceResolution::Undecided => OfficeSpaceOutcome::Provisional,
        }
    }
}

/// Rules selected for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRuleSet {
    table_version: RuleTableVersion,
    currency: Currency,
    base: ResolvedRule<BaseFee>,
    activities: Vec<(ActivityCategory, ResolvedRule<ActivityFee>)>,
    office_space: OfficeSpaceResolution,
}

impl ResolvedRuleSet {
    pub fn table_version(&self) -> &RuleTableVersion {
        &self.table_version
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn base(&self) -> &ResolvedRule<BaseFee> {
        &self.base
    }

    /// Activity rules in request order
    pub fn activities(&self) -> &[(ActivityCategory, ResolvedRule<ActivityFee>)] {
        &self.activities
    }

    pub fn office_space(&self) -> &OfficeSpaceResolution {
        &self.office_space
    }

    /// Builds a reference to one of the resolved rules
    pub fn rule_ref(&self, key: RuleKey) -> RuleRef {
        RuleRef {
            table_version: self.table_version.clone(),
            rule: key,
        }
    }
}

/// Checks the structural invariants of a request.
///
/// Order: activities present, activities distinct, activity cardinality for
/// the jurisdiction, shareholder range, visa range.
pub fn validate(request: &QuotationRequest) -> Result<(), ValidationError> {
    let activities = request.activities();

    if activities.is_empty() {
        return Err(ValidationError::new(
            RequestField::Activities,
            "at least one activity is required",
        ));
    }

    let distinct: BTreeSet<&ActivityCategory> = activities.iter().collect();
    if distinct.len() != activities.len() {
        return Err(ValidationError::new(
            RequestField::Activities,
            "activities must be distinct",
        ));
    }

    if request.jurisdiction_type() == JurisdictionType::Mainland && activities.len() != 1 {
        return Err(ValidationError::new(
            RequestField::Activities,
            format!(
                "Mainland companies take exactly one activity, got {}",
                activities.len()
            ),
        ));
    }

    if !SHAREHOLDER_RANGE.contains(&request.shareholders()) {
        return Err(ValidationError::new(
            RequestField::Shareholders,
            format!(
                "{} is outside {}..={}",
                request.shareholders(),
                SHAREHOLDER_RANGE.start(),
                SHAREHOLDER_RANGE.end()
            ),
        ));
    }

    if !VISA_RANGE.contains(&request.visas()) {
        return Err(ValidationError::new(
            RequestField::Visas,
            format!(
                "{} is outside {}..={}",
                request.visas(),
                VISA_RANGE.start(),
                VISA_RANGE.end()
            ),
        ));
    }

    Ok(())
}

/// Resolves the rules that price `request` in `table`.
///
/// # Errors
///
/// * [`EngineError::Validation`] when the request breaks a structural invariant
/// * [`EngineError::Configuration`] when the table lacks a required rule
pub fn resolve(request: &QuotationRequest, table: &RuleTable) -> Result<ResolvedRuleSet, EngineError> {
    validate(request)?;

    let jurisdiction = request.jurisdiction_type();
    let emirate = request.emirate();
    let missing = |key: RuleKey| ConfigurationError {
        table_version: table.version().clone(),
        missing: key,
    };

    let base_key = RuleKey::jurisdiction_base(jurisdiction, emirate);
    let base = match table.get(&base_key) {
        Some(FeeDefinition::JurisdictionBase(fee)) => ResolvedRule { key: base_key, fee: *fee },
        _ => return Err(missing(base_key).into()),
    };

    let mut activities = Vec::with_capacity(request.activities().len());
    for activity in request.activities() {
        let key = RuleKey::activity(jurisdiction, emirate, *activity);
        match table.get(&key) {
            Some(FeeDefinition::Activity(fee)) => {
                activities.push((*activity, ResolvedRule { key, fee: *fee }));
            }
            _ => return Err(missing(key).into()),
        }
    }

    let office_space = match request.office_space() {
        OfficeSpace::Yes => {
            let key = RuleKey::office_space(jurisdiction, emirate);
            match table.get(&key) {
                Some(FeeDefinition::OfficeSpace(surcharge)) => {
                    OfficeSpaceResolution::Surcharge(ResolvedRule { key, fee: *surcharge })
                }
                _ => return Err(missing(key).into()),
            }
        }
        OfficeSpace::No => OfficeSpaceResolution::NotRequired,
        OfficeSpace::Undecided => OfficeSpaceResolution::Undecided,
    };

    debug!(
        table_version = %table.version(),
        base = %base.key,
        activities = activities.len(),
        office_space = ?office_space.outcome(),
        "Resolved pricing rules"
    );

    Ok(ResolvedRuleSet {
        table_version: table.version().clone(),
        currency: table.currency(),
        base,
        activities,
        office_space,
    })
}
