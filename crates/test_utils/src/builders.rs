//! Test Data Builders
//!
//! Builds rule tables that price every jurisdiction, emirate and activity
//! with uniform amounts. Tests override the amounts they care about and can
//! punch holes to exercise missing-rule handling.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use core_kernel::{Currency, RuleTableVersion};
use domain_quotation::{
    ActivityCategory, ActivityFee, BaseFee, Emirate, FeeDefinition, JurisdictionType,
    OfficeSpaceSurcharge, RuleKey, RuleTable, RuleTableMetadata,
};

use crate::fixtures::aed;

/// Builder for complete rule tables
pub struct TestRuleTableBuilder {
    version: String,
    base: BaseFee,
    activity: ActivityFee,
    office_space: OfficeSpaceSurcharge,
    missing: BTreeSet<RuleKey>,
}

impl Default for TestRuleTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRuleTableBuilder {
    /// Creates a builder with the Freezone Dubai amounts of the shipped table
    pub fn new() -> Self {
        Self {
            version: "test-uniform".to_string(),
            base: BaseFee {
                base: aed(10_000),
                included_shareholders: 1,
                per_shareholder: aed(2_000),
                per_visa: aed(1_500),
            },
            activity: ActivityFee { amount: aed(3_000) },
            office_space: OfficeSpaceSurcharge::Fixed { amount: aed(15_000) },
            missing: BTreeSet::new(),
        }
    }

    /// Sets the table version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the base fee used for every jurisdiction and emirate
    pub fn with_base_fee(mut self, base: BaseFee) -> Self {
        self.base = base;
        self
    }

    /// Sets the fee used for every activity
    pub fn with_activity_fee(mut self, activity: ActivityFee) -> Self {
        self.activity = activity;
        self
    }

    /// Sets the office-space surcharge used everywhere
    pub fn with_office_space(mut self, office_space: OfficeSpaceSurcharge) -> Self {
        self.office_space = office_space;
        self
    }

    /// Leaves `key` out of the table
    pub fn without(mut self, key: RuleKey) -> Self {
        self.missing.insert(key);
        self
    }

    /// Builds the table
    pub fn build(self) -> RuleTable {
        let mut builder = RuleTable::builder(RuleTableMetadata {
            version: RuleTableVersion::new(self.version).unwrap(),
            currency: Currency::AED,
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            description: Some("Uniform test table".to_string()),
        });

        for key in all_rule_keys() {
            if self.missing.contains(&key) {
                continue;
            }
            let definition = match key {
                RuleKey::JurisdictionBase { .. } => FeeDefinition::JurisdictionBase(self.base),
                RuleKey::Activity { .. } => FeeDefinition::Activity(self.activity),
                RuleKey::OfficeSpace { .. } => FeeDefinition::OfficeSpace(self.office_space),
            };
            builder = builder.rule(key, definition);
        }

        builder.build().unwrap()
    }
}

/// Every rule key a complete table defines
pub fn all_rule_keys() -> Vec<RuleKey> {
    let mut keys = Vec::new();
    for jurisdiction in JurisdictionType::ALL {
        for emirate in Emirate::ALL {
            keys.push(RuleKey::jurisdiction_base(*jurisdiction, *emirate));
            keys.push(RuleKey::office_space(*jurisdiction, *emirate));
            for activity in ActivityCategory::ALL {
                keys.push(RuleKey::activity(*jurisdiction, *emirate, *activity));
            }
        }
    }
    keys
}
