//! Versioned rule tables
//!
//! A rule table maps a closed, typed [`RuleKey`] to a [`FeeDefinition`]. A
//! key that is absent from the table is a detectable lookup failure, never a
//! silent zero price.
//!
//! Tables are immutable once built and are shared between computations
//! behind an `Arc`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use core_kernel::{Currency, Money, RuleTableVersion};
use crate::request::{ActivityCategory, Emirate, JurisdictionType};

/// The three kinds of pricing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    JurisdictionBase,
    Activity,
    OfficeSpace,
}

impl RuleKind {
    pub fn slug(&self) -> &'static str {
        match self {
            RuleKind::JurisdictionBase => "jurisdiction-base",
            RuleKind::Activity => "activity",
            RuleKind::OfficeSpace => "office-space",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Lookup key of a pricing rule
///
/// Displays (and serializes) as a stable rule id such as
/// `activity:freezone:dubai:trading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKey {
    JurisdictionBase {
        jurisdiction: JurisdictionType,
        emirate: Emirate,
    },
    Activity {
        jurisdiction: JurisdictionType,
        emirate: Emirate,
        activity: ActivityCategory,
    },
    OfficeSpace {
        jurisdiction: JurisdictionType,
        emirate: Emirate,
    },
}

impl RuleKey {
    pub fn jurisdiction_base(jurisdiction: JurisdictionType, emirate: Emirate) -> Self {
        RuleKey::JurisdictionBase { jurisdiction, emirate }
    }

    pub fn activity(jurisdiction: JurisdictionType, emirate: Emirate, activity: ActivityCategory) -> Self {
        RuleKey::Activity { jurisdiction, emirate, activity }
    }

    pub fn office_space(jurisdiction: JurisdictionType, emirate: Emirate) -> Self {
        RuleKey::OfficeSpace { jurisdiction, emirate }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            RuleKey::JurisdictionBase { .. } => RuleKind::JurisdictionBase,
            RuleKey::Activity { .. } => RuleKind::Activity,
            RuleKey::OfficeSpace { .. } => RuleKind::OfficeSpace,
        }
    }

    pub fn jurisdiction(&self) -> JurisdictionType {
        match self {
            RuleKey::JurisdictionBase { jurisdiction, .. }
            | RuleKey::Activity { jurisdiction, .. }
            | RuleKey::OfficeSpace { jurisdiction, .. } => *jurisdiction,
        }
    }

    pub fn emirate(&self) -> Emirate {
        match self {
            RuleKey::JurisdictionBase { emirate, .. }
            | RuleKey::Activity { emirate, .. }
            | RuleKey::OfficeSpace { emirate, .. } => *emirate,
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.kind(),
            self.jurisdiction().slug(),
            self.emirate().slug()
        )?;
        if let RuleKey::Activity { activity, .. } = self {
            write!(f, ":{}", activity.slug())?;
        }
        Ok(())
    }
}

impl Serialize for RuleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fee rule for a jurisdiction in an emirate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseFee {
    /// Licence and registration base amount
    pub base: Money,
    /// Shareholders covered by the base amount
    pub included_shareholders: u32,
    /// Charged per shareholder beyond the included headcount
    pub per_shareholder: Money,
    /// Charged per visa
    pub per_visa: Money,
}

/// Fee rule for one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityFee {
    pub amount: Money,
}

/// Office-space surcharge policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfficeSpaceSurcharge {
    /// Flat amount regardless of headcount
    Fixed { amount: Money },
    /// Base amount plus a per-visa desk charge
    PerVisa { base: Money, per_visa: Money },
}

impl OfficeSpaceSurcharge {
    /// Surcharge for the given number of visas.
    ///
    /// Panics on arithmetic overflow.
    pub fn amount_for(&self, visas: u32) -> Money {
        match self {
            OfficeSpaceSurcharge::Fixed { amount } => *amount,
            OfficeSpaceSurcharge::PerVisa { base, per_visa } => *base + *per_visa * visas,
        }
    }

    fn amounts(&self) -> Vec<Money> {
        match self {
            OfficeSpaceSurcharge::Fixed { amount } => vec![*amount],
            OfficeSpaceSurcharge::PerVisa { base, per_visa } => vec![*base, *per_visa],
        }
    }
}

/// Fee definition stored against a rule key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FeeDefinition {
    JurisdictionBase(BaseFee),
    Activity(ActivityFee),
    OfficeSpace(OfficeSpaceSurcharge),
}

impl FeeDefinition {
    pub fn kind(&self) -> RuleKind {
        match self {
            FeeDefinition::JurisdictionBase(_) => RuleKind::JurisdictionBase,
            FeeDefinition::Activity(_) => RuleKind::Activity,
            FeeDefinition::OfficeSpace(_) => RuleKind::OfficeSpace,
        }
    }

    fn amounts(&self) -> Vec<Money> {
        match self {
            FeeDefinition::JurisdictionBase(fee) => {
                vec![fee.base, fee.per_shareholder, fee.per_visa]
            }
            FeeDefinition::Activity(fee) => vec![fee.amount],
            FeeDefinition::OfficeSpace(surcharge) => surcharge.amounts(),
        }
    }
}

/// Descriptive data about a rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTableMetadata {
    pub version: RuleTableVersion,
    /// Currency of every amount in the table
    pub currency: Currency,
    pub effective_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Errors raised while building a rule table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    #[error("Rule {key} cannot hold a {definition} fee definition")]
    KindMismatch { key: RuleKey, definition: RuleKind },

    #[error("Duplicate rule: {0}")]
    DuplicateRule(RuleKey),

    #[error("Rule {key} is priced in {actual}, table currency is {expected}")]
    CurrencyMismatch {
        key: RuleKey,
        expected: Currency,
        actual: Currency,
    },
}

/// Immutable, versioned mapping from rule keys to fee definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    metadata: RuleTableMetadata,
    rules: BTreeMap<RuleKey, FeeDefinition>,
}

impl RuleTable {
    pub fn builder(metadata: RuleTableMetadata) -> RuleTableBuilder {
        RuleTableBuilder::new(metadata)
    }

    pub fn metadata(&self) -> &RuleTableMetadata {
        &self.metadata
    }

    pub fn version(&self) -> &RuleTableVersion {
        &self.metadata.version
    }

    pub fn currency(&self) -> Currency {
        self.metadata.currency
    }

    pub fn get(&self, key: &RuleKey) -> Option<&FeeDefinition> {
        self.rules.get(key)
    }

    pub fn jurisdiction_base(&self, jurisdiction: JurisdictionType, emirate: Emirate) -> Option<&BaseFee> {
        match self.get(&RuleKey::jurisdiction_base(jurisdiction, emirate)) {
            Some(FeeDefinition::JurisdictionBase(fee)) => Some(fee),
            _ => None,
        }
    }

    pub fn activity(
        &self,
        jurisdiction: JurisdictionType,
        emirate: Emirate,
        activity: ActivityCategory,
    ) -> Option<&ActivityFee> {
        match self.get(&RuleKey::activity(jurisdiction, emirate, activity)) {
            Some(FeeDefinition::Activity(fee)) => Some(fee),
            _ => None,
        }
    }

    pub fn office_space(&self, jurisdiction: JurisdictionType, emirate: Emirate) -> Option<&OfficeSpaceSurcharge> {
        match self.get(&RuleKey::office_space(jurisdiction, emirate)) {
            Some(FeeDefinition::OfficeSpace(surcharge)) => Some(surcharge),
            _ => None,
        }
    }

    /// Rules in key order
    pub fn iter(&self) -> impl Iterator<Item = (&RuleKey, &FeeDefinition)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for rule tables
///
/// Rules are collected in any order and checked together in `build`.
#[derive(Debug, Clone)]
pub struct RuleTableBuilder {
    metadata: RuleTableMetadata,
    rules: Vec<(RuleKey, FeeDefinition)>,
}

impl RuleTableBuilder {
    pub fn new(metadata: RuleTableMetadata) -> Self {
        Self {
            metadata,
            rules: Vec::new(),
        }
    }

    /// Adds a rule
    pub fn rule(mut self, key: RuleKey, definition: FeeDefinition) -> Self {
        self.rules.push((key, definition));
        self
    }

    pub fn jurisdiction_base(self, jurisdiction: JurisdictionType, emirate: Emirate, fee: BaseFee) -> Self {
        self.rule(
            RuleKey::jurisdiction_base(jurisdiction, emirate),
            FeeDefinition::JurisdictionBase(fee),
        )
    }

    pub fn activity(
        self,
        jurisdiction: JurisdictionType,
        emirate: Emirate,
        activity: ActivityCategory,
        amount: Money,
    ) -> Self {
        self.rule(
            RuleKey::activity(jurisdiction, emirate, activity),
            FeeDefinition::Activity(ActivityFee { amount }),
        )
    }

    pub fn office_space(self, jurisdiction: JurisdictionType, emirate: Emirate, surcharge: OfficeSpaceSurcharge) -> Self {
        self.rule(
            RuleKey::office_space(jurisdiction, emirate),
            FeeDefinition::OfficeSpace(surcharge),
        )
    }

    /// Builds the table, rejecting kind mismatches, duplicate keys and
    /// amounts in a foreign currency.
    pub fn build(self) -> Result<RuleTable, RuleTableError> {
        let expected = self.metadata.currency;
        let mut rules = BTreeMap::new();

        for (key, definition) in self.rules {
            if key.kind() != definition.kind() {
                return Err(RuleTableError::KindMismatch {
                    key,
                    definition: definition.kind(),
                });
            }

            if let Some(foreign) = definition
                .amounts()
                .iter()
                .find(|m| m.currency() != expected)
            {
                return Err(RuleTableError::CurrencyMismatch {
                    key,
                    expected,
                    actual: foreign.currency(),
                });
            }

            match rules.entry(key) {
                Entry::Occupied(_) => return Err(RuleTableError::DuplicateRule(key)),
                Entry::Vacant(slot) => {
                    slot.insert(definition);
                }
            }
        }

        Ok(RuleTable {
            metadata: self.metadata,
            rules,
        })
    }
}

/// Reference from a line item back to the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRef {
    pub table_version: RuleTableVersion,
    pub rule: RuleKey,
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.rule, self.table_version)
    }
}
