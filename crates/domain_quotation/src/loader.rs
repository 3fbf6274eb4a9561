//! Rule-table loading
//!
//! Rule tables are maintained as JSON documents so that pricing can change
//! without a release. Amounts are written in major units (strings or
//! numbers) and converted exactly to minor units; a value that cannot be
//! represented exactly is rejected rather than rounded.
//!
//! # Format
//!
//! ```json
//! {
//!   "metadata": {
//!     "version": "standard-2025",
//!     "currency": "AED",
//!     "effective_date": "2025-01-01"
//!   },
//!   "jurisdictions": [
//!     {
//!       "jurisdiction_type": "Freezone",
//!       "emirate": "Dubai",
//!       "base_fee": "10000",
//!       "included_shareholders": 1,
//!       "per_shareholder": "2000",
//!       "per_visa": "1500",
//!       "office_space": { "type": "fixed", "amount": "15000" },
//!       "activities": { "Trading": "3000" }
//!     }
//!   ]
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use core_kernel::{Currency, Money};
use crate::request::{ActivityCategory, Emirate, JurisdictionType};
use crate::rule_table::{BaseFee, OfficeSpaceSurcharge, RuleTable, RuleTableError, RuleTableMetadata};

/// Errors that can occur while loading a rule table
#[derive(Debug, Error)]
pub enum RulesError {
    /// Failed to parse the document
    #[error("Failed to parse rules: {0}")]
    ParseError(String),

    /// Rules file not found
    #[error("Rules file not found: {0}")]
    FileNotFound(String),

    /// Rules file could not be read
    #[error("Failed to read rules file {path}: {message}")]
    Io { path: String, message: String },

    /// A value has the right type but is not allowed
    #[error("Invalid rule format: {0}")]
    InvalidFormat(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// An amount cannot be represented exactly in minor units
    #[error("Invalid amount for {field}: {reason}")]
    InvalidAmount { field: String, reason: String },

    /// The rules are individually valid but inconsistent as a table
    #[error(transparent)]
    Table(#[from] RuleTableError),
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    metadata: Option<RuleTableMetadata>,
    jurisdictions: Option<Vec<RawJurisdiction>>,
}

#[derive(Debug, Deserialize)]
struct RawJurisdiction {
    jurisdiction_type: String,
    emirate: String,
    base_fee: Decimal,
    included_shareholders: Option<u32>,
    per_shareholder: Decimal,
    per_visa: Decimal,
    #[serde(default)]
    office_space: Option<RawOfficeSpace>,
    #[serde(default)]
    activities: BTreeMap<String, Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawOfficeSpace {
    Fixed { amount: Decimal },
    PerVisa { base: Decimal, per_visa: Decimal },
}

/// Loads rule tables from JSON
pub struct RuleTableLoader;

impl RuleTableLoader {
    /// Parses a rule table from a JSON document
    pub fn from_json(json: &str) -> Result<RuleTable, RulesError> {
        let raw: RawDocument = serde_json::from_str(json)
            .map_err(|e| RulesError::ParseError(e.to_string()))?;

        let metadata = raw
            .metadata
            .ok_or_else(|| RulesError::MissingField("metadata".to_string()))?;
        let jurisdictions = raw
            .jurisdictions
            .ok_or_else(|| RulesError::MissingField("jurisdictions".to_string()))?;

        let currency = metadata.currency;
        let mut builder = RuleTable::builder(metadata);

        for (index, entry) in jurisdictions.into_iter().enumerate() {
            let at = |field: &str| format!("jurisdictions[{}].{}", index, field);

            let jurisdiction: JurisdictionType = entry
                .jurisdiction_type
                .parse()
                .map_err(|e| RulesError::InvalidFormat(format!("{}: {}", at("jurisdiction_type"), e)))?;
            let emirate: Emirate = entry
                .emirate
                .parse()
                .map_err(|e| RulesError::InvalidFormat(format!("{}: {}", at("emirate"), e)))?;

            let included_shareholders = entry
                .included_shareholders
                .ok_or_else(|| RulesError::MissingField(at("included_shareholders")))?;

            builder = builder.jurisdiction_base(
                jurisdiction,
                emirate,
                BaseFee {
                    base: amount(entry.base_fee, currency, &at("base_fee"))?,
                    included_shareholders,
                    per_shareholder: amount(entry.per_shareholder, currency, &at("per_shareholder"))?,
                    per_visa: amount(entry.per_visa, currency, &at("per_visa"))?,
                },
            );

            for (label, value) in &entry.activities {
                let activity: ActivityCategory = label.parse().map_err(|e| {
                    RulesError::InvalidFormat(format!("{}: {}", at("activities"), e))
                })?;
                let field = at(&format!("activities.{}", label));
                builder = builder.activity(jurisdiction, emirate, activity, amount(*value, currency, &field)?);
            }

            if let Some(office_space) = entry.office_space {
                let surcharge = match office_space {
                    RawOfficeSpace::Fixed { amount: value } => OfficeSpaceSurcharge::Fixed {
                        amount: amount(value, currency, &at("office_space.amount"))?,
                    },
                    RawOfficeSpace::PerVisa { base, per_visa } => OfficeSpaceSurcharge::PerVisa {
                        base: amount(base, currency, &at("office_space.base"))?,
                        per_visa: amount(per_visa, currency, &at("office_space.per_visa"))?,
                    },
                };
                builder = builder.office_space(jurisdiction, emirate, surcharge);
            }
        }

        Ok(builder.build()?)
    }

    /// Reads and parses a rule table file
    pub fn from_file(path: impl AsRef<Path>) -> Result<RuleTable, RulesError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RulesError::FileNotFound(path.display().to_string()),
            _ => RulesError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        let table = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            version = %table.version(),
            rules = table.len(),
            "Loaded rule table"
        );
        Ok(table)
    }
}

fn amount(value: Decimal, currency: Currency, field: &str) -> Result<Money, RulesError> {
    Money::from_major(value, currency).map_err(|e| RulesError::InvalidAmount {
        field: field.to_string(),
        reason: e.to_string(),
    })
}
