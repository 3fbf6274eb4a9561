//! Rule table DTOs

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::RuleTableVersion;
use domain_quotation::RuleTable;

#[derive(Debug, Clone, Serialize)]
pub struct RuleTableSummary {
    pub version: RuleTableVersion,
    pub currency: String,
    pub effective_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rules: usize,
    pub active: bool,
}

impl RuleTableSummary {
    pub fn new(table: &RuleTable, active: bool) -> Self {
        let metadata = table.metadata();
        Self {
            version: metadata.version.clone(),
            currency: metadata.currency.code().to_string(),
            effective_date: metadata.effective_date,
            description: metadata.description.clone(),
            rules: table.len(),
            active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleTableListResponse {
    pub active_version: Option<RuleTableVersion>,
    pub tables: Vec<RuleTableSummary>,
}
