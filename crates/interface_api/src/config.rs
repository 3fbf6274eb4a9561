//! API configuration

use serde::Deserialize;

use core_kernel::{TemporalError, Timezone};
use domain_lead::LeadDefaults;
use domain_quotation::ValidityPolicy;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Rule table served at startup
    pub rule_table_path: String,
    /// Days a quoted price holds
    pub quotation_validity_days: u32,
    /// Lead source reported to the CRM
    pub lead_source: String,
    /// Campaign attribution reported to the CRM
    #[serde(default)]
    pub campaign_name: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            rule_table_path: "config/rule_tables/standard-2025.json".to_string(),
            quotation_validity_days: ValidityPolicy::DEFAULT_DAYS,
            lead_source: "Cost Calculator".to_string(),
            campaign_name: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables over the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("rule_table_path", defaults.rule_table_path)?
            .set_default("quotation_validity_days", i64::from(defaults.quotation_validity_days))?
            .set_default("lead_source", defaults.lead_source)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validity_policy(&self) -> Result<ValidityPolicy, TemporalError> {
        ValidityPolicy::days(self.quotation_validity_days)
    }

    pub fn lead_defaults(&self) -> LeadDefaults {
        LeadDefaults {
            lead_source: self.lead_source.clone(),
            campaign_name: self.campaign_name.clone().filter(|c| !c.trim().is_empty()),
            timezone: Timezone::gulf(),
        }
    }
}
