//! Lead sink used when no CRM adapter is configured

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use core_kernel::{DomainPort, OperationMetadata, PortError};
use domain_lead::{LeadPayload, LeadReceipt, LeadSink};

/// Writes each lead payload to the log as JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLeadSink;

impl DomainPort for TracingLeadSink {}

#[async_trait]
impl LeadSink for TracingLeadSink {
    async fn submit(
        &self,
        payload: LeadPayload,
        metadata: OperationMetadata,
    ) -> Result<LeadReceipt, PortError> {
        let body = serde_json::to_string(&payload)
            .map_err(|e| PortError::internal(format!("Failed to encode lead payload: {}", e)))?;

        info!(
            lead_id = %payload.lead_id(),
            correlation_id = ?metadata.correlation_id,
            payload = %body,
            "Lead captured"
        );

        Ok(LeadReceipt {
            lead_id: payload.lead_id(),
            external_reference: None,
            accepted_at: Utc::now(),
        })
    }
}
