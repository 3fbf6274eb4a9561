//! Lead sink port
//!
//! The outbound seam to whatever CRM receives leads. The hand-off service
//! only depends on [`LeadSink`]; delivery guarantees (retries, delays,
//! queuing) belong to the adapter behind it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::{DomainPort, LeadId, OperationMetadata, PortError};
use crate::fields::LeadPayload;

/// Acknowledgement returned by a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadReceipt {
    pub lead_id: LeadId,
    /// Identifier assigned by the external system, if it returns one
    pub external_reference: Option<String>,
    pub accepted_at: DateTime<Utc>,
}

/// Destination for lead payloads
#[async_trait]
pub trait LeadSink: DomainPort {
    /// Submits one payload
    ///
    /// # Arguments
    ///
    /// * `payload` - Mapped lead fields
    /// * `metadata` - Correlation id and context for tracing
    async fn submit(
        &self,
        payload: LeadPayload,
        metadata: OperationMetadata,
    ) -> Result<LeadReceipt, PortError>;
}

/// In-memory sink for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Records every submission; optionally fails all of them
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryLeadSink {
        submissions: Arc<RwLock<Vec<(LeadPayload, OperationMetadata)>>>,
        unavailable: bool,
    }

    impl InMemoryLeadSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// A sink that answers every submission with `ServiceUnavailable`
        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        /// Payloads received so far, in order
        pub async fn submissions(&self) -> Vec<(LeadPayload, OperationMetadata)> {
            self.submissions.read().await.clone()
        }
    }

    impl DomainPort for InMemoryLeadSink {}

    #[async_trait]
    impl LeadSink for InMemoryLeadSink {
        async fn submit(
            &self,
            payload: LeadPayload,
            metadata: OperationMetadata,
        ) -> Result<LeadReceipt, PortError> {
            if self.unavailable {
                return Err(PortError::service_unavailable("in-memory-lead-sink"));
            }

            let lead_id = payload.lead_id();
            let mut submissions = self.submissions.write().await;
            submissions.push((payload, metadata));

            Ok(LeadReceipt {
                lead_id,
                external_reference: Some(format!("mem-{}", submissions.len())),
                accepted_at: Utc::now(),
            })
        }
    }
}
