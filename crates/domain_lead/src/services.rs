//! Lead hand-off service
//!
//! Sequencing is explicit: an enquiry can be sent as soon as the request is
//! captured, and a quotation can only be sent by passing the [`Quotation`]
//! that `compute` returned. There is no timer waiting for a total.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_kernel::OperationMetadata;
use domain_quotation::{Quotation, QuotationRequest};
use crate::error::LeadError;
use crate::fields::CrmFieldMap;
use crate::ports::{LeadReceipt, LeadSink};
use crate::record::{LeadDefaults, LeadRecord};

/// Validates, maps and submits leads
#[derive(Clone)]
pub struct LeadHandoff {
    sink: Arc<dyn LeadSink>,
    fields: CrmFieldMap,
    defaults: LeadDefaults,
}

impl LeadHandoff {
    pub fn new(sink: Arc<dyn LeadSink>, fields: CrmFieldMap, defaults: LeadDefaults) -> Self {
        Self {
            sink,
            fields,
            defaults,
        }
    }

    pub fn defaults(&self) -> &LeadDefaults {
        &self.defaults
    }

    /// Submits the captured request without a price
    #[instrument(skip_all, fields(correlation_id = ?metadata.correlation_id))]
    pub async fn submit_enquiry(
        &self,
        request: &QuotationRequest,
        metadata: OperationMetadata,
    ) -> Result<LeadReceipt, LeadError> {
        let record = LeadRecord::enquiry(request, &self.defaults)?;
        self.send(record, metadata).await
    }

    /// Submits the request together with the quotation that priced it
    #[instrument(
        skip_all,
        fields(
            correlation_id = ?metadata.correlation_id,
            table_version = %quotation.table_version(),
        )
    )]
    pub async fn submit_quotation(
        &self,
        quotation: &Quotation,
        metadata: OperationMetadata,
    ) -> Result<LeadReceipt, LeadError> {
        let record = LeadRecord::enquiry(quotation.request(), &self.defaults)?
            .with_quotation(quotation, &self.defaults.timezone);
        self.send(record, metadata).await
    }

    async fn send(&self, record: LeadRecord, metadata: OperationMetadata) -> Result<LeadReceipt, LeadError> {
        let payload = self.fields.to_payload(&record);
        let lead_id = payload.lead_id();

        match self.sink.submit(payload, metadata).await {
            Ok(receipt) => {
                info!(lead_id = %lead_id, quoted = record.quoted_total().is_some(), "Lead submitted");
                Ok(receipt)
            }
            Err(e) => {
                warn!(lead_id = %lead_id, error = %e, transient = e.is_transient(), "Lead submission failed");
                Err(e.into())
            }
        }
    }
}
