//! Quotation handlers

use axum::{extract::State, http::HeaderMap, Json};
use tracing::{info, instrument, warn};

use core_kernel::{OperationMetadata, RuleTableVersion};
use domain_quotation::EngineError;
use crate::{AppState, error::ApiError};
use crate::dto::quotation::*;
use crate::middleware::request_id;

/// Source system reported on lead submissions
const LEAD_SOURCE_SYSTEM: &str = "quotation-api";

/// Computes a quotation
///
/// The lead hand-off runs after pricing and never changes the response: a
/// failed submission is logged and the quotation is still returned. When the
/// rule table cannot price the request, the enquiry is still handed off
/// without a total.
#[instrument(skip_all, fields(request_id = tracing::field::Empty))]
pub async fn create_quotation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateQuotationRequest>,
) -> Result<Json<QuotationResponse>, ApiError> {
    let correlation_id = request_id(&headers);
    if let Some(id) = &correlation_id {
        tracing::Span::current().record("request_id", id.as_str());
    }

    let version = body
        .rule_table_version
        .as_deref()
        .map(RuleTableVersion::new)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let request = body.into_request()?;
    let table = state.rules.snapshot(version.as_ref())?;

    let metadata = lead_metadata(correlation_id);

    let outcome = state.engine.compute(&request, &table, state.clock.as_ref());

    match outcome {
        Ok(quotation) => {
            if let Err(e) = state.leads.submit_quotation(&quotation, metadata).await {
                warn!(error = %e, "Lead hand-off failed; quotation still returned");
            }

            info!(
                table_version = %quotation.table_version(),
                total = %quotation.total(),
                "Quotation served"
            );
            Ok(Json(QuotationResponse::from(&quotation)))
        }
        Err(EngineError::Configuration(missing)) => {
            if let Err(e) = state.leads.submit_enquiry(&request, metadata).await {
                warn!(error = %e, "Lead hand-off failed for unpriced enquiry");
            }
            Err(EngineError::Configuration(missing).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn lead_metadata(correlation_id: Option<String>) -> OperationMetadata {
    let metadata = match correlation_id {
        Some(id) => OperationMetadata::with_correlation_id(id),
        None => OperationMetadata::default(),
    };
    metadata.from_source(LEAD_SOURCE_SYSTEM)
}
