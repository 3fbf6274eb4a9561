//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_quotation::{EngineError, StoreError, ValidationError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    /// The rule table does not price the request
    #[error("Pricing unavailable: {0}")]
    PricingUnavailable(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, field) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            ApiError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message.clone(),
                Some(field.clone()),
            ),
            ApiError::PricingUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "pricing_unavailable",
                msg.clone(),
                None,
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
                None,
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(e) => ApiError::Validation {
                field: e.field.to_string(),
                message: e.message,
            },
            // The missing rule id is an operational detail; it is logged by
            // the engine and kept out of the response.
            EngineError::Configuration(_) => ApiError::PricingUnavailable(
                "No price is configured for this combination".to_string(),
            ),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownVersion(version) => {
                ApiError::NotFound(format!("Rule table version {} not found", version))
            }
            StoreError::NoActiveTable => {
                ApiError::ServiceUnavailable("No rule table is loaded".to_string())
            }
            StoreError::Load(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Unknown enumeration labels in a request body are client errors
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
