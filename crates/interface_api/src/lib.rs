//! HTTP API Layer
//!
//! This crate exposes the quotation engine over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: quotation computation, rule-table listing, health
//! - **Middleware**: request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod sink;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::Clock;
use domain_lead::LeadHandoff;
use domain_quotation::{QuotationEngine, RuleTableStore};

use crate::config::ApiConfig;
use crate::middleware::audit_middleware;
use crate::handlers::{health, quotations, rule_tables};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Installed rule tables; reloads swap the active snapshot
    pub rules: Arc<RuleTableStore>,
    pub engine: QuotationEngine,
    pub leads: LeadHandoff,
    pub clock: Arc<dyn Clock>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Rule tables, engine, lead hand-off and clock
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/quotations", post(quotations::create_quotation))
        .route("/rule-tables", get(rule_tables::list_rule_tables))
        .layer(axum_middleware::from_fn(audit_middleware));

    // Request ids are assigned outermost so every inner layer sees them
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
