//! Quotation API Server Binary
//!
//! This binary loads the rule table and starts the HTTP API server.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin quotation-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_RULE_TABLE_PATH=config/rule_tables/standard-2025.json cargo run --bin quotation-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_RULE_TABLE_PATH` - Rule table JSON file
//! * `API_QUOTATION_VALIDITY_DAYS` - Days a quoted price holds (default: 30)
//! * `API_LEAD_SOURCE` - Lead source reported to the CRM
//! * `API_CAMPAIGN_NAME` - Campaign attribution reported to the CRM
//!
//! Sending SIGHUP reloads the rule table file. A file that fails to load
//! leaves the current table in service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::SystemClock;
use domain_lead::{CrmFieldMap, LeadHandoff};
use domain_quotation::{QuotationEngine, RuleTableStore};
use interface_api::{config::ApiConfig, create_router, sink::TracingLeadSink, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        rule_table = %config.rule_table_path,
        "Starting Quotation API Server"
    );

    let rules = Arc::new(RuleTableStore::new());
    rules
        .reload_from_file(&config.rule_table_path)
        .with_context(|| format!("Failed to load rule table {}", config.rule_table_path))?;

    #[cfg(unix)]
    spawn_reload_on_hangup(rules.clone(), config.rule_table_path.clone())?;

    let validity = config
        .validity_policy()
        .context("Invalid API_QUOTATION_VALIDITY_DAYS")?;

    let state = AppState {
        rules,
        engine: QuotationEngine::new(validity),
        leads: LeadHandoff::new(
            Arc::new(TracingLeadSink),
            CrmFieldMap::web_to_lead(),
            config.lead_defaults(),
        ),
        clock: Arc::new(SystemClock),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Reloads the rule table whenever the process receives SIGHUP.
#[cfg(unix)]
fn spawn_reload_on_hangup(rules: Arc<RuleTableStore>, path: String) -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup()).context("Failed to install SIGHUP handler")?;

    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            match rules.reload_from_file(&path) {
                Ok(version) => tracing::info!(%version, "Rule table reloaded"),
                Err(e) => tracing::error!(error = %e, "Rule table reload failed; keeping current table"),
            }
        }
    });

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
