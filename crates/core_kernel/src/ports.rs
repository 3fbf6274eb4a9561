//! Ports and Adapters Infrastructure
//!
//! Shared types for the hexagonal seams between the pricing core and the
//! collaborators around it (lead/CRM sinks and similar outbound systems).
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Application Layer       │
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │   Port Traits (LeadSink)     │
//! │  depend only on core_kernel  │
//! └──────────────────────────────┘
//!        ▲                 ▲
//!   ┌────┴─────┐     ┌─────┴──────┐
//!   │  Logging │     │  External  │
//!   │  adapter │     │  CRM / mock│
//!   └──────────┘     └────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// All port implementations report failures through this type so that
/// callers can decide on retries without knowing the adapter.
#[derive(Debug, Error)]
pub enum PortError {
    /// The external system received the payload and refused it
    #[error("Rejected by {system}: {reason}")]
    Rejected {
        system: String,
        reason: String,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Rejected error
    pub fn rejected(system: impl Into<String>, reason: impl fmt::Display) -> Self {
        PortError::Rejected {
            system: system.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a ServiceUnavailable error
    pub fn service_unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::ServiceUnavailable { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// Metadata about a port operation for auditing and tracing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMetadata {
    /// Correlation ID for tracing across systems
    pub correlation_id: Option<String>,
    /// Source system identifier
    pub source_system: Option<String>,
    /// Additional context as key-value pairs
    pub context: BTreeMap<String, String>,
}

impl OperationMetadata {
    /// Creates new metadata with a correlation ID
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            ..Default::default()
        }
    }

    /// Sets the source system
    pub fn from_source(mut self, source_system: impl Into<String>) -> Self {
        self.source_system = Some(source_system.into());
        self
    }

    /// Adds context to the metadata
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_transient() {
        let unavailable = PortError::service_unavailable("crm");
        assert!(unavailable.is_transient());
        assert_eq!(unavailable.to_string(), "Service unavailable: crm");

        let rejected = PortError::rejected("crm", "duplicate lead");
        assert!(!rejected.is_transient());
        assert!(rejected.to_string().contains("duplicate lead"));

        let internal = PortError::internal("encoding failed");
        assert!(!internal.is_transient());
    }

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::with_correlation_id("req-123")
            .from_source("quotation-api")
            .with_context("rule_table", "2025-q1");

        assert_eq!(metadata.correlation_id, Some("req-123".to_string()));
        assert_eq!(metadata.source_system, Some("quotation-api".to_string()));
        assert_eq!(
            metadata.context.get("rule_table"),
            Some(&"2025-q1".to_string())
        );
    }
}
