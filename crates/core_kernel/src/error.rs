//! Core error types used across the system

use thiserror::Error;
use crate::identifiers::IdentifierError;
use crate::money::MoneyError;
use crate::temporal::TemporalError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),
}

impl CoreError {
    /// Returns true if the error came from monetary arithmetic
    pub fn is_money(&self) -> bool {
        matches!(self, CoreError::Money(_))
    }
}
