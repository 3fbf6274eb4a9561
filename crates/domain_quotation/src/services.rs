//! Quotation engine service
//!
//! Runs the three stages in sequence:
//!
//! ```text
//! QuotationRequest -> resolve -> calculate -> assemble -> Quotation
//! ```
//!
//! The engine is synchronous and holds no mutable state; a single instance
//! can serve any number of concurrent computations.

use tracing::{error, info, instrument, warn};

use core_kernel::Clock;
use crate::assembler::assemble;
use crate::calculator::calculate;
use crate::error::EngineError;
use crate::quotation::{Quotation, ValidityPolicy};
use crate::request::QuotationRequest;
use crate::resolver::resolve;
use crate::rule_table::RuleTable;

/// Computes quotations under a fixed validity policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotationEngine {
    validity: ValidityPolicy,
}

impl QuotationEngine {
    pub fn new(validity: ValidityPolicy) -> Self {
        Self { validity }
    }

    pub fn validity(&self) -> &ValidityPolicy {
        &self.validity
    }

    /// Computes the quotation for `request` against one rule-table snapshot.
    ///
    /// # Errors
    ///
    /// * [`EngineError::Validation`] if the request is structurally invalid
    /// * [`EngineError::Configuration`] if the table does not price the request
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let engine = QuotationEngine::default();
    /// let quotation = engine.compute(&request, &table, &SystemClock)?;
    /// println!("{}", quotation.total());
    /// ```
    #[instrument(
        skip_all,
        fields(
            table_version = %table.version(),
            jurisdiction = %request.jurisdiction_type(),
            emirate = %request.emirate(),
        )
    )]
    pub fn compute(
        &self,
        request: &QuotationRequest,
        table: &RuleTable,
        clock: &dyn Clock,
    ) -> Result<Quotation, EngineError> {
        let resolved = match resolve(request, table) {
            Ok(resolved) => resolved,
            Err(EngineError::Validation(e)) => {
                warn!(field = %e.field, reason = %e.message, "Rejected quotation request");
                return Err(e.into());
            }
            Err(EngineError::Configuration(e)) => {
                error!(missing_rule = %e.missing, "Rule table does not cover request");
                return Err(e.into());
            }
        };

        let breakdown = calculate(&resolved, request);
        let quotation = assemble(breakdown, request, clock, &self.validity);

        info!(
            total = %quotation.total(),
            lines = quotation.line_items().len(),
            provisional = quotation.is_provisional(),
            "Computed quotation"
        );

        Ok(quotation)
    }
}

/// Computes a quotation with the default 30-day validity policy
pub fn compute(
    request: &QuotationRequest,
    table: &RuleTable,
    clock: &dyn Clock,
) -> Result<Quotation, EngineError> {
    QuotationEngine::default().compute(request, table, clock)
}
