//! Quotation Assembler
//!
//! Sums the line items, stamps the computation time from the injected clock
//! and wraps everything into an immutable [`Quotation`].

use tracing::trace;

use core_kernel::{Clock, Money};
use crate::calculator::FeeBreakdown;
use crate::quotation::{Quotation, ValidityPolicy};
use crate::request::QuotationRequest;

/// Assembles a quotation from a complete fee breakdown.
///
/// The total is summed left to right over the stored line order so that
/// logged subtotals are reproducible.
pub fn assemble(
    breakdown: FeeBreakdown,
    request: &QuotationRequest,
    clock: &dyn Clock,
    policy: &ValidityPolicy,
) -> Quotation {
    let (lines, currency, table_version, office_space) = breakdown.into_parts();

    let mut total = Money::zero(currency);
    for line in &lines {
        total = total + line.amount;
        trace!(line = %line.code, amount = %line.amount, subtotal = %total, "Added line item");
    }

    let computed_at = clock.now();

    Quotation::new(
        lines,
        total,
        currency,
        table_version,
        computed_at,
        policy.window_from(computed_at),
        office_space,
        request.clone(),
    )
}
