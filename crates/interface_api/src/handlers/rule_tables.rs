//! Rule table handlers

use axum::{extract::State, Json};

use crate::{AppState, error::ApiError};
use crate::dto::rule_tables::*;

/// Lists installed rule tables
pub async fn list_rule_tables(
    State(state): State<AppState>,
) -> Result<Json<RuleTableListResponse>, ApiError> {
    let active_version = state.rules.active_version();

    let tables = state
        .rules
        .versions()
        .into_iter()
        .map(|version| -> Result<RuleTableSummary, ApiError> {
            let table = state.rules.snapshot(Some(&version))?;
            Ok(RuleTableSummary::new(&table, active_version.as_ref() == Some(&version)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(RuleTableListResponse {
        active_version,
        tables,
    }))
}
