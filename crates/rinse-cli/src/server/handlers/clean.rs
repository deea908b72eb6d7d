//! Cleaning handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use rinse::CleanRequest;
use tracing::info;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Banner returned by `GET /`.
pub const HOME_MESSAGE: &str = "Automated Data Cleaning API";

/// Liveness banner.
pub async fn home() -> &'static str {
    HOME_MESSAGE
}

/// Clean the posted records.
///
/// `data` is checked before `threshold`, so a request missing both reports
/// "No data provided".
pub async fn clean(
    State(state): State<AppState>,
    payload: Result<Json<CleanRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    let records = request.records()?;
    let threshold = state.pipeline.threshold(request.threshold)?;

    let report = state.pipeline.clean_records(records, threshold)?;
    info!(
        rows_in = report.rows_before,
        rows_out = report.row_count(),
        "clean request served"
    );

    Ok(Json(report.output()).into_response())
}
