//! HTTP handlers for advisory reports

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use shared::{AdvisoryRecord, Pagination, ReportPage, SubmitReportInput};

use crate::error::{ApiJson, AppError, AppResult};
use crate::AppState;

/// Submit a field report and receive the full advisory
pub async fn submit_report(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubmitReportInput>,
) -> AppResult<(StatusCode, Json<AdvisoryRecord>)> {
    let record = state.advisory_service().submit_report(&input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List stored reports, newest first
pub async fn list_reports(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ReportPage>> {
    let page = state.reports.list(pagination).await?;
    Ok(Json(page))
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint".to_string())
}
