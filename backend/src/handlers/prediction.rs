//! HTTP handler for direct stress classification

use axum::{extract::State, Json};
use shared::{PredictionInput, PredictionResult};

use crate::error::{ApiJson, AppResult};
use crate::AppState;

/// Classify stress from caller-supplied weather and crop data
pub async fn predict_stress(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PredictionInput>,
) -> AppResult<Json<PredictionResult>> {
    let result = state.advisory_service().predict(&input)?;
    Ok(Json(result))
}
