//! HTTP handlers for weather lookups

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{validate_coordinates, WeatherSample};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Current weather at a coordinate; falls back to offline values when the
/// provider is unreachable
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<WeatherSample>> {
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(AppError::Validation {
            field: "lat,lon".to_string(),
            message: "Missing latitude or longitude".to_string(),
        });
    };
    validate_coordinates(lat, lon).map_err(|message| AppError::Validation {
        field: "lat,lon".to_string(),
        message: message.to_string(),
    })?;

    let sample = state.advisory_service().observe_weather(lat, lon).await;
    Ok(Json(sample))
}
