//! Route definitions for the Crop Stress Advisory Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Weather lookup (with offline fallback)
        .route("/weather", get(handlers::get_weather))
        // Classification only
        .route("/predict", post(handlers::predict_stress))
        // Advisory reports
        .route(
            "/reports",
            get(handlers::list_reports).post(handlers::submit_report),
        )
        // Reference data
        .route("/metadata", get(handlers::get_metadata))
}

