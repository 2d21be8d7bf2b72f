//! Reference data for clients

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;
use shared::{crop_types, growth_stages, StressLevel};

#[derive(Serialize)]
pub struct MetadataResponse {
    pub crop_types: Vec<&'static str>,
    pub growth_stages: Vec<&'static str>,
    pub stress_levels: BTreeMap<u8, &'static str>,
}

/// Supported crops, growth stages and stress labels
pub async fn get_metadata() -> Json<MetadataResponse> {
    Json(MetadataResponse {
        crop_types: crop_types(),
        growth_stages: growth_stages(),
        stress_levels: StressLevel::ALL
            .iter()
            .map(|level| (level.code(), level.label()))
            .collect(),
    })
}
