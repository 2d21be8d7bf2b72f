//! WebAssembly module for the Crop Stress Advisory Platform
//!
//! Provides client-side computation for:
//! - Symptom extraction from field notes
//! - Stress labels, colours and crop care advice
//! - Soil moisture estimation
//! - Offline report validation

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("crop stress advisory helpers loaded"));
}

/// Extract symptom tags from free-text notes as a JSON array
#[wasm_bindgen]
pub fn extract_symptoms(notes: &str) -> Result<String, JsValue> {
    let tags = shared::extract_symptoms(Some(notes));
    serde_json::to_string(&tags)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode symptoms: {}", e)))
}

/// Display label for a stress level ("Unknown" when out of range)
#[wasm_bindgen]
pub fn stress_label(level: i32) -> String {
    shared::stress_label(i64::from(level)).to_string()
}

/// Hex colour for a stress level
#[wasm_bindgen]
pub fn stress_color(level: i32) -> String {
    shared::stress_color(i64::from(level)).to_string()
}

/// Crop-specific care advice for a stress level
#[wasm_bindgen]
pub fn care_advice(level: i32, crop_type: &str) -> String {
    let crop = shared::normalize_category(crop_type);
    shared::care_advice(shared::StressBucket::from_level(i64::from(level)), &crop).to_string()
}

/// Yield optimisation notes for a crop
#[wasm_bindgen]
pub fn yield_info(crop_type: &str) -> String {
    shared::yield_info(&shared::normalize_category(crop_type)).to_string()
}

/// Rough soil moisture percentage from weather readings
#[wasm_bindgen]
pub fn estimate_soil_moisture(rainfall: f64, humidity: f64, temperature: f64) -> f64 {
    shared::estimate_soil_moisture(rainfall, humidity, temperature)
}

/// Check coordinates before a report is queued offline
#[wasm_bindgen]
pub fn is_valid_location(latitude: f64, longitude: f64) -> bool {
    validate_coordinates(latitude, longitude).is_ok()
}

/// Validate a report JSON, returning the list of problems (empty when valid)
#[wasm_bindgen]
pub fn validate_report_json(report_json: &str) -> Result<String, JsValue> {
    let input: SubmitReportInput = serde_json::from_str(report_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid report JSON: {}", e)))?;
    let problems = validate_report(&input).err().unwrap_or_default();
    serde_json::to_string(&problems)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode problems: {}", e)))
}

#[derive(Serialize)]
struct Metadata {
    crop_types: Vec<&'static str>,
    growth_stages: Vec<&'static str>,
    stress_levels: Vec<(u8, &'static str)>,
}

fn metadata() -> Metadata {
    Metadata {
        crop_types: shared::crop_types(),
        growth_stages: shared::growth_stages(),
        stress_levels: shared::StressLevel::ALL
            .iter()
            .map(|level| (level.code(), level.label()))
            .collect(),
    }
}

/// Supported crops, growth stages and stress levels as JSON
#[wasm_bindgen]
pub fn metadata_json() -> Result<String, JsValue> {
    serde_json::to_string(&metadata())
        .map_err(|e| JsValue::from_str(&format!("Failed to encode metadata: {}", e)))
}

/// Supported crop types as a JS array
#[wasm_bindgen]
pub fn crop_type_list() -> js_sys::Array {
    shared::crop_types()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_symptoms_json() {
        assert_eq!(
            extract_symptoms("Yellow leaves, aphids everywhere").unwrap(),
            r#"["yellowing","pests"]"#
        );
        assert_eq!(extract_symptoms("").unwrap(), "[]");
    }

    #[test]
    fn test_stress_label_and_color() {
        assert_eq!(stress_label(0), "Healthy");
        assert_eq!(stress_label(2), "Severe Stress");
        assert_eq!(stress_label(7), "Unknown");
        assert_eq!(stress_color(1), "#eab308");
        assert_eq!(stress_color(-1), "#6b7280");
    }

    #[test]
    fn test_care_advice_normalizes_crop() {
        assert_eq!(care_advice(1, " Tomato "), care_advice(1, "tomato"));
        assert_eq!(yield_info("WHEAT"), yield_info("wheat"));
    }

    #[test]
    fn test_soil_moisture_is_clamped() {
        let wet = estimate_soil_moisture(500.0, 100.0, 5.0);
        let dry = estimate_soil_moisture(0.0, 0.0, 50.0);
        assert!(wet <= 80.0);
        assert!(dry >= 10.0);
    }

    #[test]
    fn test_validate_report_json() {
        let ok = r#"{"crop_type":"rice","growth_stage":"vegetative","latitude":10.0,"longitude":20.0}"#;
        assert_eq!(validate_report_json(ok).unwrap(), "[]");

        let bad = r#"{"crop_type":"","growth_stage":"vegetative","latitude":100.0,"longitude":20.0}"#;
        let problems: Vec<String> = serde_json::from_str(&validate_report_json(bad).unwrap()).unwrap();
        assert!(problems.iter().any(|p| p.starts_with("crop_type")));
        assert!(problems.iter().any(|p| p.starts_with("latitude")));
    }

    #[test]
    fn test_metadata() {
        let meta = metadata();
        assert_eq!(meta.crop_types.len(), 13);
        assert_eq!(meta.growth_stages.len(), 7);
        assert_eq!(meta.stress_levels[2], (2, "Severe Stress"));
        assert!(is_valid_location(0.0, 0.0));
        assert!(!is_valid_location(0.0, 181.0));
    }
}
