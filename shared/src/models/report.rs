//! Advisory report records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{StressLevel, SymptomAnalysisEntry, SymptomTag, WeatherSample};
use crate::validation::{latitude_in_range, longitude_in_range, not_blank};

/// A field report submitted by a farmer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReportInput {
    #[validate(length(max = 100), custom = "not_blank")]
    pub crop_type: String,
    #[validate(length(max = 100), custom = "not_blank")]
    pub growth_stage: String,
    /// Free-text field observations
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
    #[validate(custom = "latitude_in_range")]
    pub latitude: f64,
    #[validate(custom = "longitude_in_range")]
    pub longitude: f64,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// Direct classification request with caller-supplied weather
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictionInput {
    #[validate(range(min = -60.0, max = 70.0))]
    pub temperature: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0))]
    pub rainfall: f64,
    #[validate(range(min = 0.0))]
    pub wind_speed: f64,
    #[validate(length(min = 1, max = 100))]
    pub crop_type: String,
    #[validate(length(min = 1, max = 100))]
    pub growth_stage: String,
}

/// Classification-only response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub stress_level: StressLevel,
    pub stress_label: String,
    pub confidence: f64,
    pub recommendation: String,
    pub soil_moisture_estimate: f64,
    pub timestamp: DateTime<Utc>,
}

/// A completed advisory, ready to hand to the report store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReport {
    pub crop_type: String,
    pub growth_stage: String,
    pub stress_level: StressLevel,
    pub stress_label: String,
    pub confidence: f64,
    pub color: String,
    pub observed_symptoms: Vec<SymptomTag>,
    pub symptom_analysis: Vec<SymptomAnalysisEntry>,
    pub combined_assessment: String,
    pub action_priority: Vec<SymptomTag>,
    pub ml_based_recommendation: String,
    pub yield_optimization: String,
    /// `None` when every AI provider failed or augmentation is disabled
    pub ai_analysis: Option<String>,
    pub ai_provider: Option<String>,
    pub weather: WeatherSample,
    pub soil_moisture_estimate: f64,
    pub location: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// A stored advisory report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisoryRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub report: NewReport,
    pub created_at: DateTime<Utc>,
}

/// One page of stored reports, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPage {
    pub reports: Vec<AdvisoryRecord>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
}
