//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offline-mode weather used when the provider cannot be reached
pub const OFFLINE_TEMPERATURE_CELSIUS: f64 = 28.0;
pub const OFFLINE_HUMIDITY_PERCENT: f64 = 65.0;
pub const OFFLINE_RAINFALL_MM: f64 = 5.0;
pub const OFFLINE_WIND_SPEED_MPS: f64 = 3.5;
pub const OFFLINE_LOCATION: &str = "Offline Mode";

/// Where a weather sample came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSource {
    /// Fetched from the weather provider
    Live,
    /// Provider failed, fixed offline values substituted
    OfflineFallback,
    /// Supplied directly by the caller
    Manual,
}

/// Weather conditions fed into the classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSample {
    pub temperature: f64,
    pub humidity: f64,
    /// Rainfall over the last hour, mm
    pub rainfall: f64,
    pub wind_speed: f64,
    pub description: String,
    pub location: String,
    pub observed_at: DateTime<Utc>,
    pub source: WeatherSource,
}

impl WeatherSample {
    /// Caller-supplied readings, e.g. from the prediction endpoint
    pub fn manual(temperature: f64, humidity: f64, rainfall: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
            wind_speed,
            description: "Manual input".to_string(),
            location: String::new(),
            observed_at: Utc::now(),
            source: WeatherSource::Manual,
        }
    }

    pub fn offline_fallback() -> Self {
        Self {
            temperature: OFFLINE_TEMPERATURE_CELSIUS,
            humidity: OFFLINE_HUMIDITY_PERCENT,
            rainfall: OFFLINE_RAINFALL_MM,
            wind_speed: OFFLINE_WIND_SPEED_MPS,
            description: "Unable to fetch real data".to_string(),
            location: OFFLINE_LOCATION.to_string(),
            observed_at: Utc::now(),
            source: WeatherSource::OfflineFallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == WeatherSource::OfflineFallback
    }
}
