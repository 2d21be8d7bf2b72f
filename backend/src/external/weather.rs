//! Weather API client for fetching current conditions
//!
//! Integrates with OpenWeatherMap API; the advisory pipeline substitutes
//! offline values when this client fails.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{WeatherSample, WeatherSource};

use crate::error::{AppError, AppResult};

/// Maps a coordinate to current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> AppResult<WeatherSample>;

    /// Provider name, for logging
    fn name(&self) -> &'static str;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
    dt: Option<i64>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Convert OpenWeatherMap current response to our format
    fn convert_current_response(data: OWMCurrentResponse) -> WeatherSample {
        WeatherSample {
            temperature: data.main.temp,
            humidity: data.main.humidity,
            rainfall: data.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
            wind_speed: data.wind.speed,
            description: data
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_default(),
            location: data.name,
            observed_at: data
                .dt
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .unwrap_or_else(Utc::now),
            source: WeatherSource::Live,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    /// Fetch current weather conditions by GPS coordinates
    async fn current_weather(&self, latitude: f64, longitude: f64) -> AppResult<WeatherSample> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::WeatherServiceUnavailable("weather API key not configured".to_string())
        })?;

        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherServiceUnavailable(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse weather response: {}", e)))?;

        Ok(Self::convert_current_response(data))
    }

    fn name(&self) -> &'static str {
        "openweathermap"
    }
}
