//! Configuration management for the Crop Stress Advisory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CSA_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::external::llm::ProviderChoice;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Report database configuration
    pub database: DatabaseConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// AI narrative providers
    pub ai: AiConfig,

    /// Fitted classifier artifact
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; reports are kept in memory when unset
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Primary narrative provider; the local Ollama provider is always the fallback
    pub provider: ProviderChoice,

    pub openai_endpoint: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,

    pub huggingface_endpoint: String,
    pub huggingface_api_key: Option<String>,
    pub huggingface_model: String,

    pub ollama_url: String,
    pub ollama_model: String,

    /// Timeout for the primary provider, seconds
    pub primary_timeout_secs: u64,

    /// Timeout for the local fallback provider, seconds
    pub fallback_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Path to the fitted model JSON artifact
    pub path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CSA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("weather.timeout_secs", 5)?
            .set_default("ai.provider", "openai")?
            .set_default(
                "ai.openai_endpoint",
                "https://api.openai.com/v1/chat/completions",
            )?
            .set_default("ai.openai_model", "gpt-3.5-turbo")?
            .set_default(
                "ai.huggingface_endpoint",
                "https://api-inference.huggingface.co/models",
            )?
            .set_default("ai.huggingface_model", "mistralai/Mistral-7B-Instruct-v0.2")?
            .set_default("ai.ollama_url", "http://localhost:11434/api/generate")?
            .set_default("ai.ollama_model", "mistral")?
            .set_default("ai.primary_timeout_secs", 15)?
            .set_default("ai.fallback_timeout_secs", 10)?
            .set_default("model.path", "model.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CSA_ prefix)
            .add_source(
                Environment::with_prefix("CSA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
