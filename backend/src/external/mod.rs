//! External API integrations

pub mod llm;
pub mod weather;

pub use weather::{WeatherClient, WeatherProvider};
