//! HTTP handlers for the Crop Stress Advisory API

pub mod health;
pub mod metadata;
pub mod prediction;
pub mod reports;
pub mod weather;

pub use health::health_check;
pub use metadata::get_metadata;
pub use prediction::predict_stress;
pub use reports::{list_reports, not_found, submit_report};
pub use weather::get_weather;
