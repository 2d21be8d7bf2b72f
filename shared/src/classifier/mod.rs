//! Crop stress classifier adapter
//!
//! Wraps a pre-trained model behind a fixed feature encoding:
//! `[temperature, humidity, rainfall, wind_speed, crop_code, stage_code]`,
//! standard-scaled before prediction. Training happens offline; everything
//! here is read-only once loaded.

mod adapter;
mod encoding;
mod model;
mod scaler;

use thiserror::Error;

pub use adapter::{ClassificationResult, ClassifierAdapter, FittedModel};
pub use encoding::{CategoryCode, LabelEncoder, DEFAULT_CATEGORY_CODE};
pub use model::{ClassifierOutput, ModelArtifact, SoftmaxClassifier, StressClassifier};
pub use scaler::StandardScaler;

pub const FEATURE_COUNT: usize = 6;
pub const CLASS_COUNT: usize = 3;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "temperature",
    "humidity",
    "rainfall",
    "wind_speed",
    "crop_type_encoded",
    "growth_stage_encoded",
];

pub type FeatureVector = [f64; FEATURE_COUNT];

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Classifier model is not loaded")]
    ModelUnavailable,

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Invalid classifier output: {0}")]
    InvalidOutput(String),
}
