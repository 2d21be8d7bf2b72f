//! Shared types and advisory logic for the Crop Stress Advisory Platform
//!
//! This crate holds the deterministic core used by the backend and the
//! browser (via WASM): symptom extraction, the remedy knowledge base,
//! advisory synthesis and the classifier adapter.

pub mod classifier;
pub mod knowledge_base;
pub mod models;
pub mod symptoms;
pub mod synthesis;
pub mod types;
pub mod validation;

pub use classifier::{ClassificationResult, ClassifierAdapter, ClassifierError};
pub use knowledge_base::*;
pub use models::*;
pub use symptoms::*;
pub use synthesis::*;
pub use types::*;
pub use validation::*;
