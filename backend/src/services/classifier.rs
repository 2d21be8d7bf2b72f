//! Loading the fitted classifier artifact at startup

use std::path::Path;

use shared::{classifier::ModelArtifact, ClassifierAdapter, ClassifierError};

/// Read and validate a model artifact from disk
pub fn read_artifact(path: &Path) -> Result<ModelArtifact, ClassifierError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        ClassifierError::InvalidArtifact(format!("Failed to read {}: {}", path.display(), e))
    })?;
    ModelArtifact::from_json(&json)
}

/// Load the classifier, degrading to an unloaded adapter on failure.
///
/// The server still starts without a model; advisory requests then fail
/// with `MODEL_UNAVAILABLE`.
pub fn load_classifier(path: &Path) -> ClassifierAdapter {
    match read_artifact(path) {
        Ok(artifact) => {
            tracing::info!(
                path = %path.display(),
                trained_at = artifact.trained_at.as_deref().unwrap_or("unknown"),
                crops = artifact.crop_encoder.classes().len(),
                stages = artifact.stage_encoder.classes().len(),
                "Classifier model loaded"
            );
            ClassifierAdapter::from(artifact)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Classifier model not loaded");
            ClassifierAdapter::unloaded()
        }
    }
}
