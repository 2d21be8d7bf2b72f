//! Standard scaling of the numeric feature vector

use serde::{Deserialize, Serialize};

use super::{ClassifierError, FeatureVector, FEATURE_COUNT};

/// Per-feature `(x - mean) / scale`, fitted at training time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ClassifierError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Pass-through scaler
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(ClassifierError::InvalidArtifact(format!(
                "scaler expects {} features, got mean={} scale={}",
                FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(ClassifierError::InvalidArtifact(
                "scaler parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, value) in features.iter().enumerate() {
            // Constant features were fitted with zero variance
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            scaled[i] = (value - self.mean[i]) / scale;
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(
            vec![25.0, 60.0, 5.0, 3.0, 6.0, 3.0],
            vec![5.0, 10.0, 0.0, 1.0, 2.0, 1.5],
        )
        .unwrap();
        let scaled = scaler.transform(&[30.0, 50.0, 7.0, 3.0, 6.0, 0.0]);
        assert_eq!(scaled, [1.0, -1.0, 2.0, 0.0, 0.0, -2.0]);
    }

    #[test]
    fn test_rejects_wrong_width() {
        let result = StandardScaler::new(vec![0.0; 4], vec![1.0; 4]);
        assert!(matches!(result, Err(ClassifierError::InvalidArtifact(_))));
    }
}
