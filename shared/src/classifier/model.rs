//! Pre-trained classifier capability and its serialized artifact

use serde::{Deserialize, Serialize};

use super::{ClassifierError, FeatureVector, LabelEncoder, StandardScaler, CLASS_COUNT, FEATURE_COUNT};

/// Raw classifier output for one scaled feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    /// Predicted class index
    pub label: usize,
    /// Probability per class, indexed by class
    pub probabilities: Vec<f64>,
}

/// A trained model that maps scaled features to a stress class
pub trait StressClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> ClassifierOutput;

    /// Model family, for logging
    fn name(&self) -> &'static str;
}

/// Multinomial logistic regression over the scaled features
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoftmaxClassifier {
    /// One row of `FEATURE_COUNT` coefficients per class
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl SoftmaxClassifier {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.coefficients.len() != CLASS_COUNT || self.intercepts.len() != CLASS_COUNT {
            return Err(ClassifierError::InvalidArtifact(format!(
                "classifier expects {} classes, got {} coefficient rows and {} intercepts",
                CLASS_COUNT,
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        if let Some(row) = self.coefficients.iter().find(|row| row.len() != FEATURE_COUNT) {
            return Err(ClassifierError::InvalidArtifact(format!(
                "coefficient row has {} entries, expected {}",
                row.len(),
                FEATURE_COUNT
            )));
        }
        Ok(())
    }

    fn logits(&self, features: &FeatureVector) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + intercept
            })
            .collect()
    }
}

impl StressClassifier for SoftmaxClassifier {
    fn predict(&self, features: &FeatureVector) -> ClassifierOutput {
        let logits = self.logits(features);
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        let probabilities: Vec<f64> = exps.iter().map(|e| e / total).collect();

        let label = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(index, _)| index)
            .unwrap_or(0);

        ClassifierOutput {
            label,
            probabilities,
        }
    }

    fn name(&self) -> &'static str {
        "softmax"
    }
}

/// Serialized fitted model: encoders, scaler and classifier weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub crop_encoder: LabelEncoder,
    pub stage_encoder: LabelEncoder,
    pub scaler: StandardScaler,
    pub classifier: SoftmaxClassifier,
    #[serde(default)]
    pub trained_at: Option<String>,
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let artifact: ModelArtifact = serde_json::from_str(json)
            .map_err(|e| ClassifierError::InvalidArtifact(format!("Failed to parse model: {}", e)))?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !self.crop_encoder.is_well_formed() || !self.stage_encoder.is_well_formed() {
            return Err(ClassifierError::InvalidArtifact(
                "encoder classes must be sorted and unique".to_string(),
            ));
        }
        self.scaler.validate()?;
        self.classifier.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biased_towards(class: usize) -> SoftmaxClassifier {
        let mut intercepts = vec![0.0; CLASS_COUNT];
        intercepts[class] = 5.0;
        SoftmaxClassifier {
            coefficients: vec![vec![0.0; FEATURE_COUNT]; CLASS_COUNT],
            intercepts,
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let output = biased_towards(1).predict(&[30.0, 40.0, 0.0, 5.0, 2.0, 1.0]);
        let total: f64 = output.probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(output.label, 1);
    }

    #[test]
    fn test_rejects_wrong_class_count() {
        let classifier = SoftmaxClassifier {
            coefficients: vec![vec![0.0; FEATURE_COUNT]; 2],
            intercepts: vec![0.0; 2],
        };
        assert!(classifier.validate().is_err());
    }

    #[test]
    fn test_artifact_from_json() {
        let json = r#"{
            "crop_encoder": {"classes": ["rice", "wheat"]},
            "stage_encoder": {"classes": ["flowering", "vegetative"]},
            "scaler": {"mean": [0,0,0,0,0,0], "scale": [1,1,1,1,1,1]},
            "classifier": {
                "coefficients": [[0,0,0,0,0,0],[0,0,0,0,0,0],[0,0,0,0,0,0]],
                "intercepts": [0.0, 0.0, 1.0]
            }
        }"#;
        let artifact = ModelArtifact::from_json(json).unwrap();
        assert_eq!(artifact.crop_encoder.classes().len(), 2);
        assert!(artifact.trained_at.is_none());
    }

    #[test]
    fn test_artifact_rejects_unsorted_encoder() {
        let json = r#"{
            "crop_encoder": {"classes": ["wheat", "rice"]},
            "stage_encoder": {"classes": []},
            "scaler": {"mean": [0,0,0,0,0,0], "scale": [1,1,1,1,1,1]},
            "classifier": {
                "coefficients": [[0,0,0,0,0,0],[0,0,0,0,0,0],[0,0,0,0,0,0]],
                "intercepts": [0.0, 0.0, 0.0]
            }
        }"#;
        assert!(ModelArtifact::from_json(json).is_err());
    }
}
