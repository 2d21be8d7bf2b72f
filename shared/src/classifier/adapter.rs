//! Classifier adapter: encodes a request, invokes the model and validates
//! its output

use serde::{Deserialize, Serialize};

use super::{
    CategoryCode, ClassifierError, FeatureVector, LabelEncoder, ModelArtifact, StandardScaler,
    StressClassifier, CLASS_COUNT, DEFAULT_CATEGORY_CODE,
};
use crate::models::{CropContext, StressLevel, WeatherSample};

/// Validated classification for one request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub stress_level: StressLevel,
    /// Probability of the predicted class, not the maximum probability
    pub confidence: f64,
    pub crop_encoding: CategoryCode,
    pub stage_encoding: CategoryCode,
}

impl ClassificationResult {
    /// True when either categorical input fell back to the default code
    pub fn used_default_encoding(&self) -> bool {
        !self.crop_encoding.is_known() || !self.stage_encoding.is_known()
    }
}

/// Encoders, scaler and classifier fitted together
pub struct FittedModel {
    crop_encoder: LabelEncoder,
    stage_encoder: LabelEncoder,
    scaler: StandardScaler,
    classifier: Box<dyn StressClassifier>,
}

impl FittedModel {
    pub fn new(
        crop_encoder: LabelEncoder,
        stage_encoder: LabelEncoder,
        scaler: StandardScaler,
        classifier: Box<dyn StressClassifier>,
    ) -> Self {
        Self {
            crop_encoder,
            stage_encoder,
            scaler,
            classifier,
        }
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }
}

impl From<ModelArtifact> for FittedModel {
    fn from(artifact: ModelArtifact) -> Self {
        FittedModel::new(
            artifact.crop_encoder,
            artifact.stage_encoder,
            artifact.scaler,
            Box::new(artifact.classifier),
        )
    }
}

/// Read-only after construction, so one instance can serve concurrent requests
pub struct ClassifierAdapter {
    model: Option<FittedModel>,
}

impl ClassifierAdapter {
    pub fn new(model: FittedModel) -> Self {
        Self { model: Some(model) }
    }

    /// Adapter with no model; every classification fails with `ModelUnavailable`
    pub fn unloaded() -> Self {
        Self { model: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&FittedModel> {
        self.model.as_ref()
    }

    /// Encode categorical inputs; unseen values degrade to the default code
    pub fn encode(&self, context: &CropContext) -> Result<(CategoryCode, CategoryCode), ClassifierError> {
        let model = self.model.as_ref().ok_or(ClassifierError::ModelUnavailable)?;
        Ok((
            model.crop_encoder.encode(&context.crop_type),
            model.stage_encoder.encode(&context.growth_stage),
        ))
    }

    /// Feature order: temperature, humidity, rainfall, wind speed, crop, stage.
    /// If either category is unseen, both encode as the default code.
    pub fn feature_vector(
        weather: &WeatherSample,
        crop_code: CategoryCode,
        stage_code: CategoryCode,
    ) -> FeatureVector {
        let (crop, stage) = if crop_code.is_known() && stage_code.is_known() {
            (crop_code.code(), stage_code.code())
        } else {
            (DEFAULT_CATEGORY_CODE, DEFAULT_CATEGORY_CODE)
        };
        [
            weather.temperature,
            weather.humidity,
            weather.rainfall,
            weather.wind_speed,
            f64::from(crop),
            f64::from(stage),
        ]
    }

    pub fn classify(
        &self,
        weather: &WeatherSample,
        context: &CropContext,
    ) -> Result<ClassificationResult, ClassifierError> {
        let model = self.model.as_ref().ok_or(ClassifierError::ModelUnavailable)?;

        let crop_encoding = model.crop_encoder.encode(&context.crop_type);
        let stage_encoding = model.stage_encoder.encode(&context.growth_stage);

        let features = Self::feature_vector(weather, crop_encoding, stage_encoding);
        let scaled = model.scaler.transform(&features);
        let output = model.classifier.predict(&scaled);

        if output.probabilities.len() != CLASS_COUNT {
            return Err(ClassifierError::InvalidOutput(format!(
                "expected {} class probabilities, got {}",
                CLASS_COUNT,
                output.probabilities.len()
            )));
        }

        let stress_level = i64::try_from(output.label)
            .ok()
            .and_then(StressLevel::from_code)
            .ok_or_else(|| {
                ClassifierError::InvalidOutput(format!("class label {} out of range", output.label))
            })?;

        let confidence = output.probabilities[output.label];
        if !confidence.is_finite() {
            return Err(ClassifierError::InvalidOutput(
                "non-finite class probability".to_string(),
            ));
        }

        Ok(ClassificationResult {
            stress_level,
            confidence: confidence.clamp(0.0, 1.0),
            crop_encoding,
            stage_encoding,
        })
    }
}

impl From<ModelArtifact> for ClassifierAdapter {
    fn from(artifact: ModelArtifact) -> Self {
        ClassifierAdapter::new(artifact.into())
    }
}
