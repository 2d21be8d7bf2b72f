//! Advisory synthesis pipeline
//!
//! validate -> weather (with offline fallback) -> classify -> extract symptoms
//! -> synthesize -> AI narrative -> store. Only a missing or broken classifier
//! fails a request once validation has passed.

use std::sync::Arc;

use chrono::Utc;
use shared::{
    care_advice, estimate_soil_moisture, extract_symptoms, general_recommendation, synthesize,
    validate_report, yield_info, AdvisoryRecord, ClassificationResult, ClassifierAdapter,
    CropContext, NewReport, PredictionInput, PredictionResult, SubmitReportInput, WeatherSample,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::weather::WeatherProvider;
use crate::services::augmentation::{AugmentationChain, CropData};
use crate::services::report_store::ReportStore;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone)]
pub struct AdvisoryService {
    classifier: Arc<ClassifierAdapter>,
    weather: Arc<dyn WeatherProvider>,
    augmentation: Arc<AugmentationChain>,
    reports: Arc<dyn ReportStore>,
}

impl AdvisoryService {
    pub fn new(
        classifier: Arc<ClassifierAdapter>,
        weather: Arc<dyn WeatherProvider>,
        augmentation: Arc<AugmentationChain>,
        reports: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            classifier,
            weather,
            augmentation,
            reports,
        }
    }

    /// Current weather for a location, or the offline sample when the
    /// provider fails
    pub async fn observe_weather(&self, latitude: f64, longitude: f64) -> WeatherSample {
        match self.weather.current_weather(latitude, longitude).await {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(
                    provider = self.weather.name(),
                    latitude,
                    longitude,
                    error = %e,
                    "Weather lookup failed; using offline values"
                );
                WeatherSample::offline_fallback()
            }
        }
    }

    fn classify(&self, weather: &WeatherSample, context: &CropContext) -> AppResult<ClassificationResult> {
        let result = self.classifier.classify(weather, context)?;
        if result.used_default_encoding() {
            tracing::warn!(
                crop_type = %context.crop_type,
                growth_stage = %context.growth_stage,
                "Unseen category encoded with default code"
            );
        }
        Ok(result)
    }

    /// Classification only, with caller-supplied weather
    pub fn predict(&self, input: &PredictionInput) -> AppResult<PredictionResult> {
        input.validate()?;

        let context = CropContext::new(&input.crop_type, &input.growth_stage);
        let weather = WeatherSample::manual(
            input.temperature,
            input.humidity,
            input.rainfall,
            input.wind_speed,
        );
        let result = self.classify(&weather, &context)?;
        let level = i64::from(result.stress_level.code());

        Ok(PredictionResult {
            stress_level: result.stress_level,
            stress_label: result.stress_level.label().to_string(),
            confidence: round2(result.confidence),
            recommendation: general_recommendation(level).to_string(),
            soil_moisture_estimate: estimate_soil_moisture(
                weather.rainfall,
                weather.humidity,
                weather.temperature,
            ),
            timestamp: Utc::now(),
        })
    }

    /// Run the full pipeline without persisting the result
    pub async fn build_report(&self, input: &SubmitReportInput) -> AppResult<NewReport> {
        validate_report(input).map_err(AppError::ValidationFailed)?;

        let context = CropContext::new(&input.crop_type, &input.growth_stage);
        let weather = self.observe_weather(input.latitude, input.longitude).await;

        let classification = self.classify(&weather, &context)?;
        let stress_level = classification.stress_level;

        let notes = input.notes.as_deref().unwrap_or_default();
        let observed = extract_symptoms(Some(notes));
        let advisory = synthesize(
            &context.crop_type,
            stress_level,
            &observed,
            weather.temperature,
            weather.humidity,
            &context.growth_stage,
        );

        let symptom_text = advisory
            .symptom_analysis
            .iter()
            .map(|entry| entry.symptom.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let crop_data = CropData {
            crop_type: context.crop_type.clone(),
            growth_stage: context.growth_stage.clone(),
            temperature: weather.temperature,
            humidity: weather.humidity,
            rainfall: weather.rainfall,
            wind_speed: weather.wind_speed,
            stress_level,
        };
        let narrative = self
            .augmentation
            .augment(
                if symptom_text.is_empty() { notes } else { symptom_text.as_str() },
                &crop_data,
            )
            .await;

        let soil_moisture_estimate =
            estimate_soil_moisture(weather.rainfall, weather.humidity, weather.temperature);
        let location = input
            .location
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| (!weather.location.is_empty()).then(|| weather.location.clone()));

        Ok(NewReport {
            crop_type: context.crop_type.clone(),
            growth_stage: context.growth_stage.clone(),
            stress_level,
            stress_label: stress_level.label().to_string(),
            confidence: round2(classification.confidence),
            color: stress_level.color().to_string(),
            observed_symptoms: advisory.observed_symptoms.iter().copied().collect(),
            symptom_analysis: advisory.symptom_analysis,
            combined_assessment: advisory.combined_assessment,
            action_priority: advisory.action_priority,
            ml_based_recommendation: care_advice(stress_level, &context.crop_type).to_string(),
            yield_optimization: yield_info(&context.crop_type).to_string(),
            ai_analysis: narrative.text().map(str::to_string),
            ai_provider: narrative.provider().map(str::to_string),
            weather,
            soil_moisture_estimate,
            location,
            latitude: input.latitude,
            longitude: input.longitude,
        })
    }

    /// Run the pipeline and persist the resulting advisory
    pub async fn submit_report(&self, input: &SubmitReportInput) -> AppResult<AdvisoryRecord> {
        let report = self.build_report(input).await?;
        let record = self.reports.save(report).await?;
        tracing::info!(
            report_id = %record.id,
            crop_type = %record.report.crop_type,
            stress_level = record.report.stress_level.code(),
            symptoms = record.report.observed_symptoms.len(),
            "Advisory report stored"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::llm::{NarrativeProvider, ProviderChoice, ProviderError};
    use crate::services::augmentation::AugmentationConfig;
    use crate::services::report_store::InMemoryReportStore;
    use async_trait::async_trait;
    use shared::classifier::{LabelEncoder, ModelArtifact, SoftmaxClassifier, StandardScaler};
    use shared::{CropType, StressLevel, SymptomTag, WeatherSource};
    use std::time::Duration;

    struct FixedWeather(Option<WeatherSample>);

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current_weather(&self, _lat: f64, _lon: f64) -> AppResult<WeatherSample> {
            self.0
                .clone()
                .ok_or_else(|| AppError::WeatherServiceUnavailable("down".to_string()))
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FixedNarrative(Option<&'static str>);

    #[async_trait]
    impl NarrativeProvider for FixedNarrative {
        fn name(&self) -> &'static str {
            "ollama"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.0.map(str::to_string).ok_or(ProviderError::Empty)
        }
    }

    fn classifier_biased_towards(level: StressLevel) -> ClassifierAdapter {
        let mut intercepts = vec![0.0; 3];
        intercepts[level.code() as usize] = 4.0;
        let artifact = ModelArtifact {
            crop_encoder: LabelEncoder::fit(CropType::ALL.iter().map(|c| c.as_str())),
            stage_encoder: LabelEncoder::fit(["flowering", "vegetative"]),
            scaler: StandardScaler::identity(),
            classifier: SoftmaxClassifier {
                coefficients: vec![vec![0.0; 6]; 3],
                intercepts,
            },
            trained_at: None,
        };
        ClassifierAdapter::from(artifact)
    }

    fn service(
        classifier: ClassifierAdapter,
        weather: Option<WeatherSample>,
        narrative: Option<&'static str>,
    ) -> AdvisoryService {
        let config = AugmentationConfig {
            provider: ProviderChoice::Ollama,
            primary_timeout: Duration::from_millis(100),
            fallback_timeout: Duration::from_millis(100),
        };
        let chain = AugmentationChain::new(&config, None, Arc::new(FixedNarrative(narrative)));
        AdvisoryService::new(
            Arc::new(classifier),
            Arc::new(FixedWeather(weather)),
            Arc::new(chain),
            Arc::new(InMemoryReportStore::new()),
        )
    }

    fn input(crop: &str, notes: &str) -> SubmitReportInput {
        SubmitReportInput {
            crop_type: crop.to_string(),
            growth_stage: "Flowering".to_string(),
            notes: Some(notes.to_string()),
            latitude: 28.6,
            longitude: 77.2,
            location: Some("Field 7".to_string()),
        }
    }

    #[tokio::test]
    async fn test_severe_stress_with_symptoms() {
        let svc = service(
            classifier_biased_towards(StressLevel::SevereStress),
            Some(WeatherSample::manual(38.0, 30.0, 0.0, 6.0)),
            Some("Irrigate tonight."),
        );

        let record = svc
            .submit_report(&input("Tomato", "Leaves are wilting and turning yellow"))
            .await
            .unwrap();
        let report = &record.report;

        assert_eq!(report.crop_type, "tomato");
        assert_eq!(report.growth_stage, "flowering");
        assert_eq!(report.stress_level, StressLevel::SevereStress);
        assert_eq!(report.color, "#ef4444");
        assert_eq!(
            report.observed_symptoms,
            vec![SymptomTag::Wilting, SymptomTag::Yellowing]
        );
        assert_eq!(report.action_priority, report.observed_symptoms);
        assert!(report.combined_assessment.starts_with("URGENT ACTION NEEDED!"));
        assert_eq!(report.ai_analysis.as_deref(), Some("Irrigate tonight."));
        assert_eq!(report.ai_provider.as_deref(), Some("ollama"));
        assert_eq!(report.location.as_deref(), Some("Field 7"));
    }

    #[tokio::test]
    async fn test_weather_failure_uses_offline_sample() {
        let svc = service(classifier_biased_towards(StressLevel::Healthy), None, None);

        let report = svc.build_report(&input("wheat", "")).await.unwrap();
        assert_eq!(report.weather.source, WeatherSource::OfflineFallback);
        assert_eq!(report.weather.temperature, 28.0);
        assert!(report.observed_symptoms.is_empty());
        assert!(report.combined_assessment.contains("Temp: 28°C"));
    }

    #[tokio::test]
    async fn test_unknown_crop_still_produces_advisory() {
        let svc = service(
            classifier_biased_towards(StressLevel::MildStress),
            Some(WeatherSample::manual(25.0, 60.0, 2.0, 1.0)),
            None,
        );

        let report = svc.build_report(&input("quinoa", "some spots")).await.unwrap();
        assert_eq!(report.stress_level, StressLevel::MildStress);
        assert_eq!(report.yield_optimization, shared::NO_YIELD_DATA);
        assert_eq!(report.observed_symptoms, vec![SymptomTag::Spotting]);
        assert!(report.action_priority.is_empty());
    }

    #[tokio::test]
    async fn test_missing_model_is_an_error() {
        let svc = service(ClassifierAdapter::unloaded(), None, Some("unused"));
        let err = svc.submit_report(&input("rice", "")).await.unwrap_err();
        assert!(matches!(err, AppError::ModelUnavailable));
    }

    #[tokio::test]
    async fn test_ai_failure_stores_null_analysis() {
        let svc = service(
            classifier_biased_towards(StressLevel::Healthy),
            Some(WeatherSample::manual(22.0, 55.0, 3.0, 2.0)),
            None,
        );
        let record = svc.submit_report(&input("basil", "stunted growth")).await.unwrap();
        assert!(record.report.ai_analysis.is_none());
        assert!(record.report.ai_provider.is_none());
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected_before_pipeline() {
        let svc = service(ClassifierAdapter::unloaded(), None, None);
        let mut bad = input("rice", "");
        bad.latitude = 95.0;
        let err = svc.build_report(&bad).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));
    }

    #[test]
    fn test_predict_rounds_confidence() {
        let svc = service(classifier_biased_towards(StressLevel::MildStress), None, None);
        let result = svc
            .predict(&PredictionInput {
                temperature: 30.0,
                humidity: 50.0,
                rainfall: 1.0,
                wind_speed: 2.0,
                crop_type: "Maize".to_string(),
                growth_stage: "vegetative".to_string(),
            })
            .unwrap();

        assert_eq!(result.stress_level, StressLevel::MildStress);
        assert_eq!(result.stress_label, "Mild Stress");
        assert_eq!(result.confidence, round2(result.confidence));
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.87654), 0.88);
        assert_eq!(round2(1.0), 1.0);
    }
}
