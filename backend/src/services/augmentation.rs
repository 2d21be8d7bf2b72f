//! AI narrative augmentation
//!
//! Walks an ordered list of providers (configured primary, then the local
//! Ollama fallback) and returns the first non-empty narrative. Every failure,
//! including a timeout, moves on to the next provider; the chain itself never
//! fails.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use shared::{AiNarrative, StressLevel};

use crate::config::AiConfig;
use crate::error::{AppError, AppResult};
use crate::external::llm::{
    HuggingFaceProvider, NarrativeProvider, OllamaProvider, OpenAiProvider, ProviderChoice,
    ProviderError,
};

/// Context handed to the providers alongside the observed symptoms
#[derive(Debug, Clone)]
pub struct CropData {
    pub crop_type: String,
    pub growth_stage: String,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub wind_speed: f64,
    pub stress_level: StressLevel,
}

/// Explicit chain configuration
#[derive(Debug, Clone, Copy)]
pub struct AugmentationConfig {
    pub provider: ProviderChoice,
    pub primary_timeout: Duration,
    pub fallback_timeout: Duration,
}

impl From<&AiConfig> for AugmentationConfig {
    fn from(config: &AiConfig) -> Self {
        Self {
            provider: config.provider,
            primary_timeout: Duration::from_secs(config.primary_timeout_secs),
            fallback_timeout: Duration::from_secs(config.fallback_timeout_secs),
        }
    }
}

struct Stage {
    provider: Arc<dyn NarrativeProvider>,
    timeout: Duration,
}

/// Ordered provider chain
pub struct AugmentationChain {
    stages: Vec<Stage>,
}

impl AugmentationChain {
    /// Build a chain from an explicit primary and fallback.
    ///
    /// `primary` is ignored when the configured choice is `none`. A primary
    /// that is itself the local provider is not followed by a second
    /// attempt at the same provider.
    pub fn new(
        config: &AugmentationConfig,
        primary: Option<Arc<dyn NarrativeProvider>>,
        fallback: Arc<dyn NarrativeProvider>,
    ) -> Self {
        if config.provider == ProviderChoice::None {
            return Self { stages: Vec::new() };
        }

        let mut stages = Vec::with_capacity(2);
        if let Some(primary) = primary {
            stages.push(Stage {
                provider: primary,
                timeout: config.primary_timeout,
            });
        }
        if stages.iter().all(|s| s.provider.name() != fallback.name()) {
            stages.push(Stage {
                provider: fallback,
                timeout: config.fallback_timeout,
            });
        }
        Self { stages }
    }

    /// Build the production chain from application configuration
    pub fn from_config(config: &AiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let ollama: Arc<dyn NarrativeProvider> = Arc::new(OllamaProvider::new(
            client.clone(),
            config.ollama_url.clone(),
            config.ollama_model.clone(),
        ));

        let primary: Option<Arc<dyn NarrativeProvider>> = match config.provider {
            ProviderChoice::OpenAi => Some(Arc::new(OpenAiProvider::new(
                client.clone(),
                config.openai_endpoint.clone(),
                config.openai_api_key.clone(),
                config.openai_model.clone(),
            ))),
            ProviderChoice::HuggingFace => Some(Arc::new(HuggingFaceProvider::new(
                client.clone(),
                config.huggingface_endpoint.clone(),
                config.huggingface_api_key.clone(),
                config.huggingface_model.clone(),
            ))),
            ProviderChoice::Ollama => Some(ollama.clone()),
            ProviderChoice::None => None,
        };

        Ok(Self::new(&AugmentationConfig::from(config), primary, ollama))
    }

    /// Provider names in the order they are tried
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.provider.name()).collect()
    }

    pub fn is_enabled(&self) -> bool {
        !self.stages.is_empty()
    }

    /// Produce a narrative for the observed symptoms (or raw notes)
    pub async fn augment(&self, symptom_text: &str, crop_data: &CropData) -> AiNarrative {
        if self.stages.is_empty() {
            return AiNarrative::Unavailable;
        }

        let prompt = build_prompt(symptom_text, crop_data);
        for stage in &self.stages {
            let name = stage.provider.name();
            match run_stage(stage, &prompt).await {
                Ok(text) => {
                    tracing::debug!(provider = name, "AI narrative generated");
                    return AiNarrative::Generated {
                        provider: name.to_string(),
                        text,
                    };
                }
                Err(e) => {
                    tracing::warn!(provider = name, error = %e, "AI provider failed");
                }
            }
        }

        tracing::warn!("All AI providers failed; narrative unavailable");
        AiNarrative::Unavailable
    }
}

async fn run_stage(stage: &Stage, prompt: &str) -> Result<String, ProviderError> {
    let text = tokio::time::timeout(stage.timeout, stage.provider.generate(prompt))
        .await
        .map_err(|_| ProviderError::Timeout(stage.timeout.as_secs()))??;
    if text.trim().is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok(text)
}

/// Prompt sent to every provider
pub fn build_prompt(symptom_text: &str, crop: &CropData) -> String {
    let symptoms = if symptom_text.trim().is_empty() {
        "none reported"
    } else {
        symptom_text.trim()
    };

    format!(
        "Analyze this crop stress situation and provide actionable recommendations:\n\n\
         Crop: {}\n\
         Growth Stage: {}\n\
         Observed Symptoms: {}\n\
         Current Conditions: {}°C, {}% humidity, {} mm rainfall, {} m/s wind\n\
         Classified Stress: {}\n\n\
         Provide:\n\
         1. Root cause identification\n\
         2. 3-4 immediate actions\n\
         3. Prevention measures\n\
         4. Expected recovery time\n\n\
         Keep response concise and practical.",
        crop.crop_type,
        crop.growth_stage,
        symptoms,
        crop.temperature,
        crop.humidity,
        crop.rainfall,
        crop.wind_speed,
        crop.stress_level.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behaviour {
        Reply(&'static str),
        Fail,
        Hang,
    }

    struct MockProvider {
        name: &'static str,
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(name: &'static str, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                name,
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NarrativeProvider for MockProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Reply(text) => Ok(text.to_string()),
                Behaviour::Fail => Err(ProviderError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn config(provider: ProviderChoice) -> AugmentationConfig {
        AugmentationConfig {
            provider,
            primary_timeout: Duration::from_millis(50),
            fallback_timeout: Duration::from_millis(50),
        }
    }

    fn crop_data() -> CropData {
        CropData {
            crop_type: "tomato".to_string(),
            growth_stage: "flowering".to_string(),
            temperature: 34.0,
            humidity: 40.0,
            rainfall: 0.0,
            wind_speed: 2.0,
            stress_level: StressLevel::MildStress,
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = MockProvider::new("openai", Behaviour::Reply("Water at dawn."));
        let fallback = MockProvider::new("ollama", Behaviour::Reply("unused"));
        let chain =
            AugmentationChain::new(&config(ProviderChoice::OpenAi), Some(primary.clone()), fallback.clone());

        let narrative = chain.augment("wilting", &crop_data()).await;
        assert_eq!(narrative.text(), Some("Water at dawn."));
        assert_eq!(narrative.provider(), Some("openai"));
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback() {
        let primary = MockProvider::new("openai", Behaviour::Fail);
        let fallback = MockProvider::new("ollama", Behaviour::Reply("Mulch the beds."));
        let chain =
            AugmentationChain::new(&config(ProviderChoice::OpenAi), Some(primary.clone()), fallback.clone());

        let narrative = chain.augment("wilting", &crop_data()).await;
        assert_eq!(narrative.provider(), Some("ollama"));
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_both_fail_is_unavailable() {
        let primary = MockProvider::new("openai", Behaviour::Fail);
        let fallback = MockProvider::new("ollama", Behaviour::Fail);
        let chain = AugmentationChain::new(&config(ProviderChoice::OpenAi), Some(primary), fallback);

        assert_eq!(chain.augment("", &crop_data()).await, AiNarrative::Unavailable);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let primary = MockProvider::new("openai", Behaviour::Hang);
        let fallback = MockProvider::new("ollama", Behaviour::Reply("Shade the crop."));
        let chain = AugmentationChain::new(&config(ProviderChoice::OpenAi), Some(primary), fallback);

        let narrative = chain.augment("wilting", &crop_data()).await;
        assert_eq!(narrative.provider(), Some("ollama"));
    }

    #[tokio::test]
    async fn test_empty_text_counts_as_failure() {
        let primary = MockProvider::new("openai", Behaviour::Reply("   "));
        let fallback = MockProvider::new("ollama", Behaviour::Reply(""));
        let chain = AugmentationChain::new(&config(ProviderChoice::OpenAi), Some(primary), fallback);

        assert_eq!(chain.augment("wilting", &crop_data()).await, AiNarrative::Unavailable);
    }

    #[tokio::test]
    async fn test_local_primary_is_not_repeated() {
        let local = MockProvider::new("ollama", Behaviour::Fail);
        let chain = AugmentationChain::new(
            &config(ProviderChoice::Ollama),
            Some(local.clone()),
            local.clone(),
        );

        assert_eq!(chain.provider_names(), vec!["ollama"]);
        assert_eq!(chain.augment("wilting", &crop_data()).await, AiNarrative::Unavailable);
        assert_eq!(local.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_none_disables_chain() {
        let fallback = MockProvider::new("ollama", Behaviour::Reply("unused"));
        let chain = AugmentationChain::new(&config(ProviderChoice::None), None, fallback.clone());

        assert!(!chain.is_enabled());
        assert_eq!(chain.augment("wilting", &crop_data()).await, AiNarrative::Unavailable);
        assert_eq!(fallback.calls(), 0);
    }

    #[test]
    fn test_prompt_contents() {
        let prompt = build_prompt("wilting, yellowing", &crop_data());
        assert!(prompt.contains("Crop: tomato"));
        assert!(prompt.contains("Growth Stage: flowering"));
        assert!(prompt.contains("Observed Symptoms: wilting, yellowing"));
        assert!(prompt.contains("Classified Stress: Mild Stress"));

        let prompt = build_prompt("  ", &crop_data());
        assert!(prompt.contains("Observed Symptoms: none reported"));
    }
}
