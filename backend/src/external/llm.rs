//! Text-generation providers for the AI narrative
//!
//! Each provider turns a prompt into free text. Failures are reported as
//! `ProviderError` and never reach the HTTP layer; the augmentation chain
//! moves on to the next provider instead.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Configured primary provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    OpenAi,
    Ollama,
    HuggingFace,
    None,
}

impl ProviderChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderChoice::OpenAi => "openai",
            ProviderChoice::Ollama => "ollama",
            ProviderChoice::HuggingFace => "huggingface",
            ProviderChoice::None => "none",
        }
    }
}

impl std::fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("provider returned no text")]
    Empty,

    #[error("provider timed out after {0}s")]
    Timeout(u64),
}

/// A single text-generation backend
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

const SYSTEM_PROMPT: &str = "You are an agricultural expert specialized in crop stress management.";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 500;

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body: body.chars().take(300).collect(),
    })
}

fn non_empty(text: String) -> Result<String, ProviderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// OpenAI chat completions
// ---------------------------------------------------------------------------

pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(client: Client, endpoint: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
        }
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS
        })
    }

    fn parse(body: &str) -> Result<String, ProviderError> {
        let response: ChatCompletionResponse =
            serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ProviderError::Empty)?;
        non_empty(text)
    }
}

#[async_trait]
impl NarrativeProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingCredential("ai.openai_api_key"))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;
        let body = error_for_status(response).await?.text().await?;
        Self::parse(&body)
    }
}

// ---------------------------------------------------------------------------
// HuggingFace inference API
// ---------------------------------------------------------------------------

pub struct HuggingFaceProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct HuggingFaceResponse {
    generated_text: String,
}

impl HuggingFaceProvider {
    pub fn new(client: Client, endpoint: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
        }
    }

    fn url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.model)
    }

    fn parse(body: &str) -> Result<String, ProviderError> {
        let responses: Vec<HuggingFaceResponse> =
            serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
        let first = responses.into_iter().next().ok_or(ProviderError::Empty)?;
        non_empty(first.generated_text)
    }
}

#[async_trait]
impl NarrativeProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingCredential("ai.huggingface_api_key"))?;

        let request = json!({
            "inputs": format!("{}\n\n{}", SYSTEM_PROMPT, prompt),
            "parameters": {
                "max_new_tokens": MAX_TOKENS,
                "temperature": TEMPERATURE,
                "return_full_text": false
            }
        });

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;
        let body = error_for_status(response).await?.text().await?;
        Self::parse(&body)
    }
}

// ---------------------------------------------------------------------------
// Local Ollama server
// ---------------------------------------------------------------------------

pub struct OllamaProvider {
    client: Client,
    url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

impl OllamaProvider {
    pub fn new(client: Client, url: String, model: String) -> Self {
        Self { client, url, model }
    }

    fn parse(body: &str) -> Result<String, ProviderError> {
        let response: OllamaResponse =
            serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
        non_empty(response.response)
    }
}

#[async_trait]
impl NarrativeProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({"model": self.model, "prompt": prompt, "stream": false}))
            .send()
            .await?;
        let body = error_for_status(response).await?.text().await?;
        Self::parse(&body)
    }
}
