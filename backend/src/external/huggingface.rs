//! HuggingFace Inference API client
//!
//! Text generation for AI-assisted land management recommendations.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AiConfig;
use crate::error::{AppError, AppResult};

/// Failure talking to a text-generation backend
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// A backend able to complete a prompt (allows stubbing in tests).
///
/// One call per recommendation request, no retries; timeouts are the
/// implementation's concern and surface as errors.
#[async_trait::async_trait]
pub trait TextGenerationBackend: Send + Sync {
    /// Model identifier reported in status and logs
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Client for the HuggingFace hosted inference API
#[derive(Clone)]
pub struct HuggingFaceClient {
    http_client: Client,
    endpoint: String,
    model: String,
    api_token: String,
    parameters: GenerationParameters,
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub do_sample: bool,
    pub return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// The API answers with either a list or a single object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Many(Vec<GeneratedText>),
    One(GeneratedText),
}

impl TextGenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            TextGenerationResponse::Many(items) => {
                items.into_iter().next().map(|g| g.generated_text)
            }
            TextGenerationResponse::One(item) => Some(item.generated_text),
        }
    }
}

impl HuggingFaceClient {
    /// Create a client; the request timeout bounds the single generation call
    pub fn new(config: &AiConfig, api_token: String) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_token,
            parameters: GenerationParameters {
                max_new_tokens: config.max_new_tokens,
                temperature: config.temperature,
                top_p: 0.95,
                repetition_penalty: 1.1,
                do_sample: true,
                return_full_text: false,
            },
        })
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }
}

#[async_trait::async_trait]
impl TextGenerationBackend for HuggingFaceClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = TextGenerationRequest {
            inputs: prompt,
            parameters: &self.parameters,
        };

        let response = self
            .http_client
            .post(self.model_url())
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Status { status, body });
        }

        let result: TextGenerationResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::UnexpectedResponse(e.to_string()))?;

        result
            .into_text()
            .ok_or_else(|| GenerationError::UnexpectedResponse("empty generation list".to_string()))
    }
}
