//! AI model client seam and the bundled OpenRouter implementation.
//!
//! The orchestrator performs at most one invocation per request, with no
//! retry or backoff. Transport failures never surface to the caller; the
//! orchestrator converts them into fallback verdicts.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::engine::prompt::ModerationPrompt;

/// Errors an AI invocation can produce.
#[derive(Debug, Error)]
pub enum AiClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model returned no choices")]
    EmptyResponse,
}

/// A model that can be asked for a moderation verdict.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Name of the underlying model, recorded in results.
    fn model_name(&self) -> &str;

    /// Send the prompt and return the raw response text.
    async fn invoke(&self, prompt: &ModerationPrompt) -> Result<String, AiClientError>;
}

/// OpenRouter API configuration.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key for OpenRouter.
    pub api_key: String,
    /// Chat-completion model to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL, overridable for testing against a local stub.
    pub base_url: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "openai/gpt-4o-mini".to_string(),
            timeout_secs: 30,
            base_url: "https://openrouter.ai/api/v1".to_string(),
        }
    }
}

impl From<crate::config::LlmConfig> for OpenRouterConfig {
    fn from(config: crate::config::LlmConfig) -> Self {
        Self {
            api_key: config.api_key,
            model: config.model,
            timeout_secs: config.timeout_secs,
            ..Self::default()
        }
    }
}

/// Request to OpenRouter API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response from OpenRouter API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Moderation model client backed by the OpenRouter chat API.
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client.
    pub fn new(config: OpenRouterConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl AiClient for OpenRouterClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn invoke(&self, prompt: &ModerationPrompt) -> Result<String, AiClientError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            max_tokens: Some(1024),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiClientError::Api { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AiClientError::EmptyResponse)
    }
}
