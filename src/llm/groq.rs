//! Groq chat-completion client
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol that Groq serves.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{ContentCraftError, Result};
use crate::llm::client::{LlmClient, LlmError};
use crate::llm::types::{CompletionRequest, CompletionResponse, Usage};

/// Groq OpenAI-compatible API base URL
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Environment variable holding the credential
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default model to use
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Configuration for the Groq client
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub model: String,
    /// No timeout unless configured
    pub timeout: Option<Duration>,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            base_url: GROQ_API_BASE.to_string(),
            api_key_env: GROQ_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

/// Groq API client
pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
    config: GroqConfig,
}

impl GroqClient {
    /// Create a new client, reading the credential from `config.api_key_env`.
    ///
    /// A missing credential is not an error here; it surfaces on the first call.
    pub fn new(config: GroqConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            log::debug!("{} is not set; completion calls will fail", config.api_key_env);
        }
        Self::build(api_key, config)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: impl Into<String>, config: GroqConfig) -> Result<Self> {
        let api_key = api_key.into();
        Self::build((!api_key.is_empty()).then_some(api_key), config)
    }

    fn build(api_key: Option<String>, config: GroqConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ContentCraftError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the request body for the chat-completion API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let model = request.model.as_deref().unwrap_or(&self.config.model);

        json!({
            "model": model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens
        })
    }

    /// Parse the API response into a CompletionResponse
    fn parse_response(&self, body: &Value) -> std::result::Result<CompletionResponse, LlmError> {
        let content = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| LlmError::InvalidResponse(format!("no message content in response: {}", body)))?;

        let usage = body
            .get("usage")
            .map(|u| {
                Usage::new(
                    u["prompt_tokens"].as_u64().unwrap_or(0),
                    u["completion_tokens"].as_u64().unwrap_or(0),
                )
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: content.trim().to_string(),
            usage,
        })
    }

    /// Send a request to the chat-completion API
    async fn send_request(&self, body: Value) -> std::result::Result<Value, LlmError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| LlmError::MissingApiKey {
            env_var: self.config.api_key_env.clone(),
        })?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(LlmError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: error_message(&error_body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull `error.message` out of an OpenAI-style error body, else return it whole
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<CompletionResponse, LlmError> {
        let body = self.build_request(&request);
        log::debug!(
            "POST {} model={} temperature={} max_tokens={}",
            self.endpoint(),
            body["model"],
            request.temperature,
            request.max_tokens
        );
        let response = self.send_request(body).await?;
        let parsed = self.parse_response(&response)?;
        log::debug!(
            "completion: {} chars, {} tokens",
            parsed.content.len(),
            parsed.usage.total()
        );
        Ok(parsed)
    }
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .field("api_key_set", &self.api_key.is_some())
            .finish()
    }
}
