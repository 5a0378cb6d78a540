//! Core LLM client trait, error type and a scripted mock

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::types::{CompletionRequest, CompletionResponse};

/// Stateless completion client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (waits until the full text is available)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Errors that can occur while talking to the completion API
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },
}

impl LlmError {
    pub fn is_auth(&self) -> bool {
        match self {
            LlmError::MissingApiKey { .. } => true,
            LlmError::ApiError { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

/// Mock client that replays scripted responses in order and records requests
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Mock that answers with each text in turn
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(CompletionResponse::text).collect())
    }

    /// Queue a successful text response
    pub fn push_text(&self, text: impl Into<String>) {
        self.lock_responses().push_back(Ok(CompletionResponse::text(text)));
    }

    /// Queue a failure
    pub fn push_error(&self, error: LlmError) {
        self.lock_responses().push_back(Err(error));
    }

    /// Requests seen so far, in call order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<CompletionResponse, LlmError>>> {
        self.responses.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("mock has no more responses".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockLlmClient::with_texts(["first", "second"]);

        let a = mock.complete(CompletionRequest::user("a")).await.unwrap();
        let b = mock.complete(CompletionRequest::user("b")).await.unwrap();

        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.requests()[1].messages[0].content, "b");
    }

    #[tokio::test]
    async fn test_mock_exhausted() {
        let mock = MockLlmClient::new(vec![]);
        let result = mock.complete(CompletionRequest::user("a")).await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_mock_scripted_error() {
        let mock = MockLlmClient::new(vec![]);
        mock.push_error(LlmError::ApiError {
            status: 500,
            message: "boom".to_string(),
        });
        mock.push_text("after");

        assert!(mock.complete(CompletionRequest::user("a")).await.is_err());
        assert_eq!(mock.complete(CompletionRequest::user("b")).await.unwrap().content, "after");
    }

    #[test]
    fn test_llm_error_classification() {
        assert!(!LlmError::RateLimited { retry_after: None }.is_auth());
        assert!(
            LlmError::ApiError {
                status: 401,
                message: "Invalid API Key".to_string()
            }
            .is_auth()
        );
        assert!(
            LlmError::MissingApiKey {
                env_var: "GROQ_API_KEY".to_string()
            }
            .is_auth()
        );
        assert!(
            !LlmError::ApiError {
                status: 500,
                message: "oops".to_string()
            }
            .is_auth()
        );
    }

    #[test]
    fn test_missing_api_key_message() {
        let err = LlmError::MissingApiKey {
            env_var: "GROQ_API_KEY".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing API key: environment variable GROQ_API_KEY not set"
        );
    }
}
