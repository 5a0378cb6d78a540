//! LLM Client Layer - chat-completion API integration
//!
//! This module provides:
//! - Message and request types
//! - LlmClient trait for API abstraction
//! - GroqClient implementation
//! - MockLlmClient for tests

pub mod client;
pub mod groq;
pub mod types;

pub use client::{LlmClient, LlmError, MockLlmClient};
pub use groq::{GroqClient, GroqConfig};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, Usage};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _role = Role::User;
        let _config = GroqConfig::default();
        let _request = CompletionRequest::user("hi");
    }
}
