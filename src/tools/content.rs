//! Content writers - article, comic and tweet generation
//!
//! Each writer makes its own completion call with a task-specific prompt.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ParamSpec, ParamType, Tool, ToolArgs, ToolError};
use crate::llm::{CompletionRequest, LlmClient};

const SUBJECT_PARAMS: &[ParamSpec] = &[ParamSpec::required(
    "subject",
    ParamType::String,
    "Topic of the generated text",
)];

/// Sampling settings for content generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// `None` uses the client's default model
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}

/// The kinds of text the content tools produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Article,
    Comic,
    Tweet,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Article, ContentKind::Comic, ContentKind::Tweet];

    pub fn tool_name(&self) -> &'static str {
        match self {
            ContentKind::Article => "write_article",
            ContentKind::Comic => "write_comic",
            ContentKind::Tweet => "write_tweet",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContentKind::Article => "Write a detailed article about a subject",
            ContentKind::Comic => "Write a short comic about a subject",
            ContentKind::Tweet => "Write a tweet about a subject",
        }
    }

    /// Target length, in tokens, stated in the prompt
    pub fn target_length(&self) -> &'static str {
        match self {
            ContentKind::Article => "200-300",
            ContentKind::Comic => "150-200",
            ContentKind::Tweet => "80-100",
        }
    }

    pub fn prompt(&self, subject: &str) -> String {
        match self {
            ContentKind::Article => format!(
                "Write a detailed article of {} tokens about {}.",
                self.target_length(),
                subject
            ),
            ContentKind::Comic => format!("Write a comic of {} tokens about {}.", self.target_length(), subject),
            ContentKind::Tweet => format!("Write a tweet of {} tokens about {}.", self.target_length(), subject),
        }
    }
}

/// A tool that writes one kind of content through the completion API
pub struct ContentTool {
    kind: ContentKind,
    llm: Arc<dyn LlmClient>,
    params: GenerationParams,
}

impl ContentTool {
    pub fn new(kind: ContentKind, llm: Arc<dyn LlmClient>, params: GenerationParams) -> Self {
        Self { kind, llm, params }
    }

    fn request(&self, subject: &str) -> CompletionRequest {
        let request = CompletionRequest::user(self.kind.prompt(subject))
            .with_temperature(self.params.temperature)
            .with_max_tokens(self.params.max_tokens);
        match &self.params.model {
            Some(model) => request.with_model(model.clone()),
            None => request,
        }
    }
}

#[async_trait]
impl Tool for ContentTool {
    fn name(&self) -> &str {
        self.kind.tool_name()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn params(&self) -> &[ParamSpec] {
        SUBJECT_PARAMS
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let subject = args
            .get("subject")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::MissingArgument {
                tool: self.name().to_string(),
                param: "subject".to_string(),
            })?;

        log::info!("{}: generating for subject '{}'", self.name(), subject);
        let response = self.llm.complete(self.request(subject)).await?;

        Ok(response.content.trim().to_string())
    }
}
