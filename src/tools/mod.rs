//! Tool system - tools the model may pick, their argument schemas and the registry
//!
//! A tool takes a JSON object of named arguments and returns generated text.

mod content;
mod registry;
mod schema;

pub use content::{ContentKind, ContentTool, GenerationParams};
pub use registry::{Registration, ToolRegistry};
pub use schema::{ParamSpec, ParamType, validate_args};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::llm::LlmError;

/// Named arguments supplied by the model
pub type ToolArgs = Map<String, Value>;

/// A tool that can be selected by the model
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the `name` field the model returns)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Declared parameters
    fn params(&self) -> &[ParamSpec];

    /// Execute the tool
    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError>;

    /// Name, description and JSON Schema of the arguments
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: schema::json_schema(self.params()),
        }
    }
}

/// Errors raised by argument validation or inside a tool body
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{tool}() missing required argument '{param}'")]
    MissingArgument { tool: String, param: String },

    #[error("{tool}() argument '{param}' must be {expected}, got {actual}")]
    InvalidArgument {
        tool: String,
        param: String,
        expected: ParamType,
        actual: String,
    },

    #[error("{tool}() got an unexpected argument '{param}'")]
    UnexpectedArgument { tool: String, param: String },

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Machine-readable description of a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
