//! Dispatch outcome returned to callers

use serde::{Deserialize, Serialize};

use crate::tools::ToolArgs;

/// Error text when no JSON could be parsed from the model output
pub const NOT_JSON_ERROR: &str = "Model output not JSON";

/// One resolved invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub args: ToolArgs,
}

/// Success or failure of one dispatch.
///
/// Serializes as `{"result", "tool_call"}` or `{"error", "raw_output"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success {
        result: String,
        tool_call: ToolCall,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw_output: Option<String>,
    },
}

impl Envelope {
    pub fn success(result: impl Into<String>, tool_call: ToolCall) -> Self {
        Envelope::Success {
            result: result.into(),
            tool_call,
        }
    }

    pub fn failure(error: impl Into<String>, raw_output: Option<String>) -> Self {
        Envelope::Failure {
            error: error.into(),
            raw_output,
        }
    }

    pub fn not_json(raw_output: &str) -> Self {
        Self::failure(NOT_JSON_ERROR, Some(raw_output.to_string()))
    }

    pub fn unknown_tool(name: &str, raw_output: &str) -> Self {
        Self::failure(format!("Unknown tool {}", name), Some(raw_output.to_string()))
    }

    pub fn tool_error(fault: impl std::fmt::Display, raw_output: Option<String>) -> Self {
        Self::failure(format!("Tool execution error: {}", fault), raw_output)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            Envelope::Success { result, .. } => Some(result),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn tool_call(&self) -> Option<&ToolCall> {
        match self {
            Envelope::Success { tool_call, .. } => Some(tool_call),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Failure { error, .. } => Some(error),
            Envelope::Success { .. } => None,
        }
    }

    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Envelope::Failure { raw_output, .. } => raw_output.as_deref(),
            Envelope::Success { .. } => None,
        }
    }
}
