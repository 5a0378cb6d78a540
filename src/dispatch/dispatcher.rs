//! Dispatcher - asks the model to pick a tool, then runs it

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::envelope::{Envelope, ToolCall};
use super::extract::extract_json;
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::tools::{ParamType, ToolArgs, ToolRegistry, validate_args};

/// Settings for the tool-selection call
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    /// `None` uses the client's default model
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Attach the raw model output to tool execution failures too
    pub raw_output_on_tool_error: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.0,
            max_tokens: 150,
            raw_output_on_tool_error: false,
        }
    }
}

/// Turns free-text input into a single tool invocation
pub struct Dispatcher {
    llm: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(llm: Arc<dyn LlmClient>, registry: ToolRegistry, config: DispatchConfig) -> Self {
        Self { llm, registry, config }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch one request.
    ///
    /// Every recovered outcome is an `Ok` envelope. A transport or API fault
    /// on the selection call is returned as `Err`.
    pub async fn invoke(&self, user_input: &str) -> Result<Envelope, LlmError> {
        let prompt = build_selection_prompt(&self.registry, user_input);
        log::debug!(
            "selection prompt: {} chars, {} tools",
            prompt.len(),
            self.registry.len()
        );

        let mut request = CompletionRequest::user(prompt)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);
        if let Some(model) = &self.config.model {
            request = request.with_model(model.clone());
        }

        let response = self.llm.complete(request).await?;
        Ok(self.dispatch(response.content.trim()).await)
    }

    /// Resolve and run the tool call described by raw model output
    pub async fn dispatch(&self, raw_output: &str) -> Envelope {
        let Some(parsed) = extract_json(raw_output) else {
            log::warn!("model output not JSON: {:?}", raw_output);
            return Envelope::not_json(raw_output);
        };

        let (name, args) = split_call(&parsed);

        let Some(tool) = name.as_deref().and_then(|n| self.registry.get(n)) else {
            let shown = display_name(&parsed);
            log::warn!("model selected unknown tool {}", shown);
            return Envelope::unknown_tool(&shown, raw_output);
        };

        let tool_error_raw = self.config.raw_output_on_tool_error.then(|| raw_output.to_string());

        if let Err(e) = validate_args(tool.as_ref(), &args) {
            log::warn!("rejected arguments for {}: {}", tool.name(), e);
            return Envelope::tool_error(e, tool_error_raw);
        }

        log::info!("invoking {} with {}", tool.name(), Value::Object(args.clone()));
        match tool.execute(&args).await {
            Ok(result) => Envelope::success(
                result,
                ToolCall {
                    name: tool.name().to_string(),
                    args,
                },
            ),
            Err(e) => {
                log::warn!("{} failed: {}", tool.name(), e);
                Envelope::tool_error(e, tool_error_raw)
            }
        }
    }
}

/// Pull `name` and `args` out of a parsed call; malformed `args` become empty
fn split_call(parsed: &Value) -> (Option<String>, ToolArgs) {
    let name = parsed.get("name").and_then(|n| n.as_str()).map(str::to_string);
    let args = match parsed.get("args") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    (name, args)
}

/// How an unresolved `name` is reported: the string itself, "None" when
/// absent or null, else its JSON text
fn display_name(parsed: &Value) -> String {
    match parsed.get("name") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => "None".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Build the instruction asking the model to choose a tool.
///
/// `user_input` is embedded verbatim.
pub fn build_selection_prompt(registry: &ToolRegistry, user_input: &str) -> String {
    let names = registry
        .tool_names()
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ");

    let listing = registry
        .tools()
        .map(|tool| {
            let params = tool
                .params()
                .iter()
                .map(|p| format!("{}: {}", p.name, p.kind))
                .collect::<Vec<_>>()
                .join(", ");
            format!("- {}({}): {}", tool.name(), params, tool.description())
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a function-calling assistant.\n\
         Based on user input, choose one of these functions: [{names}]\n\
         Return a JSON object with 'name' and 'args' fields.\n\
         \n\
         Functions:\n\
         {listing}\n\
         \n\
         User input: {user_input}\n\
         \n\
         Example JSON:\n\
         {example}\n",
        example = example_call(registry)
    )
}

/// Example call built from the first registered tool
fn example_call(registry: &ToolRegistry) -> String {
    let Some(tool) = registry.tools().next() else {
        return json!({"name": "write_article", "args": {"subject": "AI"}}).to_string();
    };

    let args: Map<String, Value> = tool
        .params()
        .iter()
        .filter(|p| p.required)
        .map(|p| {
            let sample = match p.kind {
                ParamType::String => json!("AI"),
                ParamType::Integer => json!(1),
                ParamType::Number => json!(1.0),
                ParamType::Boolean => json!(true),
            };
            (p.name.to_string(), sample)
        })
        .collect();

    json!({"name": tool.name(), "args": args}).to_string()
}
