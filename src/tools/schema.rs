//! Per-tool argument schema and validation

use std::fmt;

use serde_json::{Value, json};

use super::{Tool, ToolArgs, ToolError};

/// JSON type a parameter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check `args` against the tool's declared parameters.
///
/// Parameters are checked in declaration order, then unknown keys in key order.
pub fn validate_args(tool: &dyn Tool, args: &ToolArgs) -> Result<(), ToolError> {
    let params = tool.params();

    for spec in params {
        match args.get(spec.name) {
            None if spec.required => {
                return Err(ToolError::MissingArgument {
                    tool: tool.name().to_string(),
                    param: spec.name.to_string(),
                });
            }
            None => {}
            Some(value) if !spec.kind.accepts(value) => {
                return Err(ToolError::InvalidArgument {
                    tool: tool.name().to_string(),
                    param: spec.name.to_string(),
                    expected: spec.kind,
                    actual: json_type_name(value).to_string(),
                });
            }
            Some(_) => {}
        }
    }

    if let Some(extra) = args.keys().find(|key| !params.iter().any(|p| p.name == key.as_str())) {
        return Err(ToolError::UnexpectedArgument {
            tool: tool.name().to_string(),
            param: extra.clone(),
        });
    }

    Ok(())
}

/// Render parameters as a JSON Schema object
pub(crate) fn json_schema(params: &[ParamSpec]) -> Value {
    let mut properties = serde_json::Map::new();
    for spec in params {
        properties.insert(
            spec.name.to_string(),
            json!({ "type": spec.kind.as_str(), "description": spec.description }),
        );
    }
    let required: Vec<&str> = params.iter().filter(|p| p.required).map(|p| p.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Sketch;

    const SKETCH_PARAMS: &[ParamSpec] = &[
        ParamSpec::required("subject", ParamType::String, "What to write about"),
        ParamSpec::optional("words", ParamType::Integer, "Rough length"),
    ];

    #[async_trait]
    impl Tool for Sketch {
        fn name(&self) -> &str {
            "write_sketch"
        }

        fn description(&self) -> &str {
            "Test tool"
        }

        fn params(&self) -> &[ParamSpec] {
            SKETCH_PARAMS
        }

        async fn execute(&self, _args: &ToolArgs) -> Result<String, ToolError> {
            Ok(String::new())
        }
    }

    fn args(value: Value) -> ToolArgs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_args() {
        assert!(validate_args(&Sketch, &args(json!({"subject": "cats"}))).is_ok());
        assert!(validate_args(&Sketch, &args(json!({"subject": "cats", "words": 40}))).is_ok());
    }

    #[test]
    fn test_missing_required() {
        let err = validate_args(&Sketch, &ToolArgs::new()).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument { ref param, .. } if param == "subject"));
    }

    #[test]
    fn test_wrong_type() {
        let err = validate_args(&Sketch, &args(json!({"subject": 42}))).unwrap_err();
        match err {
            ToolError::InvalidArgument { expected, actual, .. } => {
                assert_eq!(expected, ParamType::String);
                assert_eq!(actual, "number");
            }
            other => panic!("unexpected error: {}", other),
        }

        let err = validate_args(&Sketch, &args(json!({"subject": "x", "words": 1.5}))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn test_unexpected_argument() {
        let err = validate_args(&Sketch, &args(json!({"subject": "cats", "tone": "dry"}))).unwrap_err();
        assert!(matches!(err, ToolError::UnexpectedArgument { ref param, .. } if param == "tone"));
    }

    #[test]
    fn test_param_type_accepts() {
        assert!(ParamType::Number.accepts(&json!(1)));
        assert!(ParamType::Number.accepts(&json!(1.5)));
        assert!(!ParamType::Integer.accepts(&json!(1.5)));
        assert!(ParamType::Boolean.accepts(&json!(true)));
        assert!(!ParamType::String.accepts(&Value::Null));
    }

    #[test]
    fn test_json_schema() {
        let schema = json_schema(SKETCH_PARAMS);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["subject"]["type"], "string");
        assert_eq!(schema["properties"]["words"]["type"], "integer");
        assert_eq!(schema["required"], json!(["subject"]));
    }
}
