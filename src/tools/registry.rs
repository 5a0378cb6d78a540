//! Tool registry - name to tool lookup, built once at startup

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ContentKind, ContentTool, GenerationParams, Tool, ToolDefinition};
use crate::llm::LlmClient;

/// A candidate offered to [`ToolRegistry::bind`]; only marked candidates are kept
pub struct Registration {
    tool: Arc<dyn Tool>,
    marked: bool,
}

impl Registration {
    /// Mark a tool as eligible for registration
    pub fn tool(tool: Arc<dyn Tool>) -> Self {
        Self { tool, marked: true }
    }

    /// A candidate that `bind` skips
    pub fn unmarked(tool: Arc<dyn Tool>) -> Self {
        Self { tool, marked: false }
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn name(&self) -> &str {
        self.tool.name()
    }
}

/// Read-only mapping from tool name to tool.
///
/// Names iterate in sorted order so prompts are stable.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the marked candidates; a later duplicate name replaces an earlier one
    pub fn bind(candidates: impl IntoIterator<Item = Registration>) -> Self {
        let mut registry = Self::new();
        for candidate in candidates.into_iter().filter(Registration::is_marked) {
            registry.add_tool(candidate.tool);
        }
        registry
    }

    /// The three content writers sharing one completion client
    pub fn content_tools(llm: Arc<dyn LlmClient>, params: GenerationParams) -> Self {
        Self::bind(Self::content_candidates(llm, params, &[]))
    }

    /// Content writer candidates, leaving the named ones unmarked
    pub fn content_candidates(
        llm: Arc<dyn LlmClient>,
        params: GenerationParams,
        disabled: &[String],
    ) -> Vec<Registration> {
        ContentKind::ALL
            .iter()
            .map(|kind| {
                let tool: Arc<dyn Tool> = Arc::new(ContentTool::new(*kind, llm.clone(), params.clone()));
                if disabled.iter().any(|d| d == kind.tool_name()) {
                    Registration::unmarked(tool)
                } else {
                    Registration::tool(tool)
                }
            })
            .collect()
    }

    /// Add a tool, replacing any tool with the same name
    pub fn add_tool(&mut self, tool: Arc<dyn Tool>) {
        if let Some(previous) = self.tools.insert(tool.name().to_string(), tool) {
            log::debug!("tool '{}' re-registered, replacing earlier entry", previous.name());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    pub fn tools(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry").field("tools", &self.tool_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use crate::tools::{ParamSpec, ToolArgs, ToolError};
    use async_trait::async_trait;

    struct Fixed {
        name: &'static str,
        output: &'static str,
    }

    #[async_trait]
    impl Tool for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "fixed output"
        }

        fn params(&self) -> &[ParamSpec] {
            &[]
        }

        async fn execute(&self, _args: &ToolArgs) -> Result<String, ToolError> {
            Ok(self.output.to_string())
        }
    }

    fn fixed(name: &'static str, output: &'static str) -> Arc<dyn Tool> {
        Arc::new(Fixed { name, output })
    }

    #[test]
    fn test_bind_keeps_only_marked() {
        let registry = ToolRegistry::bind(vec![
            Registration::tool(fixed("a", "1")),
            Registration::unmarked(fixed("b", "2")),
            Registration::tool(fixed("c", "3")),
        ]);

        assert_eq!(registry.tool_names(), vec!["a", "c"]);
        assert!(!registry.has_tool("b"));
    }

    #[tokio::test]
    async fn test_bind_last_registration_wins() {
        let registry = ToolRegistry::bind(vec![
            Registration::tool(fixed("dup", "first")),
            Registration::tool(fixed("dup", "second")),
        ]);

        assert_eq!(registry.len(), 1);
        let tool = registry.get("dup").unwrap();
        assert_eq!(tool.execute(&ToolArgs::new()).await.unwrap(), "second");
    }

    #[test]
    fn test_bind_empty() {
        let registry = ToolRegistry::bind(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.tool_names().is_empty());
        assert!(registry.definitions().is_empty());
    }

    #[test]
    fn test_content_tools() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient::new(vec![]));
        let registry = ToolRegistry::content_tools(llm, GenerationParams::default());

        assert_eq!(registry.tool_names(), vec!["write_article", "write_comic", "write_tweet"]);
        let defs = registry.definitions();
        assert!(defs.iter().all(|d| d.input_schema["required"][0] == "subject"));
    }

    #[test]
    fn test_content_candidates_respect_disabled() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient::new(vec![]));
        let candidates =
            ToolRegistry::content_candidates(llm, GenerationParams::default(), &["write_comic".to_string()]);

        assert_eq!(candidates.len(), 3);
        let registry = ToolRegistry::bind(candidates);
        assert_eq!(registry.tool_names(), vec!["write_article", "write_tweet"]);
    }

    #[test]
    fn test_add_custom_tool() {
        let mut registry = ToolRegistry::new();
        registry.add_tool(fixed("echo", "hi"));
        assert!(registry.has_tool("echo"));
        assert!(format!("{:?}", registry).contains("echo"));
    }
}
