// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry.
//!
//! The [`Tool`] trait is what the agent framework sees: a name, a
//! description, a JSON Schema for the input and an async `invoke`. The
//! [`ToolRegistry`] indexes tools by name and renders tool definitions for
//! the model.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skillforge_core::SkillforgeError;

/// Output from a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Text handed back to the agent.
    pub content: String,
    /// Whether the content describes a failure the agent should react to.
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// A callable unit the agent can select.
///
/// Failures come back as `Ok` with `is_error = true` so the agent can read
/// them and retry. That covers input of the wrong shape as well as errors
/// from the data source or model. `Err` is left for the runtime itself,
/// such as a panicked blocking task.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used for lookup and serialization.
    fn name(&self) -> &str;

    /// Tells the agent when and how to use the tool.
    fn description(&self) -> &str;

    /// JSON Schema of the input object.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Invokes the tool with the model-provided input.
    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SkillforgeError>;
}

/// Schema for a tool taking one required string field.
pub(crate) fn single_string_schema(field: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            field: { "type": "string", "description": description }
        },
        "required": [field]
    })
}

/// Pulls the text input out of either `{"<field>": "..."}` or a bare string.
///
/// Agent frameworks that treat tools as `string -> string` send the bare
/// form. Any other shape yields the error output to hand back to the agent.
pub(crate) fn text_input(input: &serde_json::Value, field: &str) -> Result<String, ToolOutput> {
    match input {
        serde_json::Value::String(s) => Ok(s.clone()),
        other => other[field].as_str().map(str::to_string).ok_or_else(|| {
            ToolOutput::error(format!("Error: missing required '{field}' parameter"))
        }),
    }
}

/// Runs a blocking collaborator call off the async runtime.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, SkillforgeError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| SkillforgeError::Internal(format!("blocking task failed: {e}")))
}

/// Registry of available tools, indexed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool under its `name()`, returning the tool it replaced.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Option<Arc<dyn Tool>> {
        self.tools.insert(tool.name().to_string(), tool)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// (name, description) pairs, sorted by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Tool definitions sorted by name, each shaped as
    /// `{"name", "description", "input_schema"}`.
    pub fn tool_definitions(&self) -> Vec<serde_json::Value> {
        let mut tools: Vec<&Arc<dyn Tool>> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "input_schema": t.parameters_schema(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn parameters_schema(&self) -> serde_json::Value {
            single_string_schema("message", "Message to echo")
        }

        async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SkillforgeError> {
            Ok(match text_input(&input, "message") {
                Ok(message) => ToolOutput::text(message),
                Err(output) => output,
            })
        }
    }

    fn echo(name: &'static str, description: &'static str) -> Arc<dyn Tool> {
        Arc::new(EchoTool { name, description })
    }

    #[test]
    fn registry_registers_and_retrieves_tools() {
        let mut registry = ToolRegistry::new();
        assert!(registry.register(echo("echo", "Echoes")).is_none());
        assert_eq!(registry.get("echo").unwrap().name(), "echo");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn registry_replaces_duplicate_names() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("echo", "first"));
        let replaced = registry.register(echo("echo", "second"));
        assert_eq!(replaced.unwrap().description(), "first");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("echo").unwrap().description(), "second");
    }

    #[test]
    fn registry_list_and_definitions_are_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("zeta", "last"));
        registry.register(echo("alpha", "first"));

        assert_eq!(registry.list(), vec![("alpha", "first"), ("zeta", "last")]);

        let defs = registry.tool_definitions();
        assert_eq!(defs[0]["name"], "alpha");
        assert_eq!(defs[1]["name"], "zeta");
        assert_eq!(defs[0]["input_schema"]["required"][0], "message");
    }

    #[test]
    fn registry_len_and_is_empty() {
        let mut registry = ToolRegistry::default();
        assert!(registry.is_empty());
        registry.register(echo("echo", "Echoes"));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn text_input_accepts_object_and_bare_string() {
        let obj = serde_json::json!({"query": "SELECT 1"});
        assert_eq!(text_input(&obj, "query").unwrap(), "SELECT 1");

        let bare = serde_json::json!("SELECT 2");
        assert_eq!(text_input(&bare, "query").unwrap(), "SELECT 2");

        let missing = serde_json::json!({"sql": "SELECT 3"});
        let output = text_input(&missing, "query").unwrap_err();
        assert!(output.is_error);
        assert_eq!(output.content, "Error: missing required 'query' parameter");

        let number = serde_json::json!(42);
        assert!(text_input(&number, "query").unwrap_err().is_error);
    }

    #[tokio::test]
    async fn echo_tool_invokes() {
        let tool = echo("echo", "Echoes");
        let output = tool
            .invoke(serde_json::json!({"message": "hello world"}))
            .await
            .unwrap();
        assert_eq!(output, ToolOutput::text("hello world"));
    }
}
