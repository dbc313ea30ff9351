//! Execution dispatcher - closed mapping from tool slug to executor.
//!
//! Every executor has the same signature and is pure: it sees only the
//! request body and the tool's typed settings. Unknown slugs produce the
//! `Tool not implemented` computation error rather than a fault.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::domain::playground::{Tool, ToolSettings};

use super::{
    calculator, color_palette, json_formatter, text_transformer, todo_list, word_counter,
    ComputationError, ExecutionInput, ToolOutcome,
};

/// Uniform executor signature.
pub type Executor = fn(&ExecutionInput<'_>) -> ToolOutcome;

/// Message returned for slugs without an executor.
pub const NOT_IMPLEMENTED: &str = "Tool not implemented";

#[derive(Clone)]
pub struct ExecutorRegistry {
    executors: BTreeMap<&'static str, Executor>,
}

impl fmt::Debug for ExecutorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorRegistry")
            .field("slugs", &self.executors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExecutorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            executors: BTreeMap::new(),
        }
    }

    /// Registry holding every built-in executor.
    pub fn builtin() -> Self {
        Self::new()
            .with("word-counter", word_counter::execute)
            .with("json-formatter", json_formatter::execute)
            .with("color-palette", color_palette::execute)
            .with("calculator", calculator::execute)
            .with("todo-list", todo_list::execute)
            .with("text-transformer", text_transformer::execute)
    }

    pub fn with(mut self, slug: &'static str, executor: Executor) -> Self {
        self.executors.insert(slug, executor);
        self
    }

    pub fn has_executor(&self, slug: &str) -> bool {
        self.executors.contains_key(slug)
    }

    /// Active tools whose slug has no executor.
    pub fn unregistered<'a>(&self, tools: &'a [Tool]) -> Vec<&'a Tool> {
        tools
            .iter()
            .filter(|tool| tool.is_active() && !self.has_executor(tool.slug().as_str()))
            .collect()
    }

    /// Runs the executor for `tool`.
    pub fn execute(&self, tool: &Tool, params: &Value) -> ToolOutcome {
        let settings = ToolSettings::from_document(tool.component_name(), tool.configuration());
        self.execute_slug(tool.slug().as_str(), params, &settings)
    }

    pub fn execute_slug(&self, slug: &str, params: &Value, settings: &ToolSettings) -> ToolOutcome {
        match self.executors.get(slug) {
            Some(executor) => executor(&ExecutionInput::new(params, settings)),
            None => Err(ComputationError::new(NOT_IMPLEMENTED)),
        }
    }
}

/// Collapses an outcome into the response body.
pub fn render(outcome: ToolOutcome) -> Value {
    outcome.unwrap_or_else(ComputationError::into_value)
}
