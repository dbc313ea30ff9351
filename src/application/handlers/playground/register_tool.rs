//! RegisterToolHandler - Command handler for adding a tool to the registry.

use std::sync::Arc;

use crate::domain::playground::{NewTool, PlaygroundError, Tool};
use crate::ports::ToolRepository;

#[derive(Debug, Clone)]
pub struct RegisterToolCommand {
    pub tool: NewTool,
}

pub struct RegisterToolHandler {
    tools: Arc<dyn ToolRepository>,
}

impl RegisterToolHandler {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self { tools }
    }

    /// # Errors
    ///
    /// - `ValidationFailed` for a blank name or underivable identifiers
    /// - `Conflict` if the slug or component name is already registered
    pub async fn handle(&self, cmd: RegisterToolCommand) -> Result<Tool, PlaygroundError> {
        let tool = Tool::create(cmd.tool)?;

        if self.tools.find_by_slug(tool.slug().as_str()).await?.is_some() {
            return Err(PlaygroundError::conflict(format!(
                "Tool with slug '{}' already exists",
                tool.slug()
            )));
        }

        self.tools.save(&tool).await?;
        tracing::info!(slug = %tool.slug(), component = %tool.component_name(), "Tool registered");
        Ok(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn registers_with_derived_identifiers() {
        let store = store_with(&[]).await;
        let handler = RegisterToolHandler::new(store.clone());

        let tool = handler
            .handle(RegisterToolCommand {
                tool: NewTool {
                    description: Some("Convert units".to_string()),
                    icon: Some("Ruler".to_string()),
                    ..NewTool::named("Unit Converter")
                },
            })
            .await
            .unwrap();

        assert_eq!(tool.slug().as_str(), "unit-converter");
        assert_eq!(tool.component_name().as_str(), "UnitConverter");
        assert_eq!(tool.icon(), "Ruler");
        assert_eq!(store.tool_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_slug_is_conflict() {
        let store = store_with(&[tool("Unit Converter")]).await;
        let handler = RegisterToolHandler::new(store.clone());

        let err = handler
            .handle(RegisterToolCommand {
                tool: NewTool::named("unit converter"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PlaygroundError::Conflict(_)));
        assert_eq!(store.tool_count().await, 1);
    }

    #[tokio::test]
    async fn blank_name_is_validation_error() {
        let handler = RegisterToolHandler::new(store_with(&[]).await);
        let err = handler
            .handle(RegisterToolCommand {
                tool: NewTool::named("   "),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PlaygroundError::ValidationFailed { ref field, .. } if field == "name"));
    }
}
