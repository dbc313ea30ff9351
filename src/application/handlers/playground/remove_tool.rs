//! RemoveToolHandler - deletes a tool and, by cascade, every user's state for it.
//!
//! Without `force` nothing is deleted; the result reports what would go.

use std::sync::Arc;

use crate::domain::playground::{PlaygroundError, Tool, ToolLocator};
use crate::ports::{ToolRepository, UserToolStateRepository};

#[derive(Debug, Clone)]
pub struct RemoveToolCommand {
    pub locator: ToolLocator,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct RemoveToolResult {
    pub tool: Tool,
    /// User state rows attached to the tool.
    pub state_rows: u64,
    pub removed: bool,
}

pub struct RemoveToolHandler {
    tools: Arc<dyn ToolRepository>,
    states: Arc<dyn UserToolStateRepository>,
}

impl RemoveToolHandler {
    pub fn new(tools: Arc<dyn ToolRepository>, states: Arc<dyn UserToolStateRepository>) -> Self {
        Self { tools, states }
    }

    pub async fn handle(&self, cmd: RemoveToolCommand) -> Result<RemoveToolResult, PlaygroundError> {
        // Inactive tools can be removed too.
        let tool = self
            .tools
            .find(&cmd.locator)
            .await?
            .ok_or_else(|| PlaygroundError::not_found(&cmd.locator))?;

        let state_rows = self.states.count_for_tool(tool.id()).await?;

        if cmd.force {
            self.tools.delete(tool.id()).await?;
            tracing::info!(slug = %tool.slug(), state_rows, "Tool removed");
        }

        Ok(RemoveToolResult {
            tool,
            state_rows,
            removed: cmd.force,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::playground::UserToolState;

    async fn store_with_state() -> (Arc<crate::adapters::memory::InMemoryPlaygroundStore>, Tool) {
        let t = tool("Todo List");
        let store = store_with(&[t.clone()]).await;
        for u in ["u1", "u2"] {
            UserToolStateRepository::create(store.as_ref(), &UserToolState::empty(user(u), *t.id()))
                .await
                .unwrap();
        }
        (store, t)
    }

    #[tokio::test]
    async fn dry_run_reports_without_deleting() {
        let (store, _) = store_with_state().await;
        let handler = RemoveToolHandler::new(store.clone(), store.clone());

        let result = handler
            .handle(RemoveToolCommand {
                locator: ToolLocator::parse("todo-list"),
                force: false,
            })
            .await
            .unwrap();

        assert!(!result.removed);
        assert_eq!(result.state_rows, 2);
        assert_eq!(store.tool_count().await, 1);
        assert_eq!(store.state_count().await, 2);
    }

    #[tokio::test]
    async fn forced_removal_cascades() {
        let (store, _) = store_with_state().await;
        let handler = RemoveToolHandler::new(store.clone(), store.clone());

        let result = handler
            .handle(RemoveToolCommand {
                locator: ToolLocator::parse("todo-list"),
                force: true,
            })
            .await
            .unwrap();

        assert!(result.removed);
        assert_eq!(store.tool_count().await, 0);
        assert_eq!(store.state_count().await, 0);
    }

    #[tokio::test]
    async fn missing_tool_is_not_found() {
        let store = store_with(&[]).await;
        let handler = RemoveToolHandler::new(store.clone(), store);
        let err = handler
            .handle(RemoveToolCommand {
                locator: ToolLocator::parse("nope"),
                force: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PlaygroundError::NotFound(_)));
    }
}
