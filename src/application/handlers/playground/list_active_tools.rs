//! ListActiveToolsHandler - Query handler for the playground index.

use std::sync::Arc;

use crate::domain::playground::{PlaygroundError, Tool};
use crate::ports::{ToolFilter, ToolRepository};

/// Query for every active tool, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct ListActiveToolsQuery;

pub struct ListActiveToolsHandler {
    tools: Arc<dyn ToolRepository>,
}

impl ListActiveToolsHandler {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self { tools }
    }

    pub async fn handle(&self, _query: ListActiveToolsQuery) -> Result<Vec<Tool>, PlaygroundError> {
        Ok(self.tools.list(&ToolFilter::active()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn returns_only_active_tools_sorted_by_name() {
        let store = store_with(&[
            tool("Word Counter"),
            inactive_tool("Archived"),
            tool("Calculator"),
            tool("JSON Formatter"),
        ])
        .await;
        let handler = ListActiveToolsHandler::new(store);

        let names: Vec<String> = handler
            .handle(ListActiveToolsQuery)
            .await
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();

        assert_eq!(names, vec!["Calculator", "JSON Formatter", "Word Counter"]);
    }

    #[tokio::test]
    async fn empty_registry_lists_nothing() {
        let handler = ListActiveToolsHandler::new(store_with(&[]).await);
        assert!(handler.handle(ListActiveToolsQuery).await.unwrap().is_empty());
    }
}
