//! ListToolsHandler - administrative listing with executor coverage.

use std::sync::Arc;

use crate::domain::execution::ExecutorRegistry;
use crate::domain::playground::{PlaygroundError, Tool};
use crate::ports::{ToolFilter, ToolRepository};

#[derive(Debug, Clone, Default)]
pub struct ListToolsQuery {
    pub filter: ToolFilter,
}

/// A registered tool and whether an executor serves its slug.
#[derive(Debug, Clone)]
pub struct ToolListing {
    pub tool: Tool,
    pub has_executor: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ToolInventory {
    pub tools: Vec<ToolListing>,
}

impl ToolInventory {
    pub fn total(&self) -> usize {
        self.tools.len()
    }

    pub fn active(&self) -> usize {
        self.tools.iter().filter(|l| l.tool.is_active()).count()
    }

    pub fn inactive(&self) -> usize {
        self.total() - self.active()
    }

    /// Active tools that would answer `Tool not implemented`.
    pub fn unregistered(&self) -> impl Iterator<Item = &Tool> {
        self.tools
            .iter()
            .filter(|l| l.tool.is_active() && !l.has_executor)
            .map(|l| &l.tool)
    }
}

pub struct ListToolsHandler {
    tools: Arc<dyn ToolRepository>,
    executors: Arc<ExecutorRegistry>,
}

impl ListToolsHandler {
    pub fn new(tools: Arc<dyn ToolRepository>, executors: Arc<ExecutorRegistry>) -> Self {
        Self { tools, executors }
    }

    pub async fn handle(&self, query: ListToolsQuery) -> Result<ToolInventory, PlaygroundError> {
        let tools = self
            .tools
            .list(&query.filter)
            .await?
            .into_iter()
            .map(|tool| ToolListing {
                has_executor: self.executors.has_executor(tool.slug().as_str()),
                tool,
            })
            .collect();

        Ok(ToolInventory { tools })
    }
}
