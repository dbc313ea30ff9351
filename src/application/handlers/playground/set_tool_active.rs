//! SetToolActiveHandler - enables or disables a tool without touching anything else.

use std::sync::Arc;

use crate::domain::playground::{PlaygroundError, Tool, ToolLocator};
use crate::ports::ToolRepository;

#[derive(Debug, Clone)]
pub struct SetToolActiveCommand {
    pub locator: ToolLocator,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct SetToolActiveResult {
    pub tool: Tool,
    /// False when the tool already had the requested flag.
    pub changed: bool,
}

pub struct SetToolActiveHandler {
    tools: Arc<dyn ToolRepository>,
}

impl SetToolActiveHandler {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self { tools }
    }

    pub async fn handle(
        &self,
        cmd: SetToolActiveCommand,
    ) -> Result<SetToolActiveResult, PlaygroundError> {
        let current = self
            .tools
            .find(&cmd.locator)
            .await?
            .ok_or_else(|| PlaygroundError::not_found(&cmd.locator))?;

        if current.is_active() == cmd.active {
            return Ok(SetToolActiveResult {
                tool: current,
                changed: false,
            });
        }

        let tool = self.tools.set_active(current.id(), cmd.active).await?;
        tracing::info!(slug = %tool.slug(), active = cmd.active, "Tool active flag changed");

        Ok(SetToolActiveResult {
            tool,
            changed: true,
        })
    }
}
