//! UpdateToolHandler - Command handler for saving tool data.
//!
//! `saved_data` and `configuration` are independent: an absent field is
//! left unchanged. Both are validated before either is written.
//! Configuration is tool-level, so a write here changes it for every user.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::playground::{ensure_document, PlaygroundError, Tool, ToolLocator};
use crate::ports::ToolRepository;

use super::{ActiveToolResolver, UserStateService};

#[derive(Debug, Clone)]
pub struct UpdateToolCommand {
    pub locator: ToolLocator,
    pub user_id: UserId,
    pub saved_data: Option<Value>,
    pub configuration: Option<Value>,
}

/// State of the tool as seen by the caller after the update.
#[derive(Debug, Clone)]
pub struct UpdateToolResult {
    pub tool: Tool,
    pub saved_data: Value,
}

pub struct UpdateToolHandler {
    resolver: ActiveToolResolver,
    states: UserStateService,
    tools: Arc<dyn ToolRepository>,
}

impl UpdateToolHandler {
    pub fn new(
        resolver: ActiveToolResolver,
        states: UserStateService,
        tools: Arc<dyn ToolRepository>,
    ) -> Self {
        Self {
            resolver,
            states,
            tools,
        }
    }

    pub async fn handle(&self, cmd: UpdateToolCommand) -> Result<UpdateToolResult, PlaygroundError> {
        // 1. Gate
        let tool = self.resolver.resolve(&cmd.locator).await?;

        // 2. Validate the whole payload before any write
        if let Some(saved_data) = &cmd.saved_data {
            ensure_document("saved_data", saved_data)?;
        }
        if let Some(configuration) = &cmd.configuration {
            ensure_document("configuration", configuration)?;
        }

        // 3. Per-user saved data
        let saved_data = match cmd.saved_data {
            Some(saved_data) => {
                let mut state = self.states.get_or_create(&cmd.user_id, tool.id()).await?;
                state.replace_saved_data(saved_data)?;
                self.states.save(&state).await?;
                state.into_saved_data()
            }
            None => self
                .states
                .peek(&cmd.user_id, tool.id())
                .await?
                .map(|state| state.into_saved_data())
                .unwrap_or_else(|| json!([])),
        };

        // 4. Tool-level configuration. Only the configuration column is
        // written, and only while the tool is still active.
        let tool = match cmd.configuration {
            Some(configuration) => {
                let tool = self
                    .tools
                    .replace_configuration(tool.id(), &configuration)
                    .await
                    .map_err(|e| match e.code {
                        ErrorCode::ToolNotFound => PlaygroundError::not_found(&cmd.locator),
                        _ => PlaygroundError::from(e),
                    })?;
                tracing::info!(slug = %tool.slug(), user_id = %cmd.user_id, "Tool configuration replaced");
                tool
            }
            None => tool,
        };

        Ok(UpdateToolResult { tool, saved_data })
    }
}
