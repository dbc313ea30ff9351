//! InspectUserStateHandler - typed view of one user's saved data.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::playground::{PlaygroundError, SavedDataView, Tool, ToolLocator, UserToolState};
use crate::ports::{ToolRepository, UserToolStateRepository};

#[derive(Debug, Clone)]
pub struct InspectUserStateQuery {
    pub locator: ToolLocator,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct UserStateInspection {
    pub tool: Tool,
    /// `None` when the user never opened the tool.
    pub state: Option<UserToolState>,
    pub view: SavedDataView,
}

pub struct InspectUserStateHandler {
    tools: Arc<dyn ToolRepository>,
    states: Arc<dyn UserToolStateRepository>,
}

impl InspectUserStateHandler {
    pub fn new(tools: Arc<dyn ToolRepository>, states: Arc<dyn UserToolStateRepository>) -> Self {
        Self { tools, states }
    }

    /// Read-only: never materializes a state row.
    pub async fn handle(&self, query: InspectUserStateQuery) -> Result<UserStateInspection, PlaygroundError> {
        let tool = self
            .tools
            .find(&query.locator)
            .await?
            .ok_or_else(|| PlaygroundError::not_found(&query.locator))?;
        let state = self.states.find(&query.user_id, tool.id()).await?;

        let empty = serde_json::json!([]);
        let saved_data = state.as_ref().map_or(&empty, UserToolState::saved_data);
        let view = SavedDataView::from_document(tool.component_name(), saved_data);

        Ok(UserStateInspection { tool, state, view })
    }
}
