//! GetToolForDisplayHandler - Query handler for a tool page.
//!
//! Resolves the tool through the access gate, then get-or-creates the
//! caller's state so the page always has saved data to mount.

use serde_json::Value;

use crate::domain::foundation::UserId;
use crate::domain::playground::{PlaygroundError, Tool, ToolLocator};

use super::{ActiveToolResolver, UserStateService};

#[derive(Debug, Clone)]
pub struct GetToolForDisplayQuery {
    pub locator: ToolLocator,
    pub user_id: UserId,
}

/// A tool together with the caller's saved data.
#[derive(Debug, Clone)]
pub struct ToolDisplay {
    pub tool: Tool,
    pub saved_data: Value,
}

pub struct GetToolForDisplayHandler {
    resolver: ActiveToolResolver,
    states: UserStateService,
}

impl GetToolForDisplayHandler {
    pub fn new(resolver: ActiveToolResolver, states: UserStateService) -> Self {
        Self { resolver, states }
    }

    pub async fn handle(&self, query: GetToolForDisplayQuery) -> Result<ToolDisplay, PlaygroundError> {
        let tool = self.resolver.resolve(&query.locator).await?;
        let state = self.states.get_or_create(&query.user_id, tool.id()).await?;

        Ok(ToolDisplay {
            tool,
            saved_data: state.into_saved_data(),
        })
    }
}
