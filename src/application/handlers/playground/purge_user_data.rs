//! PurgeUserDataHandler - removes everything the playground holds for a user.
//!
//! Users live in the identity provider, so this is what deleting a user means
//! here: their state rows go, tools they owned become system-owned.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::playground::PlaygroundError;
use crate::ports::{ToolRepository, UserToolStateRepository};

#[derive(Debug, Clone)]
pub struct PurgeUserDataCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeUserDataResult {
    pub states_deleted: u64,
    pub tools_released: u64,
}

pub struct PurgeUserDataHandler {
    tools: Arc<dyn ToolRepository>,
    states: Arc<dyn UserToolStateRepository>,
}

impl PurgeUserDataHandler {
    pub fn new(tools: Arc<dyn ToolRepository>, states: Arc<dyn UserToolStateRepository>) -> Self {
        Self { tools, states }
    }

    pub async fn handle(&self, cmd: PurgeUserDataCommand) -> Result<PurgeUserDataResult, PlaygroundError> {
        let states_deleted = self.states.delete_for_user(&cmd.user_id).await?;
        let tools_released = self.tools.clear_owner(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, states_deleted, tools_released, "User data purged");

        Ok(PurgeUserDataResult {
            states_deleted,
            tools_released,
        })
    }
}
