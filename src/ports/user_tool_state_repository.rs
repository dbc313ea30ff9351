//! User tool state repository port.
//!
//! At most one state exists per (user, tool). `create` must fail with
//! `UserToolStateExists` when the pair is already present so callers can
//! converge on the existing row instead of inserting a duplicate.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ToolId, UserId};
use crate::domain::playground::UserToolState;

#[async_trait]
pub trait UserToolStateRepository: Send + Sync {
    async fn find(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<Option<UserToolState>, DomainError>;

    /// Insert a new state.
    ///
    /// # Errors
    ///
    /// - `UserToolStateExists` if the (user, tool) pair already has a state
    /// - `ToolNotFound` if the tool doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn create(&self, state: &UserToolState) -> Result<(), DomainError>;

    /// Replace the saved data of an existing state.
    ///
    /// # Errors
    ///
    /// - `UserToolStateNotFound` if the state doesn't exist
    async fn update(&self, state: &UserToolState) -> Result<(), DomainError>;

    /// Delete every state owned by a user. Returns the count.
    async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Number of users holding state for a tool.
    async fn count_for_tool(&self, tool_id: &ToolId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_tool_state_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserToolStateRepository) {}
    }
}
