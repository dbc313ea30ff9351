//! UserStateService - get-or-create for per-user tool state.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, ToolId, UserId};
use crate::domain::playground::{PlaygroundError, UserToolState};
use crate::ports::UserToolStateRepository;

#[derive(Clone)]
pub struct UserStateService {
    states: Arc<dyn UserToolStateRepository>,
}

impl UserStateService {
    pub fn new(states: Arc<dyn UserToolStateRepository>) -> Self {
        Self { states }
    }

    /// Returns the user's state for a tool, materializing an empty one on
    /// first access.
    ///
    /// A concurrent first access that wins the insert surfaces here as
    /// `UserToolStateExists`; the winner's row is then read back.
    pub async fn get_or_create(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<UserToolState, PlaygroundError> {
        if let Some(state) = self.states.find(user_id, tool_id).await? {
            return Ok(state);
        }

        let state = UserToolState::empty(user_id.clone(), *tool_id);
        match self.states.create(&state).await {
            Ok(()) => {
                tracing::debug!(user_id = %user_id, tool_id = %tool_id, "Created user tool state");
                Ok(state)
            }
            Err(e) if e.code == ErrorCode::UserToolStateExists => self
                .states
                .find(user_id, tool_id)
                .await?
                .ok_or_else(|| {
                    PlaygroundError::infrastructure(
                        "User tool state vanished after a concurrent insert",
                    )
                }),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the saved data without materializing a state row.
    pub async fn peek(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<Option<UserToolState>, PlaygroundError> {
        Ok(self.states.find(user_id, tool_id).await?)
    }

    /// Persists a state returned by [`get_or_create`](Self::get_or_create).
    pub async fn save(&self, state: &UserToolState) -> Result<(), PlaygroundError> {
        Ok(self.states.update(state).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::foundation::DomainError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Loses the insert race once: the first find misses, the create
    /// conflicts, and the follow-up find returns the winner's row.
    struct RacingStateRepository {
        winner: UserToolState,
        finds: AtomicUsize,
        creates: Mutex<Vec<UserToolState>>,
    }

    #[async_trait]
    impl UserToolStateRepository for RacingStateRepository {
        async fn find(
            &self,
            _user_id: &UserId,
            _tool_id: &ToolId,
        ) -> Result<Option<UserToolState>, DomainError> {
            if self.finds.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(None)
            } else {
                Ok(Some(self.winner.clone()))
            }
        }

        async fn create(&self, state: &UserToolState) -> Result<(), DomainError> {
            self.creates.lock().unwrap().push(state.clone());
            Err(DomainError::new(ErrorCode::UserToolStateExists, "exists"))
        }

        async fn update(&self, _state: &UserToolState) -> Result<(), DomainError> {
            Ok(())
        }

        async fn delete_for_user(&self, _user_id: &UserId) -> Result<u64, DomainError> {
            Ok(0)
        }

        async fn count_for_tool(&self, _tool_id: &ToolId) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn creates_empty_state_on_first_access() {
        let t = tool("Todo List");
        let store = store_with(&[t.clone()]).await;
        let service = UserStateService::new(store.clone());

        let state = service.get_or_create(&user("u1"), t.id()).await.unwrap();
        assert_eq!(state.saved_data(), &serde_json::json!([]));
        assert_eq!(store.state_count().await, 1);

        let again = service.get_or_create(&user("u1"), t.id()).await.unwrap();
        assert_eq!(again.id(), state.id());
        assert_eq!(store.state_count().await, 1);
    }

    #[tokio::test]
    async fn losing_the_insert_race_returns_the_winner() {
        let tool_id = ToolId::new();
        let winner = UserToolState::empty(user("u1"), tool_id);
        let repo = Arc::new(RacingStateRepository {
            winner: winner.clone(),
            finds: AtomicUsize::new(0),
            creates: Mutex::new(Vec::new()),
        });
        let service = UserStateService::new(repo.clone());

        let state = service.get_or_create(&user("u1"), &tool_id).await.unwrap();
        assert_eq!(state.id(), winner.id());
        assert_eq!(repo.creates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn peek_does_not_create() {
        let t = tool("Calculator");
        let store = store_with(&[t.clone()]).await;
        let service = UserStateService::new(store.clone());

        assert!(service.peek(&user("u1"), t.id()).await.unwrap().is_none());
        assert_eq!(store.state_count().await, 0);
    }

    #[tokio::test]
    async fn storage_failure_is_infrastructure() {
        let service = UserStateService::new(Arc::new(FailingStore));
        let err = service.get_or_create(&user("u1"), &ToolId::new()).await.unwrap_err();
        assert!(matches!(err, PlaygroundError::Infrastructure(_)));
    }
}
