//! In-memory playground store.
//!
//! Implements both repository ports over one lock so tool deletion cascades
//! to user state atomically and uniqueness checks cannot interleave.
//! Useful for testing and development.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ToolId, UserId};
use crate::domain::playground::{Tool, UserToolState};
use crate::ports::{ToolFilter, ToolRepository, UserToolStateRepository};

#[derive(Debug, Default)]
struct Inner {
    tools: HashMap<ToolId, Tool>,
    states: HashMap<(UserId, ToolId), UserToolState>,
}

/// In-memory implementation of the tool and user state repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlaygroundStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryPlaygroundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored user states (useful for tests).
    pub async fn state_count(&self) -> usize {
        self.inner.read().await.states.len()
    }

    /// Number of stored tools (useful for tests).
    pub async fn tool_count(&self) -> usize {
        self.inner.read().await.tools.len()
    }
}

fn tool_not_found(id: &ToolId) -> DomainError {
    DomainError::new(ErrorCode::ToolNotFound, format!("Tool not found: {}", id))
}

#[async_trait]
impl ToolRepository for InMemoryPlaygroundStore {
    async fn save(&self, tool: &Tool) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if inner.tools.values().any(|t| t.slug() == tool.slug()) {
            return Err(DomainError::new(
                ErrorCode::ToolSlugTaken,
                format!("A tool with slug '{}' already exists", tool.slug()),
            ));
        }
        if inner
            .tools
            .values()
            .any(|t| t.component_name() == tool.component_name())
        {
            return Err(DomainError::new(
                ErrorCode::ComponentNameTaken,
                format!("A tool with component '{}' already exists", tool.component_name()),
            ));
        }
        inner.tools.insert(*tool.id(), tool.clone());
        Ok(())
    }

    async fn replace_configuration(
        &self,
        id: &ToolId,
        configuration: &Value,
    ) -> Result<Tool, DomainError> {
        let mut inner = self.inner.write().await;
        match inner.tools.get_mut(id) {
            Some(stored) if stored.is_active() => {
                stored.replace_configuration(configuration.clone())?;
                Ok(stored.clone())
            }
            _ => Err(tool_not_found(id)),
        }
    }

    async fn set_active(&self, id: &ToolId, active: bool) -> Result<Tool, DomainError> {
        let mut inner = self.inner.write().await;
        let stored = inner.tools.get_mut(id).ok_or_else(|| tool_not_found(id))?;
        if active {
            stored.activate();
        } else {
            stored.deactivate();
        }
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: &ToolId) -> Result<Option<Tool>, DomainError> {
        Ok(self.inner.read().await.tools.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tool>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .tools
            .values()
            .find(|t| t.slug().as_str() == slug)
            .cloned())
    }

    async fn list(&self, filter: &ToolFilter) -> Result<Vec<Tool>, DomainError> {
        let inner = self.inner.read().await;
        let mut tools: Vec<Tool> = inner
            .tools
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        // Byte order, matching `COLLATE "C"`.
        tools.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.slug().cmp(b.slug())));
        Ok(tools)
    }

    async fn delete(&self, id: &ToolId) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if inner.tools.remove(id).is_none() {
            return Err(tool_not_found(id));
        }
        inner.states.retain(|(_, tool_id), _| tool_id != id);
        Ok(())
    }

    async fn clear_owner(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut inner = self.inner.write().await;
        let mut cleared = 0;
        for tool in inner.tools.values_mut() {
            if tool.owner() == Some(user_id) {
                tool.clear_owner();
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl UserToolStateRepository for InMemoryPlaygroundStore {
    async fn find(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<Option<UserToolState>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .states
            .get(&(user_id.clone(), *tool_id))
            .cloned())
    }

    async fn create(&self, state: &UserToolState) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.tools.contains_key(state.tool_id()) {
            return Err(tool_not_found(state.tool_id()));
        }
        let key = (state.user_id().clone(), *state.tool_id());
        if inner.states.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::UserToolStateExists,
                "User already has state for this tool",
            ));
        }
        inner.states.insert(key, state.clone());
        Ok(())
    }

    async fn update(&self, state: &UserToolState) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        let key = (state.user_id().clone(), *state.tool_id());
        match inner.states.get_mut(&key) {
            Some(stored) if stored.id() == state.id() => {
                *stored = state.clone();
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::UserToolStateNotFound,
                format!("User tool state not found: {}", state.id()),
            )),
        }
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut inner = self.inner.write().await;
        let before = inner.states.len();
        inner.states.retain(|(owner, _), _| owner != user_id);
        Ok((before - inner.states.len()) as u64)
    }

    async fn count_for_tool(&self, tool_id: &ToolId) -> Result<u64, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.states.keys().filter(|(_, id)| id == tool_id).count() as u64)
    }
}
