//! Shared fixtures for playground handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::adapters::memory::InMemoryPlaygroundStore;
use crate::domain::foundation::{DomainError, ToolId, UserId};
use crate::domain::playground::{NewTool, Tool, UserToolState};
use crate::ports::{ToolFilter, ToolRepository, UserToolStateRepository};

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn tool(name: &str) -> Tool {
    Tool::create(NewTool::named(name)).unwrap()
}

pub fn inactive_tool(name: &str) -> Tool {
    Tool::create(NewTool {
        is_active: false,
        ..NewTool::named(name)
    })
    .unwrap()
}

pub async fn store_with(tools: &[Tool]) -> Arc<InMemoryPlaygroundStore> {
    let store = Arc::new(InMemoryPlaygroundStore::new());
    for tool in tools {
        ToolRepository::save(store.as_ref(), tool).await.unwrap();
    }
    store
}

/// Repository whose every call fails with a database error.
pub struct FailingStore;

fn unavailable() -> DomainError {
    DomainError::database("connection refused")
}

#[async_trait]
impl ToolRepository for FailingStore {
    async fn save(&self, _tool: &Tool) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn replace_configuration(
        &self,
        _id: &ToolId,
        _configuration: &Value,
    ) -> Result<Tool, DomainError> {
        Err(unavailable())
    }

    async fn set_active(&self, _id: &ToolId, _active: bool) -> Result<Tool, DomainError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: &ToolId) -> Result<Option<Tool>, DomainError> {
        Err(unavailable())
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Tool>, DomainError> {
        Err(unavailable())
    }

    async fn list(&self, _filter: &ToolFilter) -> Result<Vec<Tool>, DomainError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &ToolId) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn clear_owner(&self, _user_id: &UserId) -> Result<u64, DomainError> {
        Err(unavailable())
    }
}

#[async_trait]
impl UserToolStateRepository for FailingStore {
    async fn find(
        &self,
        _user_id: &UserId,
        _tool_id: &ToolId,
    ) -> Result<Option<UserToolState>, DomainError> {
        Err(unavailable())
    }

    async fn create(&self, _state: &UserToolState) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn update(&self, _state: &UserToolState) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn delete_for_user(&self, _user_id: &UserId) -> Result<u64, DomainError> {
        Err(unavailable())
    }

    async fn count_for_tool(&self, _tool_id: &ToolId) -> Result<u64, DomainError> {
        Err(unavailable())
    }
}
