//! Tool repository port.
//!
//! Persists the tool registry. Slugs and component names are unique;
//! implementations report violations as conflict codes rather than
//! generic database errors.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{DomainError, ToolId, UserId};
use crate::domain::playground::{Tool, ToolLocator};

/// Filter for registry listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    /// `Some(true)` for active tools only, `Some(false)` for inactive only.
    pub active: Option<bool>,
    pub owner: Option<UserId>,
}

impl ToolFilter {
    pub fn active() -> Self {
        Self {
            active: Some(true),
            owner: None,
        }
    }

    pub fn matches(&self, tool: &Tool) -> bool {
        self.active.map_or(true, |active| tool.is_active() == active)
            && self
                .owner
                .as_ref()
                .map_or(true, |owner| tool.owner() == Some(owner))
    }
}

/// Repository port for the Tool aggregate.
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// Save a new tool.
    ///
    /// # Errors
    ///
    /// - `ToolSlugTaken` if the slug is already registered
    /// - `ComponentNameTaken` if the component name is already registered
    /// - `DatabaseError` on persistence failure
    async fn save(&self, tool: &Tool) -> Result<(), DomainError>;

    /// Replace the configuration of an active tool and return the stored row.
    ///
    /// Only `configuration` and `updated_at` are written; the active flag,
    /// owner and display fields keep whatever value is stored.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` if the tool doesn't exist or is inactive
    /// - `DatabaseError` on persistence failure
    async fn replace_configuration(
        &self,
        id: &ToolId,
        configuration: &Value,
    ) -> Result<Tool, DomainError>;

    /// Set the active flag and return the stored row.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` if the tool doesn't exist
    async fn set_active(&self, id: &ToolId, active: bool) -> Result<Tool, DomainError>;

    async fn find_by_id(&self, id: &ToolId) -> Result<Option<Tool>, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tool>, DomainError>;

    /// Resolve a tool by id or slug, regardless of its active flag.
    async fn find(&self, locator: &ToolLocator) -> Result<Option<Tool>, DomainError> {
        match locator {
            ToolLocator::Id(id) => self.find_by_id(id).await,
            ToolLocator::Slug(slug) => self.find_by_slug(slug).await,
        }
    }

    /// Tools matching `filter`, ordered by name in byte order.
    async fn list(&self, filter: &ToolFilter) -> Result<Vec<Tool>, DomainError>;

    /// Delete a tool and, by cascade, every user's state for it.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` if the tool doesn't exist
    async fn delete(&self, id: &ToolId) -> Result<(), DomainError>;

    /// Make every tool owned by `user_id` system-owned. Returns the count.
    async fn clear_owner(&self, user_id: &UserId) -> Result<u64, DomainError>;
}
