//! SeedCatalogHandler - registers the built-in tools that are missing.
//!
//! Idempotent: tools are matched by slug and existing rows are never touched.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::playground::catalog::{CatalogEntry, BUILTIN_TOOLS};
use crate::domain::playground::{PlaygroundError, Tool};
use crate::ports::ToolRepository;

#[derive(Debug, Clone, Default)]
pub struct SeedCatalogResult {
    pub created: Vec<Tool>,
    /// Slugs that were already registered.
    pub skipped: Vec<String>,
}

pub struct SeedCatalogHandler {
    tools: Arc<dyn ToolRepository>,
    entries: &'static [CatalogEntry],
}

impl SeedCatalogHandler {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self {
            tools,
            entries: BUILTIN_TOOLS,
        }
    }

    pub async fn handle(&self) -> Result<SeedCatalogResult, PlaygroundError> {
        let mut result = SeedCatalogResult::default();

        for entry in self.entries {
            if self.tools.find_by_slug(entry.slug).await?.is_some() {
                result.skipped.push(entry.slug.to_string());
                continue;
            }

            let tool = Tool::create(entry.to_new_tool().map_err(DomainError::from)?)?;
            match self.tools.save(&tool).await {
                Ok(()) => {
                    tracing::info!(slug = entry.slug, "Seeded built-in tool");
                    result.created.push(tool);
                }
                // Another seeder got there first.
                Err(e) if e.code == ErrorCode::ToolSlugTaken => {
                    result.skipped.push(entry.slug.to_string());
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn seeds_every_builtin_once() {
        let store = store_with(&[]).await;
        let handler = SeedCatalogHandler::new(store.clone());

        let first = handler.handle().await.unwrap();
        assert_eq!(first.created.len(), BUILTIN_TOOLS.len());
        assert!(first.skipped.is_empty());

        let second = handler.handle().await.unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.skipped.len(), BUILTIN_TOOLS.len());
        assert_eq!(store.tool_count().await, BUILTIN_TOOLS.len());
    }

    #[tokio::test]
    async fn leaves_existing_tools_alone() {
        let mut existing = tool("Calculator");
        existing.deactivate();
        let store = store_with(&[existing.clone()]).await;

        let result = SeedCatalogHandler::new(store.clone()).handle().await.unwrap();

        assert!(result.skipped.contains(&"calculator".to_string()));
        let stored = store.find_by_slug("calculator").await.unwrap().unwrap();
        assert_eq!(stored.id(), existing.id());
        assert!(!stored.is_active());
    }
}
