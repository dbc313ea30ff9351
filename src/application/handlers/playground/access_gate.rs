//! ActiveToolResolver - resolves a locator to an active tool.
//!
//! Inactive tools resolve exactly like absent ones; callers cannot tell
//! them apart.

use std::sync::Arc;

use crate::domain::playground::{PlaygroundError, Tool, ToolLocator};
use crate::ports::ToolRepository;

#[derive(Clone)]
pub struct ActiveToolResolver {
    tools: Arc<dyn ToolRepository>,
}

impl ActiveToolResolver {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self { tools }
    }

    /// # Errors
    ///
    /// - `NotFound` if the tool is missing or inactive
    /// - `Infrastructure` if the lookup fails
    pub async fn resolve(&self, locator: &ToolLocator) -> Result<Tool, PlaygroundError> {
        match self.tools.find(locator).await? {
            Some(tool) if tool.is_active() => Ok(tool),
            Some(_) => {
                tracing::debug!(%locator, "Inactive tool requested");
                Err(PlaygroundError::not_found(locator))
            }
            None => Err(PlaygroundError::not_found(locator)),
        }
    }
}
