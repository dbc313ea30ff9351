//! Playground-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode};

use super::ToolLocator;

/// Playground errors surfaced by application handlers.
///
/// Inactive tools report `NotFound`, the same as absent ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaygroundError {
    /// Tool is missing or inactive.
    NotFound(String),
    /// Payload field present but malformed.
    ValidationFailed { field: String, message: String },
    /// Uniqueness violation (slug or component name already registered).
    Conflict(String),
    /// Storage or other unexpected failure.
    Infrastructure(String),
}

impl PlaygroundError {
    pub fn not_found(locator: &ToolLocator) -> Self {
        PlaygroundError::NotFound(locator.to_string())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlaygroundError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        PlaygroundError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        PlaygroundError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            PlaygroundError::NotFound(_) => ErrorCode::ToolNotFound,
            PlaygroundError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PlaygroundError::Conflict(_) => ErrorCode::ToolSlugTaken,
            PlaygroundError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            PlaygroundError::NotFound(locator) => format!("Tool not found: {}", locator),
            PlaygroundError::ValidationFailed { message, .. } => message.clone(),
            PlaygroundError::Conflict(msg) => msg.clone(),
            PlaygroundError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PlaygroundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PlaygroundError {}

impl From<DomainError> for PlaygroundError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ToolNotFound | ErrorCode::UserToolStateNotFound => {
                PlaygroundError::NotFound(
                    err.details.get("locator").cloned().unwrap_or(err.message),
                )
            }
            ErrorCode::ValidationFailed => PlaygroundError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ToolSlugTaken
            | ErrorCode::ComponentNameTaken
            | ErrorCode::UserToolStateExists => PlaygroundError::Conflict(err.message),
            _ => PlaygroundError::Infrastructure(err.to_string()),
        }
    }
}
