//! HTTP DTOs for playground endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::playground::Tool;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `PUT /playground/tools/{id}`.
///
/// Absent and `null` fields are both left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateToolRequest {
    #[serde(default)]
    pub saved_data: Option<Value>,
    #[serde(default)]
    pub configuration: Option<Value>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    pub component_name: String,
    pub configuration: Value,
    pub is_active: bool,
    pub is_system_owned: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Tool> for ToolResponse {
    fn from(tool: &Tool) -> Self {
        Self {
            id: tool.id().to_string(),
            name: tool.name().to_string(),
            slug: tool.slug().to_string(),
            description: tool.description().map(str::to_string),
            icon: tool.icon().to_string(),
            component_name: tool.component_name().to_string(),
            configuration: tool.configuration().clone(),
            is_active: tool.is_active(),
            is_system_owned: tool.is_system_owned(),
            created_at: tool.created_at().to_rfc3339(),
            updated_at: tool.updated_at().to_rfc3339(),
        }
    }
}

/// Props of the playground index page.
#[derive(Debug, Clone, Serialize)]
pub struct IndexProps {
    pub tools: Vec<ToolResponse>,
}

/// Props of a tool page.
#[derive(Debug, Clone, Serialize)]
pub struct ShowProps {
    pub tool: ToolResponse,
    #[serde(rename = "savedData")]
    pub saved_data: Value,
}

/// Response to a successful update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateToolResponse {
    pub tool: ToolResponse,
    pub saved_data: Value,
}

/// Field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorResponse {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), vec![message.clone()]);
        Self { message, errors }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: "Server Error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::playground::NewTool;
    use serde_json::json;

    #[test]
    fn update_request_treats_null_as_absent() {
        let req: UpdateToolRequest =
            serde_json::from_value(json!({"saved_data": null, "configuration": {"a": 1}})).unwrap();
        assert!(req.saved_data.is_none());
        assert_eq!(req.configuration, Some(json!({"a": 1})));

        let empty: UpdateToolRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.saved_data.is_none() && empty.configuration.is_none());
    }

    #[test]
    fn show_props_use_client_prop_names() {
        let tool = Tool::create(NewTool::named("Todo List")).unwrap();
        let props = serde_json::to_value(ShowProps {
            tool: ToolResponse::from(&tool),
            saved_data: json!([]),
        })
        .unwrap();

        assert_eq!(props["savedData"], json!([]));
        assert_eq!(props["tool"]["slug"], "todo-list");
        assert_eq!(props["tool"]["component_name"], "TodoList");
        assert!(props["tool"].get("description").is_none());
    }

    #[test]
    fn validation_error_lists_field_messages() {
        let body = serde_json::to_value(ValidationErrorResponse::field(
            "saved_data",
            "The saved data field must be an array.",
        ))
        .unwrap();

        assert_eq!(body["message"], "The saved data field must be an array.");
        assert_eq!(body["errors"]["saved_data"][0], "The saved data field must be an array.");
    }
}
