//! Todo list actions over a client-supplied list.
//!
//! The server keeps nothing between calls; each request carries the full list.
//! Clients that persist todos through saved data bypass this path entirely.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{ComputationError, ExecutionInput, ToolOutcome};

/// A todo entry. Fields the server does not know about are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Value,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TodoItem {
    fn created(input: &ExecutionInput<'_>) -> Result<Self, ComputationError> {
        let mut extra = Map::new();
        extra.insert(
            "priority".to_string(),
            json!(input.str_param("priority")?.unwrap_or("medium")),
        );
        extra.insert(
            "category".to_string(),
            json!(input.str_param("category")?.unwrap_or("")),
        );
        extra.insert(
            "dueDate".to_string(),
            input.param("dueDate").cloned().unwrap_or(Value::Null),
        );
        extra.insert(
            "created_at".to_string(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Ok(Self {
            id: Value::String(Uuid::new_v4().simple().to_string()),
            text: input.str_param("text")?.unwrap_or("").to_string(),
            completed: false,
            extra,
        })
    }

    pub fn priority(&self) -> Option<&str> {
        self.extra.get("priority").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoAction {
    Get,
    Add,
    Toggle,
    Delete,
    ClearCompleted,
}

impl TodoAction {
    /// Unrecognised actions read the list unchanged.
    pub fn parse(action: &str) -> Self {
        match action {
            "add" => TodoAction::Add,
            "toggle" => TodoAction::Toggle,
            "delete" => TodoAction::Delete,
            "clear_completed" => TodoAction::ClearCompleted,
            _ => TodoAction::Get,
        }
    }
}

fn todos(input: &ExecutionInput<'_>) -> Result<Vec<TodoItem>, ComputationError> {
    match input.param("todos") {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item.clone()).map_err(|e| {
                    ComputationError::new(format!("Invalid todo item at index {}: {}", index, e))
                })
            })
            .collect(),
        Some(_) => Err(ComputationError::new("The todos field must be a list.")),
    }
}

pub fn execute(input: &ExecutionInput<'_>) -> ToolOutcome {
    let action = TodoAction::parse(input.str_param("action")?.unwrap_or("get"));
    let mut items = todos(input)?;
    let target = input.param("todoId");

    match action {
        TodoAction::Get => {}
        TodoAction::Add => items.push(TodoItem::created(input)?),
        TodoAction::Toggle => {
            if let Some(item) = items.iter_mut().find(|t| Some(&t.id) == target) {
                item.completed = !item.completed;
            }
        }
        TodoAction::Delete => items.retain(|t| Some(&t.id) != target),
        TodoAction::ClearCompleted => items.retain(|t| !t.completed),
    }

    let total = items.len();
    let completed = items.iter().filter(|t| t.completed).count();
    Ok(json!({
        "todos": items,
        "stats": {
            "total": total,
            "completed": completed,
            "remaining": total - completed,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::playground::ToolSettings;

    fn run(params: Value) -> ToolOutcome {
        let settings = ToolSettings::default();
        execute(&ExecutionInput::new(&params, &settings))
    }

    fn sample() -> Value {
        json!([
            {"id": "a", "text": "Buy milk", "completed": false, "priority": "high"},
            {"id": "b", "text": "Walk dog", "completed": true},
            {"id": 3, "text": "Call mom", "completed": false}
        ])
    }

    #[test]
    fn add_appends_item_with_defaults() {
        let result = run(json!({"action": "add", "text": "Write tests", "todos": sample()})).unwrap();
        let todos = result["todos"].as_array().unwrap();
        assert_eq!(todos.len(), 4);
        let added = &todos[3];
        assert_eq!(added["text"], "Write tests");
        assert_eq!(added["completed"], false);
        assert_eq!(added["priority"], "medium");
        assert_eq!(added["category"], "");
        assert!(added["dueDate"].is_null());
        assert!(added["id"].is_string());
        assert!(added["created_at"].is_string());
        assert_eq!(result["stats"], json!({"total": 4, "completed": 1, "remaining": 3}));
    }

    #[test]
    fn toggle_flips_matching_item_only() {
        let result = run(json!({"action": "toggle", "todoId": "a", "todos": sample()})).unwrap();
        assert_eq!(result["todos"][0]["completed"], true);
        assert_eq!(result["todos"][2]["completed"], false);
        assert_eq!(result["stats"]["completed"], 2);
    }

    #[test]
    fn ids_match_strictly_by_type() {
        let result = run(json!({"action": "delete", "todoId": "3", "todos": sample()})).unwrap();
        assert_eq!(result["stats"]["total"], 3);
        let result = run(json!({"action": "delete", "todoId": 3, "todos": sample()})).unwrap();
        assert_eq!(result["stats"]["total"], 2);
    }

    #[test]
    fn clear_completed_removes_done_items() {
        let result = run(json!({"action": "clear_completed", "todos": sample()})).unwrap();
        assert_eq!(result["stats"], json!({"total": 2, "completed": 0, "remaining": 2}));
    }

    #[test]
    fn unknown_fields_survive() {
        let result = run(json!({"todos": sample()})).unwrap();
        assert_eq!(result["todos"], sample());
    }

    #[test]
    fn default_action_on_empty_list() {
        let result = run(json!({})).unwrap();
        assert_eq!(result, json!({"todos": [], "stats": {"total": 0, "completed": 0, "remaining": 0}}));
    }

    #[test]
    fn malformed_todos_are_reported() {
        assert!(run(json!({"todos": "nope"})).is_err());
        assert!(run(json!({"todos": [{"text": "no id"}]})).is_err());
    }
}
