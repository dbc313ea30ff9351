//! Per-user working data for one tool.

use serde_json::{json, Value};

use crate::domain::foundation::{DomainError, Timestamp, ToolId, UserId, UserToolStateId};

use super::tool::ensure_document;

/// Saved data for a (user, tool) pair.
///
/// # Invariants
///
/// - at most one state exists per (user, tool) (enforced by storage)
/// - `saved_data` is always a JSON array or object; a fresh state holds `[]`
#[derive(Debug, Clone, PartialEq)]
pub struct UserToolState {
    id: UserToolStateId,
    user_id: UserId,
    tool_id: ToolId,
    saved_data: Value,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl UserToolState {
    /// Empty state materialized on first access.
    pub fn empty(user_id: UserId, tool_id: ToolId) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserToolStateId::new(),
            user_id,
            tool_id,
            saved_data: json!([]),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: UserToolStateId,
        user_id: UserId,
        tool_id: ToolId,
        saved_data: Value,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            tool_id,
            saved_data,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserToolStateId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn tool_id(&self) -> &ToolId {
        &self.tool_id
    }

    pub fn saved_data(&self) -> &Value {
        &self.saved_data
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Full replace of the saved document. Last write wins.
    pub fn replace_saved_data(&mut self, saved_data: Value) -> Result<(), DomainError> {
        ensure_document("saved_data", &saved_data)?;
        self.saved_data = saved_data;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn into_saved_data(self) -> Value {
        self.saved_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> UserToolState {
        UserToolState::empty(UserId::new("user-1").unwrap(), ToolId::new())
    }

    #[test]
    fn empty_state_holds_empty_list() {
        assert_eq!(state().saved_data(), &json!([]));
    }

    #[test]
    fn replace_saved_data_keeps_document_verbatim() {
        let mut state = state();
        let doc = json!({"exercises": [{"id": "1", "name": "Squat"}], "sessions": []});
        state.replace_saved_data(doc.clone()).unwrap();
        assert_eq!(state.saved_data(), &doc);
    }

    #[test]
    fn replace_saved_data_rejects_scalars() {
        let mut state = state();
        let err = state.replace_saved_data(json!("text")).unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"saved_data".to_string()));
        assert_eq!(state.saved_data(), &json!([]));
    }
}
