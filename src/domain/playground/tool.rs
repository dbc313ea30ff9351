//! Tool aggregate entity.
//!
//! A tool is a registered utility rendered through a named client view.
//! Its `configuration` is a tool-level document shared by every user of the
//! tool; per-user working data lives in [`UserToolState`](super::UserToolState).

use serde_json::{json, Value};

use crate::domain::foundation::{DomainError, Timestamp, ToolId, UserId, ValidationError};

use super::{ComponentName, Slug};

/// Maximum length for a tool name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Icon used when none is supplied.
pub const DEFAULT_ICON: &str = "Beaker";

/// Prefix of every tool view rendered by the presentation bridge.
pub const VIEW_PREFIX: &str = "Playground/Tools/";

/// Input for registering a tool.
///
/// `slug` and `component_name` are derived from `name` when absent.
#[derive(Debug, Clone)]
pub struct NewTool {
    pub name: String,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub component_name: Option<ComponentName>,
    pub configuration: Value,
    pub is_active: bool,
    pub owner: Option<UserId>,
}

impl NewTool {
    /// An active, system-owned tool with an empty configuration.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            description: None,
            icon: None,
            component_name: None,
            configuration: json!({}),
            is_active: true,
            owner: None,
        }
    }
}

/// Tool aggregate.
///
/// # Invariants
///
/// - `name` is 1-255 characters after trimming
/// - `slug` is canonical (see [`Slug`]) and globally unique (enforced by storage)
/// - `component_name` is unique per tool (enforced by storage)
/// - `configuration` is always a JSON object or array
/// - `owner` of `None` means system-owned
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    id: ToolId,
    name: String,
    slug: Slug,
    description: Option<String>,
    icon: String,
    component_name: ComponentName,
    configuration: Value,
    is_active: bool,
    owner: Option<UserId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Tool {
    /// Register a new tool.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long, if a slug or
    ///   component name cannot be derived from it, or if the configuration
    ///   is not a document
    pub fn create(new: NewTool) -> Result<Self, DomainError> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Name must be at most {} characters", MAX_NAME_LENGTH),
            ));
        }
        let slug = match new.slug {
            Some(slug) => slug,
            None => Slug::from_name(&name)?,
        };
        let component_name = match new.component_name {
            Some(component) => component,
            None => ComponentName::from_name(&name)?,
        };
        ensure_document("configuration", &new.configuration)?;

        let icon = new
            .icon
            .map(|icon| icon.trim().to_string())
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());
        let description = new
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let now = Timestamp::now();
        Ok(Self {
            id: ToolId::new(),
            name,
            slug,
            description,
            icon,
            component_name,
            configuration: new.configuration,
            is_active: new.is_active,
            owner: new.owner,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a tool from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ToolId,
        name: String,
        slug: Slug,
        description: Option<String>,
        icon: String,
        component_name: ComponentName,
        configuration: Value,
        is_active: bool,
        owner: Option<UserId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            slug,
            description,
            icon,
            component_name,
            configuration,
            is_active,
            owner,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ToolId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn component_name(&self) -> &ComponentName {
        &self.component_name
    }

    pub fn configuration(&self) -> &Value {
        &self.configuration
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    /// True when no user owns the tool.
    pub fn is_system_owned(&self) -> bool {
        self.owner.is_none()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Name of the client view rendering this tool.
    pub fn view_name(&self) -> String {
        format!("{}{}", VIEW_PREFIX, self.component_name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the configuration document wholesale.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the value is not an object or array
    pub fn replace_configuration(&mut self, configuration: Value) -> Result<(), DomainError> {
        ensure_document("configuration", &configuration)?;
        self.configuration = configuration;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn activate(&mut self) {
        if !self.is_active {
            self.is_active = true;
            self.updated_at = Timestamp::now();
        }
    }

    pub fn deactivate(&mut self) {
        if self.is_active {
            self.is_active = false;
            self.updated_at = Timestamp::now();
        }
    }

    /// Detach the owning user; the tool becomes system-owned.
    pub fn clear_owner(&mut self) {
        if self.owner.take().is_some() {
            self.updated_at = Timestamp::now();
        }
    }
}

/// Checks that an opaque document is a JSON object or array.
pub fn ensure_document(field: &str, value: &Value) -> Result<(), DomainError> {
    if value.is_object() || value.is_array() {
        Ok(())
    } else {
        Err(DomainError::validation(
            field,
            format!("The {} field must be an array.", field.replace('_', " ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn word_counter() -> Tool {
        Tool::create(NewTool {
            description: Some("Count words".to_string()),
            configuration: json!({"max_text_length": 50000}),
            ..NewTool::named("Word Counter")
        })
        .unwrap()
    }

    #[test]
    fn create_derives_slug_and_component_name() {
        let tool = word_counter();
        assert_eq!(tool.slug().as_str(), "word-counter");
        assert_eq!(tool.component_name().as_str(), "WordCounter");
        assert_eq!(tool.view_name(), "Playground/Tools/WordCounter");
        assert_eq!(tool.icon(), DEFAULT_ICON);
        assert!(tool.is_active());
        assert!(tool.is_system_owned());
    }

    #[test]
    fn create_keeps_explicit_identifiers() {
        let tool = Tool::create(NewTool {
            slug: Some(Slug::parse("json").unwrap()),
            component_name: Some(ComponentName::parse("JsonFormatter").unwrap()),
            icon: Some("Code".to_string()),
            ..NewTool::named("JSON Formatter")
        })
        .unwrap();
        assert_eq!(tool.slug().as_str(), "json");
        assert_eq!(tool.component_name().as_str(), "JsonFormatter");
        assert_eq!(tool.icon(), "Code");
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = Tool::create(NewTool::named("   ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn create_rejects_scalar_configuration() {
        let err = Tool::create(NewTool {
            configuration: json!("nope"),
            ..NewTool::named("Calculator")
        })
        .unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"configuration".to_string()));
    }

    #[test]
    fn replace_configuration_swaps_whole_document() {
        let mut tool = word_counter();
        tool.replace_configuration(json!({"reading_speed_wpm": 250})).unwrap();
        assert_eq!(tool.configuration(), &json!({"reading_speed_wpm": 250}));
    }

    #[test]
    fn replace_configuration_rejects_scalars() {
        let mut tool = word_counter();
        assert!(tool.replace_configuration(json!(42)).is_err());
        assert_eq!(tool.configuration(), &json!({"max_text_length": 50000}));
    }

    #[test]
    fn deactivate_then_activate() {
        let mut tool = word_counter();
        tool.deactivate();
        assert!(!tool.is_active());
        tool.activate();
        assert!(tool.is_active());
    }

    #[test]
    fn clear_owner_makes_tool_system_owned() {
        let mut tool = Tool::create(NewTool {
            owner: Some(UserId::new("user-1").unwrap()),
            ..NewTool::named("Workout Tracker")
        })
        .unwrap();
        assert!(!tool.is_system_owned());
        tool.clear_owner();
        assert!(tool.is_system_owned());
    }
}
