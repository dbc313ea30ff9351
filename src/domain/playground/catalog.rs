//! Built-in tool catalog used for seeding.

use serde_json::json;

use super::{ComponentName, NewTool, Slug};
use crate::domain::foundation::ValidationError;

/// A built-in tool definition.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub component_name: &'static str,
}

pub const BUILTIN_TOOLS: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Word Counter",
        slug: "word-counter",
        description: "Count words, characters, lines, paragraphs and estimate reading time for any text.",
        icon: "Type",
        component_name: "WordCounter",
    },
    CatalogEntry {
        name: "JSON Formatter",
        slug: "json-formatter",
        description: "Format, minify, and validate JSON with syntax highlighting and error detection.",
        icon: "Braces",
        component_name: "JsonFormatter",
    },
    CatalogEntry {
        name: "Color Palette",
        slug: "color-palette",
        description: "Generate harmonious color schemes from a base color using color theory.",
        icon: "Palette",
        component_name: "ColorPalette",
    },
    CatalogEntry {
        name: "Calculator",
        slug: "calculator",
        description: "A calculator with the ability to save and label results",
        icon: "Calculator",
        component_name: "Calculator",
    },
    CatalogEntry {
        name: "Todo List",
        slug: "todo-list",
        description: "Track tasks efficiently",
        icon: "CheckSquare",
        component_name: "TodoList",
    },
    CatalogEntry {
        name: "Text Transformer",
        slug: "text-transformer",
        description: "Transform text with various operations",
        icon: "Type",
        component_name: "TextTransformer",
    },
    CatalogEntry {
        name: "Workout Tracker",
        slug: "workout-tracker",
        description: "Log exercises and sets, and follow your progress over time.",
        icon: "Dumbbell",
        component_name: "WorkoutTracker",
    },
];

impl CatalogEntry {
    /// Registration input for this entry, with its default configuration.
    pub fn to_new_tool(&self) -> Result<NewTool, ValidationError> {
        let configuration = match self.slug {
            "word-counter" => json!({"max_text_length": 50000, "reading_speed_wpm": 200}),
            "json-formatter" => json!({"max_json_size": 100000, "indent_size": 2}),
            "color-palette" => json!({"default_harmony": "complementary", "max_colors": 10}),
            _ => json!({}),
        };
        Ok(NewTool {
            slug: Some(Slug::parse(self.slug)?),
            description: Some(self.description.to_string()),
            icon: Some(self.icon.to_string()),
            component_name: Some(ComponentName::parse(self.component_name)?),
            configuration,
            ..NewTool::named(self.name)
        })
    }
}

/// Looks up a built-in entry by slug.
pub fn builtin(slug: &str) -> Option<&'static CatalogEntry> {
    BUILTIN_TOOLS.iter().find(|entry| entry.slug == slug)
}
