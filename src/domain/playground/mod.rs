//! Playground module - tool registry and per-user tool state.
//!
//! # Aggregates
//!
//! - `Tool` - a registered utility rendered by a named client view
//! - `UserToolState` - one user's saved data for one tool

pub mod catalog;
mod documents;
mod errors;
mod tool;
mod user_tool_state;
mod values;

pub use documents::{
    ColorPaletteSettings, Exercise, ExerciseKind, JsonFormatterSettings, SavedDataView,
    ToolSettings, WordCounterSettings, WorkoutData, WorkoutSession, WorkoutSet,
    MAX_COLORS_LIMIT, MAX_INDENT_SIZE, MAX_JSON_SIZE_LIMIT, MAX_READING_SPEED_WPM,
    MAX_TEXT_LENGTH_LIMIT,
};
pub use errors::PlaygroundError;
pub use tool::{ensure_document, NewTool, Tool, DEFAULT_ICON, MAX_NAME_LENGTH, VIEW_PREFIX};
pub use user_tool_state::UserToolState;
pub use values::{ComponentName, Slug, ToolLocator, MAX_SLUG_LENGTH};
