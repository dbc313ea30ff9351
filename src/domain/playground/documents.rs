//! Typed views over the opaque `configuration` and `saved_data` documents.
//!
//! Storage keeps both as loosely-typed JSON. Known tools get a typed view
//! here, selected by component name; anything that does not match the
//! expected shape falls back to the raw document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::execution::TodoItem;

use super::ComponentName;

// ════════════════════════════════════════════════════════════════════════════════
// Saved data
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Weight,
    Bodyweight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Kilograms; absent for bodyweight exercises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    pub exercise_id: String,
    pub date: String,
    pub sets: Vec<WorkoutSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutData {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub sessions: Vec<WorkoutSession>,
}

impl WorkoutData {
    /// Total volume (weight x reps) logged for an exercise.
    pub fn volume_for(&self, exercise_id: &str) -> f64 {
        self.sessions
            .iter()
            .filter(|s| s.exercise_id == exercise_id)
            .flat_map(|s| s.sets.iter())
            .map(|set| set.weight.unwrap_or(0.0) * f64::from(set.reps))
            .sum()
    }

    /// Volume summed over the known exercises; orphan sessions don't count.
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(|e| self.volume_for(&e.id)).sum()
    }
}

/// Typed view of a user's saved data.
#[derive(Debug, Clone, PartialEq)]
pub enum SavedDataView {
    WorkoutTracker(WorkoutData),
    TodoList(Vec<TodoItem>),
    Other(Value),
}

impl SavedDataView {
    pub fn from_document(component: &ComponentName, saved_data: &Value) -> Self {
        match component.as_str() {
            "WorkoutTracker" => match saved_data {
                // A fresh state is `[]`, which is an empty tracker.
                Value::Array(items) if items.is_empty() => {
                    SavedDataView::WorkoutTracker(WorkoutData::default())
                }
                _ => serde_json::from_value(saved_data.clone())
                    .map(SavedDataView::WorkoutTracker)
                    .unwrap_or_else(|_| SavedDataView::Other(saved_data.clone())),
            },
            "TodoList" => serde_json::from_value(saved_data.clone())
                .map(SavedDataView::TodoList)
                .unwrap_or_else(|_| SavedDataView::Other(saved_data.clone())),
            _ => SavedDataView::Other(saved_data.clone()),
        }
    }

    /// One-line human summary, used by the admin CLI.
    pub fn summary(&self) -> String {
        match self {
            SavedDataView::WorkoutTracker(data) => format!(
                "{} exercise(s), {} session(s), {} kg lifted",
                data.exercises.len(),
                data.sessions.len(),
                data.total_volume()
            ),
            SavedDataView::TodoList(items) => {
                let completed = items.iter().filter(|t| t.completed).count();
                format!("{} todo(s), {} completed", items.len(), completed)
            }
            SavedDataView::Other(Value::Array(items)) => format!("{} item(s)", items.len()),
            SavedDataView::Other(Value::Object(map)) => format!("{} key(s)", map.len()),
            SavedDataView::Other(_) => "opaque document".to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tool settings
// ════════════════════════════════════════════════════════════════════════════════

// Configuration is writable by any signed-in user, so every numeric setting
// has a range. Values outside it fall back to the field default.
pub const MAX_TEXT_LENGTH_LIMIT: usize = 1_000_000;
pub const MAX_READING_SPEED_WPM: u32 = 10_000;
pub const MAX_JSON_SIZE_LIMIT: usize = 5_000_000;
pub const MAX_INDENT_SIZE: usize = 16;
pub const MAX_COLORS_LIMIT: usize = 100;

fn within<T: PartialOrd>(value: T, range: std::ops::RangeInclusive<T>, default: T) -> T {
    if range.contains(&value) {
        value
    } else {
        default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCounterSettings {
    pub max_text_length: usize,
    pub reading_speed_wpm: u32,
}

impl Default for WordCounterSettings {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            reading_speed_wpm: 200,
        }
    }
}

impl WordCounterSettings {
    pub fn bounded(self) -> Self {
        let default = Self::default();
        Self {
            max_text_length: within(
                self.max_text_length,
                0..=MAX_TEXT_LENGTH_LIMIT,
                default.max_text_length,
            ),
            reading_speed_wpm: within(
                self.reading_speed_wpm,
                1..=MAX_READING_SPEED_WPM,
                default.reading_speed_wpm,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonFormatterSettings {
    pub max_json_size: usize,
    pub indent_size: usize,
}

impl Default for JsonFormatterSettings {
    fn default() -> Self {
        Self {
            max_json_size: 100_000,
            indent_size: 4,
        }
    }
}

impl JsonFormatterSettings {
    pub fn bounded(self) -> Self {
        let default = Self::default();
        Self {
            max_json_size: within(self.max_json_size, 0..=MAX_JSON_SIZE_LIMIT, default.max_json_size),
            indent_size: within(self.indent_size, 0..=MAX_INDENT_SIZE, default.indent_size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPaletteSettings {
    pub default_harmony: String,
    pub max_colors: usize,
}

impl Default for ColorPaletteSettings {
    fn default() -> Self {
        Self {
            default_harmony: "complementary".to_string(),
            max_colors: 10,
        }
    }
}

impl ColorPaletteSettings {
    pub fn bounded(self) -> Self {
        let default = Self::default();
        Self {
            max_colors: within(self.max_colors, 1..=MAX_COLORS_LIMIT, default.max_colors),
            default_harmony: self.default_harmony,
        }
    }
}

/// Typed view of a tool's configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolSettings {
    WordCounter(WordCounterSettings),
    JsonFormatter(JsonFormatterSettings),
    ColorPalette(ColorPaletteSettings),
    Other(Value),
}

impl ToolSettings {
    /// Malformed, missing or out-of-range settings fall back to defaults.
    pub fn from_document(component: &ComponentName, configuration: &Value) -> Self {
        fn typed<T: serde::de::DeserializeOwned + Default>(configuration: &Value) -> T {
            match configuration {
                Value::Object(_) => serde_json::from_value(configuration.clone()).unwrap_or_default(),
                _ => T::default(),
            }
        }

        match component.as_str() {
            "WordCounter" => {
                ToolSettings::WordCounter(typed::<WordCounterSettings>(configuration).bounded())
            }
            "JsonFormatter" => {
                ToolSettings::JsonFormatter(typed::<JsonFormatterSettings>(configuration).bounded())
            }
            "ColorPalette" => {
                ToolSettings::ColorPalette(typed::<ColorPaletteSettings>(configuration).bounded())
            }
            _ => ToolSettings::Other(configuration.clone()),
        }
    }

    pub fn word_counter(&self) -> WordCounterSettings {
        match self {
            ToolSettings::WordCounter(settings) => settings.clone().bounded(),
            _ => WordCounterSettings::default(),
        }
    }

    pub fn json_formatter(&self) -> JsonFormatterSettings {
        match self {
            ToolSettings::JsonFormatter(settings) => settings.clone().bounded(),
            _ => JsonFormatterSettings::default(),
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        ToolSettings::Other(Value::Object(Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(name: &str) -> ComponentName {
        ComponentName::parse(name).unwrap()
    }

    #[test]
    fn empty_workout_state_is_empty_tracker() {
        let view = SavedDataView::from_document(&component("WorkoutTracker"), &json!([]));
        assert_eq!(view, SavedDataView::WorkoutTracker(WorkoutData::default()));
    }

    #[test]
    fn workout_document_is_typed() {
        let doc = json!({
            "exercises": [{"id": "e1", "name": "Bench", "type": "weight", "created_at": "2025-01-01"}],
            "sessions": [{
                "id": "s1", "exercise_id": "e1", "date": "2025-01-02",
                "sets": [{"weight": 60.0, "reps": 5}, {"weight": 60.0, "reps": 5}],
                "created_at": "2025-01-02"
            }]
        });
        match SavedDataView::from_document(&component("WorkoutTracker"), &doc) {
            SavedDataView::WorkoutTracker(data) => {
                assert_eq!(data.exercises[0].kind, ExerciseKind::Weight);
                assert_eq!(data.volume_for("e1"), 600.0);
            }
            other => panic!("expected workout view, got {:?}", other),
        }
    }

    #[test]
    fn mismatched_shape_falls_back_to_other() {
        let doc = json!({"exercises": "not a list"});
        let view = SavedDataView::from_document(&component("WorkoutTracker"), &doc);
        assert_eq!(view, SavedDataView::Other(doc));
    }

    #[test]
    fn todo_document_summary_counts_completed() {
        let doc = json!([
            {"id": "a", "text": "one", "completed": true},
            {"id": "b", "text": "two", "completed": false}
        ]);
        let view = SavedDataView::from_document(&component("TodoList"), &doc);
        assert_eq!(view.summary(), "2 todo(s), 1 completed");
    }

    #[test]
    fn unknown_component_keeps_raw_document() {
        let doc = json!({"anything": [1, 2, 3]});
        let view = SavedDataView::from_document(&component("QrGenerator"), &doc);
        assert_eq!(view.summary(), "1 key(s)");
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings =
            ToolSettings::from_document(&component("WordCounter"), &json!({"reading_speed_wpm": 250}));
        assert_eq!(
            settings.word_counter(),
            WordCounterSettings {
                max_text_length: 50_000,
                reading_speed_wpm: 250
            }
        );
    }

    #[test]
    fn malformed_settings_use_defaults() {
        let settings =
            ToolSettings::from_document(&component("JsonFormatter"), &json!({"indent_size": "wide"}));
        assert_eq!(settings.json_formatter(), JsonFormatterSettings::default());
    }

    #[test]
    fn workout_summary_reports_volume() {
        let doc = json!({
            "exercises": [
                {"id": "e1", "name": "Squat", "type": "weight", "created_at": "2025-01-01"},
                {"id": "e2", "name": "Push-up", "type": "bodyweight", "created_at": "2025-01-01"}
            ],
            "sessions": [
                {"id": "s1", "exercise_id": "e1", "date": "2025-01-02",
                 "sets": [{"weight": 100.0, "reps": 3}], "created_at": "2025-01-02"},
                {"id": "s2", "exercise_id": "e2", "date": "2025-01-02",
                 "sets": [{"reps": 20}], "created_at": "2025-01-02"}
            ]
        });
        let view = SavedDataView::from_document(&component("WorkoutTracker"), &doc);
        assert_eq!(view.summary(), "2 exercise(s), 2 session(s), 300 kg lifted");
    }

    #[test]
    fn out_of_range_settings_fall_back_per_field() {
        let settings = ToolSettings::from_document(
            &component("JsonFormatter"),
            &json!({"indent_size": u64::MAX, "max_json_size": 2048}),
        );
        assert_eq!(
            settings.json_formatter(),
            JsonFormatterSettings {
                max_json_size: 2048,
                indent_size: 4
            }
        );

        let settings = ToolSettings::from_document(
            &component("JsonFormatter"),
            &json!({"indent_size": 1u64 << 40, "max_json_size": u64::MAX}),
        );
        assert_eq!(settings.json_formatter(), JsonFormatterSettings::default());
    }

    #[test]
    fn word_counter_limits_are_bounded() {
        let settings = ToolSettings::from_document(
            &component("WordCounter"),
            &json!({"max_text_length": 10_000_000u64, "reading_speed_wpm": 0}),
        );
        assert_eq!(settings.word_counter(), WordCounterSettings::default());
    }

    #[test]
    fn settings_built_in_code_are_bounded_on_read() {
        let settings = ToolSettings::JsonFormatter(JsonFormatterSettings {
            max_json_size: 10,
            indent_size: usize::MAX,
        });
        assert_eq!(settings.json_formatter().indent_size, 4);
        assert_eq!(settings.json_formatter().max_json_size, 10);
    }

    #[test]
    fn palette_color_count_is_bounded() {
        let settings = ToolSettings::from_document(
            &component("ColorPalette"),
            &json!({"default_harmony": "triadic", "max_colors": 0}),
        );
        assert_eq!(
            settings,
            ToolSettings::ColorPalette(ColorPaletteSettings {
                default_harmony: "triadic".to_string(),
                max_colors: 10
            })
        );
    }
}
