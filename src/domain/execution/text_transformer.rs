//! Text transformer: case changes, reversal, slugs and whitespace cleanup.

use serde_json::json;

use super::{ComputationError, ExecutionInput, ToolOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Uppercase,
    Lowercase,
    TitleCase,
    Reverse,
    Slugify,
    TrimWhitespace,
}

impl Transform {
    pub fn parse(operation: &str) -> Option<Self> {
        match operation {
            "uppercase" => Some(Transform::Uppercase),
            "lowercase" => Some(Transform::Lowercase),
            "title_case" => Some(Transform::TitleCase),
            "reverse" => Some(Transform::Reverse),
            "slugify" => Some(Transform::Slugify),
            "trim_whitespace" => Some(Transform::TrimWhitespace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Transform::Uppercase => "uppercase",
            Transform::Lowercase => "lowercase",
            Transform::TitleCase => "title_case",
            Transform::Reverse => "reverse",
            Transform::Slugify => "slugify",
            Transform::TrimWhitespace => "trim_whitespace",
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Transform::Uppercase => text.to_uppercase(),
            Transform::Lowercase => text.to_lowercase(),
            Transform::TitleCase => title_case(text),
            Transform::Reverse => text.chars().rev().collect(),
            Transform::Slugify => slugify(text),
            Transform::TrimWhitespace => text.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn execute(input: &ExecutionInput<'_>) -> ToolOutcome {
    let text = input.str_param("text")?.unwrap_or("");
    let operation = input.str_param("operation")?.unwrap_or("");
    let transform = Transform::parse(operation)
        .ok_or_else(|| ComputationError::new("Unknown operation").with("operation", operation))?;

    let result = transform.apply(text);
    Ok(json!({
        "length": result.chars().count(),
        "result": result,
        "operation": transform.as_str(),
    }))
}
