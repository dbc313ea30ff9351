//! JSON formatter: validate, pretty-print and minify.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Value};

use crate::domain::playground::MAX_INDENT_SIZE;

use super::{ComputationError, ExecutionInput, ToolOutcome};

/// Pretty-prints `value` with `indent` spaces per level, at most
/// `MAX_INDENT_SIZE`.
pub fn pretty(value: &Value, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent.min(MAX_INDENT_SIZE));
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn invalid(message: impl Into<String>) -> ComputationError {
    ComputationError::new(message).with("valid", false)
}

pub fn execute(input: &ExecutionInput<'_>) -> ToolOutcome {
    let settings = input.settings.json_formatter();
    let raw = input.str_param("json").map_err(|e| invalid(e.message()))?.unwrap_or("");

    if raw.len() > settings.max_json_size {
        return Err(invalid(format!(
            "JSON exceeds the maximum size of {} bytes",
            settings.max_json_size
        )));
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| invalid(format!("Invalid JSON: {}", e)))?;
    let formatted = pretty(&value, settings.indent_size)
        .map_err(|e| invalid(format!("Could not format JSON: {}", e)))?;
    let minified = serde_json::to_string(&value)
        .map_err(|e| invalid(format!("Could not minify JSON: {}", e)))?;

    Ok(json!({
        "formatted": formatted,
        "minified": minified,
        "valid": true,
        "size_original": raw.len(),
        "size_formatted": formatted.len(),
        "size_minified": minified.len(),
    }))
}
