//! Inputs and outcomes shared by every tool executor.

use serde_json::{Map, Value};
use std::fmt;

use crate::domain::playground::ToolSettings;

/// Tool-specific failure returned as data, never as a transport fault.
///
/// Renders as `{"error": message, ...context}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationError {
    message: String,
    context: Map<String, Value>,
}

impl ComputationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Map::new(),
        }
    }

    /// Adds a field rendered next to `error`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_value(self) -> Value {
        let mut body = Map::with_capacity(self.context.len() + 1);
        body.insert("error".to_string(), Value::String(self.message));
        body.extend(self.context);
        Value::Object(body)
    }
}

impl fmt::Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ComputationError {}

pub type ToolOutcome = Result<Value, ComputationError>;

/// Request body plus the tool's typed settings.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionInput<'a> {
    pub params: &'a Value,
    pub settings: &'a ToolSettings,
}

impl<'a> ExecutionInput<'a> {
    pub fn new(params: &'a Value, settings: &'a ToolSettings) -> Self {
        Self { params, settings }
    }

    /// Parameter by name; JSON `null` counts as absent.
    pub fn param(&self, name: &str) -> Option<&'a Value> {
        self.params.get(name).filter(|value| !value.is_null())
    }

    /// String parameter; present values of another type are an error.
    pub fn str_param(&self, name: &str) -> Result<Option<&'a str>, ComputationError> {
        match self.param(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ComputationError::new(format!("The {} field must be a string.", name))),
        }
    }
}

/// JSON number for a result, integral when the value has no fraction.
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Human rendering of a number: `4` rather than `4.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
