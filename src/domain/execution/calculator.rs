//! Calculator: binary operations on two operands, or a free-form expression.

use serde_json::{json, Value};
use std::str::FromStr;

use super::expression::{self, ExpressionError};
use super::{format_number, number_value, ComputationError, ExecutionInput, ToolOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Percentage,
}

impl FromStr for Operation {
    type Err = ComputationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            "power" => Ok(Operation::Power),
            "sqrt" => Ok(Operation::Sqrt),
            "percentage" => Ok(Operation::Percentage),
            _ => Err(ComputationError::new("Unknown operation")),
        }
    }
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
            Operation::Sqrt => "sqrt",
            Operation::Percentage => "percentage",
        }
    }

    pub fn apply(&self, a: f64, b: f64) -> Result<f64, ComputationError> {
        let result = match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide if b == 0.0 => {
                return Err(ComputationError::new("Cannot divide by zero"))
            }
            Operation::Divide => a / b,
            Operation::Power => a.powf(b),
            Operation::Sqrt if a < 0.0 => {
                return Err(ComputationError::new(
                    "Cannot calculate square root of negative number",
                ))
            }
            Operation::Sqrt => a.sqrt(),
            Operation::Percentage => (a / 100.0) * b,
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(ComputationError::new("Result is out of range"))
        }
    }

    pub fn describe(&self, a: f64, b: f64, result: f64) -> String {
        let (a, b, r) = (format_number(a), format_number(b), format_number(result));
        match self {
            Operation::Add => format!("{} + {} = {}", a, b, r),
            Operation::Subtract => format!("{} - {} = {}", a, b, r),
            Operation::Multiply => format!("{} × {} = {}", a, b, r),
            Operation::Divide => format!("{} ÷ {} = {}", a, b, r),
            Operation::Power => format!("{}^{} = {}", a, b, r),
            Operation::Sqrt => format!("√{} = {}", a, r),
            Operation::Percentage => format!("{}% of {} = {}", a, b, r),
        }
    }
}

/// Operand by name; absent means zero, numeric strings are accepted.
fn operand(input: &ExecutionInput<'_>, name: &str) -> Result<f64, ComputationError> {
    let invalid = || ComputationError::new(format!("The {} field must be a number.", name));
    match input.param(name) {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}

fn evaluate_expression(raw: &str) -> ToolOutcome {
    let expression = expression::sanitize(raw);
    match expression::evaluate(&expression) {
        Ok(result) if result.is_finite() => Ok(json!({
            "result": number_value(result),
            "expression": expression,
            "formatted": format!("{} = {}", expression, format_number(result)),
        })),
        Err(ExpressionError::DivisionByZero) => {
            Err(ComputationError::new("Cannot divide by zero").with("expression", expression))
        }
        _ => Err(ComputationError::new("Invalid expression").with("expression", expression)),
    }
}

pub fn execute(input: &ExecutionInput<'_>) -> ToolOutcome {
    if let Some(raw) = input.str_param("expression")?.filter(|e| !e.is_empty()) {
        return evaluate_expression(raw);
    }

    let operation: Operation = input.str_param("operation")?.unwrap_or("").parse()?;
    let num1 = operand(input, "num1")?;
    let num2 = operand(input, "num2")?;
    let result = operation.apply(num1, num2)?;

    Ok(json!({
        "result": number_value(result),
        "operation": operation.as_str(),
        "operands": [number_value(num1), number_value(num2)],
        "formatted": operation.describe(num1, num2, result),
    }))
}
