//! Execution module - pure tool computations.
//!
//! Each tool is a function of the request body and the tool's settings.
//! Failures are [`ComputationError`] values, rendered as `{"error": ...}`.

pub mod calculator;
pub mod color_palette;
mod dispatcher;
pub mod expression;
pub mod json_formatter;
mod outcome;
pub mod text_transformer;
pub mod todo_list;
pub mod word_counter;

pub use dispatcher::{render, Executor, ExecutorRegistry, NOT_IMPLEMENTED};
pub use outcome::{format_number, number_value, ComputationError, ExecutionInput, ToolOutcome};
pub use todo_list::TodoItem;
