//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresToolRepository` - Playground tool registry
//! - `PostgresUserToolStateRepository` - Per-user tool state

mod tool_repository;
mod user_tool_state_repository;

pub use tool_repository::PostgresToolRepository;
pub use user_tool_state_repository::PostgresUserToolStateRepository;
