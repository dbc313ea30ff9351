//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ToolRepository` - tool registry persistence
//! - `UserToolStateRepository` - per-user saved data persistence
//! - `SessionValidator` - bearer token validation
//! - `ViewRenderer` - presentation bridge

mod session_validator;
mod tool_repository;
mod user_tool_state_repository;
mod view_renderer;

pub use session_validator::SessionValidator;
pub use tool_repository::{ToolFilter, ToolRepository};
pub use user_tool_state_repository::UserToolStateRepository;
pub use view_renderer::{RenderedPage, ViewRenderer};
