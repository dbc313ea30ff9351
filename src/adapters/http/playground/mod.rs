//! HTTP adapter for playground endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, IndexProps, ShowProps, ToolResponse, UpdateToolRequest, UpdateToolResponse,
    ValidationErrorResponse,
};
pub use handlers::{PlaygroundAppState, INDEX_VIEW};
pub use routes::playground_routes;
