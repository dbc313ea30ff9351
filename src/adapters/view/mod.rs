//! Presentation bridge adapters.

mod json_renderer;

pub use json_renderer::JsonViewRenderer;
