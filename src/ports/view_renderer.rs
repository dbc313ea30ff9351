//! Presentation bridge port.
//!
//! The core names a client view and supplies its props. What the bridge
//! does with them (server-driven page JSON, HTML shell, ...) is opaque.

use serde::Serialize;
use serde_json::Value;

/// A rendered page: the view to mount and the props to mount it with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub component: String,
    pub props: Value,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

pub trait ViewRenderer: Send + Sync {
    /// Render `view_name` with `props` for the request at `url`.
    fn render(&self, view_name: &str, props: Value, url: &str) -> RenderedPage;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_renderer_is_object_safe() {
        fn _accepts_dyn(_renderer: &dyn ViewRenderer) {}
    }
}
