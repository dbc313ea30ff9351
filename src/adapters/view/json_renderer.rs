//! Server-driven page renderer.
//!
//! Produces the page object a client-side router mounts: the component to
//! render, its props, the request URL and an optional asset version used by
//! the client to detect stale bundles.

use serde_json::Value;

use crate::ports::{RenderedPage, ViewRenderer};

#[derive(Debug, Clone, Default)]
pub struct JsonViewRenderer {
    version: Option<String>,
}

impl JsonViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every page with an asset version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, view_name: &str, props: Value, url: &str) -> RenderedPage {
        RenderedPage {
            component: view_name.to_string(),
            props,
            url: url.to_string(),
            version: self.version.clone(),
        }
    }
}
