//! Value objects identifying playground tools: slugs, component names and
//! the slug-or-id locator used by HTTP routes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ToolId, ValidationError};

/// Maximum length for a tool slug.
pub const MAX_SLUG_LENGTH: usize = 100;

/// URL-safe, lowercase, hyphenated tool identifier.
///
/// # Invariants
///
/// - non-empty, at most `MAX_SLUG_LENGTH` bytes
/// - only `a-z`, `0-9` and single `-` separators
/// - never starts or ends with `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Parses an already-formed slug, rejecting anything non-canonical.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("slug"));
        }
        if value.len() > MAX_SLUG_LENGTH {
            return Err(ValidationError::invalid_format(
                "slug",
                format!("must be at most {} characters", MAX_SLUG_LENGTH),
            ));
        }
        let well_formed = value
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        if !well_formed {
            return Err(ValidationError::invalid_format(
                "slug",
                "must be lowercase letters and digits separated by single hyphens",
            ));
        }
        Ok(Self(value))
    }

    /// Derives a slug from a display name ("QR Code Generator" -> "qr-code-generator").
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        let mut slug = String::with_capacity(name.len());
        let mut pending_separator = false;
        for ch in name.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(ch.to_ascii_lowercase());
            } else {
                pending_separator = true;
            }
        }
        Self::parse(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

/// Identifier of the client view that renders a tool ("WordCounter").
///
/// Maps 1:1 to a presentation asset, so it must be a PascalCase identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName(String);

impl ComponentName {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let mut chars = value.chars();
        match chars.next() {
            None => Err(ValidationError::empty_field("component_name")),
            Some(first) if !first.is_ascii_uppercase() => Err(ValidationError::invalid_format(
                "component_name",
                "must start with an uppercase letter",
            )),
            Some(_) if !chars.all(|c| c.is_ascii_alphanumeric()) => Err(
                ValidationError::invalid_format("component_name", "must be alphanumeric"),
            ),
            Some(_) => Ok(Self(value)),
        }
    }

    /// Derives a component name from a display name ("word counter" -> "WordCounter").
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        let studly: String = name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect();
        Self::parse(studly)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ComponentName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ComponentName> for String {
    fn from(name: ComponentName) -> Self {
        name.0
    }
}

/// How a request names a tool: by stable id or by slug.
///
/// Route segments accept both forms; anything that parses as a UUID is an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolLocator {
    Id(ToolId),
    Slug(String),
}

impl ToolLocator {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<ToolId>() {
            Ok(id) => ToolLocator::Id(id),
            Err(_) => ToolLocator::Slug(raw.to_ascii_lowercase()),
        }
    }
}

impl From<ToolId> for ToolLocator {
    fn from(id: ToolId) -> Self {
        ToolLocator::Id(id)
    }
}

impl From<&Slug> for ToolLocator {
    fn from(slug: &Slug) -> Self {
        ToolLocator::Slug(slug.as_str().to_string())
    }
}

impl fmt::Display for ToolLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolLocator::Id(id) => write!(f, "{}", id),
            ToolLocator::Slug(slug) => f.write_str(slug),
        }
    }
}
