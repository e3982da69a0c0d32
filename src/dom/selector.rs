//! Node locator strategies.
//!
//! Provides Selenium-like `By` locators for finding nodes in a
//! [`Document`](super::Document).
//!
//! # Example
//!
//! ```ignore
//! use keymark::By;
//!
//! // CSS simple selector (default)
//! let container = doc.query_selector(&By::css(".main-content"))?;
//!
//! // By ID (shorthand for CSS #id)
//! let content = doc.query_selector(&By::id("content"))?;
//!
//! // By tag name
//! let body = doc.query_selector(&By::tag("body"))?;
//!
//! // By class name
//! let posts = doc.query_selector_all(&By::class("post-content"))?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::node::Node;

// ============================================================================
// By Enum
// ============================================================================

/// Node locator strategy.
///
/// [`By::Css`] accepts a simple selector: an optional tag followed by any mix
/// of `#id` and `.class` segments (`article`, `#content`, `.post-content`,
/// `span.highlighted`). Combinators and attribute selectors are not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS simple selector (most common).
    #[serde(rename = "css")]
    Css(String),

    /// Element ID (shorthand for `#id`).
    #[serde(rename = "id")]
    Id(String),

    /// Class name (shorthand for `.class`).
    #[serde(rename = "class")]
    Class(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Returns the strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::Id(_) => "id",
            Self::Class(_) => "class",
            Self::Tag(_) => "tag",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v) | Self::Id(v) | Self::Class(v) | Self::Tag(v) => v,
        }
    }

    /// Compiles the locator into a matchable form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] for malformed selector text.
    pub(crate) fn compile(&self) -> Result<CompiledSelector> {
        match self {
            Self::Css(selector) => CompiledSelector::parse(selector),
            Self::Id(id) => Ok(CompiledSelector {
                tag: None,
                id: Some(id.clone()),
                classes: Vec::new(),
            }),
            Self::Class(class) => Ok(CompiledSelector {
                tag: None,
                id: None,
                classes: vec![class.clone()],
            }),
            Self::Tag(tag) => Ok(CompiledSelector {
                tag: Some(tag.to_ascii_lowercase()),
                id: None,
                classes: Vec::new(),
            }),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to a CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to a CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// CompiledSelector
// ============================================================================

/// Parsed form of a simple selector: tag + id + class requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompiledSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl CompiledSelector {
    /// Parses simple-selector text.
    fn parse(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_selector(selector, "empty selector"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(Error::invalid_selector(
                selector,
                "combinators are not supported",
            ));
        }

        let mut compiled = Self {
            tag: None,
            id: None,
            classes: Vec::new(),
        };

        let mut rest = trimmed;
        if !rest.starts_with(['#', '.']) {
            let end = rest.find(['#', '.']).unwrap_or(rest.len());
            compiled.tag = Some(rest[..end].to_ascii_lowercase());
            rest = &rest[end..];
        }

        while !rest.is_empty() {
            let marker = rest
                .chars()
                .next()
                .filter(|c| matches!(c, '#' | '.'))
                .ok_or_else(|| Error::invalid_selector(selector, "unexpected character"))?;
            rest = &rest[1..];
            let end = rest.find(['#', '.']).unwrap_or(rest.len());
            let segment = &rest[..end];
            if segment.is_empty() {
                let what = if marker == '#' { "id" } else { "class" };
                return Err(Error::invalid_selector(
                    selector,
                    format!("empty {what} segment"),
                ));
            }
            match marker {
                '#' => compiled.id = Some(segment.to_string()),
                _ => compiled.classes.push(segment.to_string()),
            }
            rest = &rest[end..];
        }

        Ok(compiled)
    }

    /// Returns `true` if the node satisfies every requirement.
    ///
    /// Text nodes never match.
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        if let Some(tag) = &self.tag
            && node.tag() != Some(tag.as_str())
        {
            return false;
        }
        if let Some(id) = &self.id
            && node.attribute("id") != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| node.has_class(class))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_strategy_and_value() {
        let by = By::css(".main-content");
        assert_eq!(by.strategy(), "css");
        assert_eq!(by.value(), ".main-content");
        assert_eq!(by.to_string(), "css:.main-content");
    }

    #[test]
    fn test_from_str_is_css() {
        let by: By = "#content".into();
        assert!(matches!(by, By::Css(_)));
    }

    #[test]
    fn test_parse_tag_only() {
        let compiled = By::css("article").compile().unwrap();
        assert_eq!(compiled.tag.as_deref(), Some("article"));
        assert!(compiled.id.is_none());
        assert!(compiled.classes.is_empty());
    }

    #[test]
    fn test_parse_compound() {
        let compiled = By::css("span.highlighted.active").compile().unwrap();
        assert_eq!(compiled.tag.as_deref(), Some("span"));
        assert_eq!(compiled.classes, vec!["highlighted", "active"]);
    }

    #[test]
    fn test_parse_id() {
        let compiled = By::css("#content").compile().unwrap();
        assert_eq!(compiled.id.as_deref(), Some("content"));
        assert!(compiled.tag.is_none());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(By::css("   ").compile().is_err());
        assert!(By::css(".").compile().is_err());
        assert!(By::css("div .x").compile().is_err());
    }

    #[test]
    fn test_matches_element() {
        let mut node = Node::element("span");
        if let super::super::node::NodeData::Element { attributes, .. } = &mut node.data {
            attributes.push(("class".into(), "highlighted".into()));
            attributes.push(("id".into(), "m1".into()));
        }

        assert!(By::css("span.highlighted").compile().unwrap().matches(&node));
        assert!(By::id("m1").compile().unwrap().matches(&node));
        assert!(By::class("highlighted").compile().unwrap().matches(&node));
        assert!(!By::tag("div").compile().unwrap().matches(&node));
    }

    #[test]
    fn test_text_node_never_matches() {
        let node = Node::text("span");
        assert!(!By::tag("span").compile().unwrap().matches(&node));
    }

    #[test]
    fn test_by_serde_shape() {
        let by = By::css("article");
        let json = serde_json::to_string(&by).unwrap();
        assert_eq!(json, r#"{"strategy":"css","value":"article"}"#);
    }
}
