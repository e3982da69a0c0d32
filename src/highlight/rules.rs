//! Ancestor inclusion/exclusion rules and highlighter configuration.
//!
//! The default policy is **exclusion-by-default**: every text node is
//! eligible unless an ancestor between it and the traversal root carries an
//! excluded tag (preformatted, code, script, style, interactive controls) or
//! an excluded class. The inclusion-list policy is the alternative
//! configuration: a text node is eligible only when its nearest element
//! ancestor's tag is explicitly listed, and exclusions still apply.
//!
//! Under either policy, any ancestor carrying the marker class blocks the
//! node, so a second pass never re-highlights inserted markers.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashSet;

use crate::dom::Document;
use crate::identifiers::NodeId;

// ============================================================================
// Constants
// ============================================================================

/// Tags whose subtrees are never highlighted.
const DEFAULT_EXCLUDED_TAGS: [&str; 8] = [
    "script", "style", "pre", "code", "button", "input", "textarea", "select",
];

/// Classes marking raw-code or already-processed regions.
const DEFAULT_EXCLUDED_CLASSES: [&str; 2] = ["code-highlight", "nohighlight"];

/// Tags eligible under the inclusion-list policy.
const DEFAULT_INCLUDED_TAGS: [&str; 13] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "a", "em", "strong", "blockquote",
];

/// Class applied to every inserted marker span.
pub const MARKER_CLASS: &str = "highlighted";

/// Class toggled on a marker while hovered.
pub const HOVER_CLASS: &str = "highlight-active";

// ============================================================================
// AncestorPolicy
// ============================================================================

/// Which way the ancestor rule defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AncestorPolicy {
    /// Highlight unless an ancestor is excluded (default).
    #[default]
    ExcludeListed,

    /// Highlight only when the nearest element ancestor's tag is included;
    /// exclusions still apply.
    IncludeListed,
}

// ============================================================================
// HighlightConfig
// ============================================================================

/// Highlighter configuration.
///
/// # Example
///
/// ```
/// use keymark::{AncestorPolicy, HighlightConfig};
///
/// let config = HighlightConfig::new()
///     .with_excluded_tag("nav")
///     .with_policy(AncestorPolicy::ExcludeListed);
/// assert!(config.excluded_tags.contains("nav"));
/// ```
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// Ancestor rule direction.
    pub policy: AncestorPolicy,

    /// Anchor keywords at word-character edges.
    pub word_boundaries: bool,

    /// Case-insensitive matching.
    pub case_insensitive: bool,

    /// Tags blocking their whole subtree.
    pub excluded_tags: FxHashSet<String>,

    /// Classes blocking their whole subtree.
    pub excluded_classes: FxHashSet<String>,

    /// Tags eligible under [`AncestorPolicy::IncludeListed`].
    pub included_tags: FxHashSet<String>,

    /// Class of inserted marker spans.
    pub marker_class: String,

    /// Class toggled on hover.
    pub hover_class: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            policy: AncestorPolicy::ExcludeListed,
            word_boundaries: true,
            case_insensitive: true,
            excluded_tags: DEFAULT_EXCLUDED_TAGS.iter().map(|t| (*t).into()).collect(),
            excluded_classes: DEFAULT_EXCLUDED_CLASSES
                .iter()
                .map(|c| (*c).into())
                .collect(),
            included_tags: DEFAULT_INCLUDED_TAGS.iter().map(|t| (*t).into()).collect(),
            marker_class: MARKER_CLASS.into(),
            hover_class: HOVER_CLASS.into(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl HighlightConfig {
    /// Creates the default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ancestor rule direction.
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: AncestorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Disables word-boundary anchoring.
    #[inline]
    #[must_use]
    pub fn without_word_boundaries(mut self) -> Self {
        self.word_boundaries = false;
        self
    }

    /// Makes matching case-sensitive.
    #[inline]
    #[must_use]
    pub fn with_case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    /// Adds a tag to the exclusion set.
    #[inline]
    #[must_use]
    pub fn with_excluded_tag(mut self, tag: impl Into<String>) -> Self {
        self.excluded_tags.insert(tag.into().to_ascii_lowercase());
        self
    }

    /// Adds a class to the exclusion set.
    #[inline]
    #[must_use]
    pub fn with_excluded_class(mut self, class: impl Into<String>) -> Self {
        self.excluded_classes.insert(class.into());
        self
    }

    /// Adds a tag to the inclusion list.
    #[inline]
    #[must_use]
    pub fn with_included_tag(mut self, tag: impl Into<String>) -> Self {
        self.included_tags.insert(tag.into().to_ascii_lowercase());
        self
    }

    /// Sets the marker span class.
    #[inline]
    #[must_use]
    pub fn with_marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Sets the hover-state class.
    #[inline]
    #[must_use]
    pub fn with_hover_class(mut self, class: impl Into<String>) -> Self {
        self.hover_class = class.into();
        self
    }
}

// ============================================================================
// Ancestor Walk
// ============================================================================

impl HighlightConfig {
    /// Decides whether a text node may be highlighted.
    ///
    /// Walks from the text node's parent up through ancestors strictly below
    /// `root` (the traversal root plays the body's part and is not itself
    /// checked). No partial highlighting inside excluded regions: one
    /// decisive ancestor skips the node entirely.
    pub(crate) fn should_highlight(&self, doc: &Document, root: NodeId, text_node: NodeId) -> bool {
        let mut nearest_element_tag: Option<String> = None;

        let mut current = doc.parent(text_node);
        while let Some(id) = current {
            if id == root {
                break;
            }
            if let Some(tag) = doc.tag(id) {
                if self.excluded_tags.contains(&tag) {
                    return false;
                }
                if doc.has_class(id, &self.marker_class) {
                    return false;
                }
                if self
                    .excluded_classes
                    .iter()
                    .any(|class| doc.has_class(id, class))
                {
                    return false;
                }
                if nearest_element_tag.is_none() {
                    nearest_element_tag = Some(tag);
                }
            }
            current = doc.parent(id);
        }

        match self.policy {
            AncestorPolicy::ExcludeListed => true,
            AncestorPolicy::IncludeListed => nearest_element_tag
                .is_some_and(|tag| self.included_tags.contains(&tag)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_text_under(tag: &str) -> (Document, NodeId, NodeId) {
        let doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        let wrapper = doc.create_element(tag);
        let text = doc.create_text("cat");
        doc.append_child(wrapper, text).unwrap();
        doc.append_child(body, wrapper).unwrap();
        (doc, body, text)
    }

    #[test]
    fn test_plain_paragraph_is_eligible() {
        let (doc, body, text) = doc_with_text_under("p");
        let config = HighlightConfig::default();
        assert!(config.should_highlight(&doc, body, text));
    }

    #[test]
    fn test_excluded_tags_block() {
        for tag in ["pre", "code", "script", "style", "button", "textarea"] {
            let (doc, body, text) = doc_with_text_under(tag);
            let config = HighlightConfig::default();
            assert!(
                !config.should_highlight(&doc, body, text),
                "{tag} should be excluded"
            );
        }
    }

    #[test]
    fn test_excluded_class_blocks_whole_subtree() {
        let doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        let section = doc.create_element("section");
        doc.set_attribute(section, "class", "nohighlight").unwrap();
        let p = doc.create_element("p");
        let text = doc.create_text("cat");
        doc.append_child(p, text).unwrap();
        doc.append_child(section, p).unwrap();
        doc.append_child(body, section).unwrap();

        let config = HighlightConfig::default();
        assert!(!config.should_highlight(&doc, body, text));
    }

    #[test]
    fn test_marker_class_blocks_rehighlight() {
        let doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        let marker = doc.create_element("span");
        doc.set_attribute(marker, "class", MARKER_CLASS).unwrap();
        let text = doc.create_text("cat");
        doc.append_child(marker, text).unwrap();
        doc.append_child(body, marker).unwrap();

        let config = HighlightConfig::default();
        assert!(!config.should_highlight(&doc, body, text));
    }

    #[test]
    fn test_traversal_root_itself_not_checked() {
        // Highlighting scoped to a <pre> root still works inside it; the
        // exclusion applies to ancestors below the root only.
        let doc = Document::new();
        let pre = doc.create_element("pre");
        let text = doc.create_text("cat");
        doc.append_child(pre, text).unwrap();
        doc.append_child(doc.root(), pre).unwrap();

        let config = HighlightConfig::default();
        assert!(config.should_highlight(&doc, pre, text));
    }

    #[test]
    fn test_include_listed_requires_listed_parent() {
        let config = HighlightConfig::new().with_policy(AncestorPolicy::IncludeListed);

        let (doc, body, text) = doc_with_text_under("p");
        assert!(config.should_highlight(&doc, body, text));

        let (doc, body, text) = doc_with_text_under("nav");
        assert!(!config.should_highlight(&doc, body, text));
    }

    #[test]
    fn test_include_listed_still_honors_exclusions() {
        let config = HighlightConfig::new().with_policy(AncestorPolicy::IncludeListed);
        let (doc, body, text) = doc_with_text_under("pre");
        assert!(!config.should_highlight(&doc, body, text));
    }
}
