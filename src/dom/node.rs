//! Node arena entries.

use crate::identifiers::NodeId;

// ============================================================================
// NodeData
// ============================================================================

/// Payload of a single node: element or text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeData {
    /// Element node with a lowercase tag and ordered attribute list.
    ///
    /// Attributes keep insertion order so serialization is deterministic.
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },

    /// Text node.
    Text { content: String },
}

// ============================================================================
// Node
// ============================================================================

/// A single arena entry.
///
/// Nodes are never deallocated; detaching clears `parent` and removes the
/// entry from the old parent's `children`.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Parent node, if attached.
    pub parent: Option<NodeId>,

    /// Ordered children.
    pub children: Vec<NodeId>,

    /// Element or text payload.
    pub data: NodeData,
}

impl Node {
    /// Creates a detached element node.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element {
                tag: tag.into().to_ascii_lowercase(),
                attributes: Vec::new(),
            },
        }
    }

    /// Creates a detached text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Text {
                content: content.into(),
            },
        }
    }

    /// Returns the element tag, or `None` for text nodes.
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text { .. } => None,
        }
    }

    /// Returns `true` if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    /// Returns an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeData::Text { .. } => None,
        }
    }

    /// Returns `true` if the element's `class` attribute contains `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }
}

// ============================================================================
// Tests
// ============================================================================
