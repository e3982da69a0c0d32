//! HTML serialization.
//!
//! Deterministic output: attributes render in insertion order, text and
//! attribute values are escaped. Used by the round-trip and end-to-end
//! observable checks as well as debugging.

use crate::identifiers::NodeId;

use super::document::Dom;
use super::node::NodeData;

// ============================================================================
// Constants
// ============================================================================

/// Tags serialized without a closing tag.
const VOID_TAGS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

// ============================================================================
// Serialization
// ============================================================================

/// Writes `id`'s subtree as HTML into `out`.
pub(crate) fn write_html(dom: &Dom, id: NodeId, out: &mut String) {
    let Some(node) = dom.node(id) else {
        return;
    };

    match &node.data {
        NodeData::Text { content } => out.push_str(&escape_text(content)),
        NodeData::Element { tag, attributes } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');

            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }

            for child in &node.children {
                write_html(dom, *child, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Escapes text content.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes an attribute value.
fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

// ============================================================================
// Tests
// ============================================================================
