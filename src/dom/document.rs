//! Mutable in-memory document with change notifications.
//!
//! [`Document`] is the substrate everything else operates on: an arena of
//! element and text nodes behind a `parking_lot::RwLock`, cheaply cloneable
//! via `Arc`, broadcasting a [`MutationRecord`] for every structural edit.
//!
//! # Example
//!
//! ```
//! use keymark::{By, Document};
//!
//! let doc = Document::new();
//! let body = doc.create_element("body");
//! doc.append_child(doc.root(), body).unwrap();
//!
//! let p = doc.create_element("p");
//! let text = doc.create_text("The cat sat.");
//! doc.append_child(p, text).unwrap();
//! doc.append_child(body, p).unwrap();
//!
//! let found = doc.query_selector(&By::tag("p")).unwrap();
//! assert_eq!(found, Some(p));
//! assert_eq!(doc.text_content(p), "The cat sat.");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::trace;

use crate::error::{Error, Result};
use crate::identifiers::NodeId;

use super::mutation::MutationRecord;
use super::node::{Node, NodeData};
use super::selector::{By, CompiledSelector};
use super::serialize::write_html;

// ============================================================================
// Constants
// ============================================================================

/// Mutation broadcast channel capacity.
///
/// Waiters that lag past this many records re-evaluate from scratch instead
/// of replaying the backlog.
const MUTATION_CHANNEL_CAPACITY: usize = 256;

// ============================================================================
// Dom (arena)
// ============================================================================

/// The locked arena state.
pub(crate) struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Dom {
    /// Returns a node by ID.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Returns `true` if `node` is `ancestor` or lies in its subtree.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Depth-first preorder walk collecting matches.
    fn collect_matches(
        &self,
        id: NodeId,
        selector: &CompiledSelector,
        first_only: bool,
        out: &mut Vec<NodeId>,
    ) {
        let Some(node) = self.node(id) else {
            return;
        };
        if selector.matches(node) {
            out.push(id);
            if first_only {
                return;
            }
        }
        for child in &node.children {
            if first_only && !out.is_empty() {
                return;
            }
            self.collect_matches(*child, selector, first_only, out);
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Text { content } => out.push_str(content),
            NodeData::Element { .. } => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn collect_text_nodes(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Text { .. } => out.push(id),
            NodeData::Element { .. } => {
                for child in &node.children {
                    self.collect_text_nodes(*child, out);
                }
            }
        }
    }

    /// Detaches `child` from its current parent, recording the removal.
    fn detach(&mut self, child: NodeId, records: &mut Vec<MutationRecord>) {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|c| *c != child);
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = None;
        }
        records.push(MutationRecord::removed(parent, child));
    }
}

// ============================================================================
// Document
// ============================================================================

/// Shared handle to a mutable document.
///
/// Clones share the same arena and mutation stream. All structural edits
/// (append/replace/splice/remove) notify subscribed waiters; attribute and
/// text edits are silent, matching a `childList`-only change observer.
#[derive(Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

struct DocumentInner {
    dom: RwLock<Dom>,
    mutations: broadcast::Sender<MutationRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Document - Constructor
// ============================================================================

impl Document {
    /// Creates a document whose root is an empty `<html>` element.
    #[must_use]
    pub fn new() -> Self {
        let (mutations, _) = broadcast::channel(MUTATION_CHANNEL_CAPACITY);
        let mut dom = Dom {
            nodes: Vec::new(),
            root: NodeId::new(0),
        };
        dom.root = dom.push(Node::element("html"));

        Self {
            inner: Arc::new(DocumentInner {
                dom: RwLock::new(dom),
                mutations,
            }),
        }
    }

    /// Returns the document root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.inner.dom.read().root
    }
}

// ============================================================================
// Document - Node Creation
// ============================================================================

impl Document {
    /// Creates a detached element node. The tag is lowercased.
    pub fn create_element(&self, tag: impl Into<String>) -> NodeId {
        self.inner.dom.write().push(Node::element(tag))
    }

    /// Creates a detached text node.
    pub fn create_text(&self, content: impl Into<String>) -> NodeId {
        self.inner.dom.write().push(Node::text(content))
    }
}

// ============================================================================
// Document - Structure Edits
// ============================================================================

impl Document {
    /// Appends `child` as the last child of `parent`.
    ///
    /// A child attached elsewhere is moved, as `appendChild` does.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] if either node does not exist
    /// - [`Error::NotAnElement`] if `parent` is a text node
    /// - [`Error::Cycle`] if `child` is `parent` or one of its ancestors
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut records = Vec::new();
        {
            let mut dom = self.inner.dom.write();
            Self::check_attachable(&dom, parent, child)?;
            dom.detach(child, &mut records);
            dom.node_mut(parent)
                .ok_or_else(|| Error::node_not_found(parent))?
                .children
                .push(child);
            if let Some(node) = dom.node_mut(child) {
                node.parent = Some(parent);
            }
            records.push(MutationRecord::inserted(parent, child));
        }
        self.notify(records);
        Ok(())
    }

    /// Replaces `old` with `new` in `parent`'s child list.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAChild`] if `old` is not a child of `parent`
    /// - plus the [`Self::append_child`] attachment errors for `new`
    pub fn replace_child(&self, parent: NodeId, old: NodeId, new: NodeId) -> Result<()> {
        self.splice_child(parent, old, vec![new])
    }

    /// Replaces `old` with an ordered run of `replacements` in place.
    ///
    /// This is the highlighter's primitive: a text node becomes a spliced
    /// sequence of plain text nodes and marker spans, with no extra wrapper
    /// surviving in the serialized output.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAChild`] if `old` is not a child of `parent`
    /// - [`Error::NodeNotFound`] / [`Error::Cycle`] for invalid replacements
    pub fn splice_child(
        &self,
        parent: NodeId,
        old: NodeId,
        replacements: Vec<NodeId>,
    ) -> Result<()> {
        let mut records = Vec::new();
        {
            let mut dom = self.inner.dom.write();
            let attached = dom
                .node(parent)
                .ok_or_else(|| Error::node_not_found(parent))?
                .children
                .contains(&old);
            if !attached {
                return Err(Error::not_a_child(parent, old));
            }
            for replacement in &replacements {
                Self::check_attachable(&dom, parent, *replacement)?;
            }

            // Detach replacements before locating `old`: a replacement that
            // is currently a sibling of `old` shifts its position.
            for replacement in &replacements {
                if *replacement != old {
                    dom.detach(*replacement, &mut records);
                }
            }

            let index = dom
                .node(parent)
                .and_then(|node| node.children.iter().position(|c| *c == old))
                .ok_or_else(|| Error::not_a_child(parent, old))?;

            let parent_node = dom
                .node_mut(parent)
                .ok_or_else(|| Error::node_not_found(parent))?;
            parent_node.children.remove(index);
            records.push(MutationRecord::removed(parent, old));
            for (offset, replacement) in replacements.iter().enumerate() {
                parent_node.children.insert(index + offset, *replacement);
                records.push(MutationRecord::inserted(parent, *replacement));
            }
            if let Some(node) = dom.node_mut(old) {
                node.parent = None;
            }
            for replacement in &replacements {
                if let Some(node) = dom.node_mut(*replacement) {
                    node.parent = Some(parent);
                }
            }
        }
        self.notify(records);
        Ok(())
    }

    /// Removes `child` from `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAChild`] if `child` is not attached to `parent`.
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut records = Vec::new();
        {
            let mut dom = self.inner.dom.write();
            let attached = dom
                .node(child)
                .ok_or_else(|| Error::node_not_found(child))?
                .parent
                == Some(parent);
            if !attached {
                return Err(Error::not_a_child(parent, child));
            }
            dom.detach(child, &mut records);
        }
        self.notify(records);
        Ok(())
    }

    fn check_attachable(dom: &Dom, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = dom.node(parent).ok_or_else(|| Error::node_not_found(parent))?;
        if !parent_node.is_element() {
            return Err(Error::not_an_element(parent));
        }
        if dom.node(child).is_none() {
            return Err(Error::node_not_found(child));
        }
        if dom.contains(child, parent) {
            return Err(Error::cycle(child));
        }
        Ok(())
    }

    fn notify(&self, records: Vec<MutationRecord>) {
        for record in records {
            trace!(?record, "mutation");
            // Errors only mean no waiter is subscribed.
            let _ = self.inner.mutations.send(record);
        }
    }
}

// ============================================================================
// Document - Attributes & Text
// ============================================================================

impl Document {
    /// Sets an attribute, replacing an existing value. Silent (no mutation
    /// record), as attribute edits are outside the observed change set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAnElement`] for text nodes.
    pub fn set_attribute(
        &self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        let value = value.into();
        let mut dom = self.inner.dom.write();
        let node = dom.node_mut(id).ok_or_else(|| Error::node_not_found(id))?;
        match &mut node.data {
            NodeData::Element { attributes, .. } => {
                if let Some(entry) = attributes.iter_mut().find(|(k, _)| *k == name) {
                    entry.1 = value;
                } else {
                    attributes.push((name, value));
                }
                Ok(())
            }
            NodeData::Text { .. } => Err(Error::not_an_element(id)),
        }
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.inner
            .dom
            .read()
            .node(id)
            .and_then(|n| n.attribute(name))
            .map(str::to_string)
    }

    /// Adds a class to the element's `class` attribute if not present.
    pub fn add_class(&self, id: NodeId, class_name: &str) -> Result<()> {
        if self.has_class(id, class_name) {
            return Ok(());
        }
        let merged = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class_name}"),
            _ => class_name.to_string(),
        };
        self.set_attribute(id, "class", merged)
    }

    /// Removes a class from the element's `class` attribute.
    pub fn remove_class(&self, id: NodeId, class_name: &str) -> Result<()> {
        let Some(existing) = self.attribute(id, "class") else {
            // Nothing to remove, but still surface text-node misuse.
            return match self.is_element(id) {
                true => Ok(()),
                false => Err(Error::not_an_element(id)),
            };
        };
        let remaining = existing
            .split_whitespace()
            .filter(|c| *c != class_name)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", remaining)
    }

    /// Returns `true` if the element carries the class.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
        self.inner
            .dom
            .read()
            .node(id)
            .is_some_and(|n| n.has_class(class_name))
    }

    /// Returns the element tag, or `None` for text nodes and unknown IDs.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.inner
            .dom
            .read()
            .node(id)
            .and_then(|n| n.tag())
            .map(str::to_string)
    }

    /// Returns `true` if the node exists and is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.inner.dom.read().node(id).is_some_and(Node::is_element)
    }

    /// Returns a text node's content, or `None` for elements.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<String> {
        let dom = self.inner.dom.read();
        match dom.node(id).map(|n| &n.data) {
            Some(NodeData::Text { content }) => Some(content.clone()),
            _ => None,
        }
    }

    /// Concatenated text of the node's subtree, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.inner.dom.read().collect_text(id, &mut out);
        out
    }
}

// ============================================================================
// Document - Traversal
// ============================================================================

impl Document {
    /// Returns the node's parent, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.inner.dom.read().node(id).and_then(|n| n.parent)
    }

    /// Returns the node's children in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.inner
            .dom
            .read()
            .node(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if `node` is `ancestor` or lies inside its subtree.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.inner.dom.read().contains(ancestor, node)
    }

    /// Snapshot of all text nodes under `root`, depth-first preorder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `root` does not exist.
    pub fn collect_text_nodes(&self, root: NodeId) -> Result<Vec<NodeId>> {
        let dom = self.inner.dom.read();
        if dom.node(root).is_none() {
            return Err(Error::node_not_found(root));
        }
        let mut out = Vec::new();
        dom.collect_text_nodes(root, &mut out);
        Ok(out)
    }
}

// ============================================================================
// Document - Queries
// ============================================================================

impl Document {
    /// Finds the first matching node, depth-first preorder from the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] for malformed selector text.
    pub fn query_selector(&self, by: &By) -> Result<Option<NodeId>> {
        let root = self.root();
        self.query_selector_in(root, by)
    }

    /// Finds the first matching node within `root`'s subtree.
    pub fn query_selector_in(&self, root: NodeId, by: &By) -> Result<Option<NodeId>> {
        let selector = by.compile()?;
        Ok(self.first_match(root, &selector))
    }

    /// Finds all matching nodes, depth-first preorder from the root.
    pub fn query_selector_all(&self, by: &By) -> Result<Vec<NodeId>> {
        let selector = by.compile()?;
        Ok(self.all_matches(self.root(), &selector))
    }

    pub(crate) fn first_match(&self, root: NodeId, selector: &CompiledSelector) -> Option<NodeId> {
        let dom = self.inner.dom.read();
        let mut out = Vec::with_capacity(1);
        dom.collect_matches(root, selector, true, &mut out);
        out.into_iter().next()
    }

    pub(crate) fn all_matches(&self, root: NodeId, selector: &CompiledSelector) -> Vec<NodeId> {
        let dom = self.inner.dom.read();
        let mut out = Vec::new();
        dom.collect_matches(root, selector, false, &mut out);
        out
    }
}

// ============================================================================
// Document - Serialization & Watching
// ============================================================================

impl Document {
    /// Serializes the node's subtree as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node does not exist.
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        let dom = self.inner.dom.read();
        if dom.node(id).is_none() {
            return Err(Error::node_not_found(id));
        }
        let mut out = String::new();
        write_html(&dom, id, &mut out);
        Ok(out)
    }

    /// Serializes the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        let dom = self.inner.dom.read();
        let mut out = String::new();
        write_html(&dom, dom.root, &mut out);
        out
    }

    /// Subscribes to the structural mutation stream.
    #[must_use]
    pub fn watch(&self) -> broadcast::Receiver<MutationRecord> {
        self.inner.mutations.subscribe()
    }

    /// Number of live mutation subscribers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.inner.mutations.receiver_count()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::mutation::MutationKind;
    use super::*;

    fn paragraph(doc: &Document, text: &str) -> NodeId {
        let p = doc.create_element("p");
        let t = doc.create_text(text);
        doc.append_child(p, t).unwrap();
        p
    }

    #[test]
    fn test_new_document_has_html_root() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.root()).as_deref(), Some("html"));
        assert_eq!(doc.to_html(), "<html></html>");
    }

    #[test]
    fn test_append_and_text_content() {
        let doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        let p = paragraph(&doc, "hello");
        doc.append_child(body, p).unwrap();

        assert_eq!(doc.parent(p), Some(body));
        assert_eq!(doc.text_content(body), "hello");
        assert_eq!(doc.to_html(), "<html><body><p>hello</p></body></html>");
    }

    #[test]
    fn test_append_to_text_node_fails() {
        let doc = Document::new();
        let t = doc.create_text("x");
        let p = doc.create_element("p");
        let err = doc.append_child(t, p).unwrap_err();
        assert!(matches!(err, Error::NotAnElement { .. }));
    }

    #[test]
    fn test_append_cycle_refused() {
        let doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();
        let err = doc.append_child(inner, outer).unwrap_err();
        assert!(matches!(err, Error::Cycle { .. }));
    }

    #[test]
    fn test_append_moves_attached_child() {
        let doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(a, child).unwrap();
        doc.append_child(b, child).unwrap();

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), vec![child]);
        assert_eq!(doc.parent(child), Some(b));
    }

    #[test]
    fn test_splice_preserves_order() {
        let doc = Document::new();
        let p = doc.create_element("p");
        let before = doc.create_text("a");
        let target = doc.create_text("b");
        let after = doc.create_text("c");
        doc.append_child(p, before).unwrap();
        doc.append_child(p, target).unwrap();
        doc.append_child(p, after).unwrap();

        let x = doc.create_text("x");
        let y = doc.create_text("y");
        doc.splice_child(p, target, vec![x, y]).unwrap();

        assert_eq!(doc.children(p), vec![before, x, y, after]);
        assert_eq!(doc.outer_html(p).unwrap(), "<p>axyc</p>");
        assert_eq!(doc.parent(target), None);
    }

    #[test]
    fn test_splice_sibling_into_place() {
        // A replacement that is already a sibling of the old child moves
        // rather than duplicating, and the stale-position case must not
        // corrupt the child list.
        let doc = Document::new();
        let p = doc.create_element("p");
        let a = doc.create_text("x");
        let b = doc.create_text("y");
        doc.append_child(p, a).unwrap();
        doc.append_child(p, b).unwrap();

        doc.splice_child(p, b, vec![a]).unwrap();

        assert_eq!(doc.children(p), vec![a]);
        assert_eq!(doc.parent(a), Some(p));
        assert_eq!(doc.parent(b), None);
        assert_eq!(doc.outer_html(p).unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_splice_earlier_child_with_later_sibling() {
        let doc = Document::new();
        let p = doc.create_element("p");
        let a = doc.create_text("x");
        let b = doc.create_text("y");
        let c = doc.create_text("z");
        doc.append_child(p, a).unwrap();
        doc.append_child(p, b).unwrap();
        doc.append_child(p, c).unwrap();

        doc.splice_child(p, a, vec![c]).unwrap();

        assert_eq!(doc.children(p), vec![c, b]);
        assert_eq!(doc.outer_html(p).unwrap(), "<p>zy</p>");
    }

    #[test]
    fn test_splice_stale_child_fails() {
        let doc = Document::new();
        let p = doc.create_element("p");
        let stray = doc.create_text("b");
        let err = doc.splice_child(p, stray, vec![]).unwrap_err();
        assert!(matches!(err, Error::NotAChild { .. }));
    }

    #[test]
    fn test_query_selector_preorder_first() {
        let doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        let first = doc.create_element("article");
        let second = doc.create_element("article");
        doc.append_child(body, first).unwrap();
        doc.append_child(body, second).unwrap();

        assert_eq!(doc.query_selector(&By::tag("article")).unwrap(), Some(first));
        assert_eq!(
            doc.query_selector_all(&By::tag("article")).unwrap(),
            vec![first, second]
        );
    }

    #[test]
    fn test_query_by_id_and_class() {
        let doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "content").unwrap();
        doc.set_attribute(div, "class", "main-content wide").unwrap();
        doc.append_child(doc.root(), div).unwrap();

        assert_eq!(doc.query_selector(&By::css("#content")).unwrap(), Some(div));
        assert_eq!(
            doc.query_selector(&By::css(".main-content")).unwrap(),
            Some(div)
        );
        assert_eq!(
            doc.query_selector(&By::css("div.main-content.wide")).unwrap(),
            Some(div)
        );
        assert_eq!(doc.query_selector(&By::css(".missing")).unwrap(), None);
    }

    #[test]
    fn test_mutation_records_emitted() {
        let doc = Document::new();
        let mut rx = doc.watch();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();

        let record = rx.try_recv().unwrap();
        assert_eq!(record.kind, MutationKind::ChildInserted);
        assert_eq!(record.target, doc.root());
        assert_eq!(record.node, body);
    }

    #[test]
    fn test_attribute_edit_is_silent() {
        let doc = Document::new();
        let mut rx = doc.watch();
        let div = doc.create_element("div");
        doc.append_child(doc.root(), div).unwrap();
        rx.try_recv().unwrap();

        doc.set_attribute(div, "class", "x").unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_add_remove_class() {
        let doc = Document::new();
        let span = doc.create_element("span");
        doc.add_class(span, "highlighted").unwrap();
        doc.add_class(span, "highlight-active").unwrap();
        doc.add_class(span, "highlighted").unwrap();
        assert_eq!(
            doc.attribute(span, "class").as_deref(),
            Some("highlighted highlight-active")
        );

        doc.remove_class(span, "highlight-active").unwrap();
        assert_eq!(doc.attribute(span, "class").as_deref(), Some("highlighted"));
    }

    #[test]
    fn test_contains() {
        let doc = Document::new();
        let body = doc.create_element("body");
        let p = paragraph(&doc, "x");
        doc.append_child(doc.root(), body).unwrap();
        doc.append_child(body, p).unwrap();

        assert!(doc.contains(doc.root(), p));
        assert!(doc.contains(body, p));
        assert!(!doc.contains(p, body));
    }

    #[test]
    fn test_collect_text_nodes_order() {
        let doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        let p1 = paragraph(&doc, "one");
        let p2 = paragraph(&doc, "two");
        doc.append_child(body, p1).unwrap();
        doc.append_child(body, p2).unwrap();

        let nodes = doc.collect_text_nodes(body).unwrap();
        let texts: Vec<_> = nodes.iter().map(|n| doc.text(*n).unwrap()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }
}
