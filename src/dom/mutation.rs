//! Structural change notifications.
//!
//! Every structural edit to a [`Document`](super::Document) emits a
//! [`MutationRecord`] on a broadcast channel. Attribute and character-data
//! edits do not notify; readiness waiting only cares about child insertion
//! and removal.

use crate::identifiers::NodeId;

// ============================================================================
// MutationKind
// ============================================================================

/// The kind of structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// A child node was inserted under `target`.
    ChildInserted,

    /// A child node was removed from under `target`.
    ChildRemoved,
}

// ============================================================================
// MutationRecord
// ============================================================================

/// One structural change.
///
/// `target` is the parent whose child list changed; `node` is the child that
/// was inserted or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRecord {
    /// Change kind.
    pub kind: MutationKind,

    /// Parent whose child list changed.
    pub target: NodeId,

    /// The inserted or removed child.
    pub node: NodeId,
}

impl MutationRecord {
    /// Creates an insertion record.
    #[inline]
    #[must_use]
    pub(crate) fn inserted(target: NodeId, node: NodeId) -> Self {
        Self {
            kind: MutationKind::ChildInserted,
            target,
            node,
        }
    }

    /// Creates a removal record.
    #[inline]
    #[must_use]
    pub(crate) fn removed(target: NodeId, node: NodeId) -> Self {
        Self {
            kind: MutationKind::ChildRemoved,
            target,
            node,
        }
    }
}
