//! In-memory document model.
//!
//! This module provides the mutable DOM substrate the waiter and highlighter
//! operate on:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Document`] | Shared node arena with structural change notifications |
//! | [`By`] | Node locator (simple selectors) |
//! | [`MutationRecord`] | One structural change on the broadcast stream |
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
//! assert_eq!(doc.query_selector(&By::tag("body")).unwrap(), Some(body));
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Shared document handle and arena.
mod document;

/// Structural change records.
mod mutation;

/// Arena node entries.
mod node;

/// Node locator strategies.
mod selector;

/// HTML serialization.
mod serialize;

// ============================================================================
// Re-exports
// ============================================================================

pub use document::Document;
pub use mutation::{MutationKind, MutationRecord};
pub use selector::By;

pub(crate) use selector::CompiledSelector;
