//! keymark - In-memory page keyword annotation.
//!
//! This library implements the reusable core of a page keyword-annotation
//! pipeline over an owned document model:
//!
//! - **Readiness waiting**: [`Document::wait_for`] resolves once a DOM
//!   condition (selector match or custom predicate) becomes true, via an
//!   immediate check followed by mutation-stream subscription and an
//!   optional timeout.
//! - **Keyword highlighting**: [`Highlighter`] rewrites matching text runs
//!   into `<span class="highlighted">` markers, honoring ancestor tag/class
//!   exclusion rules and never recursing into its own insertions.
//! - **Orchestration**: [`PageSession`] runs the full pass (wait for body,
//!   locate the content container, fetch keywords from an
//!   [`ExplainService`], highlight) and answers marker activations with
//!   explanations handed to an injected [`Presenter`].
//!
//! # Quick Start
//!
//! ```
//! use keymark::{Document, Highlighter, Result};
//!
//! fn main() -> Result<()> {
//!     let doc = Document::new();
//!     let p = doc.create_element("p");
//!     let text = doc.create_text("The cat sat.");
//!     doc.append_child(p, text)?;
//!     doc.append_child(doc.root(), p)?;
//!
//!     let markers = Highlighter::default().highlight(&doc, doc.root(), &["cat"])?;
//!     assert_eq!(markers.len(), 1);
//!     assert_eq!(
//!         doc.outer_html(p)?,
//!         r#"<p>The <span class="highlighted">cat</span> sat.</p>"#
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dom`] | Document model: [`Document`], [`By`], mutation stream |
//! | [`wait`] | Readiness queries and waiting |
//! | [`highlight`] | Keyword patterns, ancestor rules, highlight traversal |
//! | [`page`] | Content location and session orchestration |
//! | [`service`] | Extraction/explanation boundary and action relay |
//! | [`present`] | Presenter trait and anchor geometry |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//!
//! # Design Notes
//!
//! - Highlighting is exclusion-by-default: everything is eligible except
//!   subtrees under preformatted/code/script/style/control tags or excluded
//!   classes. The inclusion-list policy is available via
//!   [`AncestorPolicy::IncludeListed`].
//! - Matching is case-insensitive, leftmost-first, non-overlapping, with
//!   word-boundary anchors applied at word-character edges.
//! - A highlight pass runs to completion synchronously; re-running on later
//!   document changes is deliberately out of scope.

// ============================================================================
// Modules
// ============================================================================

/// Document model: arena, locators, mutations, serialization.
pub mod dom;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Keyword highlighting.
pub mod highlight;

/// Type-safe identifiers for document entities.
pub mod identifiers;

/// Content location and page session orchestration.
pub mod page;

/// Presentation boundary.
pub mod present;

/// Extraction/explanation service boundary.
pub mod service;

/// Readiness waiting.
pub mod wait;

// ============================================================================
// Re-exports
// ============================================================================

// Document types
pub use dom::{By, Document, MutationKind, MutationRecord};

// Waiting types
pub use wait::{ReadinessPredicate, ReadinessQuery, ReadyMatch, WaitOptions};

// Highlighting types
pub use highlight::{
    AncestorPolicy, HighlightConfig, Highlighter, KeywordPattern, TextRun, HOVER_CLASS,
    MARKER_CLASS,
};

// Page types
pub use page::{ContentLocator, PageSession, SessionConfig, CONTENT_SELECTORS};

// Service types
pub use service::{
    ExplainRequest, ExplainResponse, ExplainService, ExtractRequest, ExtractResponse,
    RelayBackend, ServiceFailure, ServiceRelay, ACTION_EXTRACT_KEYWORDS, ACTION_GET_EXPLANATION,
};

// Presentation types
pub use present::{Anchor, NoopPresenter, Presenter};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{NodeId, RequestId};
