//! Keyword highlighting.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Highlighter`] | Text-node traversal inserting marker spans |
//! | [`HighlightConfig`] | Policy, boundary, case, and class configuration |
//! | [`KeywordPattern`] | Compiled keyword alternation |
//!
//! The ancestor rule is exclusion-by-default; see [`AncestorPolicy`] for the
//! inclusion-list alternative.

// ============================================================================
// Submodules
// ============================================================================

/// Highlight traversal.
mod engine;

/// Keyword alternation patterns.
mod pattern;

/// Ancestor rules and configuration.
mod rules;

// ============================================================================
// Re-exports
// ============================================================================

pub use engine::Highlighter;
pub use pattern::{KeywordPattern, TextRun};
pub use rules::{AncestorPolicy, HighlightConfig, HOVER_CLASS, MARKER_CLASS};
