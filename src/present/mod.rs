//! Presentation boundary.
//!
//! The core only supplies explanation text and anchor geometry; whoever
//! implements [`Presenter`] owns all visual rendering (tooltip, modal,
//! whatever the host UI does). The handle is injected into the session
//! explicitly rather than discovered through a process-wide singleton.

use crate::identifiers::NodeId;

// ============================================================================
// Anchor
// ============================================================================

/// Where an explanation should be shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// A page coordinate, such as the pointer position of a text selection.
    Point {
        /// Horizontal page coordinate.
        x: f64,
        /// Vertical page coordinate.
        y: f64,
    },

    /// A marker node the presenter can position itself against.
    Node(NodeId),
}

// ============================================================================
// Presenter
// ============================================================================

/// Receives explanation text plus an anchor and renders it.
///
/// Implementations decide presentation lifecycle entirely; the core never
/// calls anything beyond these two methods.
pub trait Presenter: Send + Sync {
    /// Shows an explanation near the anchor.
    fn show_explanation(&self, text: &str, anchor: &Anchor);

    /// Hides whatever is currently shown. Idempotent.
    fn hide(&self);
}

// ============================================================================
// NoopPresenter
// ============================================================================

/// Presenter that renders nothing. Useful when a caller only wants markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn show_explanation(&self, _text: &str, _anchor: &Anchor) {}

    fn hide(&self) {}
}
