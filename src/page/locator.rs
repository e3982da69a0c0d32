//! Content container location.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::dom::{By, Document};
use crate::identifiers::NodeId;

// ============================================================================
// Constants
// ============================================================================

/// Default candidate selectors, main-content-like containers first.
pub const CONTENT_SELECTORS: [&str; 4] = [".main-content", "article", ".post-content", "#content"];

// ============================================================================
// ContentLocator
// ============================================================================

/// Chooses the element scoping a highlight pass.
///
/// Tries an ordered candidate list and returns the first match; falls back to
/// `body`, then the document root. Deterministic, no side effects, always
/// returns a node.
///
/// # Example
///
/// ```
/// use keymark::{ContentLocator, Document};
///
/// let doc = Document::new();
/// let body = doc.create_element("body");
/// doc.append_child(doc.root(), body).unwrap();
///
/// // No candidate matches, so the body is chosen.
/// assert_eq!(ContentLocator::default().locate(&doc), body);
/// ```
#[derive(Debug, Clone)]
pub struct ContentLocator {
    candidates: Vec<By>,
}

impl Default for ContentLocator {
    fn default() -> Self {
        Self {
            candidates: CONTENT_SELECTORS.iter().map(|s| By::css(*s)).collect(),
        }
    }
}

impl ContentLocator {
    /// Creates a locator with a custom candidate list, tried in order.
    #[inline]
    #[must_use]
    pub fn new(candidates: Vec<By>) -> Self {
        Self { candidates }
    }

    /// Returns the candidate list.
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[By] {
        &self.candidates
    }

    /// Locates the content container.
    #[must_use]
    pub fn locate(&self, doc: &Document) -> NodeId {
        for by in &self.candidates {
            match doc.query_selector(by) {
                Ok(Some(found)) => {
                    debug!(selector = %by, node = %found, "content container found");
                    return found;
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(selector = %by, %error, "skipping malformed candidate selector");
                }
            }
        }

        let fallback = doc
            .query_selector(&By::tag("body"))
            .ok()
            .flatten()
            .unwrap_or_else(|| doc.root());
        debug!(node = %fallback, "no content container matched, using fallback");
        fallback
    }
}

// ============================================================================
// Tests
// ============================================================================
