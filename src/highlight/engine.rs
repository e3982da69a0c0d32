//! Text-node highlighting traversal.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, trace};

use crate::dom::Document;
use crate::error::Result;
use crate::identifiers::NodeId;

use super::pattern::{KeywordPattern, TextRun};
use super::rules::HighlightConfig;

// ============================================================================
// Highlighter
// ============================================================================

/// Rewrites keyword occurrences in a document subtree into marker spans.
///
/// The traversal snapshots all text nodes under the root before mutating, so
/// inserted markers are never revisited: a single call can never highlight
/// its own output, and a later call is stopped by the marker-class ancestor
/// rule.
///
/// # Example
///
/// ```
/// use keymark::{Document, Highlighter};
///
/// let doc = Document::new();
/// let p = doc.create_element("p");
/// let text = doc.create_text("The cat sat.");
/// doc.append_child(p, text).unwrap();
/// doc.append_child(doc.root(), p).unwrap();
///
/// let markers = Highlighter::default()
///     .highlight(&doc, doc.root(), &["cat"])
///     .unwrap();
///
/// assert_eq!(markers.len(), 1);
/// assert_eq!(
///     doc.outer_html(p).unwrap(),
///     r#"<p>The <span class="highlighted">cat</span> sat.</p>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    /// Creates a highlighter with the given configuration.
    #[inline]
    #[must_use]
    pub fn new(config: HighlightConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Highlights every keyword occurrence under `root`, in place.
    ///
    /// Returns the inserted marker span nodes so the caller can wire click
    /// and hover behavior. An empty or all-whitespace keyword list is a
    /// no-op. Runs to completion synchronously; overlapping passes are the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`](crate::Error::NodeNotFound) if `root` does not exist
    /// - [`Error::Pattern`](crate::Error::Pattern) if the keyword alternation fails to compile
    pub fn highlight<S: AsRef<str>>(
        &self,
        doc: &Document,
        root: NodeId,
        keywords: &[S],
    ) -> Result<Vec<NodeId>> {
        let Some(pattern) = KeywordPattern::build(
            keywords,
            self.config.word_boundaries,
            self.config.case_insensitive,
        )?
        else {
            debug!(%root, "no usable keywords, skipping highlight pass");
            return Ok(Vec::new());
        };

        let text_nodes = doc.collect_text_nodes(root)?;
        let mut markers = Vec::new();

        for text_node in text_nodes {
            if !self.config.should_highlight(doc, root, text_node) {
                trace!(node = %text_node, "skipped by ancestor rule");
                continue;
            }
            let Some(content) = doc.text(text_node) else {
                continue;
            };
            if !pattern.is_match(&content) {
                continue;
            }
            let Some(parent) = doc.parent(text_node) else {
                continue;
            };

            let mut replacements = Vec::new();
            for run in pattern.runs(&content) {
                match run {
                    TextRun::Plain(text) => replacements.push(doc.create_text(text)),
                    TextRun::Matched(text) => {
                        let marker = doc.create_element("span");
                        doc.set_attribute(marker, "class", &self.config.marker_class)?;
                        let inner = doc.create_text(text);
                        doc.append_child(marker, inner)?;
                        replacements.push(marker);
                        markers.push(marker);
                    }
                }
            }
            doc.splice_child(parent, text_node, replacements)?;
        }

        debug!(
            %root,
            keywords = pattern.keyword_count(),
            markers = markers.len(),
            "highlight pass complete"
        );
        Ok(markers)
    }
}

// ============================================================================
// Tests
// ============================================================================
