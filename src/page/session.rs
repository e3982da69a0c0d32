//! Page annotation orchestration.
//!
//! [`PageSession`] ties the pieces together: wait for the body, locate the
//! content container, fetch keywords, highlight, and answer marker
//! activations and text selections with explanations handed to the injected
//! presenter.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::dom::{By, Document};
use crate::error::{Error, Result};
use crate::highlight::{HighlightConfig, Highlighter};
use crate::identifiers::NodeId;
use crate::present::{Anchor, Presenter};
use crate::service::ExplainService;
use crate::wait::{ReadinessQuery, WaitOptions};

use super::locator::ContentLocator;

// ============================================================================
// SessionConfig
// ============================================================================

/// Session configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Bound on waiting for the body. `None` waits indefinitely.
    pub body_timeout: Option<Duration>,

    /// Highlighter configuration.
    pub highlight: HighlightConfig,

    /// Content container candidates.
    pub locator: ContentLocator,
}

impl SessionConfig {
    /// Creates the default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the body wait.
    #[inline]
    #[must_use]
    pub fn with_body_timeout(mut self, timeout: Duration) -> Self {
        self.body_timeout = Some(timeout);
        self
    }

    /// Sets the highlighter configuration.
    #[inline]
    #[must_use]
    pub fn with_highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    /// Sets the content locator.
    #[inline]
    #[must_use]
    pub fn with_locator(mut self, locator: ContentLocator) -> Self {
        self.locator = locator;
        self
    }
}

// ============================================================================
// PageSession
// ============================================================================

/// One page's annotation lifecycle.
///
/// Owns the document handle, the extraction/explanation service, and the
/// injected presenter. A single `annotate` pass is expected; overlapping
/// passes on the same session must be serialized by the caller.
///
/// # Example
///
/// ```ignore
/// let session = PageSession::new(doc, service, presenter);
/// let markers = session.annotate().await?;
/// for marker in markers {
///     session.activate_marker(marker).await?;
/// }
/// ```
pub struct PageSession {
    document: Document,
    service: Arc<dyn ExplainService>,
    presenter: Arc<dyn Presenter>,
    config: SessionConfig,
    markers: Mutex<Vec<NodeId>>,
}

// ============================================================================
// PageSession - Constructors
// ============================================================================

impl PageSession {
    /// Creates a session with default configuration.
    #[must_use]
    pub fn new(
        document: Document,
        service: Arc<dyn ExplainService>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self::with_config(document, service, presenter, SessionConfig::default())
    }

    /// Creates a session with explicit configuration.
    #[must_use]
    pub fn with_config(
        document: Document,
        service: Arc<dyn ExplainService>,
        presenter: Arc<dyn Presenter>,
        config: SessionConfig,
    ) -> Self {
        Self {
            document,
            service,
            presenter,
            config,
            markers: Mutex::new(Vec::new()),
        }
    }

    /// Returns the session's document handle.
    #[inline]
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Marker spans inserted by the last annotate pass.
    #[must_use]
    pub fn markers(&self) -> Vec<NodeId> {
        self.markers.lock().clone()
    }
}

// ============================================================================
// PageSession - Annotation
// ============================================================================

impl PageSession {
    /// Runs the annotation pass: wait for body, locate the container,
    /// extract keywords, highlight.
    ///
    /// Degrades to no markers when the container has no text or the service
    /// returns no keywords. A service failure propagates and leaves the page
    /// unhighlighted; there is no retry.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if the body never appears within the bound
    /// - service errors from keyword extraction
    pub async fn annotate(&self) -> Result<Vec<NodeId>> {
        let wait = match self.config.body_timeout {
            Some(timeout) => WaitOptions::new().with_timeout(timeout),
            None => WaitOptions::default(),
        };
        self.document
            .wait_for(ReadinessQuery::one(By::tag("body")), wait)
            .await?;

        let container = self.config.locator.locate(&self.document);
        let text = self.document.text_content(container);
        if text.trim().is_empty() {
            debug!(%container, "content container has no text, nothing to annotate");
            return Ok(Vec::new());
        }

        let keywords = self.service.extract_keywords(&text).await.inspect_err(
            |error| warn!(%error, "keyword extraction failed, leaving page unhighlighted"),
        )?;
        debug!(count = keywords.len(), "keywords extracted");

        let markers =
            Highlighter::new(self.config.highlight.clone()).highlight(
                &self.document,
                container,
                &keywords,
            )?;

        *self.markers.lock() = markers.clone();
        Ok(markers)
    }
}

// ============================================================================
// PageSession - Interaction
// ============================================================================

impl PageSession {
    /// Requests an explanation for a marker's exact text and shows it
    /// anchored at the marker.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] if the marker is unknown to the document
    /// - service errors from the explanation request
    pub async fn activate_marker(&self, marker: NodeId) -> Result<()> {
        if !self.document.is_element(marker) {
            return Err(Error::node_not_found(marker));
        }
        let term = self.document.text_content(marker);
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }

        let explanation = self.service.explain(term).await?;
        self.presenter
            .show_explanation(&explanation, &Anchor::Node(marker));
        Ok(())
    }

    /// Requests an explanation for selected text and shows it at the
    /// selection point. An empty selection is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates service errors; the explanation view is simply left empty.
    pub async fn explain_selection(&self, selection: &str, x: f64, y: f64) -> Result<()> {
        let term = selection.trim();
        if term.is_empty() {
            return Ok(());
        }

        let explanation = self.service.explain(term).await?;
        self.presenter
            .show_explanation(&explanation, &Anchor::Point { x, y });
        Ok(())
    }

    /// Toggles the hover-state class on a marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAnElement`] for text nodes.
    pub fn set_marker_hover(&self, marker: NodeId, hovered: bool) -> Result<()> {
        if hovered {
            self.document
                .add_class(marker, &self.config.highlight.hover_class)
        } else {
            self.document
                .remove_class(marker, &self.config.highlight.hover_class)
        }
    }

    /// Hides the presenter.
    pub fn dismiss(&self) {
        self.presenter.hide();
    }
}

// ============================================================================
// Tests
// ============================================================================
