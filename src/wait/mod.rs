//! Readiness waiting.
//!
//! [`Document::wait_for`] resolves once a DOM condition becomes true:
//! immediate evaluation first, then re-evaluation on every structural change
//! notification, with an optional timeout.
//!
//! | Query | Ready when |
//! |-------|------------|
//! | [`ReadinessQuery::One`] | a node matches the locator |
//! | [`ReadinessQuery::All`] | the match set is non-empty (all matches returned) |
//! | [`ReadinessQuery::Custom`] | the predicate returns `Some` of a non-empty set |
//!
//! # Example
//!
//! ```
//! use keymark::{By, Document, ReadinessQuery, WaitOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> keymark::Result<()> {
//! let doc = Document::new();
//!
//! let waiter = {
//!     let doc = doc.clone();
//!     tokio::spawn(async move {
//!         doc.wait_for(ReadinessQuery::one(By::tag("body")), WaitOptions::default())
//!             .await
//!     })
//! };
//!
//! let body = doc.create_element("body");
//! doc.append_child(doc.root(), body)?;
//!
//! let ready = waiter.await.expect("task").expect("ready");
//! assert_eq!(ready.node(), Some(body));
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::dom::{By, CompiledSelector, Document, MutationRecord};
use crate::error::{Error, Result};
use crate::identifiers::NodeId;

// ============================================================================
// ReadinessQuery
// ============================================================================

/// Predicate form of a readiness query.
///
/// Receives the mutation record that triggered re-evaluation, or `None` on
/// the immediate check. Returns `Some` of the ready node set, or `None` when
/// not yet ready. A predicate that cannot evaluate should return `None`;
/// predicate failures are never fatal to the wait.
pub type ReadinessPredicate =
    Box<dyn Fn(&Document, Option<&MutationRecord>) -> Option<Vec<NodeId>> + Send + Sync>;

/// A condition describing what document state to wait for.
///
/// Exactly one shape is active per call, mirroring the three getter forms of
/// an element-ready helper: single selector, selector-for-all, or a custom
/// predicate.
pub enum ReadinessQuery {
    /// Ready when a single node matches the locator.
    One(By),

    /// Ready when at least one node matches; resolves with all matches.
    All(By),

    /// Ready when the predicate returns a non-empty node set.
    Custom(ReadinessPredicate),
}

impl ReadinessQuery {
    /// Creates a single-node query.
    #[inline]
    pub fn one(by: impl Into<By>) -> Self {
        Self::One(by.into())
    }

    /// Creates an all-matches query.
    #[inline]
    pub fn all(by: impl Into<By>) -> Self {
        Self::All(by.into())
    }

    /// Creates a custom predicate query.
    #[inline]
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Document, Option<&MutationRecord>) -> Option<Vec<NodeId>> + Send + Sync + 'static,
    {
        Self::Custom(Box::new(predicate))
    }
}

impl fmt::Display for ReadinessQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(by) => write!(f, "waitFor({by})"),
            Self::All(by) => write!(f, "waitForAll({by})"),
            Self::Custom(_) => write!(f, "waitFor(<predicate>)"),
        }
    }
}

impl fmt::Debug for ReadinessQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

// ============================================================================
// ReadyMatch
// ============================================================================

/// The resolved value of a readiness wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyMatch {
    /// Single matching node ([`ReadinessQuery::One`]).
    One(NodeId),

    /// All matching nodes ([`ReadinessQuery::All`] / [`ReadinessQuery::Custom`]).
    Many(Vec<NodeId>),
}

impl ReadyMatch {
    /// Returns the single node, or the first of many.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::One(id) => Some(*id),
            Self::Many(ids) => ids.first().copied(),
        }
    }

    /// Returns all matched nodes.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        match self {
            Self::One(id) => vec![*id],
            Self::Many(ids) => ids.clone(),
        }
    }
}

// ============================================================================
// WaitOptions
// ============================================================================

/// Options for [`Document::wait_for`].
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    /// Maximum time to wait. `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// Subtree whose mutations wake the waiter. Defaults to the document
    /// root. Queries always evaluate against the whole document.
    pub observed_root: Option<NodeId>,
}

impl WaitOptions {
    /// Creates default options: unbounded wait, root-scoped observation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Restricts which subtree's mutations wake the waiter.
    #[inline]
    #[must_use]
    pub fn with_observed_root(mut self, root: NodeId) -> Self {
        self.observed_root = Some(root);
        self
    }
}

// ============================================================================
// Compiled query
// ============================================================================

/// Query with selectors compiled up front, so selector errors surface before
/// any waiting happens.
enum Eval {
    One(CompiledSelector),
    All(CompiledSelector),
    Custom(ReadinessPredicate),
}

impl Eval {
    fn compile(query: ReadinessQuery) -> Result<Self> {
        match query {
            ReadinessQuery::One(by) => Ok(Self::One(by.compile()?)),
            ReadinessQuery::All(by) => Ok(Self::All(by.compile()?)),
            ReadinessQuery::Custom(predicate) => Ok(Self::Custom(predicate)),
        }
    }

    /// Evaluates against current document state.
    fn check(&self, doc: &Document, record: Option<&MutationRecord>) -> Option<ReadyMatch> {
        match self {
            Self::One(selector) => doc.first_match(doc.root(), selector).map(ReadyMatch::One),
            Self::All(selector) => {
                let nodes = doc.all_matches(doc.root(), selector);
                if nodes.is_empty() {
                    None
                } else {
                    Some(ReadyMatch::Many(nodes))
                }
            }
            Self::Custom(predicate) => predicate(doc, record).and_then(|nodes| {
                if nodes.is_empty() {
                    None
                } else {
                    Some(ReadyMatch::Many(nodes))
                }
            }),
        }
    }
}

// ============================================================================
// Document - Readiness Waiting
// ============================================================================

impl Document {
    /// Waits until `query` is satisfied.
    ///
    /// Evaluates immediately; if already satisfied, resolves without
    /// subscribing to the mutation stream at all. Otherwise subscribes and
    /// re-evaluates on every structural change under the observed root. The
    /// subscription is dropped exactly once, on resolution or timeout.
    ///
    /// A never-satisfied query with no timeout waits indefinitely.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSelector`] if the query's selector is malformed
    /// - [`Error::Timeout`] if `options.timeout` elapses first
    /// - [`Error::DocumentClosed`] if the mutation stream closes mid-wait
    ///
    /// # Example
    ///
    /// ```ignore
    /// let body = doc
    ///     .wait_for(ReadinessQuery::one(By::tag("body")), WaitOptions::default())
    ///     .await?;
    /// ```
    pub async fn wait_for(&self, query: ReadinessQuery, options: WaitOptions) -> Result<ReadyMatch> {
        let describe = query.to_string();
        let eval = Eval::compile(query)?;

        if let Some(ready) = eval.check(self, None) {
            trace!(query = %describe, "ready immediately");
            return Ok(ready);
        }

        let mut rx = self.watch();
        let observed_root = options.observed_root.unwrap_or_else(|| self.root());
        let timeout_ms = options.timeout.map_or(0, |d| d.as_millis() as u64);
        let deadline = options.timeout.map(|d| Instant::now() + d);

        debug!(query = %describe, timeout_ms, %observed_root, "waiting for readiness");

        loop {
            let received = match deadline {
                Some(at) => match tokio::time::timeout_at(at, rx.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        debug!(query = %describe, timeout_ms, "readiness wait timed out");
                        return Err(Error::timeout(describe, timeout_ms));
                    }
                },
                None => rx.recv().await,
            };

            match received {
                Ok(record) => {
                    if !self.contains(observed_root, record.target) {
                        continue;
                    }
                    if let Some(ready) = eval.check(self, Some(&record)) {
                        trace!(query = %describe, "ready");
                        return Ok(ready);
                    }
                }
                // Backlog overflow: state may have changed arbitrarily,
                // re-evaluate without a triggering record.
                Err(RecvError::Lagged(_)) => {
                    if let Some(ready) = eval.check(self, None) {
                        return Ok(ready);
                    }
                }
                Err(RecvError::Closed) => return Err(Error::DocumentClosed),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use futures_util::FutureExt;

    fn doc_with_body() -> (Document, NodeId) {
        let doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        (doc, body)
    }

    #[tokio::test]
    async fn test_immediate_satisfaction_without_subscription() {
        let (doc, body) = doc_with_body();

        // Already-true condition resolves synchronously: the future completes
        // on the first poll and no mutation subscription is ever created.
        let ready = doc
            .wait_for(ReadinessQuery::one(By::tag("body")), WaitOptions::default())
            .now_or_never()
            .expect("resolves on first poll")
            .expect("ready");

        assert_eq!(ready, ReadyMatch::One(body));
        assert_eq!(doc.watcher_count(), 0);
    }

    #[tokio::test]
    async fn test_resolves_on_later_mutation() {
        let doc = Document::new();
        let waiter = {
            let doc = doc.clone();
            tokio::spawn(async move {
                doc.wait_for(ReadinessQuery::one(By::css("#content")), WaitOptions::default())
                    .await
            })
        };

        // Unrelated mutation first, then the one that satisfies the query.
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "content").unwrap();
        doc.append_child(body, div).unwrap();

        let ready = waiter.await.unwrap().unwrap();
        assert_eq!(ready, ReadyMatch::One(div));
    }

    #[tokio::test]
    async fn test_single_resolution_under_notification_burst() {
        let doc = Document::new();
        let waiter = {
            let doc = doc.clone();
            tokio::spawn(async move {
                doc.wait_for(ReadinessQuery::all(By::tag("p")), WaitOptions::default())
                    .await
            })
        };

        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();
        for _ in 0..5 {
            let p = doc.create_element("p");
            doc.append_child(body, p).unwrap();
        }

        // Resolves exactly once with the set as of whichever notification it
        // evaluated; later insertions cause no further state change.
        let ready = waiter.await.unwrap().unwrap();
        assert!(!ready.nodes().is_empty());
        assert_eq!(doc.watcher_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_rejects_and_names_query() {
        let (doc, _) = doc_with_body();

        let err = doc
            .wait_for(
                ReadinessQuery::one(By::css("#never")),
                WaitOptions::new().with_timeout(Duration::from_millis(250)),
            )
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        let message = err.to_string();
        assert!(message.contains("css:#never"), "got: {message}");
        assert!(message.contains("250ms"), "got: {message}");
        assert_eq!(doc.watcher_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_wait_outlives_timeouted_sibling() {
        let (doc, _) = doc_with_body();

        let unbounded = {
            let doc = doc.clone();
            tokio::spawn(async move {
                doc.wait_for(ReadinessQuery::one(By::css("#late")), WaitOptions::default())
                    .await
            })
        };

        // A sibling wait with a timeout fails without disturbing the other.
        let err = doc
            .wait_for(
                ReadinessQuery::one(By::css("#late")),
                WaitOptions::new().with_timeout(Duration::from_millis(10)),
            )
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "late").unwrap();
        doc.append_child(doc.root(), div).unwrap();

        let ready = unbounded.await.unwrap().unwrap();
        assert_eq!(ready, ReadyMatch::One(div));
    }

    #[tokio::test]
    async fn test_all_matches_resolves_with_full_set() {
        let doc = Document::new();
        let waiter = {
            let doc = doc.clone();
            tokio::spawn(async move {
                doc.wait_for(ReadinessQuery::all(By::class("kw")), WaitOptions::default())
                    .await
            })
        };

        let body = doc.create_element("body");
        let a = doc.create_element("span");
        let b = doc.create_element("span");
        doc.set_attribute(a, "class", "kw").unwrap();
        doc.set_attribute(b, "class", "kw").unwrap();
        doc.append_child(body, a).unwrap();
        doc.append_child(body, b).unwrap();
        // Both spans arrive with the body in one subtree attachment.
        doc.append_child(doc.root(), body).unwrap();

        let ready = waiter.await.unwrap().unwrap();
        assert_eq!(ready, ReadyMatch::Many(vec![a, b]));
    }

    #[tokio::test]
    async fn test_custom_predicate_not_ready_is_not_fatal() {
        let doc = Document::new();
        let waiter = {
            let doc = doc.clone();
            tokio::spawn(async move {
                doc.wait_for(
                    // Predicate "fails" (returns None) until a second child
                    // exists; failures are swallowed as not-ready.
                    ReadinessQuery::custom(|doc, _record| {
                        let children = doc.children(doc.root());
                        if children.len() >= 2 {
                            Some(children)
                        } else {
                            None
                        }
                    }),
                    WaitOptions::default(),
                )
                .await
            })
        };

        let a = doc.create_element("div");
        doc.append_child(doc.root(), a).unwrap();
        let b = doc.create_element("div");
        doc.append_child(doc.root(), b).unwrap();

        let ready = waiter.await.unwrap().unwrap();
        assert_eq!(ready.nodes().len(), 2);
    }

    #[tokio::test]
    async fn test_observed_root_filters_unrelated_mutations() {
        let doc = Document::new();
        let body = doc.create_element("body");
        let sidebar = doc.create_element("aside");
        let main = doc.create_element("main");
        doc.append_child(doc.root(), body).unwrap();
        doc.append_child(body, sidebar).unwrap();
        doc.append_child(body, main).unwrap();

        let waiter = {
            let doc = doc.clone();
            tokio::spawn(async move {
                doc.wait_for(
                    ReadinessQuery::one(By::tag("p")),
                    WaitOptions::new().with_observed_root(main),
                )
                .await
            })
        };

        // Mutating the sidebar does not wake the waiter; the paragraph there
        // is only observed once something changes under `main`.
        let stray = doc.create_element("p");
        doc.append_child(sidebar, stray).unwrap();
        let inside = doc.create_element("p");
        doc.append_child(main, inside).unwrap();

        // Query still evaluates document-wide, so preorder finds the sidebar
        // paragraph first once woken.
        let ready = waiter.await.unwrap().unwrap();
        assert_eq!(ready, ReadyMatch::One(stray));
    }

    #[tokio::test]
    async fn test_invalid_selector_fails_fast() {
        let doc = Document::new();
        let err = doc
            .wait_for(ReadinessQuery::one(By::css("div p")), WaitOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSelector { .. }));
    }
}
