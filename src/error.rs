//! Error types for keymark.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use keymark::{By, Result};
//!
//! fn example(doc: &keymark::Document) -> Result<()> {
//!     let container = doc.query_selector(&By::css(".main-content"))?;
//!     println!("{container:?}");
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidSelector`] |
//! | Document | [`Error::NodeNotFound`], [`Error::NotAnElement`], [`Error::NotAChild`], [`Error::Cycle`] |
//! | Waiting | [`Error::Timeout`], [`Error::DocumentClosed`] |
//! | Service | [`Error::Service`], [`Error::UnknownAction`], [`Error::RequestTimeout`], [`Error::RelayClosed`] |
//! | External | [`Error::Json`], [`Error::Pattern`], [`Error::ChannelClosed`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

use crate::identifiers::{NodeId, RequestId};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when a session or highlighter configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Selector text could not be parsed.
    ///
    /// Returned when a locator contains an unsupported or malformed selector.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector text that failed to parse.
        selector: String,
        /// Description of the parse failure.
        message: String,
    },

    // ========================================================================
    // Document Errors
    // ========================================================================
    /// Node ID does not exist in the document.
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// The missing node's ID.
        node_id: NodeId,
    },

    /// Operation requires an element node but got a text node.
    #[error("Not an element: {node_id}")]
    NotAnElement {
        /// The offending node's ID.
        node_id: NodeId,
    },

    /// Child node is not attached to the given parent.
    ///
    /// Returned by replace/splice operations on a stale child reference.
    #[error("Node {child} is not a child of {parent}")]
    NotAChild {
        /// The parent that was expected to own the child.
        parent: NodeId,
        /// The node that was not found among the parent's children.
        child: NodeId,
    },

    /// Attaching the node would create a cycle.
    #[error("Attaching {node_id} would create a cycle")]
    Cycle {
        /// The node whose attachment was refused.
        node_id: NodeId,
    },

    // ========================================================================
    // Waiting Errors
    // ========================================================================
    /// Readiness wait timed out.
    ///
    /// The only failure mode of [`Document::wait_for`](crate::dom::Document::wait_for):
    /// names the query and the elapsed bound.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the query that never became ready.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Mutation stream closed while waiting.
    ///
    /// Returned when the document is dropped under an active waiter.
    #[error("Document closed")]
    DocumentClosed,

    // ========================================================================
    // Service Errors
    // ========================================================================
    /// Extraction or explanation backend reported a failure.
    #[error("Service error: {message}")]
    Service {
        /// Description reported by the backend.
        message: String,
    },

    /// Relay received an action it does not route.
    #[error("Unknown action: {action}")]
    UnknownAction {
        /// The unrecognized action name.
        action: String,
    },

    /// Relay request timed out.
    #[error("Request {request_id} timed out after {timeout_ms}ms")]
    RequestTimeout {
        /// The request ID that timed out.
        request_id: RequestId,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Relay task is gone; no further requests can be routed.
    #[error("Relay closed")]
    RelayClosed,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Keyword pattern compilation error.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid selector error.
    #[inline]
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Creates a node not found error.
    #[inline]
    pub fn node_not_found(node_id: NodeId) -> Self {
        Self::NodeNotFound { node_id }
    }

    /// Creates a not-an-element error.
    #[inline]
    pub fn not_an_element(node_id: NodeId) -> Self {
        Self::NotAnElement { node_id }
    }

    /// Creates a not-a-child error.
    #[inline]
    pub fn not_a_child(parent: NodeId, child: NodeId) -> Self {
        Self::NotAChild { parent, child }
    }

    /// Creates a cycle error.
    #[inline]
    pub fn cycle(node_id: NodeId) -> Self {
        Self::Cycle { node_id }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a service error.
    #[inline]
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Creates an unknown action error.
    #[inline]
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Creates a request timeout error.
    #[inline]
    pub fn request_timeout(request_id: RequestId, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            request_id,
            timeout_ms,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::RequestTimeout { .. })
    }

    /// Returns `true` if this is a document structure error.
    #[inline]
    #[must_use]
    pub fn is_dom_error(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound { .. }
                | Self::NotAnElement { .. }
                | Self::NotAChild { .. }
                | Self::Cycle { .. }
        )
    }

    /// Returns `true` if this is a service boundary error.
    #[inline]
    #[must_use]
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Self::Service { .. }
                | Self::UnknownAction { .. }
                | Self::RequestTimeout { .. }
                | Self::RelayClosed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
