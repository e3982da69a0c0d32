//! External extraction/explanation service boundary.
//!
//! The core never talks to a network itself: it calls an [`ExplainService`]
//! and leaves transport to the implementation. [`ServiceRelay`] is the
//! bundled implementation, routing JSON action payloads to a
//! [`RelayBackend`] over an in-process channel with per-request replies and
//! timeouts.
//!
//! Wire shapes:
//!
//! | Exchange | Request | Response |
//! |----------|---------|----------|
//! | Keyword extraction | `{"text": …}` | `{"keywords": […]}` |
//! | Explanation | `{"keyword": …}` | `{"explanation": …}` |
//! | Failure | — | `{"error": …}` |

// ============================================================================
// Submodules
// ============================================================================

/// In-process action relay.
mod relay;

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// Re-exports
// ============================================================================

pub use relay::{RelayBackend, ServiceRelay, ACTION_EXTRACT_KEYWORDS, ACTION_GET_EXPLANATION};

// ============================================================================
// ExplainService
// ============================================================================

/// Asynchronous keyword-extraction and explanation collaborator.
///
/// Failures are reported as errors; the caller degrades by leaving the page
/// unhighlighted or the explanation view empty. No retry policy exists here
/// and implementations should not assume one.
#[async_trait]
pub trait ExplainService: Send + Sync {
    /// Extracts keywords from page text.
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>>;

    /// Fetches an explanation for one keyword.
    async fn explain(&self, keyword: &str) -> Result<String>;
}

// ============================================================================
// Wire Types
// ============================================================================

/// Keyword extraction request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Page text to extract keywords from.
    pub text: String,
}

/// Keyword extraction response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Extracted keywords.
    pub keywords: Vec<String>,
}

/// Explanation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainRequest {
    /// Keyword to explain.
    pub keyword: String,
}

/// Explanation response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    /// Explanation text.
    pub explanation: String,
}

/// Error reply from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFailure {
    /// Failure description.
    pub error: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_wire_shape() {
        let request = ExtractRequest {
            text: "The cat sat.".into(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"text":"The cat sat."}"#);
    }

    #[test]
    fn test_extract_response_roundtrip() {
        let json = r#"{"keywords":["cat","mat"]}"#;
        let response: ExtractResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.keywords, vec!["cat", "mat"]);
    }

    #[test]
    fn test_explain_wire_shapes() {
        let request = ExplainRequest {
            keyword: "cat".into(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"keyword":"cat"}"#
        );

        let response: ExplainResponse =
            serde_json::from_str(r#"{"explanation":"A small felid."}"#).unwrap();
        assert_eq!(response.explanation, "A small felid.");
    }
}
