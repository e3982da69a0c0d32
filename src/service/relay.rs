//! In-process action relay.
//!
//! The page side sends `{action, payload}` requests; a background task routes
//! each to a [`RelayBackend`] and answers on a per-request reply channel.
//! Backends run concurrently, so a slow explanation never blocks a pending
//! extraction.
//!
//! # Example
//!
//! ```ignore
//! struct Backend;
//!
//! #[async_trait]
//! impl RelayBackend for Backend {
//!     async fn handle(&self, action: &str, payload: Value) -> Result<Value> {
//!         match action {
//!             ACTION_EXTRACT_KEYWORDS => { /* call the local service */ }
//!             _ => Err(Error::unknown_action(action)),
//!         }
//!     }
//! }
//!
//! let relay = ServiceRelay::spawn(Backend);
//! let keywords = relay.extract_keywords("page text").await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identifiers::RequestId;

use super::{ExplainRequest, ExplainResponse, ExplainService, ExtractRequest, ExtractResponse};

// ============================================================================
// Constants
// ============================================================================

/// Action name for keyword extraction.
pub const ACTION_EXTRACT_KEYWORDS: &str = "extractKeywords";

/// Action name for fetching an explanation.
pub const ACTION_GET_EXPLANATION: &str = "getExplanation";

/// Default per-request timeout (30 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pending request queue depth.
const RELAY_QUEUE_CAPACITY: usize = 32;

// ============================================================================
// RelayBackend
// ============================================================================

/// Handles relayed actions.
///
/// Implementations own the actual transport to the extraction/explanation
/// service (HTTP endpoint, subprocess, an in-memory stub in tests). Unknown
/// actions must be answered with [`Error::UnknownAction`].
#[async_trait]
pub trait RelayBackend: Send + Sync + 'static {
    /// Handles one action, returning the response payload.
    async fn handle(&self, action: &str, payload: Value) -> Result<Value>;
}

// ============================================================================
// ServiceRelay
// ============================================================================

/// One routed request.
struct RelayRequest {
    request_id: RequestId,
    action: String,
    payload: Value,
    reply: oneshot::Sender<Result<Value>>,
}

/// Client handle to a spawned relay task.
///
/// Cloning shares the same backend. Dropping every handle shuts the relay
/// down once in-flight requests finish.
#[derive(Clone)]
pub struct ServiceRelay {
    tx: mpsc::Sender<RelayRequest>,
    request_timeout: Duration,
}

impl ServiceRelay {
    /// Spawns a relay routing to `backend` with the default request timeout.
    #[must_use]
    pub fn spawn(backend: impl RelayBackend) -> Self {
        Self::spawn_with_timeout(backend, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Spawns a relay with a custom request timeout.
    #[must_use]
    pub fn spawn_with_timeout(backend: impl RelayBackend, request_timeout: Duration) -> Self {
        let (tx, mut rx) = mpsc::channel::<RelayRequest>(RELAY_QUEUE_CAPACITY);
        let backend = Arc::new(backend);

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let backend = Arc::clone(&backend);
                tokio::spawn(async move {
                    debug!(
                        request_id = %request.request_id,
                        action = %request.action,
                        "relay dispatch"
                    );
                    let result = backend.handle(&request.action, request.payload).await;
                    if let Err(error) = &result {
                        warn!(
                            request_id = %request.request_id,
                            action = %request.action,
                            %error,
                            "relay backend failed"
                        );
                    }
                    // Caller may have timed out and dropped the receiver.
                    let _ = request.reply.send(result);
                });
            }
            debug!("relay loop terminated");
        });

        Self {
            tx,
            request_timeout,
        }
    }

    /// Sends one action and awaits its reply.
    ///
    /// # Errors
    ///
    /// - [`Error::RelayClosed`] if the relay task is gone
    /// - [`Error::ChannelClosed`] if the dispatch dropped the reply
    /// - [`Error::RequestTimeout`] if no reply arrives in time
    /// - whatever error the backend reported
    pub async fn request(&self, action: &str, payload: Value) -> Result<Value> {
        let request_id = RequestId::next();
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(RelayRequest {
                request_id,
                action: action.to_string(),
                payload,
                reply: reply_tx,
            })
            .await
            .map_err(|_| Error::RelayClosed)?;

        match timeout(self.request_timeout, reply_rx).await {
            Ok(reply) => reply?,
            Err(_) => Err(Error::request_timeout(
                request_id,
                self.request_timeout.as_millis() as u64,
            )),
        }
    }
}

// ============================================================================
// ServiceRelay - ExplainService
// ============================================================================

#[async_trait]
impl ExplainService for ServiceRelay {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>> {
        let payload = serde_json::to_value(ExtractRequest {
            text: text.to_string(),
        })?;
        let value = self.request(ACTION_EXTRACT_KEYWORDS, payload).await?;
        let response: ExtractResponse = serde_json::from_value(value)?;
        Ok(response.keywords)
    }

    async fn explain(&self, keyword: &str) -> Result<String> {
        let payload = serde_json::to_value(ExplainRequest {
            keyword: keyword.to_string(),
        })?;
        let value = self.request(ACTION_GET_EXPLANATION, payload).await?;
        let response: ExplainResponse = serde_json::from_value(value)?;
        Ok(response.explanation)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    /// Backend answering extraction with fixed keywords and explanations by
    /// echoing the keyword.
    struct StubBackend;

    #[async_trait]
    impl RelayBackend for StubBackend {
        async fn handle(&self, action: &str, payload: Value) -> Result<Value> {
            match action {
                ACTION_EXTRACT_KEYWORDS => {
                    let request: ExtractRequest = serde_json::from_value(payload)?;
                    assert!(!request.text.is_empty());
                    Ok(json!({ "keywords": ["cat", "mat"] }))
                }
                ACTION_GET_EXPLANATION => {
                    let request: ExplainRequest = serde_json::from_value(payload)?;
                    Ok(json!({ "explanation": format!("{} explained", request.keyword) }))
                }
                other => Err(Error::unknown_action(other)),
            }
        }
    }

    /// Backend that never answers in time.
    struct StallingBackend;

    #[async_trait]
    impl RelayBackend for StallingBackend {
        async fn handle(&self, _action: &str, _payload: Value) -> Result<Value> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn test_extract_keywords_roundtrip() {
        let relay = ServiceRelay::spawn(StubBackend);
        let keywords = relay.extract_keywords("The cat sat on the mat.").await.unwrap();
        assert_eq!(keywords, vec!["cat", "mat"]);
    }

    #[tokio::test]
    async fn test_explain_roundtrip() {
        let relay = ServiceRelay::spawn(StubBackend);
        let explanation = relay.explain("cat").await.unwrap();
        assert_eq!(explanation, "cat explained");
    }

    #[tokio::test]
    async fn test_unknown_action_reported_to_caller() {
        let relay = ServiceRelay::spawn(StubBackend);
        let err = relay.request("frobnicate", Value::Null).await.unwrap_err();
        assert!(matches!(err, Error::UnknownAction { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout() {
        let relay =
            ServiceRelay::spawn_with_timeout(StallingBackend, Duration::from_millis(100));
        let err = relay.request(ACTION_GET_EXPLANATION, Value::Null).await.unwrap_err();
        assert!(matches!(err, Error::RequestTimeout { .. }));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_dropped_reply_maps_to_channel_closed() {
        // A dispatch that drops its reply sender without answering surfaces
        // through the oneshot conversion, not as a timeout.
        let (tx, rx) = oneshot::channel::<()>();
        drop(tx);
        let err: Error = rx.await.unwrap_err().into();
        assert!(matches!(err, Error::ChannelClosed(_)));
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn test_concurrent_requests_do_not_serialize() {
        let relay = ServiceRelay::spawn(StubBackend);
        let (a, b) = tokio::join!(relay.explain("one"), relay.extract_keywords("text"));
        assert_eq!(a.unwrap(), "one explained");
        assert_eq!(b.unwrap(), vec!["cat", "mat"]);
    }
}
