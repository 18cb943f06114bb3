//! Builds the notification payload and delivers it.
//!
//! One invocation makes at most one HTTP attempt. Failures are returned
//! as data, never as panics or propagated errors: the caller logs the
//! outcome and the invocation ends there (no retry, no queue).

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::transport::{HttpTransport, Transport};

/// The fixed-shape webhook body: the shared secret for the receiver to
/// validate, plus the send time. Deliberately carries nothing about the
/// row that triggered it.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub secret: String,
    /// ISO-8601 / RFC 3339, UTC.
    pub timestamp: String,
}

impl NotificationPayload {
    pub fn now(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// HTTP 200 received; the body is logged, never parsed.
    Success { status: u16, body: String },
    /// The endpoint answered with a non-200 status.
    HttpError { status: u16, body: String },
    /// The request never completed (DNS, refused connection, bad URL).
    TransportError { description: String },
}

impl DispatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchResult::Success { .. })
    }
}

impl std::fmt::Display for DispatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchResult::Success { status, body } => {
                write!(f, "delivered ({status}): {body}")
            }
            DispatchResult::HttpError { status, body } => {
                write!(f, "endpoint returned {status}: {body}")
            }
            DispatchResult::TransportError { description } => {
                write!(f, "request failed: {description}")
            }
        }
    }
}

/// Sends the red-separator notification to a configured endpoint.
///
/// Endpoint and secret arrive as an explicit configuration pair at
/// construction time; the dispatcher holds no other state.
pub struct WebhookDispatcher<T: Transport = HttpTransport> {
    endpoint: String,
    secret: String,
    transport: T,
}

impl WebhookDispatcher<HttpTransport> {
    pub fn new(endpoint: String, secret: String) -> Self {
        Self::with_transport(endpoint, secret, HttpTransport::new())
    }
}

impl<T: Transport> WebhookDispatcher<T> {
    pub fn with_transport(endpoint: String, secret: String, transport: T) -> Self {
        Self {
            endpoint,
            secret,
            transport,
        }
    }

    /// Build a fresh payload and make exactly one delivery attempt.
    ///
    /// The secret never appears in logs; only status and response body
    /// do.
    pub async fn dispatch(&self) -> DispatchResult {
        let payload = NotificationPayload::now(&self.secret);
        let body = match serde_json::to_string(&payload) {
            Ok(b) => b,
            Err(e) => {
                return DispatchResult::TransportError {
                    description: format!("failed to serialize payload: {e}"),
                }
            }
        };

        match self.transport.post_json(&self.endpoint, body).await {
            Ok(response) if response.status == 200 => {
                tracing::info!(
                    url = %self.endpoint,
                    status = response.status,
                    body = %response.body,
                    "notification delivered"
                );
                DispatchResult::Success {
                    status: response.status,
                    body: response.body,
                }
            }
            Ok(response) => {
                tracing::warn!(
                    url = %self.endpoint,
                    status = response.status,
                    body = %response.body,
                    "webhook returned non-200 status"
                );
                DispatchResult::HttpError {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(e) => {
                tracing::warn!(url = %self.endpoint, error = %e, "webhook request failed");
                DispatchResult::TransportError {
                    description: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, TransportFailure};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct MockTransport {
        calls: Arc<AtomicUsize>,
        last_body: Arc<Mutex<Option<String>>>,
        response: Result<(u16, &'static str), &'static str>,
    }

    impl MockTransport {
        fn returning(status: u16, body: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: calls.clone(),
                    last_body: Arc::new(Mutex::new(None)),
                    response: Ok((status, body)),
                },
                calls,
            )
        }

        fn failing(description: &'static str) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                last_body: Arc::new(Mutex::new(None)),
                response: Err(description),
            }
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn post_json(
            &self,
            _url: &str,
            body: String,
        ) -> Result<HttpResponse, TransportFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_body.lock().unwrap() = Some(body);
            match self.response {
                Ok((status, body)) => Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                Err(desc) => Err(TransportFailure(desc.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn delivers_on_200() {
        let (transport, calls) = MockTransport::returning(200, "ok");
        let dispatcher =
            WebhookDispatcher::with_transport("https://example.com/hook".into(), "s3cret".into(), transport);

        let result = dispatcher.dispatch().await;
        assert_eq!(
            result,
            DispatchResult::Success {
                status: 200,
                body: "ok".to_string()
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_200_is_http_error_without_retry() {
        let (transport, calls) = MockTransport::returning(500, "err");
        let dispatcher =
            WebhookDispatcher::with_transport("https://example.com/hook".into(), "s3cret".into(), transport);

        let result = dispatcher.dispatch().await;
        assert_eq!(
            result,
            DispatchResult::HttpError {
                status: 500,
                body: "err".to_string()
            }
        );
        assert!(!result.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 1); // single attempt only
    }

    #[tokio::test]
    async fn transport_failure_is_reported_not_thrown() {
        let transport = MockTransport::failing("connection refused");
        let dispatcher =
            WebhookDispatcher::with_transport("https://example.com/hook".into(), "s3cret".into(), transport);

        let result = dispatcher.dispatch().await;
        assert_eq!(
            result,
            DispatchResult::TransportError {
                description: "connection refused".to_string()
            }
        );
    }

    #[tokio::test]
    async fn payload_has_exactly_secret_and_timestamp() {
        let (transport, _) = MockTransport::returning(200, "ok");
        let last_body = transport.last_body.clone();
        let dispatcher =
            WebhookDispatcher::with_transport("https://example.com/hook".into(), "s3cret".into(), transport);

        dispatcher.dispatch().await;

        let body = last_body.lock().unwrap().clone().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["secret"], "s3cret");

        // Timestamp must be valid RFC 3339.
        let ts = object["timestamp"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(ts).unwrap();
    }
}
