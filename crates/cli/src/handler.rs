//! Change-event handler: the one entry point the host trigger drives.
//!
//! Stateless by design. Each call reads a fresh snapshot, evaluates it
//! once, and makes at most one webhook attempt. Nothing carries over to
//! the next invocation, so a duplicate trigger for the same red row
//! sends a duplicate notification (no de-duplication is attempted).

use std::fmt;

use sheetwatch_core::RedSet;
use sheetwatch_notify::{DispatchResult, Transport, WebhookDispatcher};
use sheetwatch_trigger::{evaluate, Decision, GridSource, SourceError};

/// What one trigger event amounted to.
#[derive(Debug)]
pub enum Outcome {
    /// Evaluation decided against notifying; no network call was made.
    Quiet(Decision),
    /// A red separator was found and one delivery attempt was made.
    Notified { row: u32, result: DispatchResult },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Quiet(decision) => write!(f, "{decision}; no notification sent"),
            Outcome::Notified { row, result } => {
                write!(f, "red separator at row {row}; {result}")
            }
        }
    }
}

/// Handle one change event from the host.
///
/// Evaluates the snapshot exactly once and dispatches exactly once iff
/// the decision is [`Decision::SeparatorRed`]. Dispatch failures are
/// part of the [`Outcome`], not errors; only grid-source failures
/// propagate.
pub async fn handle_change_event<S, T>(
    source: &S,
    red: &RedSet,
    dispatcher: &WebhookDispatcher<T>,
) -> Result<Outcome, SourceError>
where
    S: GridSource,
    T: Transport,
{
    let decision = evaluate(source, red)?;

    match decision {
        Decision::SeparatorRed { row } => {
            tracing::info!(row, "red separator detected, dispatching notification");
            let result = dispatcher.dispatch().await;
            Ok(Outcome::Notified { row, result })
        }
        other => {
            tracing::info!(decision = %other, "nothing to notify");
            Ok(Outcome::Quiet(other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sheetwatch_notify::{HttpResponse, TransportFailure};
    use sheetwatch_trigger::JsonSnapshot;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTransport {
        calls: Arc<AtomicUsize>,
        status: u16,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn post_json(
            &self,
            _url: &str,
            _body: String,
        ) -> Result<HttpResponse, TransportFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse {
                status: self.status,
                body: "ok".to_string(),
            })
        }
    }

    fn dispatcher(status: u16) -> (WebhookDispatcher<CountingTransport>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let transport = CountingTransport {
            calls: calls.clone(),
            status,
        };
        (
            WebhookDispatcher::with_transport(
                "https://example.com/hook".into(),
                "s3cret".into(),
                transport,
            ),
            calls,
        )
    }

    #[tokio::test]
    async fn red_separator_dispatches_exactly_once() {
        let snap = JsonSnapshot::from_json(
            r##"{
                "values": [["H"], ["a"], ["", ""]],
                "backgrounds": [[""], [""], ["#ff0000", ""]]
            }"##,
        )
        .unwrap();
        let (dispatcher, calls) = dispatcher(200);

        let outcome = handle_change_event(&snap, &RedSet::default(), &dispatcher)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match outcome {
            Outcome::Notified { row: 3, result } => assert!(result.is_success()),
            other => panic!("expected notified outcome, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_separator_never_dispatches() {
        let snap = JsonSnapshot::from_json(r#"{"values": [["H"], ["a"], ["b"]]}"#).unwrap();
        let (dispatcher, calls) = dispatcher(200);

        let outcome = handle_change_event(&snap, &RedSet::default(), &dispatcher)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        match outcome {
            Outcome::Quiet(Decision::NoSeparatorFound) => {}
            other => panic!("expected quiet outcome, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn uncolored_separator_never_dispatches() {
        let snap = JsonSnapshot::from_json(
            r##"{
                "values": [["H"], ["a"], ["", ""]],
                "backgrounds": [[""], [""], ["#ffffff", ""]]
            }"##,
        )
        .unwrap();
        let (dispatcher, calls) = dispatcher(200);

        let outcome = handle_change_event(&snap, &RedSet::default(), &dispatcher)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        match outcome {
            Outcome::Quiet(Decision::SeparatorNotRed { row: 3 }) => {}
            other => panic!("expected quiet outcome, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delivery_failure_is_an_outcome_not_an_error() {
        let snap = JsonSnapshot::from_json(
            r#"{
                "values": [["H"], ["", ""]],
                "backgrounds": [[""], ["red", ""]]
            }"#,
        )
        .unwrap();
        let (dispatcher, calls) = dispatcher(500);

        let outcome = handle_change_event(&snap, &RedSet::default(), &dispatcher)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1); // still only one attempt
        match outcome {
            Outcome::Notified {
                row: 2,
                result: DispatchResult::HttpError { status: 500, .. },
            } => {}
            other => panic!("expected http-error outcome, got: {other:?}"),
        }
    }
}
