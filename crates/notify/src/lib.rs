//! Webhook notification for red-separator events.
//!
//! This crate provides:
//! - `Transport` trait for pluggable HTTP delivery
//! - `HttpTransport` implementation over reqwest
//! - `WebhookDispatcher` building the payload and making exactly one
//!   delivery attempt per invocation

pub mod dispatcher;
pub mod transport;

pub use dispatcher::{DispatchResult, NotificationPayload, WebhookDispatcher};
pub use transport::{HttpResponse, HttpTransport, Transport, TransportFailure};
