//! HTTP transport seam.
//!
//! The dispatcher talks to the network through [`Transport`] so tests
//! can substitute a mock and assert on attempt counts without a server.

use async_trait::async_trait;
use thiserror::Error;

/// The request could not be sent or the response never arrived (DNS,
/// connection refused, timeout, malformed URL).
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportFailure(pub String);

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

/// A response that made it back, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Single-operation HTTP seam: POST a JSON body and return whatever
/// came back. Status interpretation is the dispatcher's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportFailure>;
}

/// Production transport over a shared reqwest client.
#[derive(Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportFailure> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        Ok(HttpResponse { status, body })
    }
}
