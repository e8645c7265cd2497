//! The HTTP capability the payment flow runs on.
//!
//! Payment needs exactly one kind of request: a `GET` of the paywalled URL
//! with extra headers. [`HttpTransport`] is that capability, [`ReqwestTransport`]
//! its `reqwest` implementation with an optional per-request timeout.

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TransportResponse {
    /// Reads the whole body of a `reqwest` response.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self, TransportError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Raw bytes of a header value, if present.
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers.get(name).map(|value| value.as_bytes())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Failure of a transport that is not backed by `reqwest`.
    #[error("HTTP request failed: {0}")]
    Other(String),
}

/// Issues `GET` requests on behalf of the payment flow.
#[async_trait]
pub trait HttpTransport {
    async fn get(&self, url: &Url, headers: HeaderMap) -> Result<TransportResponse, TransportError>;
}

/// [`HttpTransport`] over a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets a timeout for all future requests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "x402.reqwest.get", skip_all, fields(url = %url), err)
    )]
    async fn get(
        &self,
        url: &Url,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        let mut request = self.client.get(url.clone()).headers(headers);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        TransportResponse::from_reqwest(response).await
    }
}
