//! HTTP transport port and the bundled `reqwest` adapter.
//!
//! The client only ever needs one capability from its transport: issue a
//! GET with query parameters and headers, and hand back the status, body
//! bytes, and headers. Everything else (connection pooling, TLS, timeouts,
//! proxies) is the transport's concern — callers wanting timeouts or
//! custom TLS configure them on the [`reqwest::Client`] they pass in, or
//! provide their own [`HttpTransport`] implementation.

use std::future::Future;

use crate::error::TransportError;
use crate::options::QueryParams;

/// A received HTTP response, owned transiently by one request.
///
/// Immutable once received; attached to [`crate::error::ApiError`] on
/// classification so callers can inspect the wire-level exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Response headers as name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl RawResponse {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport port — the single outbound capability the client consumes.
///
/// This is a **port**: the client calls it, adapters implement it. The
/// bundled production adapter is [`ReqwestTransport`]; tests substitute an
/// in-memory fake that records invocations.
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request and return the raw response.
    ///
    /// One outbound call per invocation — implementations must not batch,
    /// coalesce, or retry.
    fn get(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Production transport backed by a shared [`reqwest::Client`].
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default [`reqwest::Client`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing [`reqwest::Client`] (custom timeouts, proxy, …).
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        let mut builder = self.client.get(url).query(query);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response.bytes().await?.to_vec();
            Ok(RawResponse {
                status,
                body,
                headers,
            })
        }
    }
}
