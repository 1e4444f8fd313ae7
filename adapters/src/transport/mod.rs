//! Transport shim
//!
//! Serializes wire requests, POSTs them through an injected [`HttpClient`]
//! and decodes the processor reply. Business outcomes are never interpreted
//! here; anything that prevents obtaining a decodable reply becomes a
//! [`TransportError`].

mod reqwest_client;

pub use reqwest_client::ReqwestClient;

use async_trait::async_trait;
use bytes::Bytes;
use gateway_core::TransportError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// XML content type
pub const CONTENT_TYPE_XML: &str = "application/xml; charset=utf-8";

/// UTF-8 byte-order marker some processors prepend to JSON bodies
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outbound HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL
    pub url: String,
    /// Header name/value pairs, in order
    pub headers: Vec<(String, String)>,
    /// Serialized body
    pub body: Bytes,
}

impl HttpRequest {
    /// First header value with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Body bytes
    pub body: Bytes,
}

impl HttpResponse {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Injected HTTP capability.
///
/// Implementations own connection pooling, TLS and per-call deadlines.
/// Swap it for a fake to record or replay processor traffic.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a POST and return status + body
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Shared handle used by every processor adapter
#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn HttpClient>,
    user_agent: String,
}

impl Transport {
    /// Wrap an HTTP client with the default user agent
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_user_agent(client, crate::DEFAULT_USER_AGENT)
    }

    /// Wrap an HTTP client with a custom user agent
    pub fn with_user_agent(client: Arc<dyn HttpClient>, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// POST a serialized body. `User-Agent` and `Content-Type` are added
    /// ahead of the caller's headers.
    pub async fn post(
        &self,
        url: &str,
        content_type: &str,
        extra_headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        let mut headers = vec![
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Content-Type".to_string(), content_type.to_string()),
        ];
        headers.extend(extra_headers);

        let request = HttpRequest {
            url: url.to_string(),
            headers,
            body: Bytes::from(body),
        };

        let response = self.client.post(request).await?;
        debug!("POST {} -> HTTP {}", url, response.status);

        Ok(response)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Serialize a wire request as JSON
pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, TransportError> {
    serde_json::to_vec(value).map_err(|e| TransportError::Encode(e.to_string()))
}

/// Drop a leading UTF-8 byte-order marker
pub fn strip_bom(body: &[u8]) -> &[u8] {
    body.strip_prefix(UTF8_BOM).unwrap_or(body)
}

/// Decode a JSON reply.
///
/// The body is decoded whatever the status, since several processors
/// report business failures with 4xx codes. A body that does not decode is
/// a [`TransportError::Status`] for non-2xx replies and a
/// [`TransportError::Decode`] otherwise.
pub fn decode_json<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, TransportError> {
    let body = strip_bom(&response.body);

    serde_json::from_slice(body).map_err(|e| {
        if response.is_success() {
            TransportError::Decode(e.to_string())
        } else {
            unexpected_status(response)
        }
    })
}

/// Non-2xx reply that is not a processor response
pub fn unexpected_status(response: &HttpResponse) -> TransportError {
    TransportError::Status {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    }
}
