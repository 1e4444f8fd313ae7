//! CyberSource REST adapter
//!
//! JSON over HTTPS, authenticated per request with an HTTP signature
//! computed from the serialized body. Declines and validation failures come
//! back as JSON with 201 or 4xx status codes; both are business outcomes.

pub mod builder;
pub mod codes;
pub mod signing;
pub mod translator;
pub mod wire;

use crate::metrics;
use crate::transport::{
    decode_json, encode_json, unexpected_status, HttpClient, Transport, CONTENT_TYPE_JSON,
};
use async_trait::async_trait;
use chrono::Utc;
use gateway_core::{
    AuthorizationRequest, AuthorizationResponse, CaptureRequest, CaptureResponse, Environment,
    Error, Gateway, Operation, Processor, RefundRequest, RefundResponse, Result, TransportError,
    VoidRequest, VoidResponse,
};
use serde::{Deserialize, Serialize};
use signing::SigningKey;
use std::sync::Arc;
use tracing::debug;
use wire::{CybersourceRequest, CybersourceResponse};

/// Sandbox base URL
pub const SANDBOX_URL: &str = "https://apitest.cybersource.com";

/// Production base URL
pub const PRODUCTION_URL: &str = "https://api.cybersource.com";

/// Shared-secret credentials
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CybersourceCredentials {
    /// Merchant id
    pub merchant_id: String,
    /// Shared-secret key id
    pub api_key: String,
    /// Base64 shared secret
    pub shared_secret: String,
}

impl CybersourceCredentials {
    /// Create credentials
    pub fn new(
        merchant_id: impl Into<String>,
        api_key: impl Into<String>,
        shared_secret: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            api_key: api_key.into(),
            shared_secret: shared_secret.into(),
        }
    }
}

impl std::fmt::Debug for CybersourceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CybersourceCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("api_key", &self.api_key)
            .field("shared_secret", &"<redacted>")
            .finish()
    }
}

/// Base URL for an environment
pub fn endpoint(environment: Environment) -> &'static str {
    match environment {
        Environment::Sandbox => SANDBOX_URL,
        Environment::Production => PRODUCTION_URL,
    }
}

/// CyberSource gateway
#[derive(Debug, Clone)]
pub struct CybersourceGateway {
    key: SigningKey,
    base_url: String,
    host: String,
    transport: Transport,
}

impl CybersourceGateway {
    /// Create a gateway for the given environment.
    ///
    /// Fails with [`Error::Config`] when the shared secret is not base64.
    pub fn new(
        credentials: CybersourceCredentials,
        environment: Environment,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self> {
        Self::with_base_url(credentials, endpoint(environment), Transport::new(client))
    }

    /// Create a gateway against an explicit base URL
    pub fn with_base_url(
        credentials: CybersourceCredentials,
        base_url: impl Into<String>,
        transport: Transport,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let url = reqwest::Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid CyberSource URL '{}': {}", base_url, e)))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(Error::Config(format!(
                    "CyberSource URL '{}' has no host",
                    base_url
                )))
            }
        };

        let key = SigningKey::new(
            credentials.merchant_id,
            credentials.api_key,
            &credentials.shared_secret,
        )
        .map_err(|e| Error::Config(format!("CyberSource shared secret is not base64: {}", e)))?;

        Ok(Self {
            key,
            base_url,
            host,
            transport,
        })
    }

    /// Base URL this gateway posts to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<B: Serialize + Sync>(
        &self,
        wire: &CybersourceRequest<B>,
    ) -> Result<CybersourceResponse> {
        let body = encode_json(&wire.body)?;
        let date = signing::http_date(Utc::now());
        let headers = signing::sign(&self.key, &self.host, &wire.path, &date, &body)?;
        let url = format!("{}{}", self.base_url, wire.path);

        let response = self
            .transport
            .post(&url, CONTENT_TYPE_JSON, headers, body)
            .await?;
        let reply: CybersourceResponse = decode_json(&response)?;

        // Decodable JSON that is not a CyberSource reply, e.g. `{}`
        if reply.is_empty() {
            let err = if response.is_success() {
                TransportError::Decode("reply carries neither status nor reason".to_string())
            } else {
                unexpected_status(&response)
            };
            return Err(err.into());
        }

        debug!(
            "CyberSource {} status={} id={}",
            wire.path, reply.status, reply.id
        );

        Ok(reply)
    }
}

#[async_trait]
impl Gateway for CybersourceGateway {
    fn processor(&self) -> Processor {
        Processor::Cybersource
    }

    async fn authorize(&self, request: &AuthorizationRequest) -> Result<AuthorizationResponse> {
        metrics::observe(Processor::Cybersource, Operation::Authorize, async {
            let wire = builder::build_auth_request(request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_auth_response(&reply))
        })
        .await
    }

    async fn capture(&self, request: &CaptureRequest) -> Result<CaptureResponse> {
        metrics::observe(Processor::Cybersource, Operation::Capture, async {
            let wire = builder::build_capture_request(request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_capture_response(&reply))
        })
        .await
    }

    async fn void(&self, request: &VoidRequest) -> Result<VoidResponse> {
        metrics::observe(Processor::Cybersource, Operation::Void, async {
            let wire = builder::build_void_request(request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_void_response(&reply))
        })
        .await
    }

    async fn refund(&self, request: &RefundRequest) -> Result<RefundResponse> {
        metrics::observe(Processor::Cybersource, Operation::Refund, async {
            let wire = builder::build_refund_request(request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_refund_response(&reply))
        })
        .await
    }
}
