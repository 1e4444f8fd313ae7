//! Authorize.Net adapter
//!
//! JSON `createTransactionRequest` envelopes POSTed to the single XML/JSON
//! API endpoint. Responses are JSON prefixed with a UTF-8 byte-order marker.

pub mod builder;
pub mod codes;
pub mod translator;
pub mod wire;

use crate::metrics;
use crate::transport::{decode_json, encode_json, HttpClient, Transport, CONTENT_TYPE_JSON};
use async_trait::async_trait;
use gateway_core::{
    AuthorizationRequest, AuthorizationResponse, CaptureRequest, CaptureResponse, Environment,
    Gateway, Operation, Processor, RefundRequest, RefundResponse, Result, VoidRequest,
    VoidResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use wire::AuthorizeNetResponse;

/// Sandbox endpoint
pub const SANDBOX_URL: &str = "https://apitest.authorize.net/xml/v1/request.api";

/// Production endpoint
pub const PRODUCTION_URL: &str = "https://api.authorize.net/xml/v1/request.api";

/// API login id + transaction key
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorizeNetCredentials {
    /// API login id
    pub name: String,
    /// Transaction key
    pub transaction_key: String,
}

impl AuthorizeNetCredentials {
    /// Create credentials
    pub fn new(name: impl Into<String>, transaction_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transaction_key: transaction_key.into(),
        }
    }
}

impl std::fmt::Debug for AuthorizeNetCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizeNetCredentials")
            .field("name", &self.name)
            .field("transaction_key", &"<redacted>")
            .finish()
    }
}

/// Endpoint for an environment
pub fn endpoint(environment: Environment) -> &'static str {
    match environment {
        Environment::Sandbox => SANDBOX_URL,
        Environment::Production => PRODUCTION_URL,
    }
}

/// Authorize.Net gateway
#[derive(Debug, Clone)]
pub struct AuthorizeNetGateway {
    credentials: AuthorizeNetCredentials,
    url: String,
    transport: Transport,
}

impl AuthorizeNetGateway {
    /// Create a gateway for the given environment
    pub fn new(
        credentials: AuthorizeNetCredentials,
        environment: Environment,
        client: Arc<dyn HttpClient>,
    ) -> Self {
        Self::with_url(credentials, endpoint(environment), Transport::new(client))
    }

    /// Create a gateway against an explicit endpoint
    pub fn with_url(
        credentials: AuthorizeNetCredentials,
        url: impl Into<String>,
        transport: Transport,
    ) -> Self {
        Self {
            credentials,
            url: url.into(),
            transport,
        }
    }

    /// Endpoint this gateway posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send<T: Serialize>(&self, wire: &T) -> Result<AuthorizeNetResponse> {
        let body = encode_json(wire)?;
        let response = self
            .transport
            .post(&self.url, CONTENT_TYPE_JSON, Vec::new(), body)
            .await?;
        let reply: AuthorizeNetResponse = decode_json(&response)?;

        debug!(
            "Authorize.Net resultCode={} refId={:?}",
            reply.messages.result_code, reply.ref_id
        );

        Ok(reply)
    }
}

#[async_trait]
impl Gateway for AuthorizeNetGateway {
    fn processor(&self) -> Processor {
        Processor::AuthorizeNet
    }

    async fn authorize(&self, request: &AuthorizationRequest) -> Result<AuthorizationResponse> {
        metrics::observe(Processor::AuthorizeNet, Operation::Authorize, async {
            let wire = builder::build_auth_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_auth_response(&reply))
        })
        .await
    }

    async fn capture(&self, request: &CaptureRequest) -> Result<CaptureResponse> {
        metrics::observe(Processor::AuthorizeNet, Operation::Capture, async {
            let wire = builder::build_capture_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_capture_response(&reply))
        })
        .await
    }

    async fn void(&self, request: &VoidRequest) -> Result<VoidResponse> {
        metrics::observe(Processor::AuthorizeNet, Operation::Void, async {
            let wire = builder::build_void_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_void_response(&reply))
        })
        .await
    }

    async fn refund(&self, request: &RefundRequest) -> Result<RefundResponse> {
        metrics::observe(Processor::AuthorizeNet, Operation::Refund, async {
            let wire = builder::build_refund_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_refund_response(&reply))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(endpoint(Environment::Sandbox), SANDBOX_URL);
        assert_eq!(endpoint(Environment::Production), PRODUCTION_URL);
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let credentials = AuthorizeNetCredentials::new("login", "s3cret");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("login"));
        assert!(!debug.contains("s3cret"));
    }
}
