//! Orbital (Chase Paymentech) adapter
//!
//! XML requests, JSON replies. Every operation is keyed on the merchant
//! order id, so the client transaction reference is mandatory.

pub mod builder;
pub mod codes;
pub mod translator;
pub mod wire;

use crate::metrics;
use crate::transport::{decode_json, HttpClient, Transport, CONTENT_TYPE_XML};
use async_trait::async_trait;
use gateway_core::{
    AuthorizationRequest, AuthorizationResponse, CaptureRequest, CaptureResponse, Environment,
    Gateway, Operation, Processor, RefundRequest, RefundResponse, Result, VoidRequest,
    VoidResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use wire::{OrbitalRequest, OrbitalResponse};

/// Sandbox endpoint
pub const SANDBOX_URL: &str = "https://orbitalvar1.chasepaymentech.com/authorize";

/// Production endpoint
pub const PRODUCTION_URL: &str = "https://orbital1.chasepaymentech.com/authorize";

/// Default acquirer BIN (Salem)
pub const DEFAULT_BIN: &str = "000001";

/// Default terminal id
pub const DEFAULT_TERMINAL_ID: &str = "001";

fn default_bin() -> String {
    DEFAULT_BIN.to_string()
}

fn default_terminal_id() -> String {
    DEFAULT_TERMINAL_ID.to_string()
}

/// Orbital connection credentials
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct OrbitalCredentials {
    /// Connection username
    pub username: String,
    /// Connection password
    pub password: String,
    /// Merchant id
    pub merchant_id: String,
    /// Acquirer BIN
    #[serde(default = "default_bin")]
    pub bin: String,
    /// Terminal id
    #[serde(default = "default_terminal_id")]
    pub terminal_id: String,
}

impl OrbitalCredentials {
    /// Credentials with the default BIN and terminal id
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        merchant_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            merchant_id: merchant_id.into(),
            bin: default_bin(),
            terminal_id: default_terminal_id(),
        }
    }
}

impl std::fmt::Debug for OrbitalCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitalCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("merchant_id", &self.merchant_id)
            .field("bin", &self.bin)
            .field("terminal_id", &self.terminal_id)
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

/// Orbital gateway
#[derive(Debug, Clone)]
pub struct OrbitalGateway {
    credentials: OrbitalCredentials,
    url: String,
    transport: Transport,
}

impl OrbitalGateway {
    /// Create a gateway for the given environment
    pub fn new(
        credentials: OrbitalCredentials,
        environment: Environment,
        client: Arc<dyn HttpClient>,
    ) -> Self {
        Self::with_url(credentials, endpoint(environment), Transport::new(client))
    }

    /// Create a gateway against an explicit endpoint
    pub fn with_url(
        credentials: OrbitalCredentials,
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

    async fn send<T: OrbitalRequest>(&self, wire: &T) -> Result<OrbitalResponse> {
        let body = wire.to_xml()?;
        let headers = vec![
            ("MIME-Version".to_string(), "1.1".to_string()),
            ("Document-type".to_string(), "Request".to_string()),
            ("Request-number".to_string(), "1".to_string()),
            ("Merchant-id".to_string(), self.credentials.merchant_id.clone()),
        ];

        let response = self
            .transport
            .post(&self.url, CONTENT_TYPE_XML, headers, body)
            .await?;
        let reply: OrbitalResponse = decode_json(&response)?;

        debug!(
            "Orbital {} ProcStatus={} OrderID={}",
            T::ELEMENT,
            reply.body.proc_status,
            reply.body.order_id
        );

        Ok(reply)
    }
}

#[async_trait]
impl Gateway for OrbitalGateway {
    fn processor(&self) -> Processor {
        Processor::Orbital
    }

    async fn authorize(&self, request: &AuthorizationRequest) -> Result<AuthorizationResponse> {
        metrics::observe(Processor::Orbital, Operation::Authorize, async {
            let wire = builder::build_auth_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_auth_response(&reply))
        })
        .await
    }

    async fn capture(&self, request: &CaptureRequest) -> Result<CaptureResponse> {
        metrics::observe(Processor::Orbital, Operation::Capture, async {
            let wire = builder::build_capture_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_capture_response(&reply))
        })
        .await
    }

    async fn void(&self, request: &VoidRequest) -> Result<VoidResponse> {
        metrics::observe(Processor::Orbital, Operation::Void, async {
            let wire = builder::build_void_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_void_response(&reply))
        })
        .await
    }

    async fn refund(&self, request: &RefundRequest) -> Result<RefundResponse> {
        metrics::observe(Processor::Orbital, Operation::Refund, async {
            let wire = builder::build_refund_request(&self.credentials, request)?;
            let reply = self.send(&wire).await?;
            Ok(translator::translate_refund_response(&reply))
        })
        .await
    }
}
