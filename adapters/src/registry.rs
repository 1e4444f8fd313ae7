//! Gateway registry (dispatch by processor)

use crate::authorizenet::AuthorizeNetGateway;
use crate::config::GatewayConfig;
use crate::cybersource::CybersourceGateway;
use crate::orbital::OrbitalGateway;
use crate::transport::{HttpClient, ReqwestClient, Transport};
use gateway_core::{Error, Gateway, Processor, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Configured gateways, one per processor
#[derive(Default, Clone)]
pub struct GatewayRegistry {
    gateways: HashMap<Processor, Arc<dyn Gateway>>,
}

impl GatewayRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured gateway over one pooled `reqwest` client
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = ReqwestClient::new(config.timeout())?;
        Self::with_client(config, Arc::new(client))
    }

    /// Build every configured gateway over an injected HTTP client
    pub fn with_client(config: &GatewayConfig, client: Arc<dyn HttpClient>) -> Result<Self> {
        config.validate()?;

        let transport = Transport::with_user_agent(client, config.user_agent.clone());
        let mut registry = Self::new();

        if let Some(credentials) = &config.authorize_net {
            registry.register(Arc::new(AuthorizeNetGateway::with_url(
                credentials.clone(),
                crate::authorizenet::endpoint(config.environment),
                transport.clone(),
            )));
        }

        if let Some(credentials) = &config.orbital {
            registry.register(Arc::new(OrbitalGateway::with_url(
                credentials.clone(),
                crate::orbital::endpoint(config.environment),
                transport.clone(),
            )));
        }

        if let Some(credentials) = &config.cybersource {
            registry.register(Arc::new(CybersourceGateway::with_base_url(
                credentials.clone(),
                crate::cybersource::endpoint(config.environment),
                transport.clone(),
            )?));
        }

        info!(
            "Gateway registry ready ({:?}): {:?}",
            config.environment,
            registry.processors()
        );

        Ok(registry)
    }

    /// Register (or replace) the gateway for its processor
    pub fn register(&mut self, gateway: Arc<dyn Gateway>) {
        self.gateways.insert(gateway.processor(), gateway);
    }

    /// Gateway for a processor
    pub fn get(&self, processor: Processor) -> Result<Arc<dyn Gateway>> {
        self.gateways
            .get(&processor)
            .cloned()
            .ok_or_else(|| Error::Config(format!("{} is not configured", processor)))
    }

    /// Configured processors, in a stable order
    pub fn processors(&self) -> Vec<Processor> {
        let mut processors: Vec<Processor> = self.gateways.keys().copied().collect();
        processors.sort_by_key(|p| p.as_str());
        processors
    }
}

impl std::fmt::Debug for GatewayRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayRegistry")
            .field("processors", &self.processors())
            .finish()
    }
}
