//! Gateway configuration
//!
//! Layered the usual way: built-in defaults, then an optional file
//! (`CONFIG_FILE`, or `config/<ENVIRONMENT>`), then `PAYMENT_GATEWAY__*`
//! environment variables.

use crate::authorizenet::AuthorizeNetCredentials;
use crate::cybersource::CybersourceCredentials;
use crate::orbital::OrbitalCredentials;
use crate::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use config::{File, FileFormat};
use gateway_core::{Environment, Error, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PAYMENT_GATEWAY";

/// Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// Sandbox or production endpoints
    pub environment: Environment,
    /// Per-call HTTP timeout
    pub timeout_seconds: u64,
    /// `User-Agent` sent to processors
    pub user_agent: String,
    /// Authorize.Net credentials
    #[serde(default)]
    pub authorize_net: Option<AuthorizeNetCredentials>,
    /// Orbital credentials
    #[serde(default)]
    pub orbital: Option<OrbitalCredentials>,
    /// CyberSource credentials
    #[serde(default)]
    pub cybersource: Option<CybersourceCredentials>,
}

impl GatewayConfig {
    /// Load from defaults, config file and environment
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let file = match env::var("CONFIG_FILE") {
            Ok(path) => File::with_name(&path).required(false),
            Err(_) => File::with_name(&format!("config/{}", environment)).required(false),
        };

        let config = Self::builder()?
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Self::finish(config)
    }

    /// Load from a TOML string layered over the defaults
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config = Self::builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Self::finish(config)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        config::Config::builder()
            .set_default("environment", "sandbox")
            .and_then(|b| b.set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS))
            .and_then(|b| b.set_default("user_agent", DEFAULT_USER_AGENT))
            .map_err(|e| Error::Config(e.to_string()))
    }

    fn finish(config: config::Config) -> Result<Self> {
        let gateway: GatewayConfig = config
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))?;
        gateway.validate()?;
        Ok(gateway)
    }

    /// Reject unusable settings
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::Config("timeout_seconds must be positive".to_string()));
        }

        if let Some(credentials) = &self.authorize_net {
            require("authorize_net.name", &credentials.name)?;
            require("authorize_net.transaction_key", &credentials.transaction_key)?;
        }

        if let Some(credentials) = &self.orbital {
            require("orbital.username", &credentials.username)?;
            require("orbital.password", &credentials.password)?;
            require("orbital.merchant_id", &credentials.merchant_id)?;
            require("orbital.bin", &credentials.bin)?;
            require("orbital.terminal_id", &credentials.terminal_id)?;
        }

        if let Some(credentials) = &self.cybersource {
            require("cybersource.merchant_id", &credentials.merchant_id)?;
            require("cybersource.api_key", &credentials.api_key)?;
            require("cybersource.shared_secret", &credentials.shared_secret)?;
        }

        Ok(())
    }

    /// Per-call HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn require(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{} must not be empty", key)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_toml("").unwrap();

        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.authorize_net.is_none());
        assert!(config.orbital.is_none());
        assert!(config.cybersource.is_none());
    }

    #[test]
    fn test_credentials_sections() {
        let config = GatewayConfig::from_toml(
            r#"
            environment = "production"
            timeout_seconds = 10

            [authorize_net]
            name = "login"
            transaction_key = "key"

            [orbital]
            username = "user"
            password = "pass"
            merchant_id = "123456"

            [cybersource]
            merchant_id = "testmerchant"
            api_key = "key-id"
            shared_secret = "c2VjcmV0"
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.authorize_net.unwrap().name, "login");
        assert_eq!(config.orbital.unwrap().terminal_id, "001");
        assert_eq!(config.cybersource.unwrap().api_key, "key-id");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = GatewayConfig::from_toml("timeout_seconds = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let err = GatewayConfig::from_toml(
            r#"
            [authorize_net]
            name = ""
            transaction_key = "key"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("authorize_net.name"));
    }
}
