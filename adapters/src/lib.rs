//! # Gateway Adapters
//!
//! Processor connectivity behind the [`gateway_core::Gateway`] contract:
//! - Authorize.Net (JSON)
//! - Orbital / Chase Paymentech (XML requests, JSON replies)
//! - CyberSource REST (JSON, HTTP-signature authentication)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │        GatewayRegistry (dispatch by processor)      │
//! └────────────┬────────────────────────────────────────┘
//!              │
//!     ┌────────┼─────────────────────┐
//!     │        │                     │
//! ┌───▼─────┐ ┌▼────────┐ ┌──────────▼──┐
//! │Auth.Net │ │ Orbital │ │ CyberSource │   builder → send → translator
//! └───┬─────┘ └┬────────┘ └──────────┬──┘
//!     │        │                     │
//!     └────────┼─────────────────────┘
//!              │
//! ┌────────────▼─────────────────────────────────────┐
//! │   Transport shim + injected HttpClient (reqwest) │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Builders and translators are pure functions; adapters own only
//! immutable credentials and a shared transport handle.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod authorizenet;
pub mod config;
pub mod cybersource;
pub mod metrics;
pub mod orbital;
pub mod registry;
pub mod transport;
pub mod wire;

pub use authorizenet::{AuthorizeNetCredentials, AuthorizeNetGateway};
pub use config::GatewayConfig;
pub use cybersource::{CybersourceCredentials, CybersourceGateway};
pub use gateway_core::{Error, Result};
pub use orbital::{OrbitalCredentials, OrbitalGateway};
pub use registry::GatewayRegistry;
pub use transport::{HttpClient, HttpRequest, HttpResponse, ReqwestClient, Transport};

/// Default `User-Agent` sent to processors
pub const DEFAULT_USER_AGENT: &str = concat!("gateway-adapters/", env!("CARGO_PKG_VERSION"));

/// Default per-call HTTP timeout (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
