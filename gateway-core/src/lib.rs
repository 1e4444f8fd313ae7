//! # Gateway Core
//!
//! Processor-agnostic contract for card payments:
//! - AUTHORIZE: reserve funds on a card
//! - CAPTURE: settle a prior authorization
//! - VOID: release an uncaptured authorization
//! - REFUND: return captured funds
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Caller (checkout, OMS)     │
//! └──────────────┬───────────────┘
//!                │ canonical requests
//! ┌──────────────▼───────────────┐
//! │       Gateway (trait)        │ ← identical for every processor
//! └──────────────┬───────────────┘
//!                │
//!   ┌────────────┼─────────────┐
//!   │            │             │
//! ┌─▼──────┐ ┌───▼─────┐ ┌─────▼──────┐
//! │Auth.Net│ │ Orbital │ │ CyberSource│  (gateway-adapters)
//! └────────┘ └─────────┘ └────────────┘
//! ```
//!
//! The canonical responses carry business outcomes (approved or declined).
//! Only malformed input and transport failures surface as [`Error`].

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    clippy::all
)]

pub mod currency;
pub mod error;
pub mod error_codes;
pub mod gateway;
pub mod types;

pub use error::{Error, Result, TransportError};
pub use gateway::Gateway;
pub use types::*;

/// Option key carrying the last four card digits (required by some refund protocols)
pub const OPTION_CREDIT_CARD_LAST_FOUR: &str = "credit_card_last_four";

/// Option key carrying the cardholder e-mail address
pub const OPTION_EMAIL: &str = "email";

/// Option key carrying the shopper IP address
pub const OPTION_CUSTOMER_IP: &str = "customer_ip";

/// Option key carrying a free-text order description
pub const OPTION_DESCRIPTION: &str = "description";
