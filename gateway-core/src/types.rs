//! Canonical domain model shared by every processor adapter

use crate::currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =========================================================================
// DISCRIMINATORS
// =========================================================================

/// Supported payment processors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Processor {
    /// Authorize.Net JSON API
    AuthorizeNet,
    /// Chase Paymentech Orbital
    Orbital,
    /// CyberSource REST API
    Cybersource,
}

impl std::fmt::Display for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Processor::AuthorizeNet => write!(f, "Authorize.Net"),
            Processor::Orbital => write!(f, "Orbital"),
            Processor::Cybersource => write!(f, "CyberSource"),
        }
    }
}

impl Processor {
    /// Stable lowercase identifier (metric labels, config keys)
    pub fn as_str(&self) -> &'static str {
        match self {
            Processor::AuthorizeNet => "authorize_net",
            Processor::Orbital => "orbital",
            Processor::Cybersource => "cybersource",
        }
    }
}

/// Transaction lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Reserve funds
    Authorize,
    /// Settle a prior authorization
    Capture,
    /// Cancel an uncaptured authorization
    Void,
    /// Return captured funds
    Refund,
}

impl Operation {
    /// Every operation, in lifecycle order
    pub const ALL: [Operation; 4] = [
        Operation::Authorize,
        Operation::Capture,
        Operation::Void,
        Operation::Refund,
    ];

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Authorize => "authorize",
            Operation::Capture => "capture",
            Operation::Void => "void",
            Operation::Refund => "refund",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processor environment, fixed at adapter construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Processor test/sandbox endpoints
    #[default]
    Sandbox,
    /// Live endpoints
    Production,
}

// =========================================================================
// VALUE TYPES
// =========================================================================

/// Money in minor units (cents for USD)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in the currency's minor unit
    pub minor_units: u64,
    /// ISO 4217 alphabetic code
    pub currency: String,
}

impl Amount {
    /// Create an amount
    pub fn new(minor_units: u64, currency: impl Into<String>) -> Self {
        Self {
            minor_units,
            currency: currency.into(),
        }
    }

    /// Amount in USD cents
    pub fn usd(cents: u64) -> Self {
        Self::new(cents, "USD")
    }

    /// Major-unit decimal honoring the currency exponent (1000 USD cents → 10.00)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(
            i128::from(self.minor_units),
            currency::exponent(&self.currency),
        )
    }
}

/// Credit card
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    /// Cardholder first name
    pub first_name: String,
    /// Cardholder last name
    pub last_name: String,
    /// Primary account number (digits only)
    pub number: String,
    /// Expiration month (1-12)
    pub expiration_month: u8,
    /// Expiration year (four digits)
    pub expiration_year: u16,
    /// Card security code
    pub cvv: Option<String>,
}

impl CreditCard {
    /// "First Last"
    pub fn cardholder_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Last four digits of the card number
    pub fn last_four(&self) -> &str {
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        &self.number[start..]
    }
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCard")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("cvv", &self.cvv.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Billing address used for AVS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    /// Street line 1
    pub street_address1: Option<String>,
    /// Street line 2
    pub street_address2: Option<String>,
    /// City
    pub locality: Option<String>,
    /// State/province code
    pub region_code: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: Option<String>,
}

/// Free-form option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Text
    String(String),
    /// Numeric
    Number(f64),
    /// Flag
    Bool(bool),
}

impl OptionValue {
    /// Text value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Flag value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

/// Processor-specific options. Adapters read the keys they recognize and
/// ignore every other key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, OptionValue>);

impl Options {
    /// Empty option map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value lookup
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Non-empty string lookup; numbers are rendered as text
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            OptionValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
            OptionValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Boolean lookup
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(OptionValue::as_bool)
    }

    /// True when no options are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =========================================================================
// VERIFICATION RESULTS
// =========================================================================

/// Canonical address verification result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvsResult {
    /// Street address and postal code match
    Match,
    /// Street address matches, postal code does not (or was not verified)
    StreetMatchOnly,
    /// Postal code matches, street address does not (or was not verified)
    PostalMatchOnly,
    /// Neither street nor postal code match
    NoMatch,
    /// Issuer outside the AVS network
    NonUsIssuer,
    /// AVS not supported for this card or merchant
    Unsupported,
    /// No usable AVS answer (missing, retry or unrecognized code)
    #[default]
    Unavailable,
    /// Processor reported an AVS error
    Error,
}

impl AvsResult {
    /// Street or postal code matched, but not both
    pub fn is_partial_match(&self) -> bool {
        matches!(self, AvsResult::StreetMatchOnly | AvsResult::PostalMatchOnly)
    }
}

/// Canonical card security code result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CvvResult {
    /// Code matches
    Match,
    /// Code does not match
    NoMatch,
    /// Code was not processed
    NotProcessed,
    /// Code should be on card but merchant indicated it is not present
    NotPresent,
    /// Issuer flagged the transaction as suspicious
    Suspicious,
    /// Issuer or card brand does not support verification
    Unsupported,
    /// No usable answer (missing or unrecognized code)
    #[default]
    Unavailable,
    /// Processor reported a verification error
    Error,
}

// =========================================================================
// REQUESTS
// =========================================================================

/// Authorize request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Amount to authorize
    pub amount: Amount,
    /// Card to charge
    pub credit_card: CreditCard,
    /// Billing address for AVS
    pub billing_address: Option<BillingAddress>,
    /// Client-generated order/idempotency key
    pub client_transaction_reference: Option<String>,
    /// Processor-specific options
    #[serde(default)]
    pub options: Options,
}

/// Capture request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Amount to capture (equal to or less than the authorization)
    pub amount: Amount,
    /// Reference returned by the prior authorization
    pub transaction_reference: String,
    /// Client order key used at authorization time
    pub client_transaction_reference: Option<String>,
    /// Processor-specific options
    #[serde(default)]
    pub options: Options,
}

/// Void request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidRequest {
    /// Reference returned by the prior authorization
    pub transaction_reference: String,
    /// Client order key used at authorization time
    pub client_transaction_reference: Option<String>,
    /// Processor-specific options
    #[serde(default)]
    pub options: Options,
}

/// Refund request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Amount to return
    pub amount: Amount,
    /// Reference of the authorization/capture being refunded
    pub transaction_reference: String,
    /// Client order key used at authorization time
    pub client_transaction_reference: Option<String>,
    /// Processor-specific options
    #[serde(default)]
    pub options: Options,
}

// =========================================================================
// RESPONSES
// =========================================================================

/// Authorize response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    /// Processor approved the authorization
    pub success: bool,
    /// Processor-assigned reference for capture/void/refund
    pub transaction_reference: String,
    /// Normalized AVS result
    pub avs_result: AvsResult,
    /// Normalized CVV result
    pub cvv_result: CvvResult,
    /// AVS code exactly as received
    pub avs_result_raw: String,
    /// CVV code exactly as received
    pub cvv_result_raw: String,
    /// Canonical error code when not successful
    pub error_code: Option<String>,
    /// Processor response message
    pub response: Option<String>,
}

/// Capture response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResponse {
    /// Processor accepted the capture
    pub success: bool,
    /// Reference (may be re-assigned by the processor)
    pub transaction_reference: String,
    /// Canonical error code when not successful
    pub error_code: Option<String>,
}

/// Void response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidResponse {
    /// Processor accepted the void
    pub success: bool,
    /// Reference (may be re-assigned by the processor)
    pub transaction_reference: String,
    /// Canonical error code when not successful
    pub error_code: Option<String>,
}

/// Refund response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundResponse {
    /// Processor accepted the refund
    pub success: bool,
    /// Reference (may be re-assigned by the processor)
    pub transaction_reference: String,
    /// Canonical error code when not successful
    pub error_code: Option<String>,
}
