//! Authorize.Net JSON wire shapes
//!
//! The API validates JSON against its XML schema, so field declaration
//! order below is the order the processor expects.

use crate::wire::{masked_pan, WireRequest};
use serde::{Deserialize, Serialize};

/// `createTransactionRequest` envelope, generic over the per-operation body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeNetRequest<T> {
    /// Envelope
    pub create_transaction_request: CreateTransactionRequest<T>,
}

/// Envelope contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest<T> {
    /// API login + transaction key
    pub merchant_authentication: MerchantAuthentication,
    /// Client reference echoed back in the response (max 20 chars)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    /// Operation body
    pub transaction_request: T,
}

/// Merchant authentication block
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAuthentication {
    /// API login id
    pub name: String,
    /// Transaction key
    pub transaction_key: String,
}

impl std::fmt::Debug for MerchantAuthentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantAuthentication")
            .field("name", &self.name)
            .field("transaction_key", &"<redacted>")
            .finish()
    }
}

/// Operation discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Authorize only
    #[serde(rename = "authOnlyTransaction")]
    AuthOnly,
    /// Capture a prior authorization
    #[serde(rename = "priorAuthCaptureTransaction")]
    PriorAuthCapture,
    /// Void
    #[serde(rename = "voidTransaction")]
    Void,
    /// Refund (credit)
    #[serde(rename = "refundTransaction")]
    Refund,
}

/// Authorize body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTransaction {
    /// Always [`TransactionType::AuthOnly`]
    pub transaction_type: TransactionType,
    /// Major-unit amount ("10.00")
    pub amount: String,
    /// Card
    pub payment: Payment,
    /// Invoice/description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    /// Customer contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    /// Billing address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<BillTo>,
    /// Shopper IP
    #[serde(rename = "customerIP", skip_serializing_if = "Option::is_none")]
    pub customer_ip: Option<String>,
}

/// Capture body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureTransaction {
    /// Always [`TransactionType::PriorAuthCapture`]
    pub transaction_type: TransactionType,
    /// Major-unit amount
    pub amount: String,
    /// Authorization being captured
    pub ref_trans_id: String,
}

/// Void body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidTransaction {
    /// Always [`TransactionType::Void`]
    pub transaction_type: TransactionType,
    /// Transaction being voided
    pub ref_trans_id: String,
}

/// Refund body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundTransaction {
    /// Always [`TransactionType::Refund`]
    pub transaction_type: TransactionType,
    /// Major-unit amount
    pub amount: String,
    /// Masked card (last four + "XXXX" expiry)
    pub payment: Payment,
    /// Settled transaction being refunded
    pub ref_trans_id: String,
}

/// Payment block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Card details
    pub credit_card: CreditCardDetails,
}

/// Card details
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardDetails {
    /// PAN, or last four digits on refunds
    pub card_number: String,
    /// `YYYY-MM`, or `XXXX` on refunds
    pub expiration_date: String,
    /// CVV
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_code: Option<String>,
}

impl std::fmt::Debug for CreditCardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCardDetails")
            .field("card_number", &masked_pan(&self.card_number))
            .field("expiration_date", &self.expiration_date)
            .field("card_code", &self.card_code.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Order block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Merchant invoice number (max 20 chars)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Customer block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// E-mail
    pub email: String,
}

/// Billing address block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTo {
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Street
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl WireRequest for AuthorizeNetRequest<AuthTransaction> {
    fn transaction_reference(&self) -> Option<&str> {
        None
    }

    fn client_reference(&self) -> Option<&str> {
        self.create_transaction_request.ref_id.as_deref()
    }
}

impl WireRequest for AuthorizeNetRequest<CaptureTransaction> {
    fn transaction_reference(&self) -> Option<&str> {
        Some(&self.create_transaction_request.transaction_request.ref_trans_id)
    }

    fn client_reference(&self) -> Option<&str> {
        self.create_transaction_request.ref_id.as_deref()
    }
}

impl WireRequest for AuthorizeNetRequest<VoidTransaction> {
    fn transaction_reference(&self) -> Option<&str> {
        Some(&self.create_transaction_request.transaction_request.ref_trans_id)
    }

    fn client_reference(&self) -> Option<&str> {
        self.create_transaction_request.ref_id.as_deref()
    }
}

impl WireRequest for AuthorizeNetRequest<RefundTransaction> {
    fn transaction_reference(&self) -> Option<&str> {
        Some(&self.create_transaction_request.transaction_request.ref_trans_id)
    }

    fn client_reference(&self) -> Option<&str> {
        self.create_transaction_request.ref_id.as_deref()
    }
}

// =========================================================================
// RESPONSE
// =========================================================================

/// `createTransactionResponse`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeNetResponse {
    /// Transaction outcome; absent when the request was rejected outright
    #[serde(default)]
    pub transaction_response: Option<TransactionResponse>,
    /// Echoed client reference
    #[serde(default)]
    pub ref_id: Option<String>,
    /// API-level result
    #[serde(default)]
    pub messages: ResponseMessages,
}

/// Transaction outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// "1" approved, "2" declined, "3" error, "4" held for review
    #[serde(default)]
    pub response_code: String,
    /// Issuer authorization code
    #[serde(default)]
    pub auth_code: String,
    /// Raw AVS code
    #[serde(default)]
    pub avs_result_code: String,
    /// Raw card code result
    #[serde(default)]
    pub cvv_result_code: String,
    /// Processor transaction id
    #[serde(default)]
    pub trans_id: String,
    /// Masked card number
    #[serde(default)]
    pub account_number: String,
    /// Informational messages
    #[serde(default)]
    pub messages: Vec<TransactionMessage>,
    /// Errors, most significant first
    #[serde(default)]
    pub errors: Vec<TransactionError>,
}

/// Informational message on a transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
    /// Message code ("1", "311", ...)
    #[serde(default)]
    pub code: String,
    /// Text
    #[serde(default)]
    pub description: String,
}

/// Transaction error
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionError {
    /// Error code
    #[serde(default)]
    pub error_code: String,
    /// Text
    #[serde(default)]
    pub error_text: String,
}

/// API-level messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessages {
    /// "Ok" or "Error"
    #[serde(default)]
    pub result_code: String,
    /// Messages ("I00001", "E00027", ...)
    #[serde(default)]
    pub message: Vec<ResponseMessage>,
}

/// API-level message
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseMessage {
    /// Message code
    #[serde(default)]
    pub code: String,
    /// Text
    #[serde(default)]
    pub text: String,
}
