//! CyberSource REST wire shapes

use crate::wire::{masked_pan, WireRequest};
use serde::{Deserialize, Serialize};

/// Path-addressed request: the body is POSTed to `path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CybersourceRequest<B> {
    /// Resource path (`/pts/v2/payments/...`)
    pub path: String,
    /// Payment id the path targets (capture, void, refund)
    pub transaction_reference: Option<String>,
    /// JSON body
    pub body: B,
}

/// Bodies that may carry `clientReferenceInformation`
pub trait HasClientReference {
    /// Client reference block
    fn client_reference_information(&self) -> Option<&ClientReferenceInformation>;
}

impl<B: HasClientReference> WireRequest for CybersourceRequest<B> {
    fn transaction_reference(&self) -> Option<&str> {
        self.transaction_reference.as_deref()
    }

    fn client_reference(&self) -> Option<&str> {
        self.body
            .client_reference_information()
            .map(|info| info.code.as_str())
    }
}

/// `clientReferenceInformation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientReferenceInformation {
    /// Merchant reference code
    #[serde(default)]
    pub code: String,
}

/// Authorization body (`POST /pts/v2/payments`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Merchant reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_reference_information: Option<ClientReferenceInformation>,
    /// Processing flags
    pub processing_information: ProcessingInformation,
    /// Card
    pub payment_information: PaymentInformation,
    /// Amount and bill-to
    pub order_information: OrderInformation,
}

/// `processingInformation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingInformation {
    /// Capture in the same call; always false here
    pub capture: bool,
    /// `internet` for e-commerce
    pub commerce_indicator: String,
}

/// `paymentInformation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInformation {
    /// Card
    pub card: Card,
}

/// `paymentInformation.card`
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// PAN
    pub number: String,
    /// `MM`
    pub expiration_month: String,
    /// `YYYY`
    pub expiration_year: String,
    /// CVV
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("number", &masked_pan(&self.number))
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("security_code", &self.security_code.as_ref().map(|_| "***"))
            .finish()
    }
}

/// `orderInformation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInformation {
    /// Amount
    pub amount_details: AmountDetails,
    /// Billing address (authorize only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<BillTo>,
}

/// `orderInformation.amountDetails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountDetails {
    /// Major-unit decimal string
    pub total_amount: String,
    /// ISO 4217 alpha code
    pub currency: String,
}

/// `orderInformation.billTo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTo {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Street line 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Street line 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// State / province
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166 alpha-2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// E-mail (mandatory at the processor)
    pub email: String,
}

/// Capture and refund body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRequest {
    /// Merchant reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_reference_information: Option<ClientReferenceInformation>,
    /// Amount
    pub order_information: OrderInformation,
}

/// Void body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidBody {
    /// Merchant reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_reference_information: Option<ClientReferenceInformation>,
}

impl HasClientReference for PaymentRequest {
    fn client_reference_information(&self) -> Option<&ClientReferenceInformation> {
        self.client_reference_information.as_ref()
    }
}

impl HasClientReference for AmountRequest {
    fn client_reference_information(&self) -> Option<&ClientReferenceInformation> {
        self.client_reference_information.as_ref()
    }
}

impl HasClientReference for VoidBody {
    fn client_reference_information(&self) -> Option<&ClientReferenceInformation> {
        self.client_reference_information.as_ref()
    }
}

// =========================================================================
// RESPONSE
// =========================================================================

/// Payment, capture, void and refund replies, and 4xx/5xx error bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CybersourceResponse {
    /// Resource id (the payment id on authorizations)
    pub id: String,
    /// `AUTHORIZED`, `DECLINED`, `PENDING`, `VOIDED`, `INVALID_REQUEST`, ...
    pub status: String,
    /// Reason on error bodies
    pub reason: String,
    /// Message on error bodies
    pub message: String,
    /// Decline details
    pub error_information: Option<ErrorInformation>,
    /// Issuer/network results
    pub processor_information: Option<ProcessorInformation>,
    /// Echoed reference
    pub client_reference_information: Option<ClientReferenceInformation>,
}

impl CybersourceResponse {
    /// Body carries neither a status nor a reason
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
            && self.reason.is_empty()
            && self
                .error_information
                .as_ref()
                .map_or(true, |info| info.reason.is_empty())
    }
}

/// `errorInformation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorInformation {
    /// Reason code (`PROCESSOR_DECLINED`, `AVS_FAILED`, ...)
    pub reason: String,
    /// Text
    pub message: String,
}

/// `processorInformation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorInformation {
    /// Network response code
    pub response_code: String,
    /// Issuer approval code
    pub approval_code: String,
    /// AVS result
    pub avs: Option<AvsInformation>,
    /// CVV result
    pub card_verification: Option<CardVerification>,
}

/// `processorInformation.avs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvsInformation {
    /// Normalized-by-CyberSource AVS code
    pub code: String,
    /// Code as returned by the network
    pub code_raw: String,
}

/// `processorInformation.cardVerification`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardVerification {
    /// CVV result code
    pub result_code: String,
    /// Code as returned by the network
    pub result_code_raw: String,
}
