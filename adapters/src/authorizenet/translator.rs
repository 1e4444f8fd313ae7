//! Authorize.Net wire response → canonical response

use super::codes::{
    normalize_error_code, translate_avs, translate_cvv, MESSAGE_CODE_ALREADY_CAPTURED,
    RESPONSE_CODE_APPROVED,
};
use super::wire::{AuthorizeNetResponse, TransactionResponse};
use gateway_core::{
    error_codes, AuthorizationResponse, CaptureResponse, RefundResponse, VoidResponse,
};

/// Outcome shared by all four operations
#[derive(Debug, Clone, PartialEq, Eq)]
struct Verdict {
    success: bool,
    transaction_reference: String,
    error_code: Option<String>,
}

fn verdict(response: &AuthorizeNetResponse) -> Verdict {
    let Some(txn) = response.transaction_response.as_ref() else {
        // Rejected before reaching the transaction engine (bad credentials,
        // schema violation): only the API-level messages are populated
        let raw = response
            .messages
            .message
            .first()
            .map(|m| m.code.as_str())
            .filter(|code| !code.is_empty())
            .unwrap_or(response.messages.result_code.as_str());

        return Verdict {
            success: false,
            transaction_reference: String::new(),
            error_code: Some(normalize_error_code(raw)),
        };
    };

    let success = txn.response_code == RESPONSE_CODE_APPROVED;
    let error_code = (!success).then(|| {
        let raw = txn
            .errors
            .first()
            .map(|e| e.error_code.as_str())
            .unwrap_or(txn.response_code.as_str());
        normalize_error_code(raw)
    });

    Verdict {
        success,
        transaction_reference: txn.trans_id.clone(),
        error_code,
    }
}

fn is_already_captured(txn: &TransactionResponse) -> bool {
    txn.messages
        .iter()
        .any(|m| m.code == MESSAGE_CODE_ALREADY_CAPTURED)
        || txn
            .errors
            .iter()
            .any(|e| e.error_code == MESSAGE_CODE_ALREADY_CAPTURED)
}

fn response_text(txn: &TransactionResponse) -> Option<String> {
    txn.errors
        .first()
        .map(|e| e.error_text.clone())
        .or_else(|| txn.messages.first().map(|m| m.description.clone()))
        .filter(|text| !text.is_empty())
}

/// Authorize reply
pub fn translate_auth_response(response: &AuthorizeNetResponse) -> AuthorizationResponse {
    let verdict = verdict(response);
    let txn = response.transaction_response.clone().unwrap_or_default();

    AuthorizationResponse {
        success: verdict.success,
        transaction_reference: verdict.transaction_reference,
        avs_result: translate_avs(&txn.avs_result_code),
        cvv_result: translate_cvv(&txn.cvv_result_code),
        avs_result_raw: txn.avs_result_code.clone(),
        cvv_result_raw: txn.cvv_result_code.clone(),
        error_code: verdict.error_code,
        response: response_text(&txn).or_else(|| {
            response
                .messages
                .message
                .first()
                .map(|m| m.text.clone())
                .filter(|text| !text.is_empty())
        }),
    }
}

/// Capture reply. A second capture of the same authorization comes back
/// approved with message 311; that is reported as a failure.
pub fn translate_capture_response(response: &AuthorizeNetResponse) -> CaptureResponse {
    let mut verdict = verdict(response);

    if let Some(txn) = response.transaction_response.as_ref() {
        if is_already_captured(txn) {
            verdict.success = false;
            verdict.error_code = Some(error_codes::ALREADY_CAPTURED.to_string());
        }
    }

    CaptureResponse {
        success: verdict.success,
        transaction_reference: verdict.transaction_reference,
        error_code: verdict.error_code,
    }
}

/// Void reply
pub fn translate_void_response(response: &AuthorizeNetResponse) -> VoidResponse {
    let verdict = verdict(response);
    VoidResponse {
        success: verdict.success,
        transaction_reference: verdict.transaction_reference,
        error_code: verdict.error_code,
    }
}

/// Refund reply
pub fn translate_refund_response(response: &AuthorizeNetResponse) -> RefundResponse {
    let verdict = verdict(response);
    RefundResponse {
        success: verdict.success,
        transaction_reference: verdict.transaction_reference,
        error_code: verdict.error_code,
    }
}
