//! CyberSource wire response → canonical response

use super::codes::{normalize_error_code, success_status, translate_avs, translate_cvv};
use super::wire::CybersourceResponse;
use gateway_core::{
    AuthorizationResponse, CaptureResponse, Operation, RefundResponse, VoidResponse,
};

fn succeeded(operation: Operation, response: &CybersourceResponse) -> bool {
    response.status == success_status(operation)
}

/// `errorInformation.reason`, else the error body's `reason`, else the status
fn error_code(operation: Operation, response: &CybersourceResponse) -> String {
    let raw = response
        .error_information
        .as_ref()
        .map(|info| info.reason.as_str())
        .filter(|reason| !reason.is_empty())
        .or(Some(response.reason.as_str()).filter(|reason| !reason.is_empty()))
        .unwrap_or(response.status.as_str());

    normalize_error_code(operation, raw)
}

fn verdict(operation: Operation, response: &CybersourceResponse) -> (bool, Option<String>) {
    let success = succeeded(operation, response);
    (success, (!success).then(|| error_code(operation, response)))
}

/// Authorize reply
pub fn translate_auth_response(response: &CybersourceResponse) -> AuthorizationResponse {
    let (success, error_code) = verdict(Operation::Authorize, response);
    let processor = response.processor_information.clone().unwrap_or_default();
    let avs_raw = processor.avs.map(|avs| avs.code).unwrap_or_default();
    let cvv_raw = processor
        .card_verification
        .map(|cv| cv.result_code)
        .unwrap_or_default();

    let message = response
        .error_information
        .as_ref()
        .map(|info| info.message.clone())
        .filter(|m| !m.is_empty())
        .or_else(|| Some(response.message.clone()).filter(|m| !m.is_empty()))
        .or_else(|| Some(response.status.clone()).filter(|s| !s.is_empty()));

    AuthorizationResponse {
        success,
        transaction_reference: response.id.clone(),
        avs_result: translate_avs(&avs_raw),
        cvv_result: translate_cvv(&cvv_raw),
        avs_result_raw: avs_raw,
        cvv_result_raw: cvv_raw,
        error_code,
        response: message,
    }
}

/// Capture reply
pub fn translate_capture_response(response: &CybersourceResponse) -> CaptureResponse {
    let (success, error_code) = verdict(Operation::Capture, response);
    CaptureResponse {
        success,
        transaction_reference: response.id.clone(),
        error_code,
    }
}

/// Void reply
pub fn translate_void_response(response: &CybersourceResponse) -> VoidResponse {
    let (success, error_code) = verdict(Operation::Void, response);
    VoidResponse {
        success,
        transaction_reference: response.id.clone(),
        error_code,
    }
}

/// Refund reply
pub fn translate_refund_response(response: &CybersourceResponse) -> RefundResponse {
    let (success, error_code) = verdict(Operation::Refund, response);
    RefundResponse {
        success,
        transaction_reference: response.id.clone(),
        error_code,
    }
}
