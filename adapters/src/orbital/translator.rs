//! Orbital wire response → canonical response

use super::codes::{
    is_already_captured, normalize_error_code, translate_avs, translate_cvv,
    APPROVAL_STATUS_APPROVED, PROC_STATUS_SUCCESS,
};
use super::wire::{OrbitalResponse, ResponseBody};
use gateway_core::{
    error_codes, AuthorizationResponse, CaptureResponse, RefundResponse, VoidResponse,
};

fn processed(body: &ResponseBody) -> bool {
    body.proc_status.trim() == PROC_STATUS_SUCCESS
}

/// `ProcStatus` when the request was not processed, else the issuer `RespCode`
fn error_code(body: &ResponseBody) -> String {
    let raw = if processed(body) {
        body.resp_code.trim()
    } else {
        body.proc_status.trim()
    };

    if raw.is_empty() {
        error_codes::PROCESSING_ERROR.to_string()
    } else {
        normalize_error_code(raw)
    }
}

fn message(body: &ResponseBody) -> Option<String> {
    [&body.resp_msg, &body.status_msg]
        .into_iter()
        .map(|msg| msg.trim())
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// Authorize reply. Approved only when processed and `ApprovalStatus` is `1`.
pub fn translate_auth_response(response: &OrbitalResponse) -> AuthorizationResponse {
    let body = &response.body;
    let success = processed(body) && body.approval_status.trim() == APPROVAL_STATUS_APPROVED;

    AuthorizationResponse {
        success,
        transaction_reference: body.tx_ref_num.clone(),
        avs_result: translate_avs(&body.avs_resp_code),
        cvv_result: translate_cvv(&body.cvv2_resp_code),
        avs_result_raw: body.avs_resp_code.clone(),
        cvv_result_raw: body.cvv2_resp_code.clone(),
        error_code: (!success).then(|| error_code(body)),
        response: message(body),
    }
}

/// `MarkForCapture` reply
pub fn translate_capture_response(response: &OrbitalResponse) -> CaptureResponse {
    let body = &response.body;
    let success = processed(body);

    let error_code = if success {
        None
    } else if is_already_captured(&body.proc_status, &body.status_msg) {
        Some(error_codes::ALREADY_CAPTURED.to_string())
    } else {
        Some(error_code(body))
    };

    CaptureResponse {
        success,
        transaction_reference: body.tx_ref_num.clone(),
        error_code,
    }
}

/// `Reversal` reply
pub fn translate_void_response(response: &OrbitalResponse) -> VoidResponse {
    let body = &response.body;
    let success = processed(body);

    VoidResponse {
        success,
        transaction_reference: body.tx_ref_num.clone(),
        error_code: (!success).then(|| error_code(body)),
    }
}

/// Refund `NewOrder` reply
pub fn translate_refund_response(response: &OrbitalResponse) -> RefundResponse {
    let body = &response.body;
    let success = processed(body);

    RefundResponse {
        success,
        transaction_reference: body.tx_ref_num.clone(),
        error_code: (!success).then(|| error_code(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{AvsResult, CvvResult};

    fn parse(json: &str) -> OrbitalResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_approved_authorization() {
        let canonical = translate_auth_response(&parse(
            r#"{"Body": {"ProcStatus": "0", "ApprovalStatus": "1", "RespCode": "00",
                "RespMsg": "", "StatusMsg": "Approved", "TxRefNum": "5F1A2B3C",
                "AVSRespCode": "H ", "CVV2RespCode": "M", "OrderID": "order-1"}}"#,
        ));

        assert!(canonical.success);
        assert_eq!(canonical.transaction_reference, "5F1A2B3C");
        assert_eq!(canonical.avs_result, AvsResult::Match);
        assert_eq!(canonical.avs_result_raw, "H ");
        assert_eq!(canonical.cvv_result, CvvResult::Match);
        assert_eq!(canonical.error_code, None);
        assert_eq!(canonical.response.as_deref(), Some("Approved"));
    }

    #[test]
    fn test_issuer_decline_uses_resp_code() {
        let canonical = translate_auth_response(&parse(
            r#"{"Body": {"ProcStatus": 0, "ApprovalStatus": 0, "RespCode": "05",
                "RespMsg": "Do Not Honor", "TxRefNum": "5F1A2B3D",
                "AVSRespCode": "G ", "CVV2RespCode": "N"}}"#,
        ));

        assert!(!canonical.success);
        assert_eq!(canonical.error_code.as_deref(), Some("card_declined"));
        assert_eq!(canonical.avs_result, AvsResult::NoMatch);
        assert_eq!(canonical.cvv_result, CvvResult::NoMatch);
        assert_eq!(canonical.response.as_deref(), Some("Do Not Honor"));
    }

    #[test]
    fn test_processing_failure_uses_proc_status() {
        let canonical = translate_auth_response(&parse(
            r#"{"Body": {"ProcStatus": "9714", "StatusMsg": "Invalid Field Data"}}"#,
        ));

        assert!(!canonical.success);
        assert_eq!(canonical.error_code.as_deref(), Some("9714"));
        assert_eq!(canonical.avs_result, AvsResult::Unavailable);
        assert_eq!(canonical.cvv_result, CvvResult::Unavailable);
    }

    #[test]
    fn test_capture_twice() {
        let canonical = translate_capture_response(&parse(
            r#"{"Body": {"ProcStatus": 882,
                "StatusMsg": "This transaction is locked down. You cannot mark or unmark it.",
                "TxRefNum": "5F1A2B3C"}}"#,
        ));

        assert!(!canonical.success);
        assert_eq!(canonical.error_code.as_deref(), Some("already_captured"));
    }

    #[test]
    fn test_capture_twice_recognized_by_message() {
        let canonical = translate_capture_response(&parse(
            r#"{"Body": {"ProcStatus": "9999",
                "StatusMsg": "Transaction has already been captured", "TxRefNum": "5F1A2B3C"}}"#,
        ));

        assert!(!canonical.success);
        assert_eq!(canonical.error_code.as_deref(), Some("already_captured"));
    }

    #[test]
    fn test_refund_above_captured_keeps_proc_status() {
        let canonical = translate_refund_response(&parse(
            r#"{"Body": {"ProcStatus": "9725",
                "StatusMsg": "Refund amount exceeds the captured amount", "TxRefNum": "5F1A2B3C"}}"#,
        ));

        assert!(!canonical.success);
        assert_eq!(canonical.error_code.as_deref(), Some("9725"));
    }

    #[test]
    fn test_void_and_refund() {
        let ok = parse(r#"{"Body": {"ProcStatus": "0", "TxRefNum": "5F1A2B3C"}}"#);
        assert!(translate_void_response(&ok).success);
        assert!(translate_refund_response(&ok).success);
        assert_eq!(translate_refund_response(&ok).transaction_reference, "5F1A2B3C");

        let empty = parse(r#"{"Body": {}}"#);
        let refund = translate_refund_response(&empty);
        assert!(!refund.success);
        assert_eq!(refund.error_code.as_deref(), Some("processing_error"));
    }
}
