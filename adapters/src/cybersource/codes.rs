//! CyberSource code tables

use gateway_core::{error_codes, AvsResult, CvvResult, Operation};

/// Status of an approved authorization
pub const STATUS_AUTHORIZED: &str = "AUTHORIZED";

/// Status of an accepted capture or refund (settles later)
pub const STATUS_PENDING: &str = "PENDING";

/// Status of an accepted void
pub const STATUS_VOIDED: &str = "VOIDED";

/// Status that marks success for an operation
pub fn success_status(operation: Operation) -> &'static str {
    match operation {
        Operation::Authorize => STATUS_AUTHORIZED,
        Operation::Capture | Operation::Refund => STATUS_PENDING,
        Operation::Void => STATUS_VOIDED,
    }
}

/// `processorInformation.avs.code` → canonical bucket
pub fn translate_avs(raw: &str) -> AvsResult {
    match raw.trim() {
        "D" | "F" | "H" | "J" | "M" | "Q" | "V" | "X" | "Y" => AvsResult::Match,
        "A" | "B" | "O" | "T" => AvsResult::StreetMatchOnly,
        "L" | "P" | "W" | "Z" => AvsResult::PostalMatchOnly,
        "K" | "N" => AvsResult::NoMatch,
        "C" | "G" | "I" => AvsResult::NonUsIssuer,
        "S" | "1" => AvsResult::Unsupported,
        "E" | "2" => AvsResult::Error,
        // R (retry), U (unavailable), 3/4 and blanks
        _ => AvsResult::Unavailable,
    }
}

/// `processorInformation.cardVerification.resultCode` → canonical bucket
pub fn translate_cvv(raw: &str) -> CvvResult {
    match raw.trim() {
        "M" => CvvResult::Match,
        "N" => CvvResult::NoMatch,
        "P" => CvvResult::NotProcessed,
        "S" => CvvResult::NotPresent,
        "D" => CvvResult::Suspicious,
        "U" | "X" | "1" => CvvResult::Unsupported,
        "I" | "2" => CvvResult::Error,
        _ => CvvResult::Unavailable,
    }
}

/// Reason code → canonical error code for an operation, or the raw reason
/// when the table has no entry
pub fn normalize_error_code(operation: Operation, raw: &str) -> String {
    let canonical = match (operation, raw) {
        (Operation::Capture, "DUPLICATE_REQUEST" | "TRANSACTION_ALREADY_SETTLED") => {
            error_codes::ALREADY_CAPTURED
        }
        (Operation::Refund, "EXCEEDS_AUTH_AMOUNT" | "INVALID_AMOUNT") => {
            error_codes::REFUND_EXCEEDS_CAPTURED
        }
        (_, "INSUFFICIENT_FUND") => error_codes::INSUFFICIENT_FUNDS,
        (_, "EXPIRED_CARD") => error_codes::EXPIRED_CARD,
        (_, "INVALID_ACCOUNT") => error_codes::INVALID_CARD_NUMBER,
        (_, "PROCESSOR_DECLINED" | "GENERAL_DECLINE" | "CARD_REFUSED" | "STOLEN_LOST_CARD") => {
            error_codes::CARD_DECLINED
        }
        (_, "AVS_FAILED") => error_codes::AVS_MISMATCH,
        (_, "CV_FAILED") => error_codes::CVV_MISMATCH,
        (_, "DUPLICATE_REQUEST") => error_codes::DUPLICATE_TRANSACTION,
        (_, "INVALID_MERCHANT_CONFIGURATION") => error_codes::INVALID_MERCHANT_CREDENTIALS,
        (_, "SYSTEM_ERROR" | "SERVER_TIMEOUT" | "SERVICE_TIMEOUT" | "PROCESSOR_UNAVAILABLE") => {
            error_codes::PROCESSING_ERROR
        }
        (_, other) => other,
    };
    canonical.to_string()
}
