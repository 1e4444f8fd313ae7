//! Orbital code tables

use gateway_core::{error_codes, AvsResult, CvvResult};

/// `ProcStatus` of a processed request
pub const PROC_STATUS_SUCCESS: &str = "0";

/// `ApprovalStatus` of an approved authorization
pub const APPROVAL_STATUS_APPROVED: &str = "1";

/// Raw `AVSRespCode` → canonical bucket. Codes arrive space padded.
pub fn translate_avs(raw: &str) -> AvsResult {
    match raw.trim() {
        "9" | "B" | "H" | "X" | "JA" | "M2" | "M5" | "N5" | "N8" | "N9" => AvsResult::Match,
        "D" | "F" | "JB" | "M4" | "M7" | "N3" => AvsResult::StreetMatchOnly,
        "A" | "C" | "Z" | "JD" | "M3" | "M6" | "N7" => AvsResult::PostalMatchOnly,
        "E" | "G" | "M1" | "M8" => AvsResult::NoMatch,
        "J" | "JC" | "N4" | "N6" => AvsResult::NonUsIssuer,
        "3" | "4" | "8" | "R" => AvsResult::Unsupported,
        "2" | "5" => AvsResult::Error,
        // 1 (not supplied), 6 (timeout), 7 (unavailable), UK and blanks
        _ => AvsResult::Unavailable,
    }
}

/// Raw `CVV2RespCode` → canonical bucket
pub fn translate_cvv(raw: &str) -> CvvResult {
    match raw.trim() {
        "M" => CvvResult::Match,
        "N" => CvvResult::NoMatch,
        "P" => CvvResult::NotProcessed,
        "S" => CvvResult::NotPresent,
        "U" => CvvResult::Unsupported,
        "I" | "Y" => CvvResult::Error,
        _ => CvvResult::Unavailable,
    }
}

/// `ProcStatus` of a `MarkForCapture` against an order that is already
/// marked (the transaction is locked and can no longer be marked)
pub const PROC_STATUS_ALREADY_CAPTURED: &[&str] = &["882"];

/// Raw `ProcStatus` or `RespCode` → canonical error code, or the raw code
/// when the table has no entry.
///
/// Orbital has no dedicated code for a refund above the captured amount;
/// that decline surfaces as its raw `ProcStatus`.
pub fn normalize_error_code(raw: &str) -> String {
    let raw = raw.trim();
    let canonical = match raw {
        "04" | "05" | "07" | "41" | "43" | "57" | "62" => error_codes::CARD_DECLINED,
        "14" | "15" => error_codes::INVALID_CARD_NUMBER,
        "33" | "54" => error_codes::EXPIRED_CARD,
        "51" => error_codes::INSUFFICIENT_FUNDS,
        "N7" => error_codes::CVV_MISMATCH,
        other => other,
    };
    canonical.to_string()
}

/// Rejected `MarkForCapture` because the order was already marked.
///
/// Keyed on `ProcStatus`. Hosts that answer with a generic processing
/// status are recognized by their `StatusMsg` text as a fallback.
pub fn is_already_captured(proc_status: &str, status_msg: &str) -> bool {
    if PROC_STATUS_ALREADY_CAPTURED.contains(&proc_status.trim()) {
        return true;
    }

    let msg = status_msg.to_ascii_lowercase();
    msg.contains("already") && msg.contains("captur")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avs_table_trims_padding() {
        assert_eq!(translate_avs("H "), AvsResult::Match);
        assert_eq!(translate_avs(" X"), AvsResult::Match);
        assert_eq!(translate_avs("A "), AvsResult::PostalMatchOnly);
        assert_eq!(translate_avs("D "), AvsResult::StreetMatchOnly);
        assert_eq!(translate_avs("G "), AvsResult::NoMatch);
        assert_eq!(translate_avs("5 "), AvsResult::Error);
        assert_eq!(translate_avs("  "), AvsResult::Unavailable);
        assert_eq!(translate_avs("ZZ"), AvsResult::Unavailable);
    }

    #[test]
    fn test_cvv_table() {
        assert_eq!(translate_cvv("M"), CvvResult::Match);
        assert_eq!(translate_cvv("N"), CvvResult::NoMatch);
        assert_eq!(translate_cvv("I"), CvvResult::Error);
        assert_eq!(translate_cvv(""), CvvResult::Unavailable);
    }

    #[test]
    fn test_error_code_table() {
        assert_eq!(normalize_error_code("05"), "card_declined");
        assert_eq!(normalize_error_code("51"), "insufficient_funds");
        assert_eq!(normalize_error_code("33"), "expired_card");
        assert_eq!(normalize_error_code("9714"), "9714");
    }

    #[test]
    fn test_already_captured_by_proc_status() {
        assert!(is_already_captured("882", ""));
        assert!(is_already_captured(" 882", "This transaction is locked down"));
        assert!(!is_already_captured("9714", "Invalid Field Data"));
    }

    #[test]
    fn test_already_captured_message_fallback() {
        assert!(is_already_captured(
            "9999",
            "Transaction has already been captured"
        ));
        assert!(!is_already_captured("9999", "Invalid TxRefNum"));
    }

    #[test]
    fn test_over_refund_passes_through() {
        assert_eq!(normalize_error_code("9725"), "9725");
    }
}
