//! Authorize.Net code tables

use gateway_core::{error_codes, AvsResult, CvvResult};

/// `transactionResponse.responseCode` for an approved transaction
pub const RESPONSE_CODE_APPROVED: &str = "1";

/// Transaction message code: "This transaction has already been captured."
pub const MESSAGE_CODE_ALREADY_CAPTURED: &str = "311";

/// Raw AVS code → canonical bucket
pub fn translate_avs(raw: &str) -> AvsResult {
    match raw.trim() {
        "X" | "Y" => AvsResult::Match,
        "A" => AvsResult::StreetMatchOnly,
        "W" | "Z" => AvsResult::PostalMatchOnly,
        "N" => AvsResult::NoMatch,
        "G" => AvsResult::NonUsIssuer,
        "S" | "P" => AvsResult::Unsupported,
        "E" => AvsResult::Error,
        // B (not provided), R (retry), U (unavailable) and anything undocumented
        _ => AvsResult::Unavailable,
    }
}

/// Raw card code result → canonical bucket
pub fn translate_cvv(raw: &str) -> CvvResult {
    match raw.trim() {
        "M" => CvvResult::Match,
        "N" => CvvResult::NoMatch,
        "P" => CvvResult::NotProcessed,
        "S" => CvvResult::NotPresent,
        "U" => CvvResult::Unsupported,
        _ => CvvResult::Unavailable,
    }
}

/// Raw error/response/message code → canonical error code, or the raw code
/// when the table has no entry
pub fn normalize_error_code(raw: &str) -> String {
    let canonical = match raw {
        "2" | "4" | "41" | "250" | "251" => error_codes::CARD_DECLINED,
        "6" | "37" | "315" => error_codes::INVALID_CARD_NUMBER,
        "8" | "317" => error_codes::EXPIRED_CARD,
        "11" => error_codes::DUPLICATE_TRANSACTION,
        "16" | "E00040" => error_codes::TRANSACTION_NOT_FOUND,
        "27" | "45" | "127" => error_codes::AVS_MISMATCH,
        "44" | "65" => error_codes::CVV_MISMATCH,
        "55" => error_codes::REFUND_EXCEEDS_CAPTURED,
        "13" | "E00007" | "E00008" => error_codes::INVALID_MERCHANT_CREDENTIALS,
        "19" | "20" | "21" | "22" | "23" | "25" | "26" | "57" | "58" | "59" | "60" | "61"
        | "62" | "63" | "E00001" => error_codes::PROCESSING_ERROR,
        "311" => error_codes::ALREADY_CAPTURED,
        other => other,
    };
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avs_table() {
        assert_eq!(translate_avs("Y"), AvsResult::Match);
        assert_eq!(translate_avs("X"), AvsResult::Match);
        assert_eq!(translate_avs("A"), AvsResult::StreetMatchOnly);
        assert_eq!(translate_avs("Z"), AvsResult::PostalMatchOnly);
        assert_eq!(translate_avs("N"), AvsResult::NoMatch);
        assert_eq!(translate_avs("E"), AvsResult::Error);
        assert_eq!(translate_avs("S"), AvsResult::Unsupported);
        assert_eq!(translate_avs("U"), AvsResult::Unavailable);
        assert_eq!(translate_avs(""), AvsResult::Unavailable);
        assert_eq!(translate_avs("Q"), AvsResult::Unavailable);
    }

    #[test]
    fn test_cvv_table() {
        assert_eq!(translate_cvv("M"), CvvResult::Match);
        assert_eq!(translate_cvv("N"), CvvResult::NoMatch);
        assert_eq!(translate_cvv("P"), CvvResult::NotProcessed);
        assert_eq!(translate_cvv("S"), CvvResult::NotPresent);
        assert_eq!(translate_cvv("U"), CvvResult::Unsupported);
        assert_eq!(translate_cvv("?"), CvvResult::Unavailable);
    }

    #[test]
    fn test_error_code_table() {
        assert_eq!(normalize_error_code("2"), "card_declined");
        assert_eq!(normalize_error_code("55"), "refund_exceeds_captured");
        assert_eq!(normalize_error_code("311"), "already_captured");
        assert_eq!(normalize_error_code("E00007"), "invalid_merchant_credentials");
        // unknown codes pass through untouched
        assert_eq!(normalize_error_code("E00027"), "E00027");
        assert_eq!(normalize_error_code("3"), "3");
    }
}
