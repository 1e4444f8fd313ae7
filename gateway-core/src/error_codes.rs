//! Canonical error codes
//!
//! Processor adapters translate the raw codes they recognize into these
//! strings. Raw codes without a table entry are passed through verbatim, so
//! callers can always match on `error_code` without knowing the processor.

/// Capture attempted on an authorization that was already captured
pub const ALREADY_CAPTURED: &str = "already_captured";

/// Refund amount exceeds what is left of the captured amount
pub const REFUND_EXCEEDS_CAPTURED: &str = "refund_exceeds_captured";

/// Generic issuer decline
pub const CARD_DECLINED: &str = "card_declined";

/// Issuer declined for insufficient funds
pub const INSUFFICIENT_FUNDS: &str = "insufficient_funds";

/// Card is expired
pub const EXPIRED_CARD: &str = "expired_card";

/// Card number failed validation
pub const INVALID_CARD_NUMBER: &str = "invalid_card_number";

/// Declined by the merchant's AVS policy
pub const AVS_MISMATCH: &str = "avs_mismatch";

/// Declined by the merchant's card security code policy
pub const CVV_MISMATCH: &str = "cvv_mismatch";

/// Referenced transaction unknown to the processor
pub const TRANSACTION_NOT_FOUND: &str = "transaction_not_found";

/// Merchant credentials rejected by the processor
pub const INVALID_MERCHANT_CREDENTIALS: &str = "invalid_merchant_credentials";

/// Processor detected a duplicate submission
pub const DUPLICATE_TRANSACTION: &str = "duplicate_transaction";

/// Processor-side failure unrelated to the card
pub const PROCESSING_ERROR: &str = "processing_error";

/// Every canonical code
pub const ALL: &[&str] = &[
    ALREADY_CAPTURED,
    REFUND_EXCEEDS_CAPTURED,
    CARD_DECLINED,
    INSUFFICIENT_FUNDS,
    EXPIRED_CARD,
    INVALID_CARD_NUMBER,
    AVS_MISMATCH,
    CVV_MISMATCH,
    TRANSACTION_NOT_FOUND,
    INVALID_MERCHANT_CREDENTIALS,
    DUPLICATE_TRANSACTION,
    PROCESSING_ERROR,
];

/// True for one of the canonical codes above (as opposed to a raw pass-through)
pub fn is_canonical(code: &str) -> bool {
    ALL.contains(&code)
}
