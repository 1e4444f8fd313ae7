//! Common view over processor wire requests

use gateway_core::{Error, Operation, Processor, Result};

/// Identifiers embedded in a built wire request
pub trait WireRequest {
    /// Prior processor transaction this request points at (capture, void, refund)
    fn transaction_reference(&self) -> Option<&str>;

    /// Client order reference carried by the request
    fn client_reference(&self) -> Option<&str>;
}

/// Reject a blank prior-transaction reference before anything is sent.
/// Anything else goes on the wire exactly as given.
pub(crate) fn require_reference<'a>(
    processor: Processor,
    operation: Operation,
    reference: &'a str,
) -> Result<&'a str> {
    if reference.trim().is_empty() {
        return Err(Error::malformed(
            processor,
            operation,
            "transaction reference is empty",
        ));
    }
    Ok(reference)
}

/// `****1234` rendering of a card number for Debug output
pub fn masked_pan(number: &str) -> String {
    let digits: Vec<char> = number.chars().collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("****{}", tail)
}
