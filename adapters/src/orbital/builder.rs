//! Canonical request → Orbital wire request

use super::wire::*;
use super::OrbitalCredentials;
use crate::wire::require_reference;
use gateway_core::{
    currency, Amount, AuthorizationRequest, BillingAddress, CaptureRequest, CreditCard, Error,
    Operation, Processor, RefundRequest, Result, VoidRequest,
};

/// `OrderID` length limit
pub const MAX_ORDER_ID_LENGTH: usize = 22;

/// Build a `NewOrder` with message type `A`
pub fn build_auth_request(
    credentials: &OrbitalCredentials,
    request: &AuthorizationRequest,
) -> Result<NewOrder> {
    let order_id = order_id(
        Operation::Authorize,
        request.client_transaction_reference.as_deref(),
    )?;
    let (currency_code, currency_exponent) = currency_fields(Operation::Authorize, &request.amount)?;
    let card = &request.credit_card;

    Ok(NewOrder {
        connection: connection(credentials),
        message_type: MessageType::Authorize,
        account_num: Some(card.number.clone()),
        exp: Some(expiry(card)),
        currency_code,
        currency_exponent,
        card_sec_val: card.cvv.clone().filter(|cvv| !cvv.is_empty()),
        avs: request
            .billing_address
            .as_ref()
            .map(|address| avs_data(card, address)),
        order_id,
        amount: request.amount.minor_units,
        tx_ref_num: None,
    })
}

/// Build a `MarkForCapture`
pub fn build_capture_request(
    credentials: &OrbitalCredentials,
    request: &CaptureRequest,
) -> Result<MarkForCapture> {
    let tx_ref_num = require_reference(
        Processor::Orbital,
        Operation::Capture,
        &request.transaction_reference,
    )?;
    let order_id = order_id(
        Operation::Capture,
        request.client_transaction_reference.as_deref(),
    )?;

    Ok(MarkForCapture {
        connection: connection(credentials),
        order_id,
        amount: request.amount.minor_units,
        tx_ref_num: tx_ref_num.to_string(),
    })
}

/// Build a full `Reversal`
pub fn build_void_request(
    credentials: &OrbitalCredentials,
    request: &VoidRequest,
) -> Result<Reversal> {
    let tx_ref_num = require_reference(
        Processor::Orbital,
        Operation::Void,
        &request.transaction_reference,
    )?;
    let order_id = order_id(
        Operation::Void,
        request.client_transaction_reference.as_deref(),
    )?;

    Ok(Reversal {
        connection: connection(credentials),
        tx_ref_num: tx_ref_num.to_string(),
        order_id,
    })
}

/// Build a `NewOrder` with message type `R` against a prior `TxRefNum`
pub fn build_refund_request(
    credentials: &OrbitalCredentials,
    request: &RefundRequest,
) -> Result<NewOrder> {
    let tx_ref_num = require_reference(
        Processor::Orbital,
        Operation::Refund,
        &request.transaction_reference,
    )?;
    let order_id = order_id(
        Operation::Refund,
        request.client_transaction_reference.as_deref(),
    )?;
    let (currency_code, currency_exponent) = currency_fields(Operation::Refund, &request.amount)?;

    Ok(NewOrder {
        connection: connection(credentials),
        message_type: MessageType::Refund,
        account_num: None,
        exp: None,
        currency_code,
        currency_exponent,
        card_sec_val: None,
        avs: None,
        order_id,
        amount: request.amount.minor_units,
        tx_ref_num: Some(tx_ref_num.to_string()),
    })
}

fn connection(credentials: &OrbitalCredentials) -> Connection {
    Connection {
        username: credentials.username.clone(),
        password: credentials.password.clone(),
        bin: credentials.bin.clone(),
        merchant_id: credentials.merchant_id.clone(),
        terminal_id: credentials.terminal_id.clone(),
    }
}

fn order_id(operation: Operation, reference: Option<&str>) -> Result<String> {
    let reference = reference.unwrap_or_default();

    if reference.trim().is_empty() {
        return Err(Error::malformed(
            Processor::Orbital,
            operation,
            "client transaction reference (OrderID) is required",
        ));
    }
    if reference.chars().count() > MAX_ORDER_ID_LENGTH {
        return Err(Error::malformed(
            Processor::Orbital,
            operation,
            format!("OrderID exceeds {} characters", MAX_ORDER_ID_LENGTH),
        ));
    }

    Ok(reference.to_string())
}

fn currency_fields(operation: Operation, amount: &Amount) -> Result<(String, u32)> {
    let numeric = currency::numeric_code(&amount.currency).ok_or_else(|| {
        Error::malformed(
            Processor::Orbital,
            operation,
            format!("unsupported currency '{}'", amount.currency),
        )
    })?;

    Ok((numeric.to_string(), currency::exponent(&amount.currency)))
}

fn expiry(card: &CreditCard) -> String {
    format!(
        "{:02}{:02}",
        card.expiration_month,
        card.expiration_year % 100
    )
}

fn avs_data(card: &CreditCard, address: &BillingAddress) -> AvsData {
    let name = card.cardholder_name();

    AvsData {
        zip: address.postal_code.clone(),
        address1: address.street_address1.clone(),
        address2: address.street_address2.clone(),
        city: address.locality.clone(),
        state: address.region_code.clone(),
        name: Some(name).filter(|name| !name.is_empty()),
        country_code: address.country_code.clone(),
    }
}
