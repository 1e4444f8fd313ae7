//! Canonical request → Authorize.Net wire request

use super::wire::*;
use super::AuthorizeNetCredentials;
use crate::wire::require_reference;
use gateway_core::{
    AuthorizationRequest, BillingAddress, CaptureRequest, CreditCard, Error, Operation,
    Processor, RefundRequest, Result, VoidRequest, OPTION_CREDIT_CARD_LAST_FOUR,
    OPTION_CUSTOMER_IP, OPTION_DESCRIPTION, OPTION_EMAIL,
};

/// `refId` and `invoiceNumber` length limit
pub const MAX_REFERENCE_LENGTH: usize = 20;

/// Expiry placeholder accepted on refunds
const MASKED_EXPIRATION: &str = "XXXX";

/// Build an `authOnlyTransaction`
pub fn build_auth_request(
    credentials: &AuthorizeNetCredentials,
    request: &AuthorizationRequest,
) -> Result<AuthorizeNetRequest<AuthTransaction>> {
    let ref_id = client_reference(
        Operation::Authorize,
        request.client_transaction_reference.as_deref(),
    )?;

    let description = request.options.get_str(OPTION_DESCRIPTION);
    let order = (ref_id.is_some() || description.is_some()).then(|| Order {
        invoice_number: ref_id.clone(),
        description,
    });

    let transaction = AuthTransaction {
        transaction_type: TransactionType::AuthOnly,
        amount: request.amount.to_decimal().to_string(),
        payment: Payment {
            credit_card: card_details(&request.credit_card),
        },
        order,
        customer: request
            .options
            .get_str(OPTION_EMAIL)
            .map(|email| Customer { email }),
        bill_to: request
            .billing_address
            .as_ref()
            .map(|address| bill_to(&request.credit_card, address)),
        customer_ip: request.options.get_str(OPTION_CUSTOMER_IP),
    };

    Ok(envelope(credentials, ref_id, transaction))
}

/// Build a `priorAuthCaptureTransaction`
pub fn build_capture_request(
    credentials: &AuthorizeNetCredentials,
    request: &CaptureRequest,
) -> Result<AuthorizeNetRequest<CaptureTransaction>> {
    let ref_trans_id = require_reference(
        Processor::AuthorizeNet,
        Operation::Capture,
        &request.transaction_reference,
    )?;
    let ref_id = client_reference(
        Operation::Capture,
        request.client_transaction_reference.as_deref(),
    )?;

    let transaction = CaptureTransaction {
        transaction_type: TransactionType::PriorAuthCapture,
        amount: request.amount.to_decimal().to_string(),
        ref_trans_id: ref_trans_id.to_string(),
    };

    Ok(envelope(credentials, ref_id, transaction))
}

/// Build a `voidTransaction`
pub fn build_void_request(
    credentials: &AuthorizeNetCredentials,
    request: &VoidRequest,
) -> Result<AuthorizeNetRequest<VoidTransaction>> {
    let ref_trans_id = require_reference(
        Processor::AuthorizeNet,
        Operation::Void,
        &request.transaction_reference,
    )?;
    let ref_id = client_reference(
        Operation::Void,
        request.client_transaction_reference.as_deref(),
    )?;

    let transaction = VoidTransaction {
        transaction_type: TransactionType::Void,
        ref_trans_id: ref_trans_id.to_string(),
    };

    Ok(envelope(credentials, ref_id, transaction))
}

/// Build a `refundTransaction`. The processor matches refunds on the last
/// four card digits, so the `credit_card_last_four` option is mandatory.
pub fn build_refund_request(
    credentials: &AuthorizeNetCredentials,
    request: &RefundRequest,
) -> Result<AuthorizeNetRequest<RefundTransaction>> {
    let ref_trans_id = require_reference(
        Processor::AuthorizeNet,
        Operation::Refund,
        &request.transaction_reference,
    )?;
    let ref_id = client_reference(
        Operation::Refund,
        request.client_transaction_reference.as_deref(),
    )?;

    let last_four = request
        .options
        .get_str(OPTION_CREDIT_CARD_LAST_FOUR)
        .ok_or_else(|| {
            Error::malformed(
                Processor::AuthorizeNet,
                Operation::Refund,
                format!("option '{}' is required", OPTION_CREDIT_CARD_LAST_FOUR),
            )
        })?;

    if last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::malformed(
            Processor::AuthorizeNet,
            Operation::Refund,
            format!("option '{}' must be four digits", OPTION_CREDIT_CARD_LAST_FOUR),
        ));
    }

    let transaction = RefundTransaction {
        transaction_type: TransactionType::Refund,
        amount: request.amount.to_decimal().to_string(),
        payment: Payment {
            credit_card: CreditCardDetails {
                card_number: last_four,
                expiration_date: MASKED_EXPIRATION.to_string(),
                card_code: None,
            },
        },
        ref_trans_id: ref_trans_id.to_string(),
    };

    Ok(envelope(credentials, ref_id, transaction))
}

fn envelope<T>(
    credentials: &AuthorizeNetCredentials,
    ref_id: Option<String>,
    transaction_request: T,
) -> AuthorizeNetRequest<T> {
    AuthorizeNetRequest {
        create_transaction_request: CreateTransactionRequest {
            merchant_authentication: MerchantAuthentication {
                name: credentials.name.clone(),
                transaction_key: credentials.transaction_key.clone(),
            },
            ref_id,
            transaction_request,
        },
    }
}

fn client_reference(operation: Operation, reference: Option<&str>) -> Result<Option<String>> {
    match reference {
        Some(reference) if reference.chars().count() > MAX_REFERENCE_LENGTH => {
            Err(Error::malformed(
                Processor::AuthorizeNet,
                operation,
                format!(
                    "client transaction reference exceeds {} characters",
                    MAX_REFERENCE_LENGTH
                ),
            ))
        }
        Some(reference) if !reference.is_empty() => Ok(Some(reference.to_string())),
        _ => Ok(None),
    }
}

fn card_details(card: &CreditCard) -> CreditCardDetails {
    CreditCardDetails {
        card_number: card.number.clone(),
        expiration_date: format!("{:04}-{:02}", card.expiration_year, card.expiration_month),
        card_code: card.cvv.clone(),
    }
}

fn bill_to(card: &CreditCard, address: &BillingAddress) -> BillTo {
    let street = match (&address.street_address1, &address.street_address2) {
        (Some(line1), Some(line2)) => Some(format!("{} {}", line1, line2)),
        (line1, line2) => line1.clone().or_else(|| line2.clone()),
    };

    BillTo {
        first_name: Some(card.first_name.clone()).filter(|name| !name.is_empty()),
        last_name: Some(card.last_name.clone()).filter(|name| !name.is_empty()),
        address: street,
        city: address.locality.clone(),
        state: address.region_code.clone(),
        zip: address.postal_code.clone(),
        country: address.country_code.clone(),
    }
}
