//! Canonical request → CyberSource wire request

use super::wire::*;
use crate::wire::require_reference;
use gateway_core::{
    Amount, AuthorizationRequest, BillingAddress, CaptureRequest, CreditCard, Error, Operation,
    Processor, RefundRequest, Result, VoidRequest, OPTION_EMAIL,
};

/// Payments resource
pub const PAYMENTS_PATH: &str = "/pts/v2/payments";

/// `clientReferenceInformation.code` length limit
pub const MAX_REFERENCE_LENGTH: usize = 50;

/// Commerce indicator for card-not-present e-commerce
pub const COMMERCE_INDICATOR_INTERNET: &str = "internet";

/// `POST /pts/v2/payments` with `capture = false`
pub fn build_auth_request(
    request: &AuthorizationRequest,
) -> Result<CybersourceRequest<PaymentRequest>> {
    let email = request.options.get_str(OPTION_EMAIL).ok_or_else(|| {
        Error::malformed(
            Processor::Cybersource,
            Operation::Authorize,
            format!("option '{}' is required", OPTION_EMAIL),
        )
    })?;
    let client_reference = client_reference(
        Operation::Authorize,
        request.client_transaction_reference.as_deref(),
    )?;
    let card = &request.credit_card;

    let body = PaymentRequest {
        client_reference_information: client_reference,
        processing_information: ProcessingInformation {
            capture: false,
            commerce_indicator: COMMERCE_INDICATOR_INTERNET.to_string(),
        },
        payment_information: PaymentInformation {
            card: Card {
                number: card.number.clone(),
                expiration_month: format!("{:02}", card.expiration_month),
                expiration_year: format!("{:04}", card.expiration_year),
                security_code: card.cvv.clone().filter(|cvv| !cvv.is_empty()),
            },
        },
        order_information: OrderInformation {
            amount_details: amount_details(&request.amount),
            bill_to: Some(bill_to(card, request.billing_address.as_ref(), email)),
        },
    };

    Ok(CybersourceRequest {
        path: PAYMENTS_PATH.to_string(),
        transaction_reference: None,
        body,
    })
}

/// `POST /pts/v2/payments/{id}/captures`
pub fn build_capture_request(
    request: &CaptureRequest,
) -> Result<CybersourceRequest<AmountRequest>> {
    let id = payment_id(Operation::Capture, &request.transaction_reference)?;
    let body = AmountRequest {
        client_reference_information: client_reference(
            Operation::Capture,
            request.client_transaction_reference.as_deref(),
        )?,
        order_information: OrderInformation {
            amount_details: amount_details(&request.amount),
            bill_to: None,
        },
    };

    Ok(CybersourceRequest {
        path: format!("{}/{}/captures", PAYMENTS_PATH, id),
        transaction_reference: Some(id),
        body,
    })
}

/// `POST /pts/v2/payments/{id}/voids`
pub fn build_void_request(request: &VoidRequest) -> Result<CybersourceRequest<VoidBody>> {
    let id = payment_id(Operation::Void, &request.transaction_reference)?;
    let body = VoidBody {
        client_reference_information: client_reference(
            Operation::Void,
            request.client_transaction_reference.as_deref(),
        )?,
    };

    Ok(CybersourceRequest {
        path: format!("{}/{}/voids", PAYMENTS_PATH, id),
        transaction_reference: Some(id),
        body,
    })
}

/// `POST /pts/v2/payments/{id}/refunds`
pub fn build_refund_request(
    request: &RefundRequest,
) -> Result<CybersourceRequest<AmountRequest>> {
    let id = payment_id(Operation::Refund, &request.transaction_reference)?;
    let body = AmountRequest {
        client_reference_information: client_reference(
            Operation::Refund,
            request.client_transaction_reference.as_deref(),
        )?,
        order_information: OrderInformation {
            amount_details: amount_details(&request.amount),
            bill_to: None,
        },
    };

    Ok(CybersourceRequest {
        path: format!("{}/{}/refunds", PAYMENTS_PATH, id),
        transaction_reference: Some(id),
        body,
    })
}

fn is_path_safe(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The payment id is spliced into the URL path
fn payment_id(operation: Operation, reference: &str) -> Result<String> {
    let id = require_reference(Processor::Cybersource, operation, reference)?;
    if !is_path_safe(id) {
        return Err(Error::malformed(
            Processor::Cybersource,
            operation,
            "transaction reference contains characters outside [A-Za-z0-9_-]",
        ));
    }
    Ok(id.to_string())
}

fn client_reference(
    operation: Operation,
    reference: Option<&str>,
) -> Result<Option<ClientReferenceInformation>> {
    let Some(code) = reference.filter(|code| !code.is_empty()) else {
        return Ok(None);
    };

    if code.chars().count() > MAX_REFERENCE_LENGTH {
        return Err(Error::malformed(
            Processor::Cybersource,
            operation,
            format!(
                "client transaction reference exceeds {} characters",
                MAX_REFERENCE_LENGTH
            ),
        ));
    }

    Ok(Some(ClientReferenceInformation {
        code: code.to_string(),
    }))
}

fn amount_details(amount: &Amount) -> AmountDetails {
    AmountDetails {
        total_amount: amount.to_decimal().to_string(),
        currency: amount.currency.to_ascii_uppercase(),
    }
}

fn bill_to(card: &CreditCard, address: Option<&BillingAddress>, email: String) -> BillTo {
    let address = address.cloned().unwrap_or_default();

    BillTo {
        first_name: card.first_name.clone(),
        last_name: card.last_name.clone(),
        address1: address.street_address1,
        address2: address.street_address2,
        locality: address.locality,
        administrative_area: address.region_code,
        postal_code: address.postal_code,
        country: address.country_code,
        email,
    }
}
