//! Shared fixtures for adapter tests

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use gateway_adapters::{HttpClient, HttpRequest, HttpResponse};
use gateway_core::{
    Amount, AuthorizationRequest, BillingAddress, CaptureRequest, CreditCard, Options,
    RefundRequest, TransportError, VoidRequest,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Fake HTTP client: records every request and replays scripted replies
#[derive(Default)]
pub struct RecordingClient {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply
    pub fn reply(&self, status: u16, body: impl AsRef<[u8]>) {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: Bytes::copy_from_slice(body.as_ref()),
        }));
    }

    /// Queue a transport failure
    pub fn fail(&self, error: TransportError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Body of the n-th request as JSON
    pub fn json_body(&self, n: usize) -> serde_json::Value {
        serde_json::from_slice(&self.requests()[n].body).unwrap()
    }

    /// Body of the n-th request as text
    pub fn text_body(&self, n: usize) -> String {
        String::from_utf8(self.requests()[n].body.to_vec()).unwrap()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no scripted reply".to_string())))
    }
}

pub fn test_card() -> CreditCard {
    CreditCard {
        first_name: "Bolt".to_string(),
        last_name: "Checkout".to_string(),
        number: "4111111111111111".to_string(),
        expiration_month: 8,
        expiration_year: 2030,
        cvv: Some("000".to_string()),
    }
}

pub fn geary_street() -> BillingAddress {
    BillingAddress {
        street_address1: Some("77 Geary St".to_string()),
        street_address2: Some("Floor 4".to_string()),
        locality: Some("San Francisco".to_string()),
        region_code: Some("CA".to_string()),
        postal_code: Some("94108".to_string()),
        country_code: Some("US".to_string()),
    }
}

pub fn auth_request(reference: Option<&str>) -> AuthorizationRequest {
    AuthorizationRequest {
        amount: Amount::usd(1000),
        credit_card: test_card(),
        billing_address: Some(geary_street()),
        client_transaction_reference: reference.map(str::to_string),
        options: Options::new().with("email", "test@bolt.com"),
    }
}

pub fn capture_request(transaction_reference: &str, reference: Option<&str>) -> CaptureRequest {
    CaptureRequest {
        amount: Amount::usd(1000),
        transaction_reference: transaction_reference.to_string(),
        client_transaction_reference: reference.map(str::to_string),
        options: Options::new(),
    }
}

pub fn void_request(transaction_reference: &str, reference: Option<&str>) -> VoidRequest {
    VoidRequest {
        transaction_reference: transaction_reference.to_string(),
        client_transaction_reference: reference.map(str::to_string),
        options: Options::new(),
    }
}

pub fn refund_request(
    transaction_reference: &str,
    minor_units: u64,
    reference: Option<&str>,
) -> RefundRequest {
    RefundRequest {
        amount: Amount::usd(minor_units),
        transaction_reference: transaction_reference.to_string(),
        client_transaction_reference: reference.map(str::to_string),
        options: Options::new().with("credit_card_last_four", "1111"),
    }
}
