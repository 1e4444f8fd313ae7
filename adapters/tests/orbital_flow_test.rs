//! Orbital lifecycle against a recording fake client

mod common;

use common::*;
use gateway_adapters::transport::CONTENT_TYPE_XML;
use gateway_adapters::{OrbitalCredentials, OrbitalGateway, Transport};
use gateway_core::{AvsResult, CvvResult, Environment, Gateway};
use std::sync::Arc;

const URL: &str = "https://orbitalvar1.chasepaymentech.com/authorize";

fn gateway(client: Arc<RecordingClient>) -> OrbitalGateway {
    OrbitalGateway::with_url(
        OrbitalCredentials::new("user", "pass", "123456"),
        URL,
        Transport::new(client),
    )
}

#[test]
fn test_environment_selects_endpoint() {
    let sandbox = OrbitalGateway::new(
        OrbitalCredentials::new("user", "pass", "123456"),
        Environment::Sandbox,
        RecordingClient::new(),
    );
    assert_eq!(sandbox.url(), URL);

    let production = OrbitalGateway::new(
        OrbitalCredentials::new("user", "pass", "123456"),
        Environment::Production,
        RecordingClient::new(),
    );
    assert_eq!(production.url(), "https://orbital1.chasepaymentech.com/authorize");
}

#[tokio::test]
async fn test_authorize_then_capture() {
    let client = RecordingClient::new();
    client.reply(
        200,
        r#"{"Body": {"ProcStatus": "0", "ApprovalStatus": "1", "RespCode": "00",
            "StatusMsg": "Approved", "TxRefNum": "5F1A2B3C4D", "AVSRespCode": "H ",
            "CVV2RespCode": "M", "OrderID": "order-1"}}"#,
    );
    client.reply(
        200,
        r#"{"Body": {"ProcStatus": 0, "TxRefNum": "5F1A2B3C4D", "OrderID": "order-1"}}"#,
    );
    let gateway = gateway(client.clone());

    let auth = gateway.authorize(&auth_request(Some("order-1"))).await.unwrap();
    assert!(auth.success);
    assert_eq!(auth.transaction_reference, "5F1A2B3C4D");
    assert_eq!(auth.avs_result, AvsResult::Match);
    assert_eq!(auth.avs_result_raw, "H ");
    assert_eq!(auth.cvv_result, CvvResult::Match);

    let capture = gateway
        .capture(&capture_request(&auth.transaction_reference, Some("order-1")))
        .await
        .unwrap();
    assert!(capture.success);

    let requests = client.requests();
    assert_eq!(requests[0].header("Content-Type"), Some(CONTENT_TYPE_XML));
    assert_eq!(requests[0].header("Merchant-id"), Some("123456"));

    let auth_xml = client.text_body(0);
    assert!(auth_xml.contains("<NewOrder>"));
    assert!(auth_xml.contains("<MessageType>A</MessageType>"));
    assert!(auth_xml.contains("<OrderID>order-1</OrderID>"));

    let capture_xml = client.text_body(1);
    assert!(capture_xml.contains("<MarkForCapture>"));
    assert!(capture_xml.contains("<TxRefNum>5F1A2B3C4D</TxRefNum>"));
}

#[tokio::test]
async fn test_decline() {
    let client = RecordingClient::new();
    client.reply(
        200,
        r#"{"Body": {"ProcStatus": "0", "ApprovalStatus": "0", "RespCode": "51",
            "RespMsg": "Insufficient Funds", "TxRefNum": "5F1A2B3C4E",
            "AVSRespCode": "  ", "CVV2RespCode": " "}}"#,
    );
    let gateway = gateway(client);

    let auth = gateway.authorize(&auth_request(Some("order-2"))).await.unwrap();
    assert!(!auth.success);
    assert_eq!(auth.error_code.as_deref(), Some("insufficient_funds"));
    assert_eq!(auth.avs_result, AvsResult::Unavailable);
}

#[tokio::test]
async fn test_capture_twice_is_already_captured() {
    let client = RecordingClient::new();
    client.reply(200, r#"{"Body": {"ProcStatus": "0", "TxRefNum": "5F1A2B3C4D"}}"#);
    client.reply(
        200,
        r#"{"Body": {"ProcStatus": "882",
            "StatusMsg": "This transaction is locked down. You cannot mark or unmark it.",
            "TxRefNum": "5F1A2B3C4D"}}"#,
    );
    let gateway = gateway(client);

    let request = capture_request("5F1A2B3C4D", Some("order-1"));
    assert!(gateway.capture(&request).await.unwrap().success);

    let second = gateway.capture(&request).await.unwrap();
    assert!(!second.success);
    assert_eq!(second.error_code.as_deref(), Some("already_captured"));
}

#[tokio::test]
async fn test_missing_order_id_never_reaches_network() {
    let client = RecordingClient::new();
    let gateway = gateway(client.clone());

    let err = gateway
        .void(&void_request("5F1A2B3C4D", None))
        .await
        .unwrap_err();
    assert!(err.is_malformed_request());

    let err = gateway.authorize(&auth_request(None)).await.unwrap_err();
    assert!(err.is_malformed_request());

    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_refund_and_void() {
    let client = RecordingClient::new();
    client.reply(200, r#"{"Body": {"ProcStatus": "0", "TxRefNum": "5F1A2B3C4F"}}"#);
    client.reply(200, r#"{"Body": {"ProcStatus": "0", "TxRefNum": "5F1A2B3C4D"}}"#);
    let gateway = gateway(client.clone());

    let refund = gateway
        .refund(&refund_request("5F1A2B3C4D", 500, Some("order-1")))
        .await
        .unwrap();
    assert!(refund.success);
    assert_eq!(refund.transaction_reference, "5F1A2B3C4F");

    let void = gateway
        .void(&void_request("5F1A2B3C4D", Some("order-1")))
        .await
        .unwrap();
    assert!(void.success);

    assert!(client.text_body(0).contains("<MessageType>R</MessageType>"));
    assert!(client.text_body(0).contains("<Amount>500</Amount>"));
    assert!(client.text_body(1).contains("<Reversal>"));
}

#[tokio::test]
async fn test_refund_above_captured_amount_keeps_raw_status() {
    let client = RecordingClient::new();
    client.reply(
        200,
        r#"{"Body": {"ProcStatus": "9725",
            "StatusMsg": "Refund amount exceeds the captured amount", "TxRefNum": ""}}"#,
    );
    let gateway = gateway(client);

    let refund = gateway
        .refund(&refund_request("5F1A2B3C4D", 999_999, Some("order-1")))
        .await
        .unwrap();
    assert!(!refund.success);
    assert_eq!(refund.error_code.as_deref(), Some("9725"));
}

#[tokio::test]
async fn test_non_orbital_reply_is_a_transport_error() {
    let client = RecordingClient::new();
    client.reply(503, "<html>Service Unavailable</html>");
    let gateway = gateway(client);

    let err = gateway
        .capture(&capture_request("5F1A2B3C4D", Some("order-1")))
        .await
        .unwrap_err();
    assert!(err.is_transport());
}
