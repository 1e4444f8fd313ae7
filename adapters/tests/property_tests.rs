//! Property-based tests for builders, translators and code tables

mod common;

use common::*;
use gateway_adapters::orbital::wire::OrbitalRequest;
use gateway_adapters::wire::WireRequest;
use gateway_adapters::{authorizenet, cybersource, orbital};
use gateway_adapters::{AuthorizeNetCredentials, OrbitalCredentials};
use gateway_core::{AvsResult, CvvResult, Operation};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Code Table Invariants
// ============================================================================

proptest! {
    /// Property: undocumented AVS/CVV codes land in Unavailable for every processor
    #[test]
    fn unknown_avs_cvv_codes_are_unavailable(raw in "[a-z]{3,6}") {
        prop_assert_eq!(authorizenet::codes::translate_avs(&raw), AvsResult::Unavailable);
        prop_assert_eq!(orbital::codes::translate_avs(&raw), AvsResult::Unavailable);
        prop_assert_eq!(cybersource::codes::translate_avs(&raw), AvsResult::Unavailable);

        prop_assert_eq!(authorizenet::codes::translate_cvv(&raw), CvvResult::Unavailable);
        prop_assert_eq!(orbital::codes::translate_cvv(&raw), CvvResult::Unavailable);
        prop_assert_eq!(cybersource::codes::translate_cvv(&raw), CvvResult::Unavailable);
    }

    /// Property: error codes missing from a table pass through unchanged
    #[test]
    fn unknown_error_codes_pass_through(raw in "[a-z]{3,12}") {
        prop_assert_eq!(authorizenet::codes::normalize_error_code(&raw), raw.clone());
        prop_assert_eq!(orbital::codes::normalize_error_code(&raw), raw.clone());
        for operation in Operation::ALL {
            prop_assert_eq!(cybersource::codes::normalize_error_code(operation, &raw), raw.clone());
        }
    }
}

// ============================================================================
// Builder Invariants
// ============================================================================

proptest! {
    /// Property: Authorize.Net builders carry both references through untouched
    #[test]
    fn authorizenet_references_round_trip(
        trans_id in "[ -~]{1,30}",
        reference in "[ -~]{1,20}",
    ) {
        prop_assume!(!trans_id.trim().is_empty());
        let credentials = AuthorizeNetCredentials::new("login", "key");

        let capture = authorizenet::builder::build_capture_request(
            &credentials,
            &capture_request(&trans_id, Some(&reference)),
        ).unwrap();
        prop_assert_eq!(capture.transaction_reference(), Some(trans_id.as_str()));
        prop_assert_eq!(capture.client_reference(), Some(reference.as_str()));

        let void = authorizenet::builder::build_void_request(
            &credentials,
            &void_request(&trans_id, Some(&reference)),
        ).unwrap();
        prop_assert_eq!(void.transaction_reference(), Some(trans_id.as_str()));

        let refund = authorizenet::builder::build_refund_request(
            &credentials,
            &refund_request(&trans_id, 100, Some(&reference)),
        ).unwrap();
        prop_assert_eq!(refund.transaction_reference(), Some(trans_id.as_str()));
        prop_assert_eq!(refund.client_reference(), Some(reference.as_str()));
    }

    /// Property: Orbital builders carry TxRefNum and OrderID through untouched
    #[test]
    fn orbital_references_round_trip(
        tx_ref in "[ -~]{1,30}",
        order_id in "[ -~]{1,22}",
    ) {
        prop_assume!(!tx_ref.trim().is_empty());
        prop_assume!(!order_id.trim().is_empty());
        let credentials = OrbitalCredentials::new("user", "pass", "123456");

        let mark = orbital::builder::build_capture_request(
            &credentials,
            &capture_request(&tx_ref, Some(&order_id)),
        ).unwrap();
        prop_assert_eq!(mark.transaction_reference(), Some(tx_ref.as_str()));
        prop_assert_eq!(mark.client_reference(), Some(order_id.as_str()));

        let reversal = orbital::builder::build_void_request(
            &credentials,
            &void_request(&tx_ref, Some(&order_id)),
        ).unwrap();
        prop_assert_eq!(reversal.transaction_reference(), Some(tx_ref.as_str()));
        prop_assert_eq!(reversal.client_reference(), Some(order_id.as_str()));

        let refund = orbital::builder::build_refund_request(
            &credentials,
            &refund_request(&tx_ref, 100, Some(&order_id)),
        ).unwrap();
        prop_assert_eq!(refund.transaction_reference(), Some(tx_ref.as_str()));
        prop_assert_eq!(refund.client_reference(), Some(order_id.as_str()));
    }

    /// Property: CyberSource client references accept any characters within the length limit
    #[test]
    fn cybersource_references_round_trip(
        id in "[A-Za-z0-9_-]{1,30}",
        reference in prop_oneof![
            "[ -~]{1,50}",
            prop::sample::select(vec!["ORDER#1001", "order 1001", " padded "]).prop_map(String::from),
        ],
    ) {
        let capture = cybersource::builder::build_capture_request(
            &capture_request(&id, Some(&reference)),
        ).unwrap();
        prop_assert_eq!(capture.transaction_reference(), Some(id.as_str()));
        prop_assert_eq!(capture.client_reference(), Some(reference.as_str()));

        let void = cybersource::builder::build_void_request(
            &void_request(&id, Some(&reference)),
        ).unwrap();
        prop_assert_eq!(void.client_reference(), Some(reference.as_str()));

        let refund = cybersource::builder::build_refund_request(
            &refund_request(&id, 100, Some(&reference)),
        ).unwrap();
        prop_assert_eq!(refund.transaction_reference(), Some(id.as_str()));
        prop_assert_eq!(refund.client_reference(), Some(reference.as_str()));
    }

    /// Property: a CyberSource payment id that is not path-safe never reaches a URL
    #[test]
    fn cybersource_unsafe_payment_id_is_malformed(
        prefix in "[0-9]{0,8}",
        unsafe_char in prop::sample::select(vec![' ', '/', '#', '?', '.', '%']),
    ) {
        let id = format!("{}{}1", prefix, unsafe_char);
        let err = cybersource::builder::build_capture_request(&capture_request(&id, None))
            .unwrap_err();
        prop_assert!(err.is_malformed_request());
    }

    /// Property: Orbital requests are deterministic
    #[test]
    fn orbital_capture_is_deterministic(
        tx_ref in "[0-9A-F]{10,16}",
        order_id in "[a-z0-9]{1,22}",
        minor in 1u64..10_000_000u64,
    ) {
        let credentials = OrbitalCredentials::new("user", "pass", "123456");
        let mut request = capture_request(&tx_ref, Some(&order_id));
        request.amount.minor_units = minor;

        let first = orbital::builder::build_capture_request(&credentials, &request).unwrap();
        let second = orbital::builder::build_capture_request(&credentials, &request).unwrap();

        let xml = first.to_xml().unwrap();
        prop_assert_eq!(&xml, &second.to_xml().unwrap());

        let xml = String::from_utf8(xml).unwrap();
        let tx_ref_element = format!("<TxRefNum>{}</TxRefNum>", tx_ref);
        let amount_element = format!("<Amount>{}</Amount>", minor);
        prop_assert!(xml.contains(&tx_ref_element));
        prop_assert!(xml.contains(&amount_element));
    }

    /// Property: CyberSource follow-up paths embed the payment id
    #[test]
    fn cybersource_paths_embed_payment_id(id in "[0-9]{16,22}") {
        let capture = cybersource::builder::build_capture_request(&capture_request(&id, None)).unwrap();
        let void = cybersource::builder::build_void_request(&void_request(&id, None)).unwrap();
        let refund = cybersource::builder::build_refund_request(&refund_request(&id, 100, None)).unwrap();

        prop_assert_eq!(&capture.path, &format!("/pts/v2/payments/{}/captures", id));
        prop_assert_eq!(&void.path, &format!("/pts/v2/payments/{}/voids", id));
        prop_assert_eq!(&refund.path, &format!("/pts/v2/payments/{}/refunds", id));
        prop_assert_eq!(capture.transaction_reference(), Some(id.as_str()));
    }

    /// Property: blank prior references are always rejected
    #[test]
    fn blank_references_are_malformed(blank in "[ \t]{0,4}") {
        let credentials = AuthorizeNetCredentials::new("login", "key");
        let err = authorizenet::builder::build_void_request(&credentials, &void_request(&blank, None))
            .unwrap_err();
        prop_assert!(err.is_malformed_request());

        let err = cybersource::builder::build_capture_request(&capture_request(&blank, None))
            .unwrap_err();
        prop_assert!(err.is_malformed_request());
    }
}

// ============================================================================
// Translator Invariants
// ============================================================================

proptest! {
    /// Property: Authorize.Net approves exactly on response code 1
    #[test]
    fn authorizenet_success_iff_response_code_one(
        response_code in prop::sample::select(vec!["1", "2", "3", "4"]),
        trans_id in "[0-9]{1,15}",
    ) {
        let reply: authorizenet::wire::AuthorizeNetResponse = serde_json::from_value(json!({
            "transactionResponse": {"responseCode": response_code, "transId": &trans_id},
            "messages": {"resultCode": "Ok"}
        })).unwrap();

        let auth = authorizenet::translator::translate_auth_response(&reply);
        prop_assert_eq!(auth.success, response_code == "1");
        prop_assert_eq!(auth.error_code.is_none(), auth.success);
        prop_assert_eq!(auth.transaction_reference, trans_id);
    }

    /// Property: Orbital never reports success unless the request was processed
    #[test]
    fn orbital_unprocessed_is_never_success(proc_status in "[1-9][0-9]{0,4}") {
        let reply: orbital::wire::OrbitalResponse = serde_json::from_value(json!({
            "Body": {"ProcStatus": proc_status, "ApprovalStatus": "1", "TxRefNum": "5F1A2B3C4D"}
        })).unwrap();

        let auth = orbital::translator::translate_auth_response(&reply);
        prop_assert!(!auth.success);
        prop_assert!(auth.error_code.is_some());

        let capture = orbital::translator::translate_capture_response(&reply);
        prop_assert!(!capture.success);
    }

    /// Property: CyberSource authorizations succeed only on AUTHORIZED
    #[test]
    fn cybersource_auth_status(status in "[A-Z_]{4,20}") {
        let reply: cybersource::wire::CybersourceResponse = serde_json::from_value(json!({
            "id": "6543210987654321",
            "status": &status,
        })).unwrap();

        let auth = cybersource::translator::translate_auth_response(&reply);
        prop_assert_eq!(auth.success, status == "AUTHORIZED");
        prop_assert_eq!(auth.error_code.is_none(), auth.success);
    }
}
