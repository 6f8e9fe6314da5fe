//! Protocol-level tests through the public API.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use webmail_rpc::envelope::{check_error, decode_result};
use webmail_rpc::{Config, ErrorCode, ErrorKind, Request, Security};

#[test]
fn test_minimal_envelope() {
    let request: Request<Value> = Request::new(1, "Session.logout", None, None);
    let json: Value = serde_json::from_slice(&request.to_vec().unwrap()).unwrap();
    assert_eq!(json, json!({"jsonrpc": "2.0", "method": "Session.logout", "id": 1}));
}

#[test]
fn test_application_error_classification() {
    let err = check_error(br#"{"jsonrpc":"2.0","id":4,"error":{"code":4102,"message":"Quota"}}"#)
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::QuotaReached));
    assert_eq!(err.as_remote().unwrap().kind(), ErrorKind::Application);
}

#[test]
fn test_protocol_error_classification() {
    let err = check_error(br#"{"error":{"code":-32602,"message":"Invalid params"}}"#).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidParams));
    assert_eq!(err.as_remote().unwrap().kind(), ErrorKind::Protocol);
}

#[test]
fn test_result_decoding_after_error_check() {
    let body = br#"{"jsonrpc":"2.0","id":2,"result":{"token":"abc123"}}"#;
    check_error(body).unwrap();
    let result: Value = decode_result(body).unwrap();
    assert_eq!(result["token"], "abc123");
}

#[test]
fn test_plain_http_endpoint() {
    let config = Config::builder("10.0.0.5")
        .security(Security::None)
        .build();
    assert_eq!(
        config.endpoint().unwrap().as_str(),
        "http://10.0.0.5/webmail/api/jsonrpc"
    );
}
