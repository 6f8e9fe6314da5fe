//! Session lifecycle against a mock server.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use webmail::types::Application;
use webmail::{Client, Error, ErrorCode};
use webmail_rpc::testing::{MockResponse, MockServer};

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await.unwrap();
    let client = Client::new(server.config()).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_login_sends_token_on_later_calls() {
    let (server, client) = setup().await;
    server.push_result(json!({"token": "tok-1"}));
    server.push_result(json!({"userDetails": {"id": "u1", "loginName": "jdoe@example.com"}}));

    client.session().login("jdoe", "secret", None).await.unwrap();
    assert!(client.connection().is_authenticated());

    let me = client.session().who_am_i().await.unwrap();
    assert_eq!(me.login_name, "jdoe@example.com");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].header("X-Token"), None);
    assert_eq!(
        requests[0].params(),
        Some(&json!({
            "userName": "jdoe",
            "password": "secret",
            "application": {"name": "TempApp", "vendor": "TempVendor", "version": "v1.0.1"}
        }))
    );
    assert_eq!(requests[1].header("X-Token"), Some("tok-1"));
    assert_eq!(requests[1].rpc_method(), Some("Session.whoAmI"));
}

#[tokio::test]
async fn test_login_with_application() {
    let (server, client) = setup().await;
    server.push_result(json!({"token": "t"}));

    let app = Application::new("Sync", "Acme", "2.0");
    client
        .session()
        .login("jdoe", "secret", Some(&app))
        .await
        .unwrap();

    let params = server.last_request().unwrap().params().cloned().unwrap();
    assert_eq!(
        params["application"],
        json!({"name": "Sync", "vendor": "Acme", "version": "2.0"})
    );
}

#[tokio::test]
async fn test_login_empty_token_is_error() {
    let (server, client) = setup().await;
    server.push_result(json!({"token": ""}));

    let err = client
        .session()
        .login("jdoe", "secret", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
    assert!(!client.connection().is_authenticated());
}

#[tokio::test]
async fn test_login_failure_keeps_connection_unauthenticated() {
    let (server, client) = setup().await;
    server.push(MockResponse::error(1004, "Access denied"));

    let err = client.session().login("jdoe", "wrong", None).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::AccessDenied));
    assert!(!client.connection().is_authenticated());
}

#[tokio::test]
async fn test_logout_keeps_token() {
    let (server, client) = setup().await;
    server.push_result(json!({"token": "tok-2"}));
    server.push_result(json!({}));

    client.session().login("jdoe", "secret", None).await.unwrap();
    client.session().logout().await.unwrap();

    let logout = server.last_request().unwrap();
    assert_eq!(logout.rpc_method(), Some("Session.logout"));
    assert_eq!(logout.header("X-Token"), Some("tok-2"));
    assert!(logout.params().is_none());
    assert_eq!(client.connection().token().as_deref(), Some("tok-2"));

    client.connection().clear_token();
    assert!(!client.connection().is_authenticated());
}

#[tokio::test]
async fn test_expired_session() {
    let (server, client) = setup().await;
    server.push(MockResponse::error(-32001, "Session expired"));

    let err = client.session().get_quota_information().await.unwrap_err();
    assert!(err.is_session_expired());
}
