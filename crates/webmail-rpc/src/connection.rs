//! JSON-RPC connection over HTTP.
//!
//! A [`Connection`] owns one HTTP client with a cookie jar, the request id
//! counter and the session token. Every call is a single HTTP POST.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::envelope::{Request, check_error, decode_result};
use crate::error::{Error, Result};
use crate::id::RequestIdGenerator;

/// Content type of request bodies.
pub const CONTENT_TYPE_JSON_RPC: &str = "application/json-rpc";

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "X-Token";

/// Authentication state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token held.
    Unauthenticated,
    /// A session token is held and sent with every call.
    Authenticated,
}

/// JSON-RPC connection.
///
/// Calls take `&self`; a connection can be shared between tasks behind an
/// `Arc`.
#[derive(Debug)]
pub struct Connection {
    config: Config,
    endpoint: Url,
    http: reqwest::Client,
    ids: RequestIdGenerator,
    token: RwLock<Option<String>>,
}

impl Connection {
    /// Creates a connection for the given configuration.
    ///
    /// No network traffic happens until the first call.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let endpoint = config.endpoint()?;

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        tracing::debug!(%endpoint, "created JSON-RPC connection");

        Ok(Self {
            config,
            endpoint,
            http,
            ids: RequestIdGenerator::new(),
            token: RwLock::new(None),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the current session token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores a session token, sent with every subsequent call.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Forgets the session token.
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns true if a session token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns the authentication state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Returns the id of the most recent request, or 0 before the first.
    #[must_use]
    pub fn last_request_id(&self) -> u64 {
        self.ids.current()
    }

    /// Performs a call and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, if the response carries an
    /// error object, or on a non-success status.
    pub async fn call_raw<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> Result<Bytes> {
        self.send(method, Some(params), None).await
    }

    /// Performs a call and decodes its `result` member.
    ///
    /// # Errors
    ///
    /// Returns an error as [`Connection::call_raw`] does, or if `result`
    /// does not decode into `R`.
    pub async fn call<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.send(method, Some(params), None).await?;
        decode_result(&body)
    }

    /// Performs a call without a `params` member and decodes its result.
    ///
    /// # Errors
    ///
    /// See [`Connection::call`].
    pub async fn call_without_params<R: DeserializeOwned>(&self, method: &str) -> Result<R> {
        let body = self.send::<()>(method, None, None).await?;
        decode_result(&body)
    }

    /// Performs a call whose result carries nothing of interest.
    ///
    /// # Errors
    ///
    /// See [`Connection::call_raw`].
    pub async fn call_unit<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> Result<()> {
        self.send(method, Some(params), None).await.map(drop)
    }

    /// Performs a call without parameters whose result carries nothing of
    /// interest.
    ///
    /// # Errors
    ///
    /// See [`Connection::call_raw`].
    pub async fn call_unit_without_params(&self, method: &str) -> Result<()> {
        self.send::<()>(method, None, None).await.map(drop)
    }

    /// Performs a call that may block server side for `wait`.
    ///
    /// The HTTP timeout for this request is the configured request timeout
    /// plus `wait`.
    ///
    /// # Errors
    ///
    /// See [`Connection::call`].
    pub async fn call_with_timeout<P, R>(&self, method: &str, params: &P, wait: Duration) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let timeout = self.config.request_timeout.saturating_add(wait);
        let body = self.send(method, Some(params), Some(timeout)).await?;
        decode_result(&body)
    }

    async fn send<P: Serialize + ?Sized>(
        &self,
        method: &str,
        params: Option<&P>,
        timeout: Option<Duration>,
    ) -> Result<Bytes> {
        let id = self.ids.next();
        let request = Request::new(id, method, self.token(), params);
        let payload = request.to_vec()?;

        tracing::debug!(method, id, bytes = payload.len(), "sending JSON-RPC request");

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON_RPC)
            .header(ACCEPT, "application/json")
            .body(payload);
        if let Some(token) = request.token.as_deref() {
            builder = builder.header(TOKEN_HEADER, token);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if let Err(err) = check_error(&body) {
            tracing::warn!(method, id, %err, "JSON-RPC call failed");
            return Err(err);
        }

        if !status.is_success() {
            tracing::warn!(method, id, %status, "JSON-RPC call returned error status");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        tracing::debug!(method, id, bytes = body.len(), "received JSON-RPC response");
        Ok(body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Security;

    fn local_config() -> Config {
        Config::builder("127.0.0.1:9")
            .security(Security::None)
            .use_system_proxy(false)
            .build()
    }

    #[test]
    fn test_new_connection_is_unauthenticated() {
        let conn = Connection::new(local_config()).unwrap();
        assert_eq!(conn.state(), SessionState::Unauthenticated);
        assert_eq!(conn.token(), None);
        assert_eq!(conn.last_request_id(), 0);
        assert_eq!(conn.endpoint().as_str(), "http://127.0.0.1:9/webmail/api/jsonrpc");
    }

    #[test]
    fn test_token_lifecycle() {
        let conn = Connection::new(local_config()).unwrap();
        conn.set_token("abc");
        assert!(conn.is_authenticated());
        assert_eq!(conn.token().as_deref(), Some("abc"));
        conn.clear_token();
        assert_eq!(conn.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_invalid_config() {
        let err = Connection::new(Config::new("")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_serialization_failure_sends_nothing() {
        use std::collections::HashMap;

        // Non-string map keys cannot be represented in JSON.
        let conn = Connection::new(local_config()).unwrap();
        let mut params = HashMap::new();
        params.insert((1, 2), "x");
        let err = conn.call_unit("Test.method", &params).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    mod transport {
        use super::*;
        use crate::testing::{MockResponse, MockServer};
        use serde_json::{Value, json};

        async fn setup() -> (MockServer, Connection) {
            let server = MockServer::start().await.unwrap();
            let conn = Connection::new(server.config()).unwrap();
            (server, conn)
        }

        #[tokio::test]
        async fn test_ids_are_sequential() {
            let (server, conn) = setup().await;
            for _ in 0..3 {
                server.push_result(json!({}));
            }
            for _ in 0..3 {
                conn.call_unit_without_params("Session.whoAmI").await.unwrap();
            }

            let ids: Vec<_> = server.requests().iter().filter_map(|r| r.rpc_id()).collect();
            assert_eq!(ids, vec![1, 2, 3]);
            assert_eq!(conn.last_request_id(), 3);
        }

        #[tokio::test]
        async fn test_request_shape() {
            let (server, conn) = setup().await;
            server.push_result(json!({"value": 42}));

            let result: Value = conn
                .call("Folders.get", &json!({"query": {"limit": 5}}))
                .await
                .unwrap();
            assert_eq!(result, json!({"value": 42}));

            let request = server.last_request().unwrap();
            assert_eq!(request.method, "POST");
            assert_eq!(request.path, "/webmail/api/jsonrpc");
            assert_eq!(request.header("Content-Type"), Some(CONTENT_TYPE_JSON_RPC));
            assert_eq!(request.header("X-Token"), None);
            assert_eq!(request.rpc_method(), Some("Folders.get"));
            assert_eq!(request.params(), Some(&json!({"query": {"limit": 5}})));
            assert_eq!(request.body["jsonrpc"], "2.0");
            assert!(request.body.get("token").is_none());
        }

        #[tokio::test]
        async fn test_no_params_member() {
            let (server, conn) = setup().await;
            server.push_result(json!(true));

            let ok: bool = conn.call_without_params("Session.canUserChangePassword").await.unwrap();
            assert!(ok);
            assert!(server.last_request().unwrap().params().is_none());
        }

        #[tokio::test]
        async fn test_token_header() {
            let (server, conn) = setup().await;
            server.push_result(json!({}));
            conn.set_token("abc123");
            conn.call_unit_without_params("Session.whoAmI").await.unwrap();

            let request = server.last_request().unwrap();
            assert_eq!(request.header("x-token"), Some("abc123"));
            assert_eq!(request.body["token"], "abc123");
        }

        #[tokio::test]
        async fn test_remote_error() {
            let (server, conn) = setup().await;
            server.push(MockResponse::error(1002, "No such entity"));

            let err = conn
                .call::<_, Value>("Mails.getById", &json!({"ids": ["x"]}))
                .await
                .unwrap_err();
            let remote = err.as_remote().unwrap();
            assert_eq!(remote.code, 1002);
            assert_eq!(remote.message, "No such entity");
        }

        #[tokio::test]
        async fn test_zero_error_is_success() {
            let (server, conn) = setup().await;
            server.push(MockResponse::json(&json!({
                "error": {"code": 0, "message": ""},
                "result": {"n": 1}
            })));

            let result: Value = conn.call_without_params("Test.zero").await.unwrap();
            assert_eq!(result["n"], 1);
        }

        #[tokio::test]
        async fn test_error_status_with_error_object() {
            let (server, conn) = setup().await;
            server.push(MockResponse::error(-32001, "Session expired").with_status(500));

            let err = conn.call_unit_without_params("Session.whoAmI").await.unwrap_err();
            assert!(err.is_session_expired());
        }

        #[tokio::test]
        async fn test_error_status_without_error_object() {
            let (server, conn) = setup().await;
            server.push(MockResponse::raw("bad gateway").with_status(502));

            let err = conn.call_unit_without_params("Session.whoAmI").await.unwrap_err();
            assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
        }

        #[tokio::test]
        async fn test_malformed_body_fails_decode() {
            let (server, conn) = setup().await;
            server.push(MockResponse::raw("<html></html>"));

            let err = conn
                .call_without_params::<Value>("Session.whoAmI")
                .await
                .unwrap_err();
            assert!(matches!(err, Error::Json(_)));
        }

        #[tokio::test]
        async fn test_cookies_are_replayed() {
            let (server, conn) = setup().await;
            server.push(MockResponse::result(json!({})).with_header("Set-Cookie", "SESSION=s1; Path=/"));
            server.push_result(json!({}));

            conn.call_unit_without_params("Session.whoAmI").await.unwrap();
            conn.call_unit_without_params("Session.whoAmI").await.unwrap();

            let requests = server.requests();
            assert_eq!(requests[0].header("cookie"), None);
            assert_eq!(requests[1].header("cookie"), Some("SESSION=s1"));
        }

        #[tokio::test]
        async fn test_call_with_timeout_extends_deadline() {
            let server = MockServer::start().await.unwrap();
            let mut config = server.config();
            config.request_timeout = Duration::from_millis(200);
            let conn = Connection::new(config).unwrap();

            server.push(MockResponse::result(json!({})).with_delay(Duration::from_millis(600)));
            let err = conn.call_unit_without_params("Changes.get").await.unwrap_err();
            assert!(matches!(&err, Error::Http(e) if e.is_timeout()));

            server.push(MockResponse::result(json!({"syncKey": "k"})).with_delay(Duration::from_millis(600)));
            let result: Value = conn
                .call_with_timeout("Changes.get", &json!({"timeout": 2}), Duration::from_secs(2))
                .await
                .unwrap();
            assert_eq!(result["syncKey"], "k");
        }

        #[tokio::test]
        async fn test_concurrent_calls() {
            let (server, conn) = setup().await;
            for _ in 0..10 {
                server.push_result(json!({}));
            }

            let conn = std::sync::Arc::new(conn);
            let handles: Vec<_> = (0..10)
                .map(|_| {
                    let conn = std::sync::Arc::clone(&conn);
                    tokio::spawn(async move { conn.call_unit_without_params("Session.whoAmI").await })
                })
                .collect();
            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let mut ids: Vec<_> = server.requests().iter().filter_map(|r| r.rpc_id()).collect();
            ids.sort_unstable();
            assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        }
    }
}
