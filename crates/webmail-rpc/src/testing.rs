//! In-process HTTP server for exercising JSON-RPC clients in tests.
//!
//! The server speaks just enough HTTP/1.1 to serve one queued response per
//! request, with keep-alive. Every request is recorded for later
//! inspection.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::{Config, Security};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    delay: Duration,
}

impl MockResponse {
    /// A 200 response with the given JSON body.
    #[must_use]
    pub fn json(body: &Value) -> Self {
        Self::raw(body.to_string())
    }

    /// A 200 response wrapping `result` in a JSON-RPC envelope.
    #[must_use]
    pub fn result(result: Value) -> Self {
        Self::json(&json!({"jsonrpc": "2.0", "id": 0, "result": result}))
    }

    /// A 200 response carrying a JSON-RPC error object.
    #[must_use]
    pub fn error(code: i32, message: &str) -> Self {
        Self::json(&json!({
            "jsonrpc": "2.0",
            "id": 0,
            "error": {"code": code, "message": message}
        }))
    }

    /// A 200 response with an arbitrary body.
    #[must_use]
    pub fn raw(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// Sets the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Delays the response.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request received by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Request target.
    pub path: String,
    /// Headers, names lowercased.
    pub headers: Vec<(String, String)>,
    /// Body parsed as JSON, `Null` if it was not JSON.
    pub body: Value,
}

impl RecordedRequest {
    /// Returns the first header with the given (case-insensitive) name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the JSON-RPC method of the body.
    #[must_use]
    pub fn rpc_method(&self) -> Option<&str> {
        self.body.get("method").and_then(Value::as_str)
    }

    /// Returns the JSON-RPC id of the body.
    #[must_use]
    pub fn rpc_id(&self) -> Option<u64> {
        self.body.get("id").and_then(Value::as_u64)
    }

    /// Returns the JSON-RPC params of the body.
    #[must_use]
    pub fn params(&self) -> Option<&Value> {
        self.body.get("params")
    }
}

#[derive(Debug, Default)]
struct Shared {
    responses: VecDeque<MockResponse>,
    requests: Vec<RecordedRequest>,
}

/// Mock JSON-RPC HTTP server bound to a local port.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Mutex<Shared>>,
    task: JoinHandle<()>,
}

impl MockServer {
    /// Starts a server on an ephemeral local port.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shared = Arc::new(Mutex::new(Shared::default()));

        let accept_shared = Arc::clone(&shared);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let shared = Arc::clone(&accept_shared);
                tokio::spawn(async move {
                    if let Err(e) = serve(stream, shared).await {
                        tracing::debug!(?e, "mock connection closed");
                    }
                });
            }
        });

        Ok(Self { addr, shared, task })
    }

    /// Returns the bound address.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns a plain-HTTP configuration pointing at this server.
    #[must_use]
    pub fn config(&self) -> Config {
        Config::builder(format!("127.0.0.1:{}", self.addr.port()))
            .security(Security::None)
            .use_system_proxy(false)
            .build()
    }

    /// Queues a response. Responses are served in order.
    pub fn push(&self, response: MockResponse) {
        self.lock().responses.push_back(response);
    }

    /// Queues a `{"result": ...}` response.
    pub fn push_result(&self, result: Value) {
        self.push(MockResponse::result(result));
    }

    /// Returns all requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Returns the most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve<S>(stream: S, shared: Arc<Mutex<Shared>>) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(stream);

    loop {
        let mut request_line = String::new();
        if reader.read_line(&mut request_line).await? == 0 {
            return Ok(());
        }

        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();

        let mut headers = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await? == 0 {
                return Ok(());
            }
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim().to_string();
                if name == "content-length" {
                    content_length = value.parse().unwrap_or(0);
                }
                headers.push((name, value));
            }
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).await?;

        let response = {
            let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
            shared.requests.push(RecordedRequest {
                method,
                path,
                headers,
                body: serde_json::from_slice(&body).unwrap_or(Value::Null),
            });
            shared.responses.pop_front()
        }
        .unwrap_or_else(|| MockResponse::error(-32603, "no response queued").with_status(500));

        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }

        let mut head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n",
            response.status,
            reason(response.status),
            response.body.len()
        );
        for (name, value) in &response.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let stream = reader.get_mut();
        stream.write_all(head.as_bytes()).await?;
        stream.write_all(&response.body).await?;
        stream.flush().await?;
    }
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_serve_records_and_replies() {
        let shared = Arc::new(Mutex::new(Shared::default()));
        shared
            .lock()
            .unwrap()
            .responses
            .push_back(MockResponse::raw("{}").with_header("Set-Cookie", "a=1"));

        let stream = Builder::new()
            .read(b"POST /rpc HTTP/1.1\r\nX-Token: t\r\nContent-Length: 16\r\n\r\n")
            .read(br#"{"method":"a.b"}"#)
            .write(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\n")
            .write(b"Set-Cookie: a=1\r\n\r\n")
            .write(b"{}")
            .build();
        serve(stream, Arc::clone(&shared)).await.unwrap();

        let recorded = shared.lock().unwrap().requests.clone();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].path, "/rpc");
        assert_eq!(recorded[0].header("x-token"), Some("t"));
        assert_eq!(recorded[0].rpc_method(), Some("a.b"));
    }

    #[tokio::test]
    async fn test_unqueued_request_gets_500() {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let body = MockResponse::error(-32603, "no response queued").body;
        let head = format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );

        let stream = Builder::new()
            .read(b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n")
            .write(head.as_bytes())
            .write(&body)
            .build();
        serve(stream, shared).await.unwrap();
    }
}
