//! Error types for JSON-RPC calls.

use std::fmt;

use crate::codes::{ErrorCode, ErrorKind};

/// Result type alias for JSON-RPC operations.
pub type Result<T> = std::result::Result<T, Error>;

/// JSON-RPC call error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Parameter serialization or result decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error object reported by the server.
    #[error("{0}")]
    Remote(RemoteError),

    /// Non-success HTTP status without an embedded error object.
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Status code.
        status: u16,
        /// Response body, lossily decoded.
        body: String,
    },

    /// The server reply was well-formed JSON but not what the call expects.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Returns the remote error, if this is one.
    #[must_use]
    pub const fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(remote) => Some(remote),
            _ => None,
        }
    }

    /// Returns the numeric remote error code, if this is a remote error.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        self.as_remote().map(RemoteError::error_code)
    }

    /// Returns true if the server reported an expired session.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self.code(),
            Some(ErrorCode::SessionExpired | ErrorCode::OperatorSessionExpired)
        )
    }
}

impl From<RemoteError> for Error {
    fn from(err: RemoteError) -> Self {
        Self::Remote(err)
    }
}

/// Error object carried in a JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteError {
    /// Numeric code as sent by the server.
    pub code: i32,
    /// Message, possibly containing `%1`-style placeholders.
    pub message: String,
    /// Positional placeholder values.
    pub parameters: Vec<String>,
    /// Plural form selector.
    pub plurality: i32,
}

impl RemoteError {
    /// Creates a remote error from code and message.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            parameters: Vec::new(),
            plurality: 0,
        }
    }

    /// Returns the code as a known error code.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        ErrorCode::from_code(self.code)
    }

    /// Returns whether this is a protocol or application error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.error_code().kind()
    }

    /// Returns the message with positional placeholders substituted.
    #[must_use]
    pub fn rendered_message(&self) -> String {
        render_placeholders(&self.message, &self.parameters)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "remote error {} ({}): {}",
            self.code,
            self.error_code(),
            self.rendered_message()
        )
    }
}

impl std::error::Error for RemoteError {}

/// Substitutes `%1`, `%2`, ... in `template` with `parameters`.
///
/// Placeholders without a matching parameter are kept verbatim.
#[must_use]
pub fn render_placeholders(template: &str, parameters: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut end = start + 1;
        while let Some(&(i, d)) = chars.peek() {
            if d.is_ascii_digit() {
                end = i + d.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let digits = &template[start + 1..end];
        let value = digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| parameters.get(idx));

        match value {
            Some(v) => out.push_str(v),
            None => out.push_str(&template[start..end]),
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    #[test]
    fn test_render_placeholders() {
        let params = vec!["inbox".to_string(), "3".to_string()];
        assert_eq!(
            render_placeholders("Folder %1 has %2 items", &params),
            "Folder inbox has 3 items"
        );
    }

    #[test]
    fn test_render_missing_parameter() {
        let params = vec!["a".to_string()];
        assert_eq!(render_placeholders("%1 and %2", &params), "a and %2");
        assert_eq!(render_placeholders("100% sure", &params), "100% sure");
    }

    #[test]
    fn test_render_multi_digit() {
        let params: Vec<String> = (1..=11).map(|n| format!("p{n}")).collect();
        assert_eq!(render_placeholders("%11/%1", &params), "p11/p1");
    }

    #[test]
    fn test_remote_error_kind() {
        let err = RemoteError::new(1002, "No such entity");
        assert_eq!(err.error_code(), ErrorCode::NoSuchEntity);
        assert_eq!(err.kind(), ErrorKind::Application);

        let err = RemoteError::new(-32601, "Method not found");
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_session_expired() {
        let err = Error::from(RemoteError::new(-32001, "Session expired"));
        assert!(err.is_session_expired());
        assert_eq!(err.code(), Some(ErrorCode::SessionExpired));

        let err = Error::invalid_response("missing result");
        assert!(!err.is_session_expired());
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_display() {
        let mut err = RemoteError::new(1001, "Item %1 already exists");
        err.parameters.push("john".to_string());
        assert_eq!(
            err.to_string(),
            "remote error 1001 (already exists): Item john already exists"
        );
    }
}
