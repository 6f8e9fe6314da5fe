//! Numeric error codes reported by the server.
//!
//! Negative codes are protocol errors, positive codes are application
//! errors. The values are part of the wire contract and must not change.

use std::fmt;

/// Classification of a remote error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// JSON-RPC or session level failure (negative code).
    Protocol,
    /// Business logic failure (positive code).
    Application,
}

/// Known remote error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// -32700: invalid JSON received by the server.
    ParseError,
    /// -32603: internal JSON-RPC error.
    InternalError,
    /// -32602: invalid method parameters.
    InvalidParams,
    /// -32601: method does not exist.
    MethodNotFound,
    /// -32600: the JSON sent is not a valid request object.
    InvalidRequest,
    /// -32003: multi-server backend is in maintenance.
    MultiServerBackendMaintenance,
    /// -32002: request timed out.
    Timedout,
    /// -32001: session expired, log in again.
    SessionExpired,
    /// -1: communication with the backend failed.
    CommunicationFailure,
    /// 413: request entity too large.
    RequestEntityTooLarge,
    /// 1000: operation failed.
    OperationFailed,
    /// 1001: item already exists.
    AlreadyExists,
    /// 1002: no such entity.
    NoSuchEntity,
    /// 1003: operation not permitted.
    NotPermitted,
    /// 1004: access denied.
    AccessDenied,
    /// 4000: dangerous operation refused.
    DangerousOperation,
    /// 4001: operation only partially succeeded.
    PartialSuccess,
    /// 4002: password change failed.
    ChangePswFailed,
    /// 4100: folder is being reindexed.
    FolderReindexing,
    /// 4101: another operation is in progress.
    OperationInProgress,
    /// 4102: quota reached.
    QuotaReached,
    /// 4103: message sending failed.
    SendingFailed,
    /// 4104: folder does not exist.
    NoSuchFolder,
    /// 4105: operator session expired.
    OperatorSessionExpired,
    /// Any other code.
    Other(i32),
}

impl ErrorCode {
    /// Maps a wire code onto a known code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            -32700 => Self::ParseError,
            -32603 => Self::InternalError,
            -32602 => Self::InvalidParams,
            -32601 => Self::MethodNotFound,
            -32600 => Self::InvalidRequest,
            -32003 => Self::MultiServerBackendMaintenance,
            -32002 => Self::Timedout,
            -32001 => Self::SessionExpired,
            -1 => Self::CommunicationFailure,
            413 => Self::RequestEntityTooLarge,
            1000 => Self::OperationFailed,
            1001 => Self::AlreadyExists,
            1002 => Self::NoSuchEntity,
            1003 => Self::NotPermitted,
            1004 => Self::AccessDenied,
            4000 => Self::DangerousOperation,
            4001 => Self::PartialSuccess,
            4002 => Self::ChangePswFailed,
            4100 => Self::FolderReindexing,
            4101 => Self::OperationInProgress,
            4102 => Self::QuotaReached,
            4103 => Self::SendingFailed,
            4104 => Self::NoSuchFolder,
            4105 => Self::OperatorSessionExpired,
            other => Self::Other(other),
        }
    }

    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InternalError => -32603,
            Self::InvalidParams => -32602,
            Self::MethodNotFound => -32601,
            Self::InvalidRequest => -32600,
            Self::MultiServerBackendMaintenance => -32003,
            Self::Timedout => -32002,
            Self::SessionExpired => -32001,
            Self::CommunicationFailure => -1,
            Self::RequestEntityTooLarge => 413,
            Self::OperationFailed => 1000,
            Self::AlreadyExists => 1001,
            Self::NoSuchEntity => 1002,
            Self::NotPermitted => 1003,
            Self::AccessDenied => 1004,
            Self::DangerousOperation => 4000,
            Self::PartialSuccess => 4001,
            Self::ChangePswFailed => 4002,
            Self::FolderReindexing => 4100,
            Self::OperationInProgress => 4101,
            Self::QuotaReached => 4102,
            Self::SendingFailed => 4103,
            Self::NoSuchFolder => 4104,
            Self::OperatorSessionExpired => 4105,
            Self::Other(code) => code,
        }
    }

    /// Returns the error class of this code.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        if self.code() < 0 {
            ErrorKind::Protocol
        } else {
            ErrorKind::Application
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::ParseError => "parse error",
            Self::InternalError => "internal error",
            Self::InvalidParams => "invalid params",
            Self::MethodNotFound => "method not found",
            Self::InvalidRequest => "invalid request",
            Self::MultiServerBackendMaintenance => "backend maintenance",
            Self::Timedout => "timed out",
            Self::SessionExpired => "session expired",
            Self::CommunicationFailure => "communication failure",
            Self::RequestEntityTooLarge => "request entity too large",
            Self::OperationFailed => "operation failed",
            Self::AlreadyExists => "already exists",
            Self::NoSuchEntity => "no such entity",
            Self::NotPermitted => "not permitted",
            Self::AccessDenied => "access denied",
            Self::DangerousOperation => "dangerous operation",
            Self::PartialSuccess => "partial success",
            Self::ChangePswFailed => "password change failed",
            Self::FolderReindexing => "folder reindexing",
            Self::OperationInProgress => "operation in progress",
            Self::QuotaReached => "quota reached",
            Self::SendingFailed => "sending failed",
            Self::NoSuchFolder => "no such folder",
            Self::OperatorSessionExpired => "operator session expired",
            Self::Other(_) => "unknown error",
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KNOWN: [i32; 24] = [
        -32700, -32603, -32602, -32601, -32600, -32003, -32002, -32001, -1, 413, 1000, 1001,
        1002, 1003, 1004, 4000, 4001, 4002, 4100, 4101, 4102, 4103, 4104, 4105,
    ];

    #[test]
    fn test_codes_preserved() {
        for code in ALL_KNOWN {
            let known = ErrorCode::from_code(code);
            assert!(!matches!(known, ErrorCode::Other(_)), "code {code}");
            assert_eq!(known.code(), code);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ErrorCode::from_code(7), ErrorCode::Other(7));
        assert_eq!(ErrorCode::Other(7).code(), 7);
        assert_eq!(ErrorCode::Other(-5).kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_kind() {
        assert_eq!(ErrorCode::ParseError.kind(), ErrorKind::Protocol);
        assert_eq!(ErrorCode::CommunicationFailure.kind(), ErrorKind::Protocol);
        assert_eq!(ErrorCode::RequestEntityTooLarge.kind(), ErrorKind::Application);
        assert_eq!(ErrorCode::QuotaReached.kind(), ErrorKind::Application);
    }
}
