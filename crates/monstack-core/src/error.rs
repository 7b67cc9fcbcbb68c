//! Shared error type across monstack crates.

use thiserror::Error;

/// Stable error codes (used in JSON bodies and reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input or configuration value.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// File or resource missing.
    NotFound,
    /// Malformed YAML/JSON/exposition text.
    Parse,
    /// Filesystem or process failure.
    Io,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Parse => "PARSE",
            ErrorCode::Io => "IO",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MonstackError>;

/// Unified error type used by core, app and checker.
#[derive(Debug, Error)]
pub enum MonstackError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MonstackError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MonstackError::BadRequest(_) => ErrorCode::BadRequest,
            MonstackError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MonstackError::NotFound(_) => ErrorCode::NotFound,
            MonstackError::Parse(_) => ErrorCode::Parse,
            MonstackError::Io(_) => ErrorCode::Io,
            MonstackError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<std::io::Error> for MonstackError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            MonstackError::NotFound(e.to_string())
        } else {
            MonstackError::Io(e.to_string())
        }
    }
}
