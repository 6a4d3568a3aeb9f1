//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, reset...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON, or the payload was missing.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request body could not be serialized.
    #[error("JSON error: {0}")]
    Json(String),
}

/// Coarse failure classes a caller may want to tell apart.
///
/// Slices collapse all of these into one error message; the kind is only
/// kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    Payload,
}

impl FetchError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) | FetchError::InvalidUrl(_) | FetchError::Json(_) => {
                ErrorKind::Transport
            }
            FetchError::Status { .. } => ErrorKind::Status,
            FetchError::Parse(_) => ErrorKind::Payload,
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(
            FetchError::Transport("reset".into()).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            FetchError::Status {
                status: 404,
                message: "nope".into()
            }
            .kind(),
            ErrorKind::Status
        );
        assert_eq!(FetchError::Parse("eof".into()).kind(), ErrorKind::Payload);
    }

    #[test]
    fn test_status_accessor() {
        let err = FetchError::Status {
            status: 503,
            message: String::new(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(FetchError::Parse("x".into()).status(), None);
    }
}
