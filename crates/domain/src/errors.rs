//! Error types used throughout the client

use thiserror::Error;

/// Main error type for Fuusor client operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FuusorError {
    /// Missing or malformed client configuration or dataset options.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A row, field or user value breaks its type or format rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reference to a dimension or hierarchy id that was never defined.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with a status other than the expected one.
    #[error("HTTP {status} {status_text}: {body}")]
    Http { status: u16, status_text: String, body: String },

    /// Transport failure (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FuusorError {
    /// HTTP status code for [`FuusorError::Http`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable label suitable for logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Http { .. } => "http",
            Self::Network(_) => "network",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for FuusorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for Fuusor operations
pub type Result<T> = std::result::Result<T, FuusorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_includes_status_and_body() {
        let err = FuusorError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            body: "no such user".to_string(),
        };

        assert_eq!(err.to_string(), "HTTP 404 Not Found: no such user");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.label(), "http");
    }

    #[test]
    fn test_status_is_none_for_local_errors() {
        assert_eq!(FuusorError::Validation("x".into()).status(), None);
        assert_eq!(FuusorError::NotFound("x".into()).label(), "not_found");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let err: FuusorError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FuusorError::Serialization(_)));
    }
}
