//! Conversions from external infrastructure errors into domain errors.

use fuusor_domain::FuusorError;
use reqwest::{Error as HttpError, StatusCode};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FuusorError);

impl From<InfraError> for FuusorError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FuusorError> for InfraError {
    fn from(value: FuusorError) -> Self {
        InfraError(value)
    }
}

impl InfraError {
    /// Error for a response whose status is not the expected one.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        InfraError(FuusorError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            body,
        })
    }
}

trait IntoFuusorError {
    fn into_fuusor(self) -> FuusorError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FuusorError */
/* -------------------------------------------------------------------------- */

impl IntoFuusorError for HttpError {
    fn into_fuusor(self) -> FuusorError {
        if self.is_timeout() {
            return FuusorError::Network(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return FuusorError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return FuusorError::Serialization(format!("Failed to decode response: {self}"));
        }

        if self.is_builder() {
            return FuusorError::Config(format!("Invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return InfraError::from_status(status, String::new()).0;
        }

        FuusorError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_fuusor())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → FuusorError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(FuusorError::from(value))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
