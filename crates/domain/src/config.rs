//! Client configuration
//!
//! Everything the client needs is passed explicitly; nothing here reads the
//! environment. `fuusor-infra::config` offers opt-in loaders that build a
//! [`ClientConfig`] from environment variables or a file.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_TIMEOUT_MS, DEFAULT_URI_BASE, DEFAULT_URI_CONNECT, DEFAULT_URI_DATASET,
    DEFAULT_URI_UPLOAD_FILE,
};
use crate::errors::{FuusorError, Result};

/// Credentials and endpoints for the API client.
///
/// Credentials default to empty strings when deserialized so that
/// [`ClientConfig::validate`] can report which one is missing.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_uri_connect")]
    pub uri_connect: String,
    #[serde(default = "default_uri_base")]
    pub uri_base: String,
    #[serde(default = "default_uri_dataset")]
    pub uri_dataset: String,
    #[serde(default = "default_uri_upload_file")]
    pub uri_upload_file: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_uri_connect() -> String {
    DEFAULT_URI_CONNECT.to_string()
}

fn default_uri_base() -> String {
    DEFAULT_URI_BASE.to_string()
}

fn default_uri_dataset() -> String {
    DEFAULT_URI_DATASET.to_string()
}

fn default_uri_upload_file() -> String {
    DEFAULT_URI_UPLOAD_FILE.to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ClientConfig {
    /// Config with the given credentials and default endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            uri_connect: default_uri_connect(),
            uri_base: default_uri_base(),
            uri_dataset: default_uri_dataset(),
            uri_upload_file: default_uri_upload_file(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_uri_connect(mut self, uri: impl Into<String>) -> Self {
        self.uri_connect = uri.into();
        self
    }

    pub fn with_uri_base(mut self, uri: impl Into<String>) -> Self {
        self.uri_base = uri.into();
        self
    }

    pub fn with_uri_dataset(mut self, uri: impl Into<String>) -> Self {
        self.uri_dataset = uri.into();
        self
    }

    pub fn with_uri_upload_file(mut self, uri: impl Into<String>) -> Self {
        self.uri_upload_file = uri.into();
        self
    }

    /// Set the per-request timeout. Kept at millisecond precision, at least 1 ms.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check required credentials and fill empty endpoints with defaults.
    ///
    /// # Errors
    /// Returns [`FuusorError::Config`] naming the first missing credential.
    pub fn validate(mut self) -> Result<Self> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
        ];

        if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(FuusorError::Config(format!("Missing config.{name}")));
        }

        fill_default(&mut self.uri_connect, DEFAULT_URI_CONNECT);
        fill_default(&mut self.uri_base, DEFAULT_URI_BASE);
        fill_default(&mut self.uri_dataset, DEFAULT_URI_DATASET);
        fill_default(&mut self.uri_upload_file, DEFAULT_URI_UPLOAD_FILE);
        if self.timeout_ms == 0 {
            self.timeout_ms = DEFAULT_TIMEOUT_MS;
        }

        Ok(self)
    }
}

fn fill_default(value: &mut String, default: &str) {
    if value.trim().is_empty() {
        *value = default.to_string();
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("uri_connect", &self.uri_connect)
            .field("uri_base", &self.uri_base)
            .field("uri_dataset", &self.uri_dataset)
            .field("uri_upload_file", &self.uri_upload_file)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_defaults() {
        let config = ClientConfig::new("id", "secret", "user@example.com", "pw");

        assert_eq!(config.uri_connect, DEFAULT_URI_CONNECT);
        assert_eq!(config.uri_base, DEFAULT_URI_BASE);
        assert_eq!(config.uri_dataset, DEFAULT_URI_DATASET);
        assert_eq!(config.uri_upload_file, DEFAULT_URI_UPLOAD_FILE);
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_validate_reports_first_missing_credential() {
        let err = ClientConfig::new("id", "", "", "pw").validate().unwrap_err();
        assert_eq!(err, FuusorError::Config("Missing config.client_secret".to_string()));

        let err = ClientConfig::new("id", "secret", "user", "").validate().unwrap_err();
        assert_eq!(err, FuusorError::Config("Missing config.password".to_string()));
    }

    #[test]
    fn test_validate_restores_blank_endpoints() {
        let config = ClientConfig::new("id", "secret", "user", "pw")
            .with_uri_base("")
            .validate()
            .unwrap();

        assert_eq!(config.uri_base, DEFAULT_URI_BASE);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"client_id":"id","client_secret":"s","username":"u","password":"p"}"#,
        )
        .unwrap();

        assert_eq!(config.uri_connect, DEFAULT_URI_CONNECT);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_with_timeout_keeps_sub_second_precision() {
        let config = ClientConfig::new("id", "secret", "user", "pw");

        let fractional = config.clone().with_timeout(Duration::from_millis(1500));
        assert_eq!(fractional.timeout(), Duration::from_millis(1500));

        let short = config.clone().with_timeout(Duration::from_millis(200));
        assert_eq!(short.timeout(), Duration::from_millis(200));

        let zero = config.with_timeout(Duration::ZERO);
        assert_eq!(zero.timeout(), Duration::from_millis(1));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig::new("id", "top-secret", "user", "hunter2");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
