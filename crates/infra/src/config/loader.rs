//! Configuration loader
//!
//! Builds a [`ClientConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. [`load`] tries environment variables first
//! 2. If credentials are missing, it falls back to a config file
//! 3. Files are JSON or TOML, detected by extension
//!
//! ## Environment Variables
//! - `FUUSOR_CLIENT_ID`, `FUUSOR_CLIENT_SECRET`: OAuth client credentials
//! - `FUUSOR_USERNAME`, `FUUSOR_PASSWORD`: API user credentials
//! - `FUUSOR_URI_CONNECT`: Token endpoint (optional)
//! - `FUUSOR_URI_BASE`: Base URI for `User/...` and `UserGroup/...` (optional)
//! - `FUUSOR_URI_DATASET`: Dataset upload endpoint (optional)
//! - `FUUSOR_URI_UPLOAD_FILE`: Legacy upload endpoint (optional)
//! - `FUUSOR_TIMEOUT_MS`: Per-request timeout in milliseconds (optional)
//!
//! ## File Locations
//! Without an explicit path the loader probes `./fuusor.json`,
//! `./fuusor.toml`, `./config.json` and `./config.toml` in the current
//! working directory.

use std::path::{Path, PathBuf};

use fuusor_domain::{ClientConfig, FuusorError, Result};

/// Load configuration, preferring environment variables over files.
///
/// # Errors
/// Returns `FuusorError::Config` if neither source yields a complete
/// configuration.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from the process environment.
///
/// # Errors
/// Returns `FuusorError::Config` if a credential variable is missing or the
/// timeout is not a number.
pub fn load_from_env() -> Result<ClientConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Unset or empty endpoint variables keep their defaults.
///
/// # Errors
/// Returns `FuusorError::Config` if a credential variable is missing or the
/// timeout is not a number.
pub fn load_from_lookup<F>(lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).filter(|value| !value.is_empty()).ok_or_else(|| {
            FuusorError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let mut config = ClientConfig::new(
        required("FUUSOR_CLIENT_ID")?,
        required("FUUSOR_CLIENT_SECRET")?,
        required("FUUSOR_USERNAME")?,
        required("FUUSOR_PASSWORD")?,
    );

    let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(uri) = optional("FUUSOR_URI_CONNECT") {
        config.uri_connect = uri;
    }
    if let Some(uri) = optional("FUUSOR_URI_BASE") {
        config.uri_base = uri;
    }
    if let Some(uri) = optional("FUUSOR_URI_DATASET") {
        config.uri_dataset = uri;
    }
    if let Some(uri) = optional("FUUSOR_URI_UPLOAD_FILE") {
        config.uri_upload_file = uri;
    }
    if let Some(timeout) = optional("FUUSOR_TIMEOUT_MS") {
        config.timeout_ms = timeout
            .trim()
            .parse::<u64>()
            .map_err(|e| FuusorError::Config(format!("Invalid timeout: {e}")))?;
    }

    config.validate()
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the working directory for config files.
///
/// # Errors
/// Returns `FuusorError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A credential is missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FuusorError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FuusorError::Config("No config file found in the working directory".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FuusorError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)?.validate()
}

/// Parse configuration by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FuusorError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FuusorError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(FuusorError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the working directory, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    ["fuusor.json", "fuusor.toml", "config.json", "config.toml"]
        .into_iter()
        .map(|name| cwd.join(name))
        .find(|path| path.exists())
}
