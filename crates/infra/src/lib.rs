//! # Fuusor Infrastructure
//!
//! Network-facing half of the Fuusor API client.
//!
//! This crate contains:
//! - HTTP transport with a uniform per-request timeout
//! - OAuth2 password-grant token fetching and the per-scope token cache
//! - [`FuusorApiClient`] with the `User` and `UserGroup` resource wrappers
//! - [`DataSet`], the dataset builder that validates and uploads
//! - Opt-in configuration loaders (environment, JSON/TOML files)
//!
//! ## Architecture
//! - Business rules and types live in `fuusor-domain`
//! - Third-party errors are converted through [`errors::InfraError`]
//! - Logging goes through `tracing`; no subscriber is installed here
//!
//! ## Example
//!
//! ```rust,no_run
//! use fuusor_domain::{ClientConfig, DataSetOptions};
//! use fuusor_infra::FuusorApiClient;
//! use serde_json::json;
//!
//! # async fn run() -> fuusor_domain::Result<()> {
//! let client = FuusorApiClient::new(ClientConfig::new("id", "secret", "api@example.com", "pw"))?;
//!
//! let options = DataSetOptions::new("g1", "d1", "Sales", "Invoices");
//! let mut data_set = client.create_data_set(options)?;
//! data_set.define_value_field("amount", "Amount");
//! data_set.add_row(json!({ "amount": 12.5 }))?;
//! data_set.save().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{FuusorApiClient, FuusorApiClientBuilder, UserGroups, Users};
pub use auth::{PasswordGrantClient, TokenCache, TokenFetcher, TokenResponse};
pub use dataset::DataSet;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
