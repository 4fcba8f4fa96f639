//! # Fuusor Domain
//!
//! Business types for the Fuusor reporting API client.
//!
//! This crate contains:
//! - The error type and `Result` alias shared by every client operation
//! - Client configuration with defaults
//! - Dataset model (options, field registries, hierarchies, rows) with its
//!   validation rules and upload payload serialization
//! - User and user-group resource types
//!
//! ## Architecture
//! - No I/O: everything here is pure and synchronous
//! - Network-facing code lives in `fuusor-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
