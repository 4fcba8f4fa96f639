//! Configuration loading
//!
//! Opt-in helpers that build a [`fuusor_domain::ClientConfig`] from
//! environment variables or files. The client itself never reads either.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, load_from_lookup, probe_config_paths};
