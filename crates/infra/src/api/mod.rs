//! Fuusor API client
//!
//! [`FuusorApiClient`] is the entry point: it owns the HTTP transport and the
//! token cache, performs authenticated JSON requests and hands out the
//! resource wrappers ([`Users`], [`UserGroups`]) and dataset builders.

pub mod client;
pub mod user_groups;
pub mod users;

pub use client::{FuusorApiClient, FuusorApiClientBuilder};
pub use user_groups::UserGroups;
pub use users::Users;
