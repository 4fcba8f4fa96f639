//! OAuth2 password-grant authentication
//!
//! [`PasswordGrantClient`] talks to the token endpoint; [`TokenCache`] keeps
//! one live token per scope on top of any [`TokenFetcher`].

pub mod password_grant;
pub mod token_cache;

pub use password_grant::{PasswordGrantClient, TokenFetcher, TokenResponse};
pub use token_cache::TokenCache;
