//! HTTP transport

pub mod client;

pub use client::{error_body, HttpClient, HttpClientBuilder};
