//! Shared utilities for the Fuusor client crates.
//!
//! - [`validation`]: reusable field validators (email addresses, calendar
//!   dates) used by dataset options and the user resources
//! - [`clock`]: monotonic time abstraction so token expiry can be tested
//!   without sleeping
//! - `testing` (feature `test-utils`): [`testing::MockClock`]

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod clock;
pub mod validation;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use clock::{Clock, SystemClock};
pub use validation::{is_valid_date, is_valid_email, DateValidator, EmailValidator, FieldValidator};
