//! Field validation
//!
//! Small, reusable validators returning `Result<(), String>` so callers can
//! wrap the message into their own error type.

mod validators;

pub use validators::{is_valid_date, is_valid_email, DateValidator, EmailValidator, FieldValidator};
