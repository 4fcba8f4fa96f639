// Field Validators - Reusable validation components
use once_cell::sync::Lazy;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Static email regex pattern compiled once at first use
static EMAIL_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX pattern is valid and well-formed")
});

/// Calendar date in `YYYY-MM-DD` shape. Only the shape is checked, not the
/// calendar (`2021-13-45` passes), matching what the upload API accepts.
static DATE_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("DATE_REGEX pattern is valid and well-formed")
});

/// Email validator
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Create a new email validator
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if !EMAIL_REGEX.is_match(value) {
            return Err(format!("Invalid email address: {value}"));
        }

        Ok(())
    }
}

impl FieldValidator<String> for EmailValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// `YYYY-MM-DD` date validator
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl DateValidator {
    /// Create a new date validator
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for DateValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if !DATE_REGEX.is_match(value) {
            return Err(format!("Incorrect date format: \"{value}\", use YYYY-MM-DD"));
        }

        Ok(())
    }
}

impl FieldValidator<String> for DateValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// Shorthand for `EmailValidator.validate(value).is_ok()`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Shorthand for `DateValidator.validate(value).is_ok()`.
pub fn is_valid_date(value: &str) -> bool {
    DATE_REGEX.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validator() {
        let validator = EmailValidator::new();

        assert!(validator.validate("test@example.com").is_ok());
        assert!(validator.validate("first.last+tag@sub.example.fi").is_ok());
        assert!(validator.validate("invalid-email").is_err());
        assert!(validator.validate("missing@tld").is_err());
        assert!(validator.validate("").is_err());
    }

    #[test]
    fn test_email_error_names_address() {
        let err = EmailValidator.validate("nobody").unwrap_err();
        assert!(err.contains("nobody"));
    }

    #[test]
    fn test_date_validator() {
        let validator = DateValidator::new();

        assert!(validator.validate("2021-01-31").is_ok());
        assert!(validator.validate(&"2021-12-01".to_string()).is_ok());
        assert!(validator.validate("2021-1-31").is_err());
        assert!(validator.validate("31.01.2021").is_err());
        assert!(validator.validate("2021-01-31T00:00:00").is_err());
        assert!(validator.validate("").is_err());
    }

    #[test]
    fn test_date_validator_checks_shape_only() {
        assert!(is_valid_date("2021-13-45"));
    }
}
