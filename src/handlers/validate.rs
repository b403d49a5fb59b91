use std::collections::HashMap;

use crate::config;
use crate::error::ApiError;

/// Basic email format check shared by signup, profile update and the
/// contact form.
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let min = config::config().security.min_password_length;
    if password.len() < min {
        return Err(format!("Password must be at least {} characters", min));
    }
    Ok(())
}

pub fn require_non_empty(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", label));
    }
    Ok(())
}

/// Collect field-level failures into one 400 ValidationError, or pass.
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(msg) = result {
            self.errors.insert(field.to_string(), msg);
        }
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid input", Some(self.errors)))
        }
    }
}

impl Default for FieldErrors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email_format("a@x.com").is_ok());
        assert!(validate_email_format("first.last@sub.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate_email_format("").is_err());
        assert!(validate_email_format("nope").is_err());
        assert!(validate_email_format("@x.com").is_err());
        assert!(validate_email_format("a@").is_err());
        assert!(validate_email_format("a@b@c.com").is_err());
    }

    #[test]
    fn short_passwords_fail() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough-secret").is_ok());
    }

    #[test]
    fn field_errors_accumulate() {
        let mut fields = FieldErrors::new();
        fields.check("email", validate_email_format("nope"));
        fields.check("name", require_non_empty("", "Name"));
        fields.check("message", require_non_empty("hello", "Message"));
        let err = fields.into_result().unwrap_err();
        match err {
            ApiError::ValidationError { field_errors, .. } => {
                let field_errors = field_errors.unwrap();
                assert_eq!(field_errors.len(), 2);
                assert!(field_errors.contains_key("email"));
                assert!(field_errors.contains_key("name"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
