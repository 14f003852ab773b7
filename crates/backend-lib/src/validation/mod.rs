// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input validation for account operations.
//!
//! Emails are compared byte-for-byte: no case folding and no trimming.

use thiserror::Error;

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing fields")]
    MissingRegistrationFields,

    #[error("Email and password are required!")]
    MissingCredentials,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate the inputs of a registration. All three must be non-empty.
pub fn validate_registration(name: &str, email: &str, password: &str) -> ValidationResult<()> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingRegistrationFields);
    }
    Ok(())
}

/// Validate the inputs of a login
pub fn validate_credentials(email: &str, password: &str) -> ValidationResult<()> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Collapse an optional update field: an empty string means "leave unchanged"
pub fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
