// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input validation for credential requests.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::auth::password::{validate_password_strength, PasswordRequirements, MAX_PASSWORD_LENGTH};

const MAX_USERNAME_LENGTH: usize = 64;

// No whitespace or control characters anywhere in a username
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s\p{Cc}]+$").unwrap());

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.is_empty() {
        return Err(ValidationError::InvalidUsername(
            "username must not be empty".to_string(),
        ));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::InvalidUsername(format!(
            "username must be at most {MAX_USERNAME_LENGTH} bytes"
        )));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::InvalidUsername(
            "username must not contain whitespace or control characters".to_string(),
        ));
    }

    Ok(username)
}

/// Validate a password against `requirements`
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "password must not be empty".to_string(),
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} bytes"
        )));
    }

    if !validate_password_strength(password, requirements) {
        return Err(ValidationError::InvalidPassword(
            "password does not meet complexity requirements".to_string(),
        ));
    }

    Ok(password)
}
