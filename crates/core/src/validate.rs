/// Input validation shared by the inbound representations.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Require a present, non-blank value and return it trimmed.
pub fn require_non_empty(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(v) if v.trim().is_empty() => Err(ValidationError::EmptyField(field)),
        Some(v) => Ok(v.trim().to_string()),
    }
}

/// Validate an email address and normalize it to lower case.
///
/// Only the shape `local@domain` is checked; deliverability is not.
pub fn normalize_email(value: Option<String>) -> Result<String, ValidationError> {
    let email = require_non_empty("email", value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_lowercase())
        }
        _ => Err(ValidationError::InvalidEmail(email)),
    }
}
