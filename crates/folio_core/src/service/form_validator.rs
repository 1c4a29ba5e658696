//! Contact form validation.
//!
//! # Invariants
//! - Rules run in fixed order (name, email, subject, message) and stop at the
//!   first failure.
//! - Lengths are measured in characters after trimming; email is matched
//!   untrimmed.

use crate::config::FormConfig;
use crate::model::form::{FormField, FormFields, ValidationError, ValidationReason};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validates with the default minimum lengths.
pub fn validate(fields: &FormFields) -> Result<(), ValidationError> {
    validate_with(fields, &FormConfig::default())
}

pub fn validate_with(fields: &FormFields, config: &FormConfig) -> Result<(), ValidationError> {
    require_min_chars(FormField::Name, fields.name.as_deref(), config.min_name_chars)?;
    match fields.email.as_deref() {
        Some(email) if is_valid_email(email) => {}
        _ => {
            return Err(ValidationError {
                field: FormField::Email,
                reason: ValidationReason::InvalidFormat,
            })
        }
    }
    require_min_chars(
        FormField::Subject,
        fields.subject.as_deref(),
        config.min_subject_chars,
    )?;
    require_min_chars(
        FormField::Message,
        fields.message.as_deref(),
        config.min_message_chars,
    )?;
    Ok(())
}

/// Simple `local@domain.tld` shape check; not RFC 5322.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn require_min_chars(
    field: FormField,
    value: Option<&str>,
    min_chars: usize,
) -> Result<(), ValidationError> {
    let long_enough = value.is_some_and(|raw| raw.trim().chars().count() >= min_chars);
    if long_enough {
        return Ok(());
    }
    Err(ValidationError {
        field,
        reason: ValidationReason::TooShort,
    })
}
