//! Contact form records and validation outcomes.
//!
//! # Invariants
//! - `FormFields` is transient: validated, then discarded, never stored.

use crate::config::FormConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw contact form values; `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl FormFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            subject: Some(subject.into()),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    TooShort,
    InvalidFormat,
}

/// First violated rule of a rejected form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: FormField,
    pub reason: ValidationReason,
}

impl ValidationError {
    /// Text shown to the visitor in the error toast.
    ///
    /// Minimum lengths come from `config`, the same values the validator
    /// enforced.
    pub fn user_message(&self, config: &FormConfig) -> String {
        match self.field {
            FormField::Name => format!(
                "Please enter a valid name (at least {} characters).",
                config.min_name_chars
            ),
            FormField::Email => "Please enter a valid email address.".to_string(),
            FormField::Subject => format!(
                "Please enter a subject (at least {} characters).",
                config.min_subject_chars
            ),
            FormField::Message => format!(
                "Please enter a message (at least {} characters).",
                config.min_message_chars
            ),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            ValidationReason::TooShort => {
                write!(f, "form field `{}` is too short", self.field.as_str())
            }
            ValidationReason::InvalidFormat => {
                write!(f, "form field `{}` has an invalid format", self.field.as_str())
            }
        }
    }
}

impl Error for ValidationError {}
