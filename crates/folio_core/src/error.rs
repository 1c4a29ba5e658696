//! Core error taxonomy.
//!
//! # Responsibility
//! - Classify failures surfaced by components and collaborators.
//! - Keep propagation policy explicit at the runtime boundary.
//!
//! # Invariants
//! - `Validation` errors are user-facing and become error notifications.
//! - `MissingElement` disables one component, never the whole runtime.
//! - `UnexpectedRuntime` is logged and swallowed by the runtime.

use crate::config::ConfigError;
use crate::model::form::ValidationError;
use crate::repo::preference_repo::PreferenceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug)]
pub enum CoreError {
    /// User input rejected by the form validator.
    Validation(ValidationError),
    /// A collaborator element expected in markup is absent.
    MissingElement(&'static str),
    /// Configuration could not be parsed or is out of range.
    Config(ConfigError),
    /// Persisted preference store failure.
    Preference(PreferenceError),
    /// Anything else raised while handling an event.
    UnexpectedRuntime(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::MissingElement(name) => write!(f, "required element is missing: {name}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Preference(err) => write!(f, "{err}"),
            Self::UnexpectedRuntime(message) => write!(f, "unexpected runtime error: {message}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Preference(err) => Some(err),
            Self::MissingElement(_) | Self::UnexpectedRuntime(_) => None,
        }
    }
}

impl From<ValidationError> for CoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ConfigError> for CoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<PreferenceError> for CoreError {
    fn from(value: PreferenceError) -> Self {
        Self::Preference(value)
    }
}

impl CoreError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::MissingElement(_) => "missing_element",
            Self::Config(_) => "config",
            Self::Preference(_) => "preference",
            Self::UnexpectedRuntime(_) => "unexpected_runtime",
        }
    }
}
