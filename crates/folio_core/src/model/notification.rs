//! Transient notification (toast) model.
//!
//! # Responsibility
//! - Describe one toast instance and its lifecycle state.
//! - Map severity to icon and background presentation.
//!
//! # Invariants
//! - `NotificationId` is never reused for another instance.
//! - State only moves forward: `Entering -> Visible -> Dismissing -> Removed`.

use crate::model::element::ElementRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of one toast instance; doubles as its timer group.
pub type NotificationId = Uuid;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    /// Parses a host-provided severity; unknown values fall back to `Info`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Icon placeholder name rendered by the icon library.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "check-circle",
            Self::Error => "alert-circle",
            Self::Warning => "alert-triangle",
        }
    }

    pub fn background_class(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-500",
            Self::Success => "bg-green-500",
            Self::Error => "bg-red-500",
            Self::Warning => "bg-yellow-500",
        }
    }
}

/// Lifecycle state of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationState {
    /// Mounted off-screen, waiting for the slide-in.
    Entering,
    /// On screen, waiting for auto-dismiss.
    Visible,
    /// Sliding out, waiting for detach.
    Dismissing,
    /// Detached and discarded.
    Removed,
}

/// One toast instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub state: NotificationState,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            state: NotificationState::Entering,
        }
    }

    /// Element reference the host mounts this toast under.
    pub fn element(&self) -> ElementRef {
        ElementRef::new(format!("notification-{}", self.id.simple()))
    }
}
