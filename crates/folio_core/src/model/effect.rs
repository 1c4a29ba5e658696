//! Presentation intents emitted by components.
//!
//! Components never touch the page directly. They return `Effect` lists and
//! the runtime hands each entry to the `PresentationSurface` (or to the icon
//! renderer for `RenderIcons`).

use crate::model::element::ElementRef;
use crate::model::notification::Severity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Effect {
    AddClass {
        target: ElementRef,
        class: String,
    },
    RemoveClass {
        target: ElementRef,
        class: String,
    },
    SetStyle {
        target: ElementRef,
        property: String,
        value: String,
    },
    SetAttribute {
        target: ElementRef,
        name: String,
        value: String,
    },
    RemoveAttribute {
        target: ElementRef,
        name: String,
    },
    /// Replaces the inner markup of `target`.
    SetContent {
        target: ElementRef,
        html: String,
    },
    /// Appends a toast element to the page body. `message` is plain text.
    MountNotification {
        target: ElementRef,
        message: String,
        severity: Severity,
        icon: String,
        classes: Vec<String>,
    },
    RemoveElement {
        target: ElementRef,
    },
    ResetForm {
        target: ElementRef,
    },
    ScrollTo {
        top: f64,
        smooth: bool,
    },
    /// Re-run icon placeholder rendering after markup changes.
    RenderIcons,
}

impl Effect {
    pub fn add_class(target: &ElementRef, class: &str) -> Self {
        Self::AddClass {
            target: target.clone(),
            class: class.to_string(),
        }
    }

    pub fn remove_class(target: &ElementRef, class: &str) -> Self {
        Self::RemoveClass {
            target: target.clone(),
            class: class.to_string(),
        }
    }

    pub fn set_style(target: &ElementRef, property: &str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target: target.clone(),
            property: property.to_string(),
            value: value.into(),
        }
    }

    pub fn set_attribute(target: &ElementRef, name: &str, value: impl Into<String>) -> Self {
        Self::SetAttribute {
            target: target.clone(),
            name: name.to_string(),
            value: value.into(),
        }
    }

    /// Element the effect mutates, if any.
    pub fn target(&self) -> Option<&ElementRef> {
        match self {
            Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetStyle { target, .. }
            | Self::SetAttribute { target, .. }
            | Self::RemoveAttribute { target, .. }
            | Self::SetContent { target, .. }
            | Self::MountNotification { target, .. }
            | Self::RemoveElement { target }
            | Self::ResetForm { target } => Some(target),
            Self::ScrollTo { .. } | Self::RenderIcons => None,
        }
    }

    /// Stable short name used in log lines.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::AddClass { .. } => "add_class",
            Self::RemoveClass { .. } => "remove_class",
            Self::SetStyle { .. } => "set_style",
            Self::SetAttribute { .. } => "set_attribute",
            Self::RemoveAttribute { .. } => "remove_attribute",
            Self::SetContent { .. } => "set_content",
            Self::MountNotification { .. } => "mount_notification",
            Self::RemoveElement { .. } => "remove_element",
            Self::ResetForm { .. } => "reset_form",
            Self::ScrollTo { .. } => "scroll_to",
            Self::RenderIcons => "render_icons",
        }
    }
}
