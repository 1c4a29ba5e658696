//! Collaborator contracts the core calls into.
//!
//! # Responsibility
//! - Define the seams between the state core and its host page.
//! - Keep every externally observable effect behind `PresentationSurface`.
//!
//! # Invariants
//! - Collaborators are injected once at construction; the core never looks
//!   for them at runtime.

pub mod viewport;

use crate::model::effect::Effect;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Page mutation surface: add/remove classes, set styles, mount toasts.
pub trait PresentationSurface {
    fn apply(&mut self, effect: &Effect) -> Result<(), SurfaceError>;
}

/// Icon placeholder renderer. Side-effect only.
pub trait IconRenderer {
    fn render_icons(&mut self);
}

/// Monotonic millisecond clock driving the timer queue.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The effect targets an element the page does not contain.
    ElementNotFound(String),
    /// Host-side failure while applying the effect.
    Host(String),
}

impl Display for SurfaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElementNotFound(target) => write!(f, "element not found: {target}"),
            Self::Host(message) => write!(f, "presentation host error: {message}"),
        }
    }
}

impl Error for SurfaceError {}
