//! Tracked page elements.
//!
//! # Responsibility
//! - Identify elements by a host-provided reference.
//! - Describe how each tracked element decides it has been revealed.
//!
//! # Invariants
//! - `revealed` transitions `false -> true` at most once.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Host-side reference to one element (usually its DOM id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(String);

/// Reference used for the document root (`<html>`).
pub const DOCUMENT_ROOT: &str = ":root";

impl ElementRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn document_root() -> Self {
        Self::new(DOCUMENT_ROOT)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ElementRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Category of a tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Progress bar inside the skills section.
    SkillBar,
    /// Card animated in when it intersects the viewport.
    SectionCard,
    /// Certificate card shown once its top passes a viewport fraction.
    CertificateCard,
    /// Image whose source is deferred until it intersects.
    LazyImage,
}

/// How an element decides that it is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RevealStrategy {
    /// Polled on every scroll tick: revealed when the viewport-relative top
    /// is above `viewport_height / viewport_divisor`.
    TopPosition { viewport_divisor: f64 },
    /// Threshold-crossing callback: revealed when the visible ratio reaches
    /// `ratio` inside a root shrunk by `margin_bottom_px`.
    Intersection { ratio: f64, margin_bottom_px: f64 },
}

/// One element whose reveal state the core owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedElement {
    pub id: ElementRef,
    pub kind: ElementKind,
    pub strategy: RevealStrategy,
    pub revealed: bool,
}

impl TrackedElement {
    pub fn new(id: ElementRef, kind: ElementKind, strategy: RevealStrategy) -> Self {
        Self {
            id,
            kind,
            strategy,
            revealed: false,
        }
    }

    /// Latches the element as revealed.
    ///
    /// Returns `true` only on the first call.
    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }
}

/// Skill progress bar with its animation parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillBar {
    pub element: ElementRef,
    /// Clamped to `0..=100`.
    pub target_width_percent: f64,
    /// `index * stagger` relative to the end of the settle delay.
    pub animation_delay_ms: u64,
}

impl SkillBar {
    pub fn new(
        element: ElementRef,
        target_width_percent: f64,
        index: usize,
        stagger_ms: u64,
    ) -> Self {
        Self {
            element,
            target_width_percent: target_width_percent.clamp(0.0, 100.0),
            animation_delay_ms: (index as u64).saturating_mul(stagger_ms),
        }
    }

    /// CSS width value, e.g. `85%`.
    pub fn width_value(&self) -> String {
        format!("{}%", self.target_width_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementKind, ElementRef, RevealStrategy, SkillBar, TrackedElement};

    #[test]
    fn reveal_is_a_one_way_latch() {
        let mut element = TrackedElement::new(
            ElementRef::new("cert-1"),
            ElementKind::CertificateCard,
            RevealStrategy::TopPosition {
                viewport_divisor: 1.2,
            },
        );
        assert!(element.reveal());
        assert!(!element.reveal());
        assert!(element.revealed);
    }

    #[test]
    fn skill_bar_clamps_width_and_staggers_delay() {
        let bar = SkillBar::new(ElementRef::new("rust"), 140.0, 3, 200);
        assert_eq!(bar.target_width_percent, 100.0);
        assert_eq!(bar.animation_delay_ms, 600);
        assert_eq!(bar.width_value(), "100%");

        let bar = SkillBar::new(ElementRef::new("go"), 72.5, 0, 200);
        assert_eq!(bar.width_value(), "72.5%");
        assert_eq!(bar.animation_delay_ms, 0);
    }

    #[test]
    fn skill_bar_delay_saturates_instead_of_overflowing() {
        let bar = SkillBar::new(ElementRef::new("sql"), 50.0, 2, u64::MAX);
        assert_eq!(bar.animation_delay_ms, u64::MAX);
    }
}
