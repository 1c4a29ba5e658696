//! Skill bar width animation.
//!
//! # Responsibility
//! - Start the staggered width animation when the skills container is first
//!   revealed.
//!
//! # Invariants
//! - The group animates at most once per session: one settle timer, one
//!   width write per bar.
//! - Widths are written only after the settle delay has elapsed.

use crate::config::SkillsConfig;
use crate::error::{CoreError, CoreResult};
use crate::model::effect::Effect;
use crate::model::element::{ElementRef, SkillBar};
use crate::model::layout::SkillsLayout;
use crate::service::{ScheduledTask, Timers};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillsPhase {
    /// Waiting for the container to be revealed.
    Idle,
    /// Container revealed, settle delay running.
    Settling,
    /// Bar timers scheduled; nothing more will happen.
    Animated,
}

#[derive(Debug)]
pub struct SkillBarAnimator {
    container: ElementRef,
    bars: Vec<SkillBar>,
    phase: SkillsPhase,
    settle_delay_ms: u64,
}

impl SkillBarAnimator {
    /// Builds the animator from the page layout.
    ///
    /// # Errors
    /// - `MissingElement` when the skills container is absent.
    ///
    /// Bars whose `data-width` is not a number are skipped with a warning;
    /// the others keep the stagger slot of their position in the layout.
    pub fn from_layout(layout: Option<&SkillsLayout>, config: &SkillsConfig) -> CoreResult<Self> {
        let layout = layout.ok_or(CoreError::MissingElement("skills"))?;
        let container = layout
            .container
            .clone()
            .ok_or(CoreError::MissingElement("skills"))?;

        let mut bars = Vec::with_capacity(layout.bars.len());
        for (index, bar) in layout.bars.iter().enumerate() {
            match bar.data_width.trim().parse::<f64>() {
                Ok(width) if width.is_finite() => {
                    bars.push(SkillBar::new(
                        bar.element.clone(),
                        width,
                        index,
                        config.stagger_ms,
                    ));
                }
                _ => warn!(
                    "event=skill_bar_skipped module=skills status=degraded reason=invalid_width element={}",
                    bar.element
                ),
            }
        }

        Ok(Self {
            container,
            bars,
            phase: SkillsPhase::Idle,
            settle_delay_ms: config.settle_delay_ms,
        })
    }

    pub fn container(&self) -> &ElementRef {
        &self.container
    }

    pub fn bars(&self) -> &[SkillBar] {
        &self.bars
    }

    pub fn phase(&self) -> SkillsPhase {
        self.phase
    }

    pub fn is_animated(&self) -> bool {
        self.phase == SkillsPhase::Animated
    }

    /// Container reveal callback. Returns `true` when the settle timer was armed.
    pub fn on_container_revealed(&mut self, timers: &mut Timers) -> bool {
        if self.phase != SkillsPhase::Idle {
            debug!("event=skills_reveal_ignored module=skills phase={:?}", self.phase);
            return false;
        }
        timers.schedule(self.settle_delay_ms, None, ScheduledTask::SkillsSettle);
        self.phase = SkillsPhase::Settling;
        true
    }

    /// Settle timer callback: schedules one width timer per bar.
    pub fn on_settled(&mut self, timers: &mut Timers) {
        if self.phase != SkillsPhase::Settling {
            return;
        }
        for (index, bar) in self.bars.iter().enumerate() {
            timers.schedule(
                bar.animation_delay_ms,
                None,
                ScheduledTask::SkillBarWidth { index },
            );
        }
        self.phase = SkillsPhase::Animated;
        debug!(
            "event=skills_animate module=skills status=ok bars={}",
            self.bars.len()
        );
    }

    /// Width timer callback for bar `index`.
    pub fn on_bar_due(&self, index: usize) -> Vec<Effect> {
        match self.bars.get(index) {
            Some(bar) => vec![Effect::set_style(&bar.element, "width", bar.width_value())],
            None => Vec::new(),
        }
    }
}
