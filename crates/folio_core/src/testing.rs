//! Deterministic collaborators for tests and headless hosts.
//!
//! Each double hands out a cloneable handle so a test can keep observing
//! state after the runtime has taken ownership of the boxed collaborator.

use crate::host::{Clock, IconRenderer, PresentationSurface, SurfaceError};
use crate::model::effect::Effect;
use crate::model::element::ElementRef;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Records every applied effect in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    applied: Rc<RefCell<Vec<Effect>>>,
    missing: Rc<RefCell<BTreeSet<ElementRef>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes effects targeting `element` fail with `ElementNotFound`.
    pub fn with_missing(self, element: impl Into<ElementRef>) -> Self {
        self.missing.borrow_mut().insert(element.into());
        self
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.applied.borrow().clone()
    }

    /// Returns and clears the recorded effects.
    pub fn take(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.applied.borrow_mut())
    }

    pub fn count_for(&self, target: &ElementRef) -> usize {
        self.applied
            .borrow()
            .iter()
            .filter(|effect| effect.target() == Some(target))
            .count()
    }
}

impl PresentationSurface for RecordingSurface {
    fn apply(&mut self, effect: &Effect) -> Result<(), SurfaceError> {
        if let Some(target) = effect.target() {
            if self.missing.borrow().contains(target) {
                return Err(SurfaceError::ElementNotFound(target.to_string()));
            }
        }
        self.applied.borrow_mut().push(effect.clone());
        Ok(())
    }
}

/// Clock moved by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// Counts icon render requests.
#[derive(Debug, Clone, Default)]
pub struct CountingIcons {
    renders: Rc<Cell<usize>>,
}

impl CountingIcons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> usize {
        self.renders.get()
    }
}

impl IconRenderer for CountingIcons {
    fn render_icons(&mut self) {
        self.renders.set(self.renders.get() + 1);
    }
}
