//! Visibility evaluation for scroll-revealed elements.
//!
//! # Responsibility
//! - Own the reveal latch of every tracked element.
//! - Evaluate poll-style elements against a viewport snapshot.
//! - Accept threshold-crossing callbacks for intersection-style elements,
//!   either from a host observer or derived by `IntersectionWatcher`.
//!
//! # Invariants
//! - A reveal is reported at most once per element.
//! - Poll evaluation never reveals intersection-style elements and callbacks
//!   never reveal poll-style elements.

use crate::host::viewport::{meets_threshold, ViewportQuery};
use crate::model::element::{ElementKind, ElementRef, RevealStrategy, TrackedElement};
use log::debug;
use serde::Deserialize;

/// One threshold-crossing callback entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntersectionEntry {
    pub target: ElementRef,
    pub is_intersecting: bool,
    #[serde(default)]
    pub ratio: f64,
}

/// Element that has just been revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revealed {
    pub id: ElementRef,
    pub kind: ElementKind,
}

#[derive(Debug, Default)]
pub struct VisibilityEvaluator {
    elements: Vec<TrackedElement>,
}

impl VisibilityEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `id`. Returns `false` when it is already tracked.
    pub fn track(&mut self, id: ElementRef, kind: ElementKind, strategy: RevealStrategy) -> bool {
        if self.elements.iter().any(|element| element.id == id) {
            return false;
        }
        self.elements.push(TrackedElement::new(id, kind, strategy));
        true
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_revealed(&self, id: &ElementRef) -> bool {
        self.elements
            .iter()
            .any(|element| &element.id == id && element.revealed)
    }

    /// Polls every unrevealed top-position element.
    ///
    /// Returns the elements revealed by this evaluation, in tracking order.
    pub fn evaluate(&mut self, viewport: &dyn ViewportQuery) -> Vec<Revealed> {
        let viewport_height = viewport.viewport_height();
        let mut revealed = Vec::new();
        for element in &mut self.elements {
            let RevealStrategy::TopPosition { viewport_divisor } = element.strategy else {
                continue;
            };
            if element.revealed {
                continue;
            }
            let Some(top) = viewport.element_top(&element.id) else {
                continue;
            };
            if top < viewport_height / viewport_divisor && element.reveal() {
                revealed.push(Revealed {
                    id: element.id.clone(),
                    kind: element.kind,
                });
            }
        }
        if !revealed.is_empty() {
            debug!(
                "event=reveal module=visibility strategy=top_position count={}",
                revealed.len()
            );
        }
        revealed
    }

    /// Applies one intersection callback entry.
    pub fn on_intersection(&mut self, entry: &IntersectionEntry) -> Option<Revealed> {
        if !entry.is_intersecting {
            return None;
        }
        let element = self.elements.iter_mut().find(|element| {
            element.id == entry.target
                && matches!(element.strategy, RevealStrategy::Intersection { .. })
        })?;
        if !element.reveal() {
            return None;
        }
        debug!(
            "event=reveal module=visibility strategy=intersection kind={:?}",
            element.kind
        );
        Some(Revealed {
            id: element.id.clone(),
            kind: element.kind,
        })
    }

    /// Watch registrations for every intersection-style element.
    pub fn intersection_watches(&self) -> impl Iterator<Item = (&ElementRef, f64, f64)> {
        self.elements
            .iter()
            .filter_map(|element| match element.strategy {
                RevealStrategy::Intersection {
                    ratio,
                    margin_bottom_px,
                } => Some((&element.id, ratio, margin_bottom_px)),
                RevealStrategy::TopPosition { .. } => None,
            })
    }
}

#[derive(Debug, Clone)]
struct Watch {
    target: ElementRef,
    threshold: f64,
    margin_bottom_px: f64,
    last: Option<bool>,
}

/// Derives observer-style callbacks from successive viewport snapshots.
///
/// Emits an entry on the first observation of each target and whenever its
/// intersecting state flips.
#[derive(Debug, Default)]
pub struct IntersectionWatcher {
    watches: Vec<Watch>,
}

impl IntersectionWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&mut self, target: ElementRef, threshold: f64, margin_bottom_px: f64) {
        if self.watches.iter().any(|watch| watch.target == target) {
            return;
        }
        self.watches.push(Watch {
            target,
            threshold,
            margin_bottom_px,
            last: None,
        });
    }

    pub fn unwatch(&mut self, target: &ElementRef) {
        self.watches.retain(|watch| &watch.target != target);
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    pub fn observe(&mut self, viewport: &dyn ViewportQuery) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        for watch in &mut self.watches {
            let Some(ratio) = viewport.intersection_ratio(&watch.target, watch.margin_bottom_px)
            else {
                continue;
            };
            let is_intersecting = meets_threshold(ratio, watch.threshold);
            if watch.last == Some(is_intersecting) {
                continue;
            }
            watch.last = Some(is_intersecting);
            entries.push(IntersectionEntry {
                target: watch.target.clone(),
                is_intersecting,
                ratio,
            });
        }
        entries
    }
}
