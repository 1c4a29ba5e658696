//! Viewport geometry queries and intersection math.
//!
//! # Responsibility
//! - Define the read-only geometry capability used by scroll handlers.
//! - Provide a value snapshot implementation hosts can fill per tick.
//!
//! # Invariants
//! - `element_top` is relative to the viewport; `document_top` to the page.
//! - Intersection ratios are always within `0.0..=1.0`.

use crate::model::element::ElementRef;
use serde::Deserialize;
use std::collections::BTreeMap;

pub trait ViewportQuery {
    fn scroll_offset_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn viewport_width(&self) -> f64;
    /// Viewport-relative top edge, `None` when the element is unknown.
    fn element_top(&self, element: &ElementRef) -> Option<f64>;
    fn element_height(&self, element: &ElementRef) -> Option<f64>;

    /// Page-relative top edge (`offsetTop`).
    fn document_top(&self, element: &ElementRef) -> Option<f64> {
        self.element_top(element)
            .map(|top| top + self.scroll_offset_y())
    }

    /// Visible fraction of the element inside the viewport shrunk by
    /// `margin_bottom_px` at the bottom.
    fn intersection_ratio(&self, element: &ElementRef, margin_bottom_px: f64) -> Option<f64> {
        let top = self.element_top(element)?;
        let height = self.element_height(element)?;
        Some(intersection_ratio(
            top,
            height,
            self.viewport_height(),
            margin_bottom_px,
        ))
    }

    fn is_intersecting(&self, element: &ElementRef, ratio: f64, margin_bottom_px: f64) -> bool {
        self.intersection_ratio(element, margin_bottom_px)
            .is_some_and(|visible| meets_threshold(visible, ratio))
    }
}

/// Computes the visible fraction of a box against the root `[0, vh - margin]`.
///
/// Zero-height boxes count as fully visible while their edge is inside the root.
pub fn intersection_ratio(
    top: f64,
    height: f64,
    viewport_height: f64,
    margin_bottom_px: f64,
) -> f64 {
    let root_bottom = (viewport_height - margin_bottom_px).max(0.0);
    if height <= 0.0 {
        return if top >= 0.0 && top <= root_bottom { 1.0 } else { 0.0 };
    }
    let visible = (top + height).min(root_bottom) - top.max(0.0);
    (visible.max(0.0) / height).clamp(0.0, 1.0)
}

/// Threshold check used by intersection callbacks.
pub fn meets_threshold(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}

/// Page-relative box of one element.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ElementBox {
    /// Page-relative top (`offsetTop`).
    pub top: f64,
    pub height: f64,
}

/// Geometry measured by the host for one scroll tick.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub viewport_width: f64,
    pub elements: BTreeMap<ElementRef, ElementBox>,
}

impl ViewportSnapshot {
    pub fn new(scroll_y: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
            viewport_width: 1_280.0,
            elements: BTreeMap::new(),
        }
    }

    pub fn with_width(mut self, viewport_width: f64) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    /// Registers an element by its page-relative box.
    pub fn with_element(mut self, element: impl Into<ElementRef>, top: f64, height: f64) -> Self {
        self.elements
            .insert(element.into(), ElementBox { top, height });
        self
    }

    /// Same layout, different scroll offset.
    pub fn scrolled_to(&self, scroll_y: f64) -> Self {
        Self {
            scroll_y,
            ..self.clone()
        }
    }
}

impl ViewportQuery for ViewportSnapshot {
    fn scroll_offset_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn element_top(&self, element: &ElementRef) -> Option<f64> {
        self.elements
            .get(element)
            .map(|bounds| bounds.top - self.scroll_y)
    }

    fn element_height(&self, element: &ElementRef) -> Option<f64> {
        self.elements.get(element).map(|bounds| bounds.height)
    }

    fn document_top(&self, element: &ElementRef) -> Option<f64> {
        self.elements.get(element).map(|bounds| bounds.top)
    }
}

#[cfg(test)]
mod tests {
    use super::{intersection_ratio, meets_threshold, ViewportQuery, ViewportSnapshot};
    use crate::model::element::ElementRef;

    #[test]
    fn ratio_covers_partial_full_and_hidden_boxes() {
        assert_eq!(intersection_ratio(0.0, 100.0, 800.0, 0.0), 1.0);
        assert_eq!(intersection_ratio(750.0, 100.0, 800.0, 0.0), 0.5);
        assert_eq!(intersection_ratio(900.0, 100.0, 800.0, 0.0), 0.0);
        assert_eq!(intersection_ratio(-50.0, 100.0, 800.0, 0.0), 0.5);
    }

    #[test]
    fn bottom_margin_shrinks_the_root() {
        assert_eq!(intersection_ratio(740.0, 100.0, 800.0, 0.0), 0.6);
        assert_eq!(intersection_ratio(740.0, 100.0, 800.0, 50.0), 0.1);
        assert_eq!(intersection_ratio(760.0, 100.0, 800.0, 50.0), 0.0);
    }

    #[test]
    fn zero_height_box_is_visible_only_inside_root() {
        assert_eq!(intersection_ratio(10.0, 0.0, 800.0, 0.0), 1.0);
        assert_eq!(intersection_ratio(900.0, 0.0, 800.0, 0.0), 0.0);
    }

    #[test]
    fn threshold_requires_some_visibility() {
        assert!(!meets_threshold(0.0, 0.0));
        assert!(meets_threshold(0.3, 0.3));
        assert!(!meets_threshold(0.29, 0.3));
    }

    #[test]
    fn snapshot_converts_document_offsets_to_viewport_offsets() {
        let snapshot = ViewportSnapshot::new(650.0, 900.0).with_element("about", 800.0, 400.0);
        let about = ElementRef::new("about");
        assert_eq!(snapshot.element_top(&about), Some(150.0));
        assert_eq!(snapshot.document_top(&about), Some(800.0));
        assert!(snapshot.is_intersecting(&about, 0.3, 0.0));
        assert_eq!(snapshot.element_top(&ElementRef::new("missing")), None);
    }
}
