//! Small scroll and pointer reactions: back-to-top, anchor scrolling,
//! hero parallax, project card hover and lazy images.

use crate::config::{NavigationConfig, ParallaxConfig};
use crate::host::viewport::ViewportQuery;
use crate::model::effect::Effect;
use crate::model::element::ElementRef;
use crate::model::layout::LazyImageLayout;
use log::debug;

const VISIBLE_CLASS: &str = "visible";
const LAZY_CLASS: &str = "lazy";
const HOVER_TRANSFORM: &str = "translateY(-8px) scale(1.02)";
const REST_TRANSFORM: &str = "translateY(0) scale(1)";

/// Back-to-top button shown past a scroll threshold.
#[derive(Debug)]
pub struct BackToTop {
    button: ElementRef,
    threshold_px: f64,
    shown: Option<bool>,
}

impl BackToTop {
    pub fn new(button: ElementRef, threshold_px: f64) -> Self {
        Self {
            button,
            threshold_px,
            shown: None,
        }
    }

    pub fn button(&self) -> &ElementRef {
        &self.button
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> Vec<Effect> {
        let show = scroll_y > self.threshold_px;
        if self.shown == Some(show) {
            return Vec::new();
        }
        self.shown = Some(show);
        vec![if show {
            Effect::add_class(&self.button, VISIBLE_CLASS)
        } else {
            Effect::remove_class(&self.button, VISIBLE_CLASS)
        }]
    }

    pub fn on_click(&self) -> Effect {
        Effect::ScrollTo {
            top: 0.0,
            smooth: true,
        }
    }
}

/// Smooth scrolling for in-page `#section` links.
#[derive(Debug, Clone)]
pub struct AnchorScroller {
    offset_px: f64,
}

impl AnchorScroller {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            offset_px: config.anchor_offset_px,
        }
    }

    /// Scroll target for `href` (`#about` or `about`), `None` when the
    /// section is not on the page.
    pub fn on_click(&self, href: &str, viewport: &dyn ViewportQuery) -> Option<Effect> {
        let id = href.strip_prefix('#').unwrap_or(href);
        if id.is_empty() {
            return None;
        }
        let Some(top) = viewport.document_top(&ElementRef::new(id)) else {
            debug!("event=anchor_scroll module=scroll_extras status=skipped reason=unknown_target");
            return None;
        };
        Some(Effect::ScrollTo {
            top: top - self.offset_px,
            smooth: true,
        })
    }
}

/// Hero parallax on wide viewports.
///
/// Whether parallax runs is decided on the first scroll tick and kept for
/// the rest of the session.
#[derive(Debug)]
pub struct Parallax {
    hero: ElementRef,
    config: ParallaxConfig,
    enabled: Option<bool>,
}

impl Parallax {
    pub fn new(hero: ElementRef, config: ParallaxConfig) -> Self {
        Self {
            hero,
            config,
            enabled: None,
        }
    }

    pub fn is_enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn on_scroll(&mut self, viewport: &dyn ViewportQuery) -> Vec<Effect> {
        let min_width = self.config.min_viewport_width;
        let enabled = *self
            .enabled
            .get_or_insert_with(|| viewport.viewport_width() > min_width);
        if !enabled {
            return Vec::new();
        }
        let offset = viewport.scroll_offset_y() * self.config.rate;
        vec![Effect::set_style(
            &self.hero,
            "transform",
            format!("translateY({}px)", format_px(offset)),
        )]
    }
}

/// Rounds to 0.01 and avoids printing `-0`.
fn format_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Enter,
    Leave,
}

/// Lift effect on project cards.
#[derive(Debug, Default)]
pub struct ProjectHover {
    cards: Vec<ElementRef>,
}

impl ProjectHover {
    pub fn new(cards: Vec<ElementRef>) -> Self {
        Self { cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn on_pointer(&self, target: &ElementRef, phase: PointerPhase) -> Vec<Effect> {
        if !self.cards.contains(target) {
            return Vec::new();
        }
        let transform = match phase {
            PointerPhase::Enter => HOVER_TRANSFORM,
            PointerPhase::Leave => REST_TRANSFORM,
        };
        vec![Effect::set_style(target, "transform", transform)]
    }
}

/// Swaps in deferred image sources on first intersection.
#[derive(Debug, Default)]
pub struct LazyImageLoader {
    pending: Vec<LazyImageLayout>,
}

impl LazyImageLoader {
    pub fn new(images: Vec<LazyImageLayout>) -> Self {
        Self { pending: images }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Loads `element` once; later calls for it emit nothing.
    pub fn on_revealed(&mut self, element: &ElementRef) -> Vec<Effect> {
        let Some(index) = self
            .pending
            .iter()
            .position(|image| &image.element == element)
        else {
            return Vec::new();
        };
        let image = self.pending.swap_remove(index);
        vec![
            Effect::set_attribute(&image.element, "src", image.data_src),
            Effect::remove_class(&image.element, LAZY_CLASS),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_px, AnchorScroller, BackToTop, LazyImageLoader, Parallax, PointerPhase,
        ProjectHover,
    };
    use crate::config::{NavigationConfig, ParallaxConfig};
    use crate::host::viewport::ViewportSnapshot;
    use crate::model::effect::Effect;
    use crate::model::element::ElementRef;
    use crate::model::layout::LazyImageLayout;

    #[test]
    fn back_to_top_toggles_visibility_on_change_only() {
        let mut button = BackToTop::new(ElementRef::new("back-to-top"), 300.0);
        assert_eq!(
            button.on_scroll(0.0),
            vec![Effect::remove_class(&ElementRef::new("back-to-top"), "visible")]
        );
        assert!(button.on_scroll(300.0).is_empty());
        assert_eq!(
            button.on_scroll(301.0),
            vec![Effect::add_class(&ElementRef::new("back-to-top"), "visible")]
        );
        assert_eq!(
            button.on_click(),
            Effect::ScrollTo {
                top: 0.0,
                smooth: true
            }
        );
    }

    #[test]
    fn anchor_scroll_accounts_for_fixed_header() {
        let scroller = AnchorScroller::new(&NavigationConfig::default());
        let snapshot = ViewportSnapshot::new(250.0, 900.0).with_element("about", 800.0, 600.0);

        assert_eq!(
            scroller.on_click("#about", &snapshot),
            Some(Effect::ScrollTo {
                top: 720.0,
                smooth: true
            })
        );
        assert_eq!(scroller.on_click("#missing", &snapshot), None);
        assert_eq!(scroller.on_click("#", &snapshot), None);
    }

    #[test]
    fn parallax_runs_only_on_wide_viewports() {
        let mut wide = Parallax::new(ElementRef::new("home"), ParallaxConfig::default());
        let snapshot = ViewportSnapshot::new(100.0, 900.0).with_width(1_024.0);
        assert_eq!(
            wide.on_scroll(&snapshot),
            vec![Effect::set_style(
                &ElementRef::new("home"),
                "transform",
                "translateY(-30px)"
            )]
        );

        let mut narrow = Parallax::new(ElementRef::new("home"), ParallaxConfig::default());
        assert!(narrow
            .on_scroll(&ViewportSnapshot::new(100.0, 900.0).with_width(768.0))
            .is_empty());
        assert!(narrow.on_scroll(&snapshot).is_empty());
        assert_eq!(narrow.is_enabled(), Some(false));
    }

    #[test]
    fn px_formatting_rounds_and_drops_negative_zero() {
        assert_eq!(format_px(-0.0), "0");
        assert_eq!(format_px(-30.0), "-30");
        assert_eq!(format_px(123.0 * -0.3), "-36.9");
    }

    #[test]
    fn hover_applies_only_to_project_cards() {
        let hover = ProjectHover::new(vec![ElementRef::new("project-1")]);
        assert_eq!(
            hover.on_pointer(&ElementRef::new("project-1"), PointerPhase::Enter),
            vec![Effect::set_style(
                &ElementRef::new("project-1"),
                "transform",
                "translateY(-8px) scale(1.02)"
            )]
        );
        assert_eq!(
            hover.on_pointer(&ElementRef::new("project-1"), PointerPhase::Leave),
            vec![Effect::set_style(
                &ElementRef::new("project-1"),
                "transform",
                "translateY(0) scale(1)"
            )]
        );
        assert!(hover
            .on_pointer(&ElementRef::new("navbar"), PointerPhase::Enter)
            .is_empty());
    }

    #[test]
    fn lazy_image_loads_once() {
        let mut loader = LazyImageLoader::new(vec![LazyImageLayout {
            element: ElementRef::new("avatar"),
            data_src: "/img/avatar.webp".to_string(),
        }]);
        let effects = loader.on_revealed(&ElementRef::new("avatar"));
        assert_eq!(
            effects,
            vec![
                Effect::set_attribute(&ElementRef::new("avatar"), "src", "/img/avatar.webp"),
                Effect::remove_class(&ElementRef::new("avatar"), "lazy"),
            ]
        );
        assert!(loader.on_revealed(&ElementRef::new("avatar")).is_empty());
        assert!(loader.is_empty());
    }
}
