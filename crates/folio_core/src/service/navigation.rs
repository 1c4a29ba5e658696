//! Navigation state tracking.
//!
//! # Responsibility
//! - Derive the active section and header elevation from the scroll offset.
//! - Keep nav link `active` classes and header styling in sync.
//!
//! # Invariants
//! - State is recomputed from scratch every tick; only the effect output is
//!   diffed against the previous tick.
//! - Later sections in document order win when several qualify.

use crate::config::NavigationConfig;
use crate::host::viewport::ViewportQuery;
use crate::model::effect::Effect;
use crate::model::element::ElementRef;
use crate::model::layout::NavLinkLayout;
use crate::model::nav::NavState;

const ACTIVE_LINK_CLASS: &str = "active";
const ELEVATED_HEADER_CLASS: &str = "shadow-md";

/// Returns the last section (document order) whose top is within
/// `active_offset_px` above the scroll offset.
pub fn active_section<'a>(
    sections: impl IntoIterator<Item = (&'a str, f64)>,
    scroll_y: f64,
    active_offset_px: f64,
) -> Option<&'a str> {
    sections
        .into_iter()
        .filter(|(_, top)| scroll_y >= top - active_offset_px)
        .last()
        .map(|(id, _)| id)
}

/// Pure navigation state for one scroll offset.
pub fn compute_nav_state<'a>(
    sections: impl IntoIterator<Item = (&'a str, f64)>,
    scroll_y: f64,
    config: &NavigationConfig,
) -> NavState {
    NavState {
        active_section_id: active_section(sections, scroll_y, config.active_offset_px)
            .map(str::to_string),
        header_elevated: scroll_y > config.header_elevation_px,
    }
}

#[derive(Debug)]
pub struct NavigationTracker {
    navbar: Option<ElementRef>,
    sections: Vec<ElementRef>,
    links: Vec<NavLinkLayout>,
    config: NavigationConfig,
    last: Option<NavState>,
}

impl NavigationTracker {
    pub fn new(
        navbar: Option<ElementRef>,
        sections: Vec<ElementRef>,
        links: Vec<NavLinkLayout>,
        config: NavigationConfig,
    ) -> Self {
        Self {
            navbar,
            sections,
            links,
            config,
            last: None,
        }
    }

    /// State computed on the latest tick.
    pub fn state(&self) -> Option<&NavState> {
        self.last.as_ref()
    }

    /// Recomputes navigation state and returns only the writes that changed.
    pub fn on_scroll(&mut self, viewport: &dyn ViewportQuery) -> Vec<Effect> {
        let tops: Vec<(&str, f64)> = self
            .sections
            .iter()
            .filter_map(|section| {
                viewport
                    .document_top(section)
                    .map(|top| (section.as_str(), top))
            })
            .collect();
        let next = compute_nav_state(tops, viewport.scroll_offset_y(), &self.config);

        let mut effects = Vec::new();
        let previous = self.last.as_ref();

        if previous.map(|state| state.header_elevated) != Some(next.header_elevated) {
            if let Some(navbar) = &self.navbar {
                effects.push(if next.header_elevated {
                    Effect::add_class(navbar, ELEVATED_HEADER_CLASS)
                } else {
                    Effect::remove_class(navbar, ELEVATED_HEADER_CLASS)
                });
            }
        }

        if previous.map(|state| &state.active_section_id) != Some(&next.active_section_id) {
            for link in &self.links {
                let is_active = next.active_section_id.as_deref() == Some(link.section.as_str());
                effects.push(if is_active {
                    Effect::add_class(&link.element, ACTIVE_LINK_CLASS)
                } else {
                    Effect::remove_class(&link.element, ACTIVE_LINK_CLASS)
                });
            }
        }

        self.last = Some(next);
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::{active_section, compute_nav_state, NavigationTracker};
    use crate::config::NavigationConfig;
    use crate::host::viewport::ViewportSnapshot;
    use crate::model::effect::Effect;
    use crate::model::element::ElementRef;
    use crate::model::layout::NavLinkLayout;

    fn sections() -> Vec<(&'static str, f64)> {
        vec![("home", 0.0), ("about", 800.0), ("skills", 1_600.0)]
    }

    #[test]
    fn later_qualifying_section_wins() {
        assert_eq!(active_section(sections(), 650.0, 200.0), Some("about"));
        assert_eq!(active_section(sections(), 599.0, 200.0), Some("home"));
        assert_eq!(active_section(sections(), 1_400.0, 200.0), Some("skills"));
    }

    #[test]
    fn no_section_qualifies_above_the_first_offset() {
        let late = vec![("contact", 900.0)];
        assert_eq!(active_section(late, 100.0, 200.0), None);
    }

    #[test]
    fn header_elevation_is_strictly_above_threshold() {
        let config = NavigationConfig::default();
        assert!(!compute_nav_state(sections(), 50.0, &config).header_elevated);
        assert!(compute_nav_state(sections(), 51.0, &config).header_elevated);
    }

    fn tracker() -> NavigationTracker {
        NavigationTracker::new(
            Some(ElementRef::new("navbar")),
            vec![ElementRef::new("home"), ElementRef::new("about")],
            vec![
                NavLinkLayout {
                    element: ElementRef::new("link-home"),
                    section: "home".to_string(),
                },
                NavLinkLayout {
                    element: ElementRef::new("link-about"),
                    section: "about".to_string(),
                },
            ],
            NavigationConfig::default(),
        )
    }

    #[test]
    fn emits_full_state_first_then_only_changes() {
        let mut tracker = tracker();
        let layout = ViewportSnapshot::new(0.0, 900.0)
            .with_element("home", 0.0, 800.0)
            .with_element("about", 800.0, 800.0);

        let first = tracker.on_scroll(&layout);
        assert_eq!(
            first,
            vec![
                Effect::remove_class(&ElementRef::new("navbar"), "shadow-md"),
                Effect::add_class(&ElementRef::new("link-home"), "active"),
                Effect::remove_class(&ElementRef::new("link-about"), "active"),
            ]
        );

        assert!(tracker.on_scroll(&layout.scrolled_to(10.0)).is_empty());

        let elevated = tracker.on_scroll(&layout.scrolled_to(120.0));
        assert_eq!(
            elevated,
            vec![Effect::add_class(&ElementRef::new("navbar"), "shadow-md")]
        );

        let moved = tracker.on_scroll(&layout.scrolled_to(650.0));
        assert_eq!(
            moved,
            vec![
                Effect::remove_class(&ElementRef::new("link-home"), "active"),
                Effect::add_class(&ElementRef::new("link-about"), "active"),
            ]
        );
        assert_eq!(
            tracker
                .state()
                .and_then(|state| state.active_section_id.as_deref()),
            Some("about")
        );
    }

    #[test]
    fn missing_navbar_only_skips_header_writes() {
        let mut tracker = NavigationTracker::new(
            None,
            vec![ElementRef::new("home")],
            Vec::new(),
            NavigationConfig::default(),
        );
        let snapshot = ViewportSnapshot::new(400.0, 900.0).with_element("home", 0.0, 800.0);
        assert!(tracker.on_scroll(&snapshot).is_empty());
        assert_eq!(
            tracker
                .state()
                .map(|state| (state.active_section_id.as_deref(), state.header_elevated)),
            Some((Some("home"), true))
        );
    }
}
