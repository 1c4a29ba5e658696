//! Page layout discovered by the host at startup.
//!
//! # Responsibility
//! - Describe which elements exist on the page and how they are wired.
//! - Let each component check its own prerequisites independently.
//!
//! # Invariants
//! - Vectors preserve document order.
//! - Absent optional elements disable only the component that needs them.

use crate::model::element::ElementRef;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Fixed header that gets elevated once the page scrolls.
    pub navbar: Option<ElementRef>,
    /// `section[id]` elements in document order.
    pub sections: Vec<ElementRef>,
    pub nav_links: Vec<NavLinkLayout>,
    pub skills: Option<SkillsLayout>,
    /// Cards animated in by intersection.
    pub animated_cards: Vec<ElementRef>,
    pub certificate_cards: Vec<ElementRef>,
    pub project_cards: Vec<ElementRef>,
    pub lazy_images: Vec<LazyImageLayout>,
    pub mobile_menu: Option<MobileMenuLayout>,
    pub back_to_top: Option<ElementRef>,
    pub contact_form: Option<ContactFormLayout>,
    pub theme_toggle: Option<ElementRef>,
    pub hero: Option<ElementRef>,
}

/// Navigation link pointing at `#section`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavLinkLayout {
    pub element: ElementRef,
    /// Section id without the leading `#`.
    pub section: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillsLayout {
    /// Container whose intersection starts the animation.
    pub container: Option<ElementRef>,
    pub bars: Vec<SkillBarLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillBarLayout {
    pub element: ElementRef,
    /// Raw `data-width` attribute value.
    pub data_width: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LazyImageLayout {
    pub element: ElementRef,
    /// Raw `data-src` attribute value.
    pub data_src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MobileMenuLayout {
    pub button: ElementRef,
    pub menu: ElementRef,
    /// Icon placeholder inside the button, when present.
    #[serde(default)]
    pub icon: Option<ElementRef>,
    /// Whether the menu starts hidden.
    #[serde(default = "default_true")]
    pub initially_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactFormLayout {
    pub form: ElementRef,
    pub submit_button: Option<ElementRef>,
    /// Original submit button markup restored after sending.
    #[serde(default)]
    pub submit_html: String,
}

fn default_true() -> bool {
    true
}
