//! Mobile navigation menu.
//!
//! # Invariants
//! - Open/closed state lives here; the `hidden` class is only its projection.
//! - Closing an already closed menu emits nothing.

use crate::error::{CoreError, CoreResult};
use crate::model::effect::Effect;
use crate::model::element::ElementRef;
use crate::model::layout::MobileMenuLayout;

const HIDDEN_CLASS: &str = "hidden";
const ICON_ATTRIBUTE: &str = "data-lucide";
const ICON_OPEN: &str = "x";
const ICON_CLOSED: &str = "menu";

#[derive(Debug)]
pub struct MobileMenu {
    button: ElementRef,
    menu: ElementRef,
    icon: Option<ElementRef>,
    open: bool,
}

impl MobileMenu {
    pub fn from_layout(layout: Option<&MobileMenuLayout>) -> CoreResult<Self> {
        let layout = layout.ok_or(CoreError::MissingElement("mobile-menu"))?;
        Ok(Self {
            button: layout.button.clone(),
            menu: layout.menu.clone(),
            icon: layout.icon.clone(),
            open: !layout.initially_hidden,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn button(&self) -> &ElementRef {
        &self.button
    }

    /// Menu button click.
    pub fn toggle(&mut self) -> Vec<Effect> {
        self.set_open(!self.open)
    }

    /// Click on a link inside the menu, outside the menu, or `Escape`.
    pub fn close(&mut self) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        self.set_open(false)
    }

    /// Keyboard handler; only `Escape` is meaningful.
    pub fn on_key(&mut self, key: &str) -> Vec<Effect> {
        if key == "Escape" {
            return self.close();
        }
        Vec::new()
    }

    fn set_open(&mut self, open: bool) -> Vec<Effect> {
        self.open = open;
        let mut effects = vec![if open {
            Effect::remove_class(&self.menu, HIDDEN_CLASS)
        } else {
            Effect::add_class(&self.menu, HIDDEN_CLASS)
        }];
        if let Some(icon) = &self.icon {
            let name = if open { ICON_OPEN } else { ICON_CLOSED };
            effects.push(Effect::set_attribute(icon, ICON_ATTRIBUTE, name));
        }
        effects.push(Effect::RenderIcons);
        effects
    }
}
