//! Theme preference service.
//!
//! # Responsibility
//! - Load the persisted theme flag once at startup.
//! - Toggle it on explicit user action and persist the new value.
//!
//! # Invariants
//! - The flag changes only through `toggle`.
//! - A store failure never blocks the visual toggle; it is logged instead.

use crate::model::effect::Effect;
use crate::model::element::ElementRef;
use crate::model::theme::ThemePreference;
use crate::repo::preference_repo::PreferenceStore;
use log::{error, info, warn};

const DARK_CLASS: &str = "dark";

pub struct ThemeService {
    store: Box<dyn PreferenceStore>,
    key: String,
    root: ElementRef,
    preference: ThemePreference,
}

impl ThemeService {
    /// Reads the stored flag and returns the startup effects.
    ///
    /// Unreadable stores fall back to the light theme.
    pub fn load(store: Box<dyn PreferenceStore>, key: impl Into<String>) -> (Self, Vec<Effect>) {
        let key = key.into();
        let stored = match store.get(&key) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=theme_load module=theme status=degraded error={}",
                    err
                );
                None
            }
        };
        let preference = ThemePreference::from_stored(stored.as_deref());
        let root = ElementRef::document_root();
        let effects = if preference.is_dark {
            vec![Effect::add_class(&root, DARK_CLASS)]
        } else {
            Vec::new()
        };
        info!(
            "event=theme_load module=theme status=ok theme={}",
            preference.stored_value()
        );
        (
            Self {
                store,
                key,
                root,
                preference,
            },
            effects,
        )
    }

    pub fn is_dark(&self) -> bool {
        self.preference.is_dark
    }

    /// Flips the theme, persists it, and returns the class write.
    pub fn toggle(&mut self) -> Vec<Effect> {
        self.preference = self.preference.toggled();
        let value = self.preference.stored_value();
        if let Err(err) = self.store.set(&self.key, value) {
            error!(
                "event=theme_persist module=theme status=error theme={} error={}",
                value, err
            );
        }
        vec![if self.preference.is_dark {
            Effect::add_class(&self.root, DARK_CLASS)
        } else {
            Effect::remove_class(&self.root, DARK_CLASS)
        }]
    }

    /// Gives the store back, e.g. to simulate a page reload.
    pub fn into_store(self) -> Box<dyn PreferenceStore> {
        self.store
    }
}
