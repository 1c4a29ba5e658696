//! Theme preference model.

use serde::Serialize;

/// Storage key of the persisted theme flag.
pub const THEME_PREFERENCE_KEY: &str = "theme";
pub const THEME_DARK: &str = "dark";
pub const THEME_LIGHT: &str = "light";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThemePreference {
    pub is_dark: bool,
}

impl ThemePreference {
    /// Decodes a stored value. Anything other than `dark` is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        Self {
            is_dark: value == Some(THEME_DARK),
        }
    }

    pub fn stored_value(self) -> &'static str {
        if self.is_dark {
            THEME_DARK
        } else {
            THEME_LIGHT
        }
    }

    pub fn toggled(self) -> Self {
        Self {
            is_dark: !self.is_dark,
        }
    }
}
