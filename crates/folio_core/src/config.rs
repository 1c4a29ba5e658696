//! Runtime configuration: thresholds and delays for every component.
//!
//! # Responsibility
//! - Hold every tunable constant in one serde-deserializable record.
//! - Reject values that would break component invariants.
//!
//! # Invariants
//! - `PortfolioConfig::default()` reproduces the page's shipped behavior.
//! - A config returned by `from_json_str` has passed `validate()`.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for every configured delay (24 hours).
pub const MAX_DELAY_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub reveal: RevealConfig,
    pub skills: SkillsConfig,
    pub notification: NotificationConfig,
    pub navigation: NavigationConfig,
    pub form: FormConfig,
    pub parallax: ParallaxConfig,
    /// Key of the persisted theme flag.
    pub theme_storage_key: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            skills: SkillsConfig::default(),
            notification: NotificationConfig::default(),
            navigation: NavigationConfig::default(),
            form: FormConfig::default(),
            parallax: ParallaxConfig::default(),
            theme_storage_key: crate::model::theme::THEME_PREFERENCE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Certificate cards show once `top < viewport_height / divisor`.
    pub certificate_viewport_divisor: f64,
    pub section_card_ratio: f64,
    pub section_card_margin_bottom_px: f64,
    /// Ratio of the skills container that must be visible.
    pub skills_container_ratio: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            certificate_viewport_divisor: 1.2,
            section_card_ratio: 0.1,
            section_card_margin_bottom_px: 50.0,
            skills_container_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub settle_delay_ms: u64,
    pub stagger_ms: u64,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            stagger_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enter_delay_ms: u64,
    pub visible_ms: u64,
    pub exit_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            visible_ms: 5_000,
            exit_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// A section is active once `scroll_y >= top - active_offset_px`.
    pub active_offset_px: f64,
    pub header_elevation_px: f64,
    pub back_to_top_px: f64,
    /// Fixed navbar height subtracted from anchor scroll targets.
    pub anchor_offset_px: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            active_offset_px: 200.0,
            header_elevation_px: 50.0,
            back_to_top_px: 300.0,
            anchor_offset_px: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub min_name_chars: usize,
    pub min_subject_chars: usize,
    pub min_message_chars: usize,
    /// Delay of the simulated send.
    pub simulated_send_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_name_chars: 2,
            min_subject_chars: 3,
            min_message_chars: 10,
            simulated_send_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Parallax is only wired when the viewport is wider than this.
    pub min_viewport_width: f64,
    pub rate: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            rate: -0.3,
        }
    }
}

impl PortfolioConfig {
    /// Parses and validates a JSON config. Missing keys take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges that component invariants depend on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_ratio("reveal.section_card_ratio", self.reveal.section_card_ratio)?;
        require_ratio(
            "reveal.skills_container_ratio",
            self.reveal.skills_container_ratio,
        )?;
        let divisor = self.reveal.certificate_viewport_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "reveal.certificate_viewport_divisor",
                value: divisor.to_string(),
            });
        }
        require_finite(
            "reveal.section_card_margin_bottom_px",
            self.reveal.section_card_margin_bottom_px,
        )?;
        require_finite(
            "navigation.active_offset_px",
            self.navigation.active_offset_px,
        )?;
        require_finite(
            "navigation.header_elevation_px",
            self.navigation.header_elevation_px,
        )?;
        require_finite("navigation.back_to_top_px", self.navigation.back_to_top_px)?;
        require_finite(
            "navigation.anchor_offset_px",
            self.navigation.anchor_offset_px,
        )?;
        require_finite(
            "parallax.min_viewport_width",
            self.parallax.min_viewport_width,
        )?;
        require_finite("parallax.rate", self.parallax.rate)?;
        require_delay("skills.settle_delay_ms", self.skills.settle_delay_ms)?;
        require_delay("skills.stagger_ms", self.skills.stagger_ms)?;
        require_delay(
            "notification.enter_delay_ms",
            self.notification.enter_delay_ms,
        )?;
        require_delay("notification.visible_ms", self.notification.visible_ms)?;
        require_delay("notification.exit_ms", self.notification.exit_ms)?;
        require_delay("form.simulated_send_ms", self.form.simulated_send_ms)?;
        if self.theme_storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

fn require_ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn require_delay(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > MAX_DELAY_MS {
        return Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    OutOfRange { field: &'static str, value: String },
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid config: {message}"),
            Self::OutOfRange { field, value } => {
                write!(f, "config value `{field}` is out of range: {value}")
            }
            Self::EmptyStorageKey => {
                write!(f, "config value `theme_storage_key` must not be empty")
            }
        }
    }
}

impl Error for ConfigError {}
