//! Notification and scroll-reactive UI state core for the portfolio page.
//! This crate is the single source of truth for UI state invariants; hosts
//! only measure the page and apply the returned effects.

pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod db;
pub mod error;
pub mod host;
pub mod logging;
pub mod model;
pub mod repo;
pub mod runtime;
pub mod service;
pub mod testing;
pub mod timer;

pub use config::{ConfigError, PortfolioConfig};
pub use error::{CoreError, CoreResult};
pub use host::viewport::{ElementBox, ViewportQuery, ViewportSnapshot};
pub use host::{Clock, IconRenderer, PresentationSurface, SurfaceError};
pub use logging::{default_log_level, sanitize_message};
#[cfg(not(target_arch = "wasm32"))]
pub use logging::{init_logging, init_logging_from_env, logging_status};
pub use model::effect::Effect;
pub use model::element::ElementRef;
pub use model::form::{FormField, FormFields, ValidationError, ValidationReason};
pub use model::layout::PageLayout;
pub use model::nav::NavState;
pub use model::notification::{Notification, NotificationState, Severity};
pub use model::theme::ThemePreference;
pub use repo::preference_repo::{
    MemoryPreferenceStore, PreferenceError, PreferenceResult, PreferenceStore,
};
#[cfg(not(target_arch = "wasm32"))]
pub use repo::preference_repo::SqlitePreferenceStore;
pub use runtime::{ClickEvent, Collaborators, PortfolioRuntime};
pub use service::contact_form::SubmitOutcome;
pub use service::form_validator::{is_valid_email, validate};
pub use service::navigation::compute_nav_state;
pub use service::scroll_extras::PointerPhase;
pub use service::visibility::IntersectionEntry;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
