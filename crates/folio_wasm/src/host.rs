//! Browser-side collaborators backing the core runtime.
//!
//! # Invariants
//! - Nothing here panics; JS exceptions become `SurfaceError` /
//!   `PreferenceError` values or are dropped after logging.

use folio_core::logging::parse_level_filter;
use folio_core::{
    Clock, Effect, IconRenderer, PreferenceError, PreferenceResult, PreferenceStore,
    PresentationSurface, SurfaceError,
};
use js_sys::Function;
use log::{Level, Log, Metadata, Record};
use std::sync::OnceLock;
use wasm_bindgen::{JsCast, JsValue};

/// Hands every effect to a JS callback as a plain object.
///
/// The callback returns `false` when the target element does not exist.
pub struct JsSurface {
    apply: Function,
}

impl JsSurface {
    pub fn new(apply: Function) -> Self {
        Self { apply }
    }
}

impl PresentationSurface for JsSurface {
    fn apply(&mut self, effect: &Effect) -> Result<(), SurfaceError> {
        let value = serde_wasm_bindgen::to_value(effect)
            .map_err(|err| SurfaceError::Host(err.to_string()))?;
        let returned = self
            .apply
            .call1(&JsValue::NULL, &value)
            .map_err(|err| SurfaceError::Host(describe_js_error(&err)))?;
        if returned.as_bool() == Some(false) {
            let target = effect
                .target()
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(SurfaceError::ElementNotFound(target));
        }
        Ok(())
    }
}

/// Calls the page's icon library (e.g. `() => lucide.createIcons()`).
pub struct JsIcons {
    render: Function,
}

impl JsIcons {
    pub fn new(render: Function) -> Self {
        Self { render }
    }
}

impl IconRenderer for JsIcons {
    fn render_icons(&mut self) {
        if let Err(err) = self.render.call0(&JsValue::NULL) {
            log::warn!(
                "event=icons_render module=wasm status=error error={}",
                describe_js_error(&err)
            );
        }
    }
}

/// `window.localStorage`, resolved on every access.
#[derive(Debug, Default)]
pub struct LocalStoragePreferences;

impl LocalStoragePreferences {
    fn storage() -> PreferenceResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| PreferenceError::Backend("no window object".to_string()))?;
        window
            .local_storage()
            .map_err(|err| PreferenceError::Backend(describe_js_error(&err)))?
            .ok_or_else(|| PreferenceError::Backend("localStorage unavailable".to_string()))
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| PreferenceError::Backend(describe_js_error(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> PreferenceResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| PreferenceError::Backend(describe_js_error(&err)))
    }
}

/// Wall clock from `Date.now()`.
#[derive(Debug, Default)]
pub struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> u64 {
        let now = js_sys::Date::now();
        if now.is_finite() && now > 0.0 {
            now as u64
        } else {
            0
        }
    }
}

struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;
static CONSOLE_LEVEL: OnceLock<log::LevelFilter> = OnceLock::new();

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Routes `log` records to the browser console.
///
/// Idempotent for the same level; a different level is rejected.
pub fn init_console_logging(level: &str) -> Result<(), String> {
    let filter = parse_level_filter(level)?;
    let active = *CONSOLE_LEVEL.get_or_init(|| {
        if log::set_logger(&CONSOLE_LOGGER).is_ok() {
            log::set_max_level(filter);
        }
        filter
    });
    if active != filter {
        return Err(format!(
            "console logging already initialized with level `{active}`; refusing to switch to `{filter}`"
        ));
    }
    Ok(())
}

pub(crate) fn describe_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| "non-string JS exception".to_string())
}
