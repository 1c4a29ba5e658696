//! JS-facing API for the portfolio page.
//!
//! # Responsibility
//! - Expose the runtime's event handlers to page scripts.
//! - Convert JS values in and out with `serde-wasm-bindgen`.
//!
//! # Invariants
//! - Exported functions never panic across the wasm boundary.
//! - Malformed input is reported as a rejected promise/exception string, and
//!   leaves runtime state untouched.
//!
//! # JS contract
//! - `apply(effect)` receives one effect object (`{ op, target, ... }`) and
//!   returns `false` when the target element is missing.
//! - Scroll handlers take a viewport snapshot:
//!   `{ scroll_y, viewport_height, viewport_width, elements: { id: { top, height } } }`.
//! - Hosts arm `setTimeout` for `nextDeadline()` and call `pollTimers()`.

use crate::host::{init_console_logging, DateClock, JsIcons, JsSurface, LocalStoragePreferences};
use folio_core::config::FormConfig;
use folio_core::{
    core_version as core_version_inner, is_valid_email as is_valid_email_inner,
    ping as ping_inner, validate, ClickEvent, Collaborators, ElementRef, FormFields,
    IconRenderer, IntersectionEntry, PageLayout, PointerPhase, PortfolioConfig,
    PortfolioRuntime, Severity, SubmitOutcome, ViewportSnapshot,
};
use js_sys::Function;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Minimal health-check API for page smoke tests.
#[wasm_bindgen]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[wasm_bindgen(js_name = "coreVersion")]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Routes core logs to the browser console.
///
/// Returns an empty string on success and an error message otherwise.
#[wasm_bindgen(js_name = "initLogging")]
pub fn init_logging(level: String) -> String {
    match init_console_logging(level.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

#[wasm_bindgen(js_name = "isValidEmail")]
pub fn is_valid_email(email: &str) -> bool {
    is_valid_email_inner(email)
}

/// Validation verdict for a contact form record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormVerdict {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn form_verdict(fields: &FormFields) -> FormVerdict {
    match validate(fields) {
        Ok(()) => FormVerdict {
            ok: true,
            field: None,
            message: None,
        },
        Err(err) => FormVerdict {
            ok: false,
            field: Some(err.field.as_str()),
            message: Some(err.user_message(&FormConfig::default())),
        },
    }
}

/// Validates `{ name, email, subject, message }` without submitting.
#[wasm_bindgen(js_name = "validateForm")]
pub fn validate_form(fields: JsValue) -> Result<JsValue, JsValue> {
    let fields: FormFields = from_js(fields, "fields")?;
    to_js(&form_verdict(&fields))
}

/// Page runtime handle owned by the page script.
#[wasm_bindgen]
pub struct Portfolio {
    runtime: PortfolioRuntime,
}

#[wasm_bindgen]
impl Portfolio {
    /// `config` and `layout` may be `undefined` to use defaults / an empty page.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        layout: JsValue,
        apply: Function,
        render_icons: Option<Function>,
    ) -> Result<Portfolio, JsValue> {
        let config: PortfolioConfig = from_js_or_default(config, "config")?;
        let layout: PageLayout = from_js_or_default(layout, "layout")?;
        let collaborators = Collaborators {
            surface: Box::new(JsSurface::new(apply)),
            icons: render_icons
                .map(|render| Box::new(JsIcons::new(render)) as Box<dyn IconRenderer>),
            preferences: Box::new(LocalStoragePreferences),
            clock: Box::new(DateClock),
        };
        let runtime = PortfolioRuntime::new(config, layout, collaborators)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Portfolio { runtime })
    }

    #[wasm_bindgen(js_name = "onScroll")]
    pub fn on_scroll(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        let snapshot: ViewportSnapshot = from_js(snapshot, "snapshot")?;
        self.runtime.on_scroll(&snapshot);
        Ok(())
    }

    /// Feeds entries from a page-side `IntersectionObserver`.
    #[wasm_bindgen(js_name = "onIntersection")]
    pub fn on_intersection(&mut self, entries: JsValue) -> Result<(), JsValue> {
        let entries: Vec<IntersectionEntry> = from_js(entries, "entries")?;
        self.runtime.on_intersection(&entries);
        Ok(())
    }

    /// `click` is `{ target?, anchor?, inside_menu?, menu_link? }`; hosts set
    /// `menu_link` for every `<a>` inside the mobile menu.
    #[wasm_bindgen(js_name = "onClick")]
    pub fn on_click(&mut self, click: JsValue, snapshot: JsValue) -> Result<(), JsValue> {
        let click: ClickEvent = from_js(click, "click")?;
        let snapshot: ViewportSnapshot = from_js_or_default(snapshot, "snapshot")?;
        self.runtime.on_click(&click, &snapshot);
        Ok(())
    }

    #[wasm_bindgen(js_name = "onKey")]
    pub fn on_key(&mut self, key: &str) {
        self.runtime.on_key(key);
    }

    /// `phase` is `"enter"` or `"leave"`.
    #[wasm_bindgen(js_name = "onPointer")]
    pub fn on_pointer(&mut self, target: &str, phase: &str) -> Result<(), JsValue> {
        let phase = pointer_phase(phase).map_err(|err| JsValue::from_str(&err))?;
        self.runtime.on_pointer(&ElementRef::new(target), phase);
        Ok(())
    }

    /// Returns `"sending"`, `"busy"` or `"rejected"`.
    #[wasm_bindgen(js_name = "submitContactForm")]
    pub fn submit_contact_form(&mut self, fields: JsValue) -> Result<String, JsValue> {
        let fields: FormFields = from_js(fields, "fields")?;
        let outcome = self
            .runtime
            .submit_contact_form(&fields)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(outcome_label(&outcome).to_string())
    }

    /// Unknown severities fall back to `info`.
    pub fn notify(&mut self, message: String, severity: &str) {
        self.runtime
            .notify(message, Severity::parse_lenient(severity));
    }

    #[wasm_bindgen(js_name = "toggleTheme")]
    pub fn toggle_theme(&mut self) -> Result<bool, JsValue> {
        self.runtime
            .toggle_theme()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    #[wasm_bindgen(js_name = "pollTimers")]
    pub fn poll_timers(&mut self) {
        self.runtime.poll_timers();
    }

    /// Absolute `Date.now()`-based deadline of the next timer.
    #[wasm_bindgen(js_name = "nextDeadline")]
    pub fn next_deadline(&self) -> Option<f64> {
        deadline_to_js(self.runtime.next_deadline())
    }

    /// Hook for `window.onerror`.
    #[wasm_bindgen(js_name = "reportError")]
    pub fn report_error(&self, message: &str) {
        self.runtime.report_error(message);
    }

    #[wasm_bindgen(js_name = "navState")]
    pub fn nav_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.runtime.nav_state())
    }

    #[wasm_bindgen(js_name = "isMenuOpen")]
    pub fn is_menu_open(&self) -> bool {
        self.runtime.is_menu_open()
    }

    #[wasm_bindgen(js_name = "isDarkTheme")]
    pub fn is_dark_theme(&self) -> bool {
        self.runtime.is_dark_theme()
    }
}

fn pointer_phase(raw: &str) -> Result<PointerPhase, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "enter" | "mouseenter" => Ok(PointerPhase::Enter),
        "leave" | "mouseleave" => Ok(PointerPhase::Leave),
        other => Err(format!("unsupported pointer phase `{other}`; expected enter|leave")),
    }
}

fn outcome_label(outcome: &SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Sending => "sending",
        SubmitOutcome::Busy => "busy",
        SubmitOutcome::Rejected(_) => "rejected",
    }
}

fn deadline_to_js(deadline_ms: Option<u64>) -> Option<f64> {
    deadline_ms.map(|ms| ms as f64)
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|err| JsValue::from_str(&format!("invalid {what}: {err}")))
}

fn from_js_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    what: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    from_js(value, what)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{deadline_to_js, form_verdict, outcome_label, pointer_phase};
    use folio_core::{FormFields, PointerPhase, SubmitOutcome, ValidationError};
    use folio_core::{FormField, ValidationReason};

    #[test]
    fn pointer_phase_accepts_dom_event_names() {
        assert_eq!(pointer_phase("mouseenter"), Ok(PointerPhase::Enter));
        assert_eq!(pointer_phase(" Leave "), Ok(PointerPhase::Leave));
        assert!(pointer_phase("hover").is_err());
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(outcome_label(&SubmitOutcome::Sending), "sending");
        assert_eq!(outcome_label(&SubmitOutcome::Busy), "busy");
        let rejected = SubmitOutcome::Rejected(ValidationError {
            field: FormField::Name,
            reason: ValidationReason::TooShort,
        });
        assert_eq!(outcome_label(&rejected), "rejected");
    }

    #[test]
    fn verdict_carries_field_and_visitor_message() {
        let ok = form_verdict(&FormFields::new("Al", "a@b.com", "Hi!", "This is long enough."));
        assert!(ok.ok);

        let bad = form_verdict(&FormFields::new("A", "a@b.com", "Hi!", "This is long enough."));
        assert!(!bad.ok);
        assert_eq!(bad.field, Some("name"));
        assert_eq!(
            bad.message,
            Some("Please enter a valid name (at least 2 characters).".to_string())
        );
    }

    #[test]
    fn deadlines_convert_losslessly_for_realistic_clocks() {
        assert_eq!(deadline_to_js(None), None);
        assert_eq!(deadline_to_js(Some(1_700_000_000_000)), Some(1.7e12));
    }
}
