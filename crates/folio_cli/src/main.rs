//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `folio_core` linkage and print a deterministic scripted session.
//! - Exercise the SQLite theme store so persistence can be checked by
//!   running the binary twice.
//!
//! Environment:
//! - `FOLIO_DB_PATH`: preference database file (default: temp dir).
//! - `FOLIO_LOG_DIR`: enables rolling file logs when set.

use folio_core::db::open_preferences_db;
use folio_core::testing::ManualClock;
use folio_core::{
    init_logging_from_env, ClickEvent, Collaborators, Effect, FormFields, PageLayout,
    PortfolioConfig, PortfolioRuntime, PresentationSurface, SqlitePreferenceStore, SurfaceError,
    ViewportSnapshot,
};
use std::path::PathBuf;
use std::process::ExitCode;

const DB_PATH_ENV: &str = "FOLIO_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "folio_preferences.sqlite3";

/// Prints each effect as one JSON line.
struct StdoutSurface;

impl PresentationSurface for StdoutSurface {
    fn apply(&mut self, effect: &Effect) -> Result<(), SurfaceError> {
        let line =
            serde_json::to_string(effect).map_err(|err| SurfaceError::Host(err.to_string()))?;
        println!("effect {line}");
        Ok(())
    }
}

fn resolve_db_path() -> PathBuf {
    match std::env::var(DB_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
        _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
    }
}

fn demo_layout() -> Result<PageLayout, String> {
    serde_json::from_value(serde_json::json!({
        "navbar": "navbar",
        "sections": ["home", "about", "skills", "contact"],
        "nav_links": [
            { "element": "nav-home", "section": "home" },
            { "element": "nav-about", "section": "about" },
            { "element": "nav-skills", "section": "skills" },
            { "element": "nav-contact", "section": "contact" }
        ],
        "skills": {
            "container": "skills",
            "bars": [
                { "element": "bar-rust", "data_width": "90" },
                { "element": "bar-sql", "data_width": "75" }
            ]
        },
        "certificate_cards": ["cert-1"],
        "mobile_menu": { "button": "mobile-menu-btn", "menu": "mobile-menu" },
        "back_to_top": "back-to-top",
        "contact_form": {
            "form": "contact-form",
            "submit_button": "contact-submit",
            "submit_html": "Send Message"
        },
        "theme_toggle": "theme-toggle",
        "hero": "home"
    }))
    .map_err(|err| format!("demo layout is invalid: {err}"))
}

fn demo_viewport() -> ViewportSnapshot {
    ViewportSnapshot::new(0.0, 900.0)
        .with_element("home", 0.0, 800.0)
        .with_element("about", 800.0, 800.0)
        .with_element("skills", 1_600.0, 600.0)
        .with_element("cert-1", 2_000.0, 300.0)
        .with_element("contact", 2_400.0, 700.0)
}

fn run() -> Result<(), String> {
    println!("folio_core ping={}", folio_core::ping());
    println!("folio_core version={}", folio_core::core_version());

    if init_logging_from_env()? {
        println!("logging enabled");
    }

    let db_path = resolve_db_path();
    log::info!(
        "event=cli_session module=cli status=start db_from_env={}",
        std::env::var_os(DB_PATH_ENV).is_some()
    );
    let conn = open_preferences_db(&db_path).map_err(|err| err.to_string())?;
    let preferences = SqlitePreferenceStore::try_new(conn).map_err(|err| err.to_string())?;

    let clock = ManualClock::new();
    let mut runtime = PortfolioRuntime::new(
        PortfolioConfig::default(),
        demo_layout()?,
        Collaborators {
            surface: Box::new(StdoutSurface),
            icons: None,
            preferences: Box::new(preferences),
            clock: Box::new(clock.clone()),
        },
    )
    .map_err(|err| err.to_string())?;
    println!("components={}", runtime.active_components().join(","));
    println!("theme_at_start={}", theme_name(runtime.is_dark_theme()));

    let viewport = demo_viewport();
    for scroll_y in [0.0, 650.0, 1_300.0] {
        println!("scroll y={scroll_y}");
        runtime.on_scroll(&viewport.scrolled_to(scroll_y));
    }
    clock.advance(1_000);
    runtime.poll_timers();

    runtime.on_click(&ClickEvent::on("mobile-menu-btn"), &viewport);
    runtime.on_key("Escape");

    let outcome = runtime
        .submit_contact_form(&FormFields::new(
            "Al",
            "a@b.com",
            "Hi!",
            "This is long enough.",
        ))
        .map_err(|err| err.to_string())?;
    println!("submit outcome={outcome:?}");
    clock.advance(2_000);
    runtime.poll_timers();

    let is_dark = runtime.toggle_theme().map_err(|err| err.to_string())?;
    println!(
        "theme_after_toggle={} db={}",
        theme_name(is_dark),
        db_path.display()
    );
    Ok(())
}

fn theme_name(is_dark: bool) -> &'static str {
    if is_dark {
        "dark"
    } else {
        "light"
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("folio_cli failed: {err}");
            ExitCode::FAILURE
        }
    }
}
