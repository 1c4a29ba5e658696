//! Logging bootstrap and log-safety helpers.
//!
//! # Responsibility
//! - Start rolling file logs once per native process.
//! - Keep user-entered text out of log lines.
//!
//! # Invariants
//! - Init is idempotent for the same level and directory.
//! - Reconfiguration to another level or directory is rejected.
//! - Init never panics.
//!
//! Browser hosts install their own `log::Log` backend; only the sanitizing
//! helpers are available on `wasm32`.

#[cfg(not(target_arch = "wasm32"))]
pub use self::file::{init_logging, init_logging_from_env, logging_status, LOG_DIR_ENV};

const TRUNCATION_MARKER: &str = "...";

/// Default level for the current build profile.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Collapses line breaks and caps `value` at `max_chars` characters.
pub fn sanitize_message(value: &str, max_chars: usize) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    let mut capped: String = single_line.chars().take(max_chars).collect();
    if single_line.chars().count() > max_chars {
        capped.push_str(TRUNCATION_MARKER);
    }
    capped
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

/// Parses a level name into a `log` filter.
pub fn parse_level_filter(level: &str) -> Result<log::LevelFilter, String> {
    Ok(match normalize_level(level)? {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    })
}

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{default_log_level, normalize_level, sanitize_message};
    use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
    use log::{error, info};
    use once_cell::sync::OnceCell;
    use std::path::{Path, PathBuf};

    /// Environment variable naming the log directory for native hosts.
    pub const LOG_DIR_ENV: &str = "FOLIO_LOG_DIR";

    const LOG_FILE_BASENAME: &str = "folio";
    const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
    const MAX_LOG_FILES: usize = 3;
    const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

    static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
    static PANIC_HOOK: OnceCell<()> = OnceCell::new();

    struct ActiveLogger {
        level: &'static str,
        log_dir: PathBuf,
        _handle: LoggerHandle,
    }

    impl ActiveLogger {
        fn check_same(&self, level: &'static str, log_dir: &Path) -> Result<(), String> {
            if self.log_dir != log_dir {
                return Err(format!(
                    "logging already initialized at `{}`; refusing to switch to `{}`",
                    self.log_dir.display(),
                    log_dir.display()
                ));
            }
            if self.level != level {
                return Err(format!(
                    "logging already initialized with level `{}`; refusing to switch to `{}`",
                    self.level, level
                ));
            }
            Ok(())
        }
    }

    /// Starts file logging under `log_dir` (absolute path).
    ///
    /// # Errors
    /// - Unsupported `level`.
    /// - Empty or relative `log_dir`, or a directory that cannot be created.
    /// - A previous call configured a different level or directory.
    /// - Logger backend failure.
    pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
        let level = normalize_level(level)?;
        let log_dir = normalize_log_dir(log_dir)?;

        if let Some(active) = ACTIVE.get() {
            return active.check_same(level, &log_dir);
        }

        let active = ACTIVE.get_or_try_init(|| start(level, log_dir.clone()))?;
        active.check_same(level, &log_dir)
    }

    /// Starts logging in `$FOLIO_LOG_DIR` at the build's default level.
    ///
    /// Returns `Ok(false)` when the variable is unset or blank.
    pub fn init_logging_from_env() -> Result<bool, String> {
        match std::env::var(LOG_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => {
                init_logging(default_log_level(), &dir).map(|()| true)
            }
            _ => Ok(false),
        }
    }

    /// `(level, log_dir)` of the active logger, if any.
    pub fn logging_status() -> Option<(&'static str, PathBuf)> {
        ACTIVE
            .get()
            .map(|active| (active.level, active.log_dir.clone()))
    }

    fn start(level: &'static str, log_dir: PathBuf) -> Result<ActiveLogger, String> {
        std::fs::create_dir_all(&log_dir).map_err(|err| {
            format!(
                "failed to create log directory `{}`: {err}",
                log_dir.display()
            )
        })?;

        let handle = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        install_panic_hook_once();
        info!(
            "event=logging_init module=logging status=ok level={} platform={} version={}",
            level,
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION")
        );

        Ok(ActiveLogger {
            level,
            log_dir,
            _handle: handle,
        })
    }

    fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
        let trimmed = log_dir.trim();
        if trimmed.is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        let path = Path::new(trimmed);
        if !path.is_absolute() {
            return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
        }
        Ok(path.to_path_buf())
    }

    fn install_panic_hook_once() {
        if PANIC_HOOK.set(()).is_err() {
            return;
        }
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                message.clone()
            } else {
                "non-string panic payload".to_string()
            };
            error!(
                "event=panic_captured module=logging status=error location={} payload={}",
                location,
                sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
            );
            previous(panic_info);
        }));
    }

}
