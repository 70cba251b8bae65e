//! Logger bootstrap
//!
//! # Invariants
//! - Logging init is idempotent for the same level.
//! - Re-initialization with a different level is rejected.
//! - Initialization never panics.

use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Initializes stderr logging at `level`
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when logging is already active at another level.
/// - Returns an error when logger backend setup fails.
pub fn init_logging(level: &str) -> Result<(), String> {
    let normalized_level = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = Logger::try_with_str(normalized_level)
            .map_err(|err| format!("invalid log level `{normalized_level}`: {err}"))?
            .log_to_stderr()
            .write_mode(WriteMode::Direct)
            .format(flexi_logger::default_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        info!(
            "event=app_start status=ok platform={} build_mode={} version={} level={}",
            std::env::consts::OS,
            build_mode(),
            env!("CARGO_PKG_VERSION"),
            normalized_level
        );

        Ok(LoggingState {
            level: normalized_level,
            _logger: logger,
        })
    })?;

    if state.level != normalized_level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, normalized_level
        ));
    }

    Ok(())
}

/// Active log level, `None` before `init_logging`
pub fn logging_level() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.level)
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `warn`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    }
}

pub fn normalize_level(level: &str) -> Result<&'static str, String> {
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

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level(" WARNING "), Ok("warn"));
        assert_eq!(normalize_level("Trace"), Ok("trace"));
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn test_default_level_is_supported() {
        assert!(normalize_level(default_log_level()).is_ok());
    }

    #[test]
    fn test_init_is_idempotent_and_pins_level() {
        assert!(init_logging("info").is_ok());
        assert!(init_logging("INFO").is_ok());
        assert_eq!(logging_level(), Some("info"));
        assert!(init_logging("debug").is_err());
        assert!(init_logging("loud").is_err());
    }
}
