// Rust guideline compliant 2026-10-17

//! Diagnostic logging setup for the CLI.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use anyhow::{bail, Result};
use tracing::Level;
use tracing_subscriber::fmt;

/// Environment variable overriding the log level.
pub const LOG_ENV: &str = "MODREL_LOG";

/// Installs the global tracing subscriber.
///
/// The level is `warn` by default, `debug` with `--debug`, and whatever
/// [`LOG_ENV`] names when it is set.
///
/// # Errors
///
/// Returns an error if [`LOG_ENV`] holds an unknown level.
pub fn init(debug: bool) -> Result<()> {
    let level = match std::env::var(LOG_ENV) {
        Ok(value) => parse_log_level(&value)?,
        Err(_) if debug => Level::DEBUG,
        Err(_) => Level::WARN,
    };

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

/// Parses a log level name.
///
/// # Errors
///
/// Returns an error for anything but `error`, `warn`, `info`, `debug` or `trace`.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => bail!("Invalid {} level: {}", LOG_ENV, other),
    }
}
