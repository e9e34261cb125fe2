//! Logger initialization.
//!
//! The library itself only emits records through the `log` facade. This module
//! is for applications embedding the client that want the same output format
//! without wiring `env_logger` themselves.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// The logger reads from the `RUST_LOG` environment variable first and the
/// provided `level` then overrides it for this crate, so
/// `RUST_LOG=tokio=trace` still works alongside an explicit level.
///
/// # Arguments
///
/// * `level` - Minimum log level for `whois_query` records: a
///   [`LogLevel`](crate::config::LogLevel) from a config file, or any `log::LevelFilter`
/// * `format` - Log format (Plain or Json)
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a global logger is already set.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=whois_query=trace my_app
/// ```
pub fn init_logger_with(
    level: impl Into<LevelFilter>,
    format: LogFormat,
) -> Result<(), InitializationError> {
    let level = level.into();
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("mio", LevelFilter::Warn);
    builder.filter_module("whois_query", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init so a second call (common in tests) reports an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
