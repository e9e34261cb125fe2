//! Configuration types.
//!
//! This module defines the client configuration and the logging options used
//! by the logger initialization.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::constants::{
    CONNECT_TIMEOUT_SECS, MAX_READ_CHUNK_SIZE, MAX_RESPONSE_SIZE, READ_CHUNK_SIZE,
    RECEIVE_TIMEOUT_SECS, SEND_TIMEOUT_SECS, WHOIS_PORT,
};
use crate::error_handling::InitializationError;

/// Verbosity of this crate's log records, as accepted by
/// [`init_logger_with`](crate::initialization::init_logger_with).
///
/// Sessions log their start and outcome at `debug` and every phase
/// transition and chunk at `trace`; lossy decodes are the only `warn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Lossy response decodes
    Warn,
    /// Nothing beyond `Warn` today; the usual default for embedding apps
    Info,
    /// One line per session start and outcome
    Debug,
    /// Phase transitions and per-read byte counts
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// WHOIS client configuration.
///
/// Every phase of a session (connect, send, receive) has its own deadline.
/// A `None` deadline waits indefinitely, which is how a bare WHOIS client
/// behaves but leaves the caller exposed to servers that never close.
///
/// Deadlines are written as human-readable durations when loaded from a
/// config file (`"30s"`, `"250ms"`, `"1m 30s"`), or `null` to disable one.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use whois_query::WhoisConfig;
///
/// let config = WhoisConfig {
///     receive_timeout: Some(Duration::from_secs(30)),
///     ..Default::default()
/// };
/// assert_eq!(config.port, 43);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhoisConfig {
    /// TCP port of the WHOIS service
    pub port: u16,

    /// Deadline for resolving the server and establishing the connection
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Option<Duration>,

    /// Deadline for writing the query line
    #[serde(with = "humantime_serde")]
    pub send_timeout: Option<Duration>,

    /// Deadline for the entire receive phase, measured from the first read
    #[serde(with = "humantime_serde")]
    pub receive_timeout: Option<Duration>,

    /// Maximum number of bytes requested per read
    pub chunk_size: usize,

    /// Upper bound on the accumulated response (`None` disables the cap)
    pub max_response_bytes: Option<usize>,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            port: WHOIS_PORT,
            connect_timeout: Some(Duration::from_secs(CONNECT_TIMEOUT_SECS)),
            send_timeout: Some(Duration::from_secs(SEND_TIMEOUT_SECS)),
            receive_timeout: Some(Duration::from_secs(RECEIVE_TIMEOUT_SECS)),
            chunk_size: READ_CHUNK_SIZE,
            max_response_bytes: Some(MAX_RESPONSE_SIZE),
        }
    }
}

impl WhoisConfig {
    /// Checks the configuration for values that would break a session.
    ///
    /// A zero `chunk_size` is rejected because a zero-length read is
    /// indistinguishable from the peer closing the connection. The read
    /// buffer is allocated in full for every session, so `chunk_size` is also
    /// capped at [`MAX_READ_CHUNK_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfigError` describing the first
    /// offending field.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.port == 0 {
            return Err(InitializationError::InvalidConfigError(
                "port must be non-zero".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(InitializationError::InvalidConfigError(
                "chunk_size must be at least 1 byte".to_string(),
            ));
        }
        if self.chunk_size > MAX_READ_CHUNK_SIZE {
            return Err(InitializationError::InvalidConfigError(format!(
                "chunk_size {} exceeds the {} byte limit",
                self.chunk_size, MAX_READ_CHUNK_SIZE
            )));
        }
        if self.max_response_bytes == Some(0) {
            return Err(InitializationError::InvalidConfigError(
                "max_response_bytes must be at least 1 byte (use None to disable the cap)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
