//! Error type definitions.
//!
//! This module defines the query error taxonomy, its fieldless `ErrorKind`
//! projection, and initialization errors.

use std::io;
use std::time::Duration;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::whois::Phase;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// A `WhoisConfig` value that would break every session.
    #[error("Invalid WHOIS client configuration: {0}")]
    InvalidConfigError(String),
}

/// Failure of a single WHOIS query session.
///
/// Every variant is terminal: the session's socket has already been released
/// by the time the caller sees it, and nothing is retried.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum QueryError {
    /// DNS resolution, refused connection, unreachable network, or another
    /// transport failure while establishing the session.
    #[error("Failed to connect to WHOIS server {server}:{port}")]
    ConnectionError {
        /// Server name as given by the caller
        server: String,
        /// Port the connection was attempted on
        port: u16,
        /// Underlying socket error
        #[source]
        source: io::Error,
    },

    /// The domain cannot be framed as a single WHOIS request line.
    #[error("Query {domain:?} cannot be encoded as a single WHOIS request line")]
    EncodingError {
        /// The rejected query
        domain: String,
    },

    /// The request bytes could not be fully written.
    #[error("Failed to send WHOIS query: {0}")]
    SendError(#[source] io::Error),

    /// A socket-level failure occurred while reading the response.
    #[error("Failed to receive WHOIS response: {0}")]
    ReceiveError(#[source] io::Error),

    /// The peer closed the connection before sending any bytes.
    #[error("Connection closed by remote host with no data")]
    EmptyResponseError,

    /// A session phase exceeded its deadline.
    #[error("WHOIS {phase} phase timed out after {timeout:?}")]
    TimeoutError {
        /// Phase that was in progress
        phase: Phase,
        /// Deadline that was exceeded
        timeout: Duration,
    },

    /// The accumulated response grew past the configured cap.
    #[error("WHOIS response exceeded {limit} bytes")]
    ResponseTooLargeError {
        /// Configured `max_response_bytes`
        limit: usize,
    },

    /// The caller cancelled the session through its cancellation token.
    #[error("WHOIS query cancelled while {phase}")]
    CancelledError {
        /// Phase that was in progress
        phase: Phase,
    },

    /// The session task was torn down by its runtime before completing.
    #[error("WHOIS session task aborted before completion")]
    AbortedError,
}

impl QueryError {
    /// Returns the fieldless kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::ConnectionError { .. } => ErrorKind::Connection,
            QueryError::EncodingError { .. } => ErrorKind::Encoding,
            QueryError::SendError(_) => ErrorKind::Send,
            QueryError::ReceiveError(_) => ErrorKind::Receive,
            QueryError::EmptyResponseError => ErrorKind::EmptyResponse,
            QueryError::TimeoutError { .. } => ErrorKind::Timeout,
            QueryError::ResponseTooLargeError { .. } => ErrorKind::ResponseTooLarge,
            QueryError::CancelledError { .. } => ErrorKind::Cancelled,
            QueryError::AbortedError => ErrorKind::Aborted,
        }
    }
}

/// Kinds of query failure, without payloads.
///
/// Useful for bucketing and counting failures across many sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    /// See [`QueryError::ConnectionError`]
    Connection,
    /// See [`QueryError::EncodingError`]
    Encoding,
    /// See [`QueryError::SendError`]
    Send,
    /// See [`QueryError::ReceiveError`]
    Receive,
    /// See [`QueryError::EmptyResponseError`]
    EmptyResponse,
    /// See [`QueryError::TimeoutError`]
    Timeout,
    /// See [`QueryError::ResponseTooLargeError`]
    ResponseTooLarge,
    /// See [`QueryError::CancelledError`]
    Cancelled,
    /// See [`QueryError::AbortedError`]
    Aborted,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    /// Returns a human-readable label for the error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "Connection error",
            ErrorKind::Encoding => "Encoding error",
            ErrorKind::Send => "Send error",
            ErrorKind::Receive => "Receive error",
            ErrorKind::EmptyResponse => "Empty response",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::ResponseTooLarge => "Response too large",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Aborted => "Aborted",
        }
    }
}
