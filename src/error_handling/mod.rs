//! Error handling.
//!
//! This module provides:
//! - `QueryError`, the terminal failure of a WHOIS session
//! - `ErrorKind`, a payload-free projection for counting and reporting
//! - `InitializationError` for logger and configuration setup

mod types;

// Re-export public API
pub use types::{ErrorKind, InitializationError, QueryError};
