//! Client configuration and constants.
//!
//! This module provides:
//! - Protocol constants and defaults (port, timeouts, size limits)
//! - The `WhoisConfig` struct handed to `WhoisClient`
//! - Logging option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, WhoisConfig};
