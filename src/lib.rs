//! whois_query library: single-session WHOIS lookups
//!
//! This library runs one WHOIS (RFC 3912) query per call: it connects to the
//! server on port 43, sends the query line, reads until the server closes the
//! connection, and returns the raw response text or a typed failure.
//!
//! Choosing the server, following referrals, parsing fields out of the
//! response, caching and retrying are left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use whois_query::{WhoisClient, WhoisConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WhoisClient::with_config(WhoisConfig {
//!     receive_timeout: Some(Duration::from_secs(10)),
//!     ..Default::default()
//! })?;
//!
//! let raw = client.query("example.com", "whois.iana.org").await?;
//! println!("{raw}");
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
mod whois;

// Re-export public API
pub use config::{LogFormat, LogLevel, WhoisConfig};
pub use error_handling::{ErrorKind, InitializationError, QueryError};
pub use tokio_util::sync::CancellationToken;
pub use whois::{Connect, Phase, QueryRequest, TcpConnector, WhoisClient};

/// Queries `server` for `domain` with the default configuration.
///
/// Shorthand for `WhoisClient::new().query(domain, server)`.
///
/// # Errors
///
/// Returns the `QueryError` that ended the session.
pub async fn query(domain: &str, server: &str) -> Result<String, QueryError> {
    WhoisClient::new().query(domain, server).await
}
