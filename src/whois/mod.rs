//! WHOIS protocol client (RFC 3912).
//!
//! A query is one TCP session against port 43: the query line is sent,
//! then everything the server writes until it closes the connection is the
//! response. This module provides:
//! - `WhoisClient`, which runs sessions with per-phase deadlines
//! - `QueryRequest`, the immutable (domain, server) input
//! - `Connect` and `TcpConnector`, the transport seam
//! - `Phase`, the session lifecycle reported in timeout and cancellation errors

mod client;
mod connect;
mod request;
mod session;

// Re-export public API
pub use client::WhoisClient;
pub use connect::{Connect, TcpConnector};
pub use request::QueryRequest;
pub use session::Phase;
