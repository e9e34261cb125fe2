//! Configuration constants.
//!
//! This module defines the protocol constants and the defaults used by
//! [`WhoisConfig`](super::WhoisConfig): port, per-phase timeouts and buffer limits.

/// Well-known WHOIS service port (RFC 3912)
pub const WHOIS_PORT: u16 = 43;

// Network operation timeouts
/// TCP connection timeout in seconds
/// Covers DNS resolution of the server name as well as the TCP handshake
pub const CONNECT_TIMEOUT_SECS: u64 = 5;
/// Timeout in seconds for writing the query line
/// The request is a single short line, so anything beyond a few seconds means
/// the peer stopped reading
pub const SEND_TIMEOUT_SECS: u64 = 5;
/// Timeout in seconds for the whole receive phase (first byte to close)
/// Most registries answer in well under 2s; some thick registries stream
/// large records slowly, so this is deliberately longer than the other two
pub const RECEIVE_TIMEOUT_SECS: u64 = 15;
/// Upper bound in milliseconds on the write-side shutdown after a complete response
/// The response is already in hand, so a slow shutdown only delays the caller
pub const SHUTDOWN_TIMEOUT_MS: u64 = 1000;

// Response and buffer size limits
/// Maximum bytes requested from the socket per read (64KB)
pub const READ_CHUNK_SIZE: usize = 64 * 1024;
/// Largest accepted `chunk_size` (4MB); the read buffer is allocated up front
pub const MAX_READ_CHUNK_SIZE: usize = 4 * 1024 * 1024;
/// Maximum accumulated response size in bytes (2MB)
/// Real WHOIS records are a few KB; a peer streaming past this is misbehaving
pub const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024;

/// Line terminator appended to every query
pub const QUERY_TERMINATOR: &str = "\r\n";
