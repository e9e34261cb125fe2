//! WHOIS query request.

use crate::config::QUERY_TERMINATOR;
use crate::error_handling::QueryError;

/// A single WHOIS query: what to ask, and whom to ask.
///
/// The domain is not validated for syntax; registries accept handles, IP
/// addresses and server-specific flags in the query line, so that is left
/// to the server. `server` is a hostname or IP literal, not a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryRequest {
    domain: String,
    server: String,
}

impl QueryRequest {
    /// Creates a request for `domain` against `server`.
    pub fn new(domain: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            server: server.into(),
        }
    }

    /// The query text sent to the server.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The server as given by the caller.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Host to resolve and connect to; strips the brackets of `[v6]` literals.
    pub(crate) fn host(&self) -> &str {
        let server = self.server.trim();
        server
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(server)
    }

    /// Encodes the request line (`domain` + CRLF) as UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::EncodingError` if the domain contains CR, LF or NUL,
    /// since such a query cannot be sent as one request line.
    pub fn encode(&self) -> Result<Vec<u8>, QueryError> {
        if self.domain.contains(['\r', '\n', '\0']) {
            return Err(QueryError::EncodingError {
                domain: self.domain.clone(),
            });
        }

        let mut line = Vec::with_capacity(self.domain.len() + QUERY_TERMINATOR.len());
        line.extend_from_slice(self.domain.as_bytes());
        line.extend_from_slice(QUERY_TERMINATOR.as_bytes());
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_appends_crlf() {
        let request = QueryRequest::new("example.com", "whois.iana.org");
        assert_eq!(request.encode().unwrap(), b"example.com\r\n");
    }

    #[test]
    fn test_encode_keeps_non_ascii_as_utf8() {
        let request = QueryRequest::new("bücher.de", "whois.denic.de");
        let line = request.encode().unwrap();
        assert_eq!(line, "bücher.de\r\n".as_bytes());
    }

    #[test]
    fn test_encode_allows_empty_query() {
        // Many servers answer an empty line with their help text
        let request = QueryRequest::new("", "whois.iana.org");
        assert_eq!(request.encode().unwrap(), b"\r\n");
    }

    #[test]
    fn test_encode_rejects_embedded_line_breaks() {
        let domains = ["example.com\r\nevil.com", "example.com\n", "exa\rmple.com", "a\0b"];
        for domain in domains {
            let request = QueryRequest::new(domain, "whois.iana.org");
            match request.encode() {
                Err(QueryError::EncodingError { domain: rejected }) => {
                    assert_eq!(rejected, domain)
                }
                other => panic!("expected EncodingError for {:?}, got {:?}", domain, other),
            }
        }
    }

    #[test]
    fn test_host_strips_ipv6_brackets() {
        assert_eq!(QueryRequest::new("a", "[2001:db8::1]").host(), "2001:db8::1");
        assert_eq!(QueryRequest::new("a", "2001:db8::1").host(), "2001:db8::1");
        assert_eq!(
            QueryRequest::new("a", " whois.iana.org ").host(),
            "whois.iana.org"
        );
        assert_eq!(
            QueryRequest::new("a", "whois.iana.org").server(),
            "whois.iana.org"
        );
    }
}
