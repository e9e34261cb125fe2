//! Transport seam for WHOIS sessions.

use std::future::Future;
use std::io;

use futures::future::BoxFuture;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Establishes the byte stream a session talks over.
///
/// `TcpConnector` is the production implementation. Other implementations
/// can route through a proxy or hand out in-memory streams in tests.
pub trait Connect {
    /// The type of an established connection.
    type Connection: AsyncRead + AsyncWrite + Send + Unpin;

    /// The future establishing the connection.
    type Fut: Future<Output = io::Result<Self::Connection>> + Send;

    /// Returns a future connecting to `host` on `port`.
    ///
    /// `host` is a hostname or an unbracketed IP literal.
    fn connect(&self, host: &str, port: u16) -> Self::Fut;
}

/// Plain TCP connections, resolving hostnames through the system resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct TcpConnector;

impl Connect for TcpConnector {
    type Connection = TcpStream;
    type Fut = BoxFuture<'static, io::Result<TcpStream>>;

    fn connect(&self, host: &str, port: u16) -> Self::Fut {
        let host = host.to_owned();
        // Tries every resolved address in turn, like std's TcpStream::connect
        Box::pin(async move { TcpStream::connect((host.as_str(), port)).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_connector_reaches_loopback_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let (client, accepted) = tokio::join!(
            TcpConnector.connect("127.0.0.1", port),
            listener.accept()
        );
        let client = client.unwrap();
        let (_server, peer) = accepted.unwrap();
        assert_eq!(client.local_addr().unwrap(), peer);
    }

    #[tokio::test]
    async fn test_tcp_connector_accepts_ipv6_literal() {
        // Skip quietly on hosts without an IPv6 loopback
        let Ok(listener) = TcpListener::bind("[::1]:0").await else {
            return;
        };
        let port = listener.local_addr().unwrap().port();

        let (client, accepted) =
            tokio::join!(TcpConnector.connect("::1", port), listener.accept());
        assert!(client.is_ok());
        assert!(accepted.is_ok());
    }

    #[tokio::test]
    async fn test_tcp_connector_reports_unresolvable_host() {
        let result = TcpConnector.connect("host.invalid", 43).await;
        assert!(result.is_err());
    }
}
