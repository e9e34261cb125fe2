// Shared test helpers: loopback mock WHOIS servers.
//
// Each server binds 127.0.0.1 on an ephemeral port. Clients are pointed at it
// either with `config_for(port)` or through `LoopbackConnector`, which sends
// every hostname to the loopback listener.

use std::io;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use whois_query::{Connect, TcpConnector, WhoisConfig};

/// Client config pointing at a loopback test server on `port`, with short deadlines.
#[allow(dead_code)] // Used by other test files
pub fn config_for(port: u16) -> WhoisConfig {
    WhoisConfig {
        port,
        connect_timeout: Some(Duration::from_secs(2)),
        send_timeout: Some(Duration::from_secs(2)),
        receive_timeout: Some(Duration::from_secs(5)),
        ..Default::default()
    }
}

/// Connects to 127.0.0.1 whatever host the client asks for.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct LoopbackConnector;

impl Connect for LoopbackConnector {
    type Connection = TcpStream;
    type Fut = BoxFuture<'static, io::Result<TcpStream>>;

    fn connect(&self, _host: &str, port: u16) -> Self::Fut {
        TcpConnector.connect("127.0.0.1", port)
    }
}

/// Fails every connect the way the system resolver does for an unknown name.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct UnresolvableConnector;

impl Connect for UnresolvableConnector {
    type Connection = TcpStream;
    type Fut = BoxFuture<'static, io::Result<TcpStream>>;

    fn connect(&self, host: &str, _port: u16) -> Self::Fut {
        let message = format!("failed to lookup address information for {host}");
        Box::pin(async move { Err(io::Error::new(io::ErrorKind::NotFound, message)) })
    }
}

/// Reads the query line (up to and including CRLF) from an accepted connection.
///
/// The request must be drained before the server closes: closing a socket
/// with unread data sends RST instead of FIN, and the client would see a
/// reset rather than a clean end of response.
#[allow(dead_code)]
pub async fn read_query_line(stream: &mut TcpStream) -> Vec<u8> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];
    while !line.ends_with(b"\r\n") {
        match stream.read(&mut byte).await {
            Ok(0) | Err(_) => break,
            Ok(_) => line.push(byte[0]),
        }
    }
    line
}

/// Binds a listener on an ephemeral loopback port.
#[allow(dead_code)]
pub async fn bind() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener
        .local_addr()
        .expect("Listener has no local address")
        .port();
    (listener, port)
}

/// Serves one connection: reads the query, writes each chunk as a separate
/// delivery (`gap` apart), then closes. Resolves to the query line received.
#[allow(dead_code)]
pub async fn spawn_whois_server(
    chunks: Vec<Vec<u8>>,
    gap: Duration,
) -> (u16, JoinHandle<Vec<u8>>) {
    let (listener, port) = bind().await;
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        let query = read_query_line(&mut stream).await;
        for chunk in chunks {
            stream.write_all(&chunk).await.expect("write failed");
            stream.flush().await.expect("flush failed");
            if !gap.is_zero() {
                tokio::time::sleep(gap).await;
            }
        }
        query
    });
    (port, handle)
}

/// Serves one connection: reads the query, writes `response` and immediately
/// half-closes, so the final bytes and the FIN leave together.
#[allow(dead_code)]
pub async fn spawn_bundled_close_server(response: Vec<u8>) -> (u16, JoinHandle<Vec<u8>>) {
    let (listener, port) = bind().await;
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        let query = read_query_line(&mut stream).await;
        stream.write_all(&response).await.expect("write failed");
        stream.shutdown().await.expect("shutdown failed");
        query
    });
    (port, handle)
}

/// Serves `connections` connections in sequence, answering each with `response`.
#[allow(dead_code)]
pub async fn spawn_repeating_server(
    response: Vec<u8>,
    connections: usize,
) -> (u16, JoinHandle<usize>) {
    let (listener, port) = bind().await;
    let handle = tokio::spawn(async move {
        let mut served = 0;
        while served < connections {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            read_query_line(&mut stream).await;
            if stream.write_all(&response).await.is_ok() {
                served += 1;
            }
        }
        served
    });
    (port, handle)
}

/// Accepts one connection, reads the query and then never answers.
///
/// Resolves to `true` once the client closes its side, i.e. the client
/// released the socket; gives up after `watch` and resolves to `false`.
#[allow(dead_code)]
pub async fn spawn_silent_server(watch: Duration) -> (u16, JoinHandle<bool>) {
    let (listener, port) = bind().await;
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        read_query_line(&mut stream).await;
        let mut buf = [0u8; 64];
        matches!(
            tokio::time::timeout(watch, stream.read(&mut buf)).await,
            Ok(Ok(0)) | Ok(Err(_))
        )
    });
    (port, handle)
}

/// Returns a loopback port with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_port() -> u16 {
    let (listener, port) = bind().await;
    drop(listener);
    port
}
