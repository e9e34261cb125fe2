//! A single WHOIS session: connect, send, receive until close, tear down.
//!
//! WHOIS has no framing. The response ends when the server closes the
//! connection, so the receive loop treats end-of-stream as the only
//! end-of-message signal and never returns while the peer may still send.

use std::fmt;
use std::future::Future;
use std::io;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use super::connect::Connect;
use super::request::QueryRequest;
use crate::config::{WhoisConfig, SHUTDOWN_TIMEOUT_MS};
use crate::error_handling::QueryError;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Resolving the server and establishing the TCP connection
    Connecting,
    /// Writing the query line
    Sending,
    /// Accumulating the response until the server closes
    Receiving,
    /// Terminal; the connection has been released
    Closed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Connecting => "connecting",
            Phase::Sending => "sending",
            Phase::Receiving => "receiving",
            Phase::Closed => "closed",
        })
    }
}

/// Runs one complete session for `request`.
///
/// The connection is owned by this call and released on every return path,
/// including when the returned future is dropped part-way.
pub(crate) async fn run<C: Connect>(
    connector: &C,
    config: &WhoisConfig,
    request: &QueryRequest,
    cancel: &CancellationToken,
) -> Result<String, QueryError> {
    // Rejected before a socket is opened
    let line = request.encode()?;

    debug!(
        "Querying {}:{} for {:?}",
        request.server(),
        config.port,
        request.domain()
    );

    let stream = bounded(Phase::Connecting, config.connect_timeout, cancel, async {
        connector
            .connect(request.host(), config.port)
            .await
            .map_err(|source| QueryError::ConnectionError {
                server: request.server().to_string(),
                port: config.port,
                source,
            })
    })
    .await
    .inspect_err(|e| debug!("WHOIS session for {:?} failed: {}", request.domain(), e))?;

    let mut session = Session::new(stream);
    let outcome = session.exchange(&line, config, cancel).await;

    match outcome {
        Ok(()) => {
            let response = session.close(config, cancel).await;
            debug!(
                "Received {} bytes from {} for {:?}",
                response.len(),
                request.server(),
                request.domain()
            );
            Ok(response)
        }
        Err(e) => {
            debug!("WHOIS session for {:?} failed: {}", request.domain(), e);
            // Dropping the session closes the socket
            drop(session);
            Err(e)
        }
    }
}

/// Applies a phase deadline and the caller's cancellation token to `fut`.
async fn bounded<T, F>(
    phase: Phase,
    limit: Option<Duration>,
    cancel: &CancellationToken,
    fut: F,
) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, QueryError>>,
{
    let deadline = async {
        match limit {
            Some(timeout) => match tokio::time::timeout(timeout, fut).await {
                Ok(result) => result,
                Err(_) => Err(QueryError::TimeoutError { phase, timeout }),
            },
            None => fut.await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(QueryError::CancelledError { phase }),
        result = deadline => result,
    }
}

/// Per-call session state. Owns the connection and the accumulated buffer.
struct Session<S> {
    stream: S,
    accumulated: Vec<u8>,
    phase: Phase,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn new(stream: S) -> Self {
        Self {
            stream,
            accumulated: Vec::new(),
            phase: Phase::Connecting,
        }
    }

    fn enter(&mut self, phase: Phase) {
        trace!("WHOIS session {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    async fn exchange(
        &mut self,
        line: &[u8],
        config: &WhoisConfig,
        cancel: &CancellationToken,
    ) -> Result<(), QueryError> {
        self.enter(Phase::Sending);
        bounded(Phase::Sending, config.send_timeout, cancel, self.send(line)).await?;

        self.enter(Phase::Receiving);
        bounded(
            Phase::Receiving,
            config.receive_timeout,
            cancel,
            self.receive(config.chunk_size, config.max_response_bytes),
        )
        .await
    }

    async fn send(&mut self, line: &[u8]) -> Result<(), QueryError> {
        self.stream
            .write_all(line)
            .await
            .map_err(QueryError::SendError)?;
        self.stream.flush().await.map_err(QueryError::SendError)
    }

    /// Reads until the peer closes the connection.
    ///
    /// A final chunk and the close arrive as separate events here: the data
    /// first, then a zero-length read. Data is appended before the close is
    /// looked at, so nothing delivered alongside the close is lost.
    async fn receive(&mut self, chunk_size: usize, limit: Option<usize>) -> Result<(), QueryError> {
        let mut chunk = vec![0u8; chunk_size];

        loop {
            let read = match self.stream.read(&mut chunk).await {
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(QueryError::ReceiveError(e)),
            };

            if read == 0 {
                if self.accumulated.is_empty() {
                    return Err(QueryError::EmptyResponseError);
                }
                return Ok(());
            }

            if let Some(limit) = limit {
                if self.accumulated.len() + read > limit {
                    return Err(QueryError::ResponseTooLargeError { limit });
                }
            }

            self.accumulated.extend_from_slice(&chunk[..read]);
            trace!(
                "Read {} bytes ({} accumulated)",
                read,
                self.accumulated.len()
            );
        }
    }

    /// Shuts the connection down and hands the buffer over as text.
    ///
    /// The response is complete at this point, so a shutdown that fails,
    /// stalls past its deadline or is cancelled only drops the stream early.
    async fn close(mut self, config: &WhoisConfig, cancel: &CancellationToken) -> String {
        self.enter(Phase::Closed);

        let cap = Duration::from_millis(SHUTDOWN_TIMEOUT_MS);
        let limit = config.send_timeout.map_or(cap, |send| send.min(cap));
        let stream = &mut self.stream;
        let shutdown = bounded(Phase::Closed, Some(limit), cancel, async move {
            stream.shutdown().await.map_err(QueryError::SendError)
        })
        .await;
        if let Err(e) = shutdown {
            // The peer has already closed its side; nothing left to flush
            trace!("Ignoring failed shutdown after complete response: {}", e);
        }

        decode(self.accumulated)
    }
}

/// Decodes a response as UTF-8, substituting U+FFFD for invalid sequences.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "WHOIS response is not valid UTF-8 (first bad byte at offset {}), decoding lossily",
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
