//! WHOIS client.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use super::connect::{Connect, TcpConnector};
use super::request::QueryRequest;
use super::session;
use crate::config::WhoisConfig;
use crate::error_handling::{InitializationError, QueryError};

/// Runs WHOIS query sessions.
///
/// The client holds no per-query state: every call opens its own connection
/// and owns its own buffer, so one client (or clones of it) can run any
/// number of queries concurrently.
///
/// # Examples
///
/// ```no_run
/// use whois_query::WhoisClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WhoisClient::new();
/// let raw = client.query("example.com", "whois.iana.org").await?;
/// println!("{raw}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WhoisClient<C = TcpConnector> {
    config: WhoisConfig,
    connector: Arc<C>,
    runtime: Option<Handle>,
}

impl<C> Clone for WhoisClient<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            connector: Arc::clone(&self.connector),
            runtime: self.runtime.clone(),
        }
    }
}

impl WhoisClient<TcpConnector> {
    /// Creates a TCP client with the default configuration.
    pub fn new() -> Self {
        Self {
            config: WhoisConfig::default(),
            connector: Arc::new(TcpConnector),
            runtime: None,
        }
    }

    /// Creates a TCP client with `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfigError` if `config` fails
    /// [`WhoisConfig::validate`].
    pub fn with_config(config: WhoisConfig) -> Result<Self, InitializationError> {
        Self::with_connector(config, TcpConnector)
    }
}

impl Default for WhoisClient<TcpConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connect> WhoisClient<C> {
    /// Creates a client that obtains its connections from `connector`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfigError` if `config` fails
    /// [`WhoisConfig::validate`].
    pub fn with_connector(config: WhoisConfig, connector: C) -> Result<Self, InitializationError> {
        config.validate()?;
        Ok(Self {
            config,
            connector: Arc::new(connector),
            runtime: None,
        })
    }

    /// Runs every session as a task on `handle` instead of inline on the
    /// caller's task.
    ///
    /// Dropping the future returned by a query still tears the session down
    /// and closes its connection.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// The configuration sessions run with.
    pub fn config(&self) -> &WhoisConfig {
        &self.config
    }
}

impl<C> WhoisClient<C>
where
    C: Connect + Send + Sync + 'static,
{
    /// Queries `server` for `domain` and returns the raw response text.
    ///
    /// # Errors
    ///
    /// Returns the `QueryError` that ended the session; see its variants.
    pub async fn query(&self, domain: &str, server: &str) -> Result<String, QueryError> {
        self.query_request(&QueryRequest::new(domain, server)).await
    }

    /// Runs `request` and returns the raw response text.
    ///
    /// # Errors
    ///
    /// Returns the `QueryError` that ended the session.
    pub async fn query_request(&self, request: &QueryRequest) -> Result<String, QueryError> {
        self.query_with_cancel(request, &CancellationToken::new()).await
    }

    /// Runs `request`, giving up with `QueryError::CancelledError` as soon as
    /// `cancel` is triggered.
    ///
    /// # Errors
    ///
    /// Returns the `QueryError` that ended the session. When the client runs
    /// sessions on an injected runtime that shuts down mid-session, returns
    /// `QueryError::AbortedError`.
    pub async fn query_with_cancel(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<String, QueryError> {
        let Some(handle) = &self.runtime else {
            return session::run(&*self.connector, &self.config, request, cancel).await;
        };

        let connector = Arc::clone(&self.connector);
        let config = self.config.clone();
        let request = request.clone();
        let token = cancel.child_token();
        // Cancels the spawned session if this future is dropped before it finishes
        let _guard = token.clone().drop_guard();

        let task = handle.spawn(async move {
            session::run(&*connector, &config, &request, &token).await
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(QueryError::AbortedError),
        }
    }
}
