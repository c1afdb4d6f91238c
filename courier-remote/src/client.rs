//! HTTP client for the remote route optimiser.
//!
//! The client POSTs a [`RouteRequest`] as JSON and decodes a [`RouteResult`]
//! from the reply. Every failure is mapped onto a [`RemoteError`] so the
//! fallback orchestrator can decide what to log.

use std::time::Duration;

use async_trait::async_trait;
use courier_core::{RouteRequest, RouteResult};
use log::debug;
use reqwest::Client;
use url::Url;

use crate::error::{ClientBuildError, RemoteError};
use crate::wire::RouteReply;

/// Default endpoint of the remote optimiser.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/route";

/// Default user agent for optimiser requests.
pub const DEFAULT_USER_AGENT: &str = "courier-remote/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A service that can sequence a route remotely.
///
/// Implemented by [`RemoteOptimizerClient`] for real HTTP calls and by
/// `test_support::StubRemoteService` for tests.
#[async_trait]
pub trait RemoteRouteService: Send + Sync {
    /// Ask the service to sequence `request`.
    async fn request_route(&self, request: &RouteRequest) -> Result<RouteResult, RemoteError>;

    /// Where requests are sent, for log and error messages.
    fn endpoint(&self) -> &str;
}

/// Configuration for [`RemoteOptimizerClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOptimizerConfig {
    /// Full URL of the route endpoint.
    pub endpoint: String,
    /// Hard limit for a single request, connection included.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for RemoteOptimizerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl RemoteOptimizerConfig {
    /// Create a configuration for the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP client for the remote optimiser.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use courier_remote::{RemoteOptimizerClient, RemoteOptimizerConfig};
///
/// let config = RemoteOptimizerConfig::new("http://routing.internal/api/route")
///     .with_timeout(Duration::from_secs(5));
/// let client = RemoteOptimizerClient::with_config(config)?;
/// # Ok::<(), courier_remote::ClientBuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RemoteOptimizerClient {
    client: Client,
    endpoint: Url,
    config: RemoteOptimizerConfig,
}

impl RemoteOptimizerClient {
    /// Create a client for `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an HTTP(S) URL or the HTTP
    /// client fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(RemoteOptimizerConfig::new(endpoint))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an HTTP(S) URL or the HTTP
    /// client fails to build.
    pub fn with_config(config: RemoteOptimizerConfig) -> Result<Self, ClientBuildError> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &RemoteOptimizerConfig {
        &self.config
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> RemoteError {
        let url = self.endpoint.to_string();
        if error.is_timeout() {
            return RemoteError::Timeout {
                url,
                timeout: self.config.timeout,
            };
        }
        if let Some(status) = error.status() {
            return RemoteError::HttpStatus {
                url,
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        if error.is_decode() {
            return RemoteError::Decode {
                url,
                message: error.to_string(),
            };
        }
        RemoteError::Network {
            url,
            message: error.to_string(),
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ClientBuildError> {
    let invalid = |reason: String| ClientBuildError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason,
    };
    let url = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

#[async_trait]
impl RemoteRouteService for RemoteOptimizerClient {
    async fn request_route(&self, request: &RouteRequest) -> Result<RouteResult, RemoteError> {
        debug!(
            "posting {} deliveries to {}",
            request.stops.len(),
            self.endpoint
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let reply: RouteReply = response
            .json()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        reply.into_result().map_err(|err| RemoteError::Decode {
            url: self.endpoint.to_string(),
            message: err.to_string(),
        })
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}
