//! Errors raised while talking to the remote optimiser.

use std::time::Duration;

use courier_core::RouteConsistencyError;
use thiserror::Error;

/// Why a remote optimisation attempt was abandoned.
///
/// None of these reach the caller of
/// [`FallbackRouteOptimizer`](crate::FallbackRouteOptimizer); each one
/// triggers the local fallback and is logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Endpoint that was called.
        url: String,
        /// Timeout that elapsed.
        timeout: Duration,
    },
    /// The service answered with a non-success status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    HttpStatus {
        /// Endpoint that was called.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Client-side description of the failure.
        message: String,
    },
    /// The request never completed: DNS, connect, or transport failure.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Endpoint that was called.
        url: String,
        /// Underlying error text.
        message: String,
    },
    /// The body was not a route result.
    #[error("could not decode response from {url}: {message}")]
    Decode {
        /// Endpoint that was called.
        url: String,
        /// Underlying error text.
        message: String,
    },
    /// The service returned a route that does not order the requested stops.
    #[error("remote route is inconsistent with the request: {0}")]
    InconsistentRoute(#[from] RouteConsistencyError),
}

impl RemoteError {
    /// Whether this failure was a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Errors raised while constructing a client or optimiser.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The endpoint is not an absolute HTTP(S) URL.
    #[error("invalid remote optimiser endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The Tokio runtime could not be built.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
