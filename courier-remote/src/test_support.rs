//! Test utilities for remote route services.
//!
//! [`StubRemoteService`] is a deterministic stand-in for
//! [`RemoteOptimizerClient`](crate::RemoteOptimizerClient) that answers from
//! a pre-configured response without any network traffic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use courier_core::{OrderedDelivery, RouteRequest, RouteResult};

use crate::{RemoteError, RemoteRouteService};

/// Endpoint reported by stubs.
pub const STUB_ENDPOINT: &str = "stub://remote-optimizer";

/// Stub `RemoteRouteService` for tests.
///
/// # Example
///
/// ```
/// use courier_remote::test_support::StubRemoteService;
/// use courier_remote::RemoteError;
///
/// let stub = StubRemoteService::with_error(RemoteError::Network {
///     url: "http://localhost:5000/api/route".into(),
///     message: "connection refused".into(),
/// });
/// assert_eq!(stub.calls(), 0);
/// ```
#[derive(Debug)]
pub struct StubRemoteService {
    response: StubResponse,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Result(Box<RouteResult>),
    Error(RemoteError),
    EchoInput,
}

impl StubRemoteService {
    fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A stub that always returns `result`, whatever was asked.
    #[must_use]
    pub fn with_result(result: RouteResult) -> Self {
        Self::from_response(StubResponse::Result(Box::new(result)))
    }

    /// A stub that always fails with `error`.
    #[must_use]
    pub fn with_error(error: RemoteError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    /// A stub that returns the stops in the order they were supplied.
    #[must_use]
    pub fn echoing_input() -> Self {
        Self::from_response(StubResponse::EchoInput)
    }

    /// Sleep for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A consistent result visiting `request`'s stops in input order.
///
/// The distance is a placeholder of one kilometre per leg.
#[must_use]
pub fn input_order_result(request: &RouteRequest) -> RouteResult {
    let count = request.stops.len();
    let legs = u32::try_from(count.saturating_add(1)).unwrap_or(u32::MAX);
    RouteResult {
        total_distance: f64::from(legs),
        total_points: count.saturating_add(2),
        route: std::iter::once(0)
            .chain(1..=count)
            .chain(std::iter::once(0))
            .collect(),
        ordered_deliveries: request
            .stops
            .iter()
            .cloned()
            .zip(1..)
            .map(|(stop, route_order)| OrderedDelivery { stop, route_order })
            .collect(),
    }
}

#[async_trait]
impl RemoteRouteService for StubRemoteService {
    async fn request_route(&self, request: &RouteRequest) -> Result<RouteResult, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.response {
            StubResponse::Result(result) => Ok((**result).clone()),
            StubResponse::Error(error) => Err(error.clone()),
            StubResponse::EchoInput => Ok(input_order_result(request)),
        }
    }

    fn endpoint(&self) -> &str {
        STUB_ENDPOINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::test_support::{mumbai_depot, mumbai_stops};
    use rstest::rstest;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    #[rstest]
    fn echo_result_is_consistent() {
        let request = RouteRequest::new(mumbai_depot(), mumbai_stops());
        let result = input_order_result(&request);

        assert_eq!(result.route, vec![0, 1, 2, 3, 0]);
        assert_eq!(result.total_points, 5);
        assert_eq!(result.check_against(&request.stops), Ok(()));
    }

    #[rstest]
    fn counts_calls_and_returns_configured_error() {
        let stub = StubRemoteService::with_error(RemoteError::Network {
            url: STUB_ENDPOINT.to_owned(),
            message: "refused".to_owned(),
        });
        let request = RouteRequest::new(mumbai_depot(), Vec::new());

        let first = block_on(stub.request_route(&request));
        let second = block_on(stub.request_route(&request));

        assert!(matches!(first, Err(RemoteError::Network { .. })));
        assert!(second.is_err());
        assert_eq!(stub.calls(), 2);
    }
}
