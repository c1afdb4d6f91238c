//! Remote-first route optimisation with a local fallback.
//!
//! [`FallbackRouteOptimizer`] validates the request, asks the remote service
//! for a route under a hard deadline, and checks that the reply orders exactly
//! the requested stops. Any remote failure is logged and replaced by the local
//! optimiser's result. Only validation errors, cancellation, and failures of
//! the local optimiser itself reach the caller.

use std::time::Duration;

use courier_core::{
    NearestNeighbourSequencer, OptimizeError, RouteOptimizer, RouteRequest, RouteResult,
};
use log::{info, warn};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio_util::sync::CancellationToken;

use crate::client::{
    DEFAULT_TIMEOUT_SECS, RemoteOptimizerClient, RemoteOptimizerConfig, RemoteRouteService,
};
use crate::error::{ClientBuildError, RemoteError};

/// Settings for [`FallbackRouteOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackConfig {
    /// Upper bound on the whole remote attempt. When it elapses the in-flight
    /// request is dropped and the local optimiser runs.
    pub deadline: Duration,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FallbackConfig {
    /// Set the remote deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Route optimiser that prefers a remote service and falls back to a local
/// one.
///
/// # Runtime behaviour
///
/// The synchronous [`RouteOptimizer`] implementation blocks on the async path.
/// Outside any Tokio runtime it uses a `current_thread` runtime owned by the
/// optimiser. Inside a multi-threaded runtime it uses that runtime's handle
/// with [`tokio::task::block_in_place`]. Calling it from within a
/// `current_thread` runtime is not supported; use
/// [`optimize_async`](Self::optimize_async) there instead.
///
/// The owned runtime is shut down in the background on drop, so the
/// optimiser may be dropped from async code.
pub struct FallbackRouteOptimizer<R, L = NearestNeighbourSequencer> {
    remote: R,
    local: L,
    config: FallbackConfig,
    runtime: Option<Runtime>,
}

impl<R, L> std::fmt::Debug for FallbackRouteOptimizer<R, L>
where
    R: RemoteRouteService,
    L: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRouteOptimizer")
            .field("remote", &self.remote.endpoint())
            .field("local", &self.local)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl FallbackRouteOptimizer<RemoteOptimizerClient> {
    /// Build an HTTP client from `config` and fall back to the default
    /// nearest-neighbour sequencer. The deadline matches the client timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client or the runtime fails to build.
    pub fn from_remote_config(config: RemoteOptimizerConfig) -> Result<Self, ClientBuildError> {
        let deadline = config.timeout;
        let remote = RemoteOptimizerClient::with_config(config)?;
        Self::with_config(
            remote,
            NearestNeighbourSequencer::new(),
            FallbackConfig::default().with_deadline(deadline),
        )
    }
}

impl<R, L> FallbackRouteOptimizer<R, L>
where
    R: RemoteRouteService,
    L: RouteOptimizer,
{
    /// Combine `remote` and `local` with the default deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tokio runtime fails to build.
    pub fn new(remote: R, local: L) -> Result<Self, ClientBuildError> {
        Self::with_config(remote, local, FallbackConfig::default())
    }

    /// Combine `remote` and `local` with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tokio runtime fails to build.
    pub fn with_config(
        remote: R,
        local: L,
        config: FallbackConfig,
    ) -> Result<Self, ClientBuildError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            remote,
            local,
            config,
            runtime: Some(runtime),
        })
    }

    /// The remote service.
    pub const fn remote(&self) -> &R {
        &self.remote
    }

    /// The active settings.
    pub const fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Sequence `request`, preferring the remote service.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::InvalidRequest`] before any network traffic if
    /// the request has malformed coordinates, or whatever the local optimiser
    /// returns if the fallback itself fails.
    pub async fn optimize_async(
        &self,
        request: &RouteRequest,
    ) -> Result<RouteResult, OptimizeError> {
        request.validate()?;
        self.remote_then_local(request).await
    }

    /// Like [`optimize_async`](Self::optimize_async), but stops as soon as
    /// `token` is cancelled, dropping any in-flight remote request.
    ///
    /// The local fallback is synchronous and runs to completion once started.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::Cancelled`] if `token` fires first, otherwise
    /// as [`optimize_async`](Self::optimize_async).
    pub async fn optimize_cancellable(
        &self,
        request: &RouteRequest,
        token: &CancellationToken,
    ) -> Result<RouteResult, OptimizeError> {
        request.validate()?;
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!("route optimisation cancelled by caller");
                Err(OptimizeError::Cancelled)
            }
            outcome = self.remote_then_local(request) => outcome,
        }
    }

    async fn remote_then_local(
        &self,
        request: &RouteRequest,
    ) -> Result<RouteResult, OptimizeError> {
        match self.try_remote(request).await {
            Ok(result) => {
                info!(
                    "remote optimiser at {} ordered {} deliveries",
                    self.remote.endpoint(),
                    result.ordered_deliveries.len()
                );
                return Ok(result);
            }
            Err(err) if err.is_timeout() => {
                warn!("remote optimiser timed out, using local route: {err}");
            }
            Err(err) => {
                warn!("remote optimiser failed, using local route: {err}");
            }
        }
        self.local.optimize(request)
    }

    async fn try_remote(&self, request: &RouteRequest) -> Result<RouteResult, RemoteError> {
        let result = tokio::time::timeout(self.config.deadline, self.remote.request_route(request))
            .await
            .map_err(|_elapsed| RemoteError::Timeout {
                url: self.remote.endpoint().to_owned(),
                timeout: self.config.deadline,
            })??;
        result.check_against(&request.stops)?;
        Ok(result)
    }
}

impl<R, L> RouteOptimizer for FallbackRouteOptimizer<R, L>
where
    R: RemoteRouteService,
    L: RouteOptimizer,
{
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, OptimizeError> {
        match (Handle::try_current(), self.runtime.as_ref()) {
            (Ok(handle), _) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.optimize_async(request)))
            }
            (_, Some(runtime)) => runtime.block_on(self.optimize_async(request)),
            (_, None) => {
                request.validate()?;
                warn!("no runtime available for the remote optimiser, using local route");
                self.local.optimize(request)
            }
        }
    }
}

impl<R, L> Drop for FallbackRouteOptimizer<R, L> {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
