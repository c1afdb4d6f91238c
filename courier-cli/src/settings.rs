//! Optimiser options shared by every routing subcommand.

use std::time::Duration;

use courier_core::{
    DistanceMetric, NearestNeighbourSequencer, RouteOptimizer, RouteRequest, RouteResult,
};
use courier_remote::{
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, FallbackConfig, FallbackRouteOptimizer,
    RemoteOptimizerClient, RemoteOptimizerConfig,
};
use log::info;

use crate::CliError;

/// Resolved optimiser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizerSettings {
    /// Endpoint of the remote optimiser.
    pub(crate) remote_url: String,
    /// Upper bound on the remote attempt.
    pub(crate) timeout: Duration,
    /// Distance model for the local sequencer.
    pub(crate) distance_model: DistanceMetric,
    /// Skip the remote optimiser entirely.
    pub(crate) local_only: bool,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            distance_model: DistanceMetric::default(),
            local_only: false,
        }
    }
}

impl OptimizerSettings {
    /// Apply defaults to the merged option values.
    pub(crate) fn resolve(
        remote_url: Option<String>,
        timeout_secs: Option<u64>,
        distance_model: Option<&str>,
        local_only: bool,
    ) -> Result<Self, CliError> {
        let defaults = Self::default();
        let distance_model = match distance_model {
            Some(name) => name.parse::<DistanceMetric>()?,
            None => defaults.distance_model,
        };
        Ok(Self {
            remote_url: remote_url.unwrap_or(defaults.remote_url),
            timeout: timeout_secs.map_or(defaults.timeout, Duration::from_secs),
            distance_model,
            local_only,
        })
    }
}

/// Builds the optimiser for the current invocation.
pub(crate) trait OptimizerBuilder {
    fn build(&self, settings: &OptimizerSettings) -> Result<Box<dyn RouteOptimizer>, CliError>;
}

/// Remote-first optimiser with a local fallback, or local only on request.
pub(crate) struct DefaultOptimizerBuilder;

impl OptimizerBuilder for DefaultOptimizerBuilder {
    fn build(&self, settings: &OptimizerSettings) -> Result<Box<dyn RouteOptimizer>, CliError> {
        let local = NearestNeighbourSequencer::with_model(settings.distance_model);
        if settings.local_only {
            info!(
                "remote optimiser disabled, sequencing locally with the {} model",
                settings.distance_model
            );
            return Ok(Box::new(local));
        }

        let build_error = |source| CliError::BuildOptimizer {
            endpoint: settings.remote_url.clone(),
            source,
        };
        let config =
            RemoteOptimizerConfig::new(settings.remote_url.clone()).with_timeout(settings.timeout);
        let remote = RemoteOptimizerClient::with_config(config).map_err(build_error)?;
        let optimizer = FallbackRouteOptimizer::with_config(
            remote,
            local,
            FallbackConfig::default().with_deadline(settings.timeout),
        )
        .map_err(build_error)?;
        Ok(Box::new(optimizer))
    }
}

/// Build the optimiser and sequence `request`.
pub(crate) fn optimize_with(
    builder: &dyn OptimizerBuilder,
    settings: &OptimizerSettings,
    request: &RouteRequest,
) -> Result<RouteResult, CliError> {
    let optimizer = builder.build(settings)?;
    optimizer
        .optimize(request)
        .map_err(|source| CliError::Optimize { source })
}
