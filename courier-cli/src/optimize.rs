//! `optimize` command: sequence a route request read from JSON.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use courier_core::{RouteRequest, RouteResult};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{load_json, require_existing};
use crate::settings::{OptimizerBuilder, OptimizerSettings, optimize_with};
use crate::{
    ARG_DISTANCE_MODEL, ARG_LOCAL_ONLY, ARG_REMOTE_URL, ARG_REQUEST, ARG_TIMEOUT_SECS, CliError,
    ENV_OPTIMIZE_REQUEST, write_route,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Sequence a route request in the remote optimiser's wire \
                 shape ({\"deliveries\": [...], \"source_point\": {...}}). \
                 The remote optimiser is tried first; if it fails, times out, \
                 or returns an inconsistent route, the local nearest-neighbour \
                 sequencer is used instead.",
    about = "Sequence a route request read from JSON"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing the route request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Endpoint of the remote optimiser.
    #[arg(long = ARG_REMOTE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) remote_url: Option<String>,
    /// Seconds to wait for the remote optimiser before falling back.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Distance model for local sequencing (`equirectangular` or `haversine`).
    #[arg(long = ARG_DISTANCE_MODEL, value_name = "model")]
    #[serde(default)]
    pub(crate) distance_model: Option<String>,
    /// Sequence locally without contacting the remote optimiser.
    #[arg(long = ARG_LOCAL_ONLY)]
    #[serde(default)]
    pub(crate) local_only: bool,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// How to reach and fall back from the remote optimiser.
    pub(crate) settings: OptimizerSettings,
}

impl OptimizeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_OPTIMIZE_REQUEST,
        })?;
        let settings = OptimizerSettings::resolve(
            args.remote_url,
            args.timeout_secs,
            args.distance_model.as_deref(),
            args.local_only,
        )?;
        Ok(Self {
            request_path,
            settings,
        })
    }
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_optimize(args, builder)?;
    write_route(writer, &route)
}

fn execute_optimize(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
) -> Result<RouteResult, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request: RouteRequest = load_json(&config.request_path, ARG_REQUEST)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    optimize_with(builder, &config.settings, &request)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
