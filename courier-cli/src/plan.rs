//! `plan` command: route one day's deliveries from a manifest.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use courier_core::manifest::DeliveryManifest;
use courier_core::{Depot, Point, RouteRequest, RouteResult};
use jiff::Zoned;
use jiff::civil::Date;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{load_json, require_existing};
use crate::settings::{OptimizerBuilder, OptimizerSettings, optimize_with};
use crate::{
    ARG_DATE, ARG_DEPOT_ADDRESS, ARG_DEPOT_LAT, ARG_DEPOT_LNG, ARG_DEPOT_NAME, ARG_DISTANCE_MODEL,
    ARG_LOCAL_ONLY, ARG_MANIFEST, ARG_REMOTE_URL, ARG_TIMEOUT_SECS, CliError, ENV_PLAN_MANIFEST,
    write_route,
};

pub(crate) const DEFAULT_DEPOT_LATITUDE: f64 = 19.0760;
pub(crate) const DEFAULT_DEPOT_LONGITUDE: f64 = 72.8777;
pub(crate) const DEFAULT_DEPOT_NAME: &str = "Delivery Hub";
pub(crate) const DEFAULT_DEPOT_ADDRESS: &str = "Mumbai Central Office";

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Select the deliveries scheduled for one day from a JSON \
                 manifest, drop those without usable coordinates, and \
                 sequence the rest from the configured depot.",
    about = "Route one day's deliveries from a manifest"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON array of delivery records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) manifest_path: Option<Utf8PathBuf>,
    /// Day to plan (YYYY-MM-DD). Defaults to today in the local time zone.
    #[arg(long = ARG_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) date: Option<Date>,
    /// Depot latitude in degrees.
    #[arg(long = ARG_DEPOT_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) depot_lat: Option<f64>,
    /// Depot longitude in degrees.
    #[arg(long = ARG_DEPOT_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) depot_lng: Option<f64>,
    /// Depot display name.
    #[arg(long = ARG_DEPOT_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) depot_name: Option<String>,
    /// Depot postal address.
    #[arg(long = ARG_DEPOT_ADDRESS, value_name = "address")]
    #[serde(default)]
    pub(crate) depot_address: Option<String>,
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

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the manifest file.
    pub(crate) manifest_path: Utf8PathBuf,
    /// Day whose deliveries are routed.
    pub(crate) date: Date,
    /// Where the route starts and ends.
    pub(crate) depot: Depot,
    /// How to reach and fall back from the remote optimiser.
    pub(crate) settings: OptimizerSettings,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.manifest_path, ARG_MANIFEST)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let manifest_path = args.manifest_path.ok_or(CliError::MissingArgument {
            field: ARG_MANIFEST,
            env: ENV_PLAN_MANIFEST,
        })?;
        let date = args.date.unwrap_or_else(|| Zoned::now().date());
        let location = Point::new(
            args.depot_lat.unwrap_or(DEFAULT_DEPOT_LATITUDE),
            args.depot_lng.unwrap_or(DEFAULT_DEPOT_LONGITUDE),
        )
        .map_err(CliError::InvalidDepot)?;
        let depot = Depot::new(location)
            .with_name(args.depot_name.unwrap_or_else(|| DEFAULT_DEPOT_NAME.to_owned()))
            .with_address(
                args.depot_address
                    .unwrap_or_else(|| DEFAULT_DEPOT_ADDRESS.to_owned()),
            );
        let settings = OptimizerSettings::resolve(
            args.remote_url,
            args.timeout_secs,
            args.distance_model.as_deref(),
            args.local_only,
        )?;
        Ok(Self {
            manifest_path,
            date,
            depot,
            settings,
        })
    }
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn OptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_plan(args, builder)?;
    write_route(writer, &route)
}

fn execute_plan(args: PlanArgs, builder: &dyn OptimizerBuilder) -> Result<RouteResult, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let manifest: DeliveryManifest = load_json(&config.manifest_path, ARG_MANIFEST)?;

    let selection = manifest.stops_for(config.date);
    info!(
        "{} deliveries routable on {}",
        selection.stops.len(),
        config.date
    );
    if selection.skipped > 0 {
        warn!(
            "skipped {} deliveries on {} without usable coordinates",
            selection.skipped, config.date
        );
    }

    let request = RouteRequest::new(config.depot.clone(), selection.stops);
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.manifest_path.clone(),
            source,
        })?;
    optimize_with(builder, &config.settings, &request)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
