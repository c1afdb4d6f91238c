//! Command-line interface for the Courier route sequencing engine.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use courier_core::RouteResult;
use log::LevelFilter;

mod error;
mod fs;
mod logging;
mod optimize;
mod plan;
mod settings;

pub use error::CliError;

use optimize::{OptimizeArgs, run_optimize_with};
use plan::{PlanArgs, run_plan_with};
use settings::{DefaultOptimizerBuilder, OptimizerBuilder};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_MANIFEST: &str = "manifest";
pub(crate) const ARG_DATE: &str = "date";
pub(crate) const ARG_REMOTE_URL: &str = "remote-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_DISTANCE_MODEL: &str = "distance-model";
pub(crate) const ARG_LOCAL_ONLY: &str = "local-only";
pub(crate) const ARG_DEPOT_LAT: &str = "depot-lat";
pub(crate) const ARG_DEPOT_LNG: &str = "depot-lng";
pub(crate) const ARG_DEPOT_NAME: &str = "depot-name";
pub(crate) const ARG_DEPOT_ADDRESS: &str = "depot-address";
pub(crate) const ARG_LOG_LEVEL: &str = "log-level";
pub(crate) const ENV_OPTIMIZE_REQUEST: &str = "COURIER_CMDS_OPTIMIZE_REQUEST_PATH";
pub(crate) const ENV_PLAN_MANIFEST: &str = "COURIER_CMDS_PLAN_MANIFEST_PATH";

/// Run the Courier CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure: argument parsing,
/// configuration, input loading, or optimisation.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    logging::init_logger(cli.log_level)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &DefaultOptimizerBuilder, &mut stdout)
}

fn dispatch(
    command: Command,
    builder: &dyn OptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Optimize(args) => run_optimize_with(args, builder, writer),
        Command::Plan(args) => run_plan_with(args, builder, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Sequence delivery routes with a remote optimiser and a local fallback",
    version
)]
struct Cli {
    /// Log filter such as `debug` or `warn`; overrides `RUST_LOG`.
    #[arg(long = ARG_LOG_LEVEL, value_name = "level", global = true)]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sequence a route request read from JSON.
    Optimize(OptimizeArgs),
    /// Route one day's deliveries from a manifest.
    Plan(PlanArgs),
}

/// Print `route` as pretty JSON followed by a newline.
pub(crate) fn write_route(writer: &mut dyn Write, route: &RouteResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(route).map_err(CliError::SerialiseRoute)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
