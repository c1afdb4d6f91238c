//! Focused unit tests covering plan CLI configuration and manifest routing.

use super::helpers::{RecordingBuilder, manifest_json, utf8_tempdir, write_utf8};
use crate::plan::{
    DEFAULT_DEPOT_ADDRESS, DEFAULT_DEPOT_LATITUDE, DEFAULT_DEPOT_LONGITUDE, DEFAULT_DEPOT_NAME,
    PlanArgs, PlanConfig, config_from_layers_for_test,
};
use crate::*;
use courier_core::{PointError, RouteResult};
use jiff::civil::date;
use rstest::rstest;

fn args_for(manifest: &str) -> PlanArgs {
    PlanArgs {
        manifest_path: Some(manifest.into()),
        date: Some(date(2025, 3, 14)),
        ..PlanArgs::default()
    }
}

#[rstest]
fn converting_plan_without_manifest_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing manifest");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_MANIFEST);
            assert_eq!(env, ENV_PLAN_MANIFEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_defaults_to_mumbai_hub() {
    let config = PlanConfig::try_from(args_for("manifest.json")).expect("config should build");

    assert_eq!(config.date, date(2025, 3, 14));
    assert_eq!(config.depot.location.latitude(), DEFAULT_DEPOT_LATITUDE);
    assert_eq!(config.depot.location.longitude(), DEFAULT_DEPOT_LONGITUDE);
    assert_eq!(config.depot.name.as_deref(), Some(DEFAULT_DEPOT_NAME));
    assert_eq!(config.depot.address.as_deref(), Some(DEFAULT_DEPOT_ADDRESS));
}

#[rstest]
fn plan_config_without_date_uses_today() {
    let args = PlanArgs {
        date: None,
        ..args_for("manifest.json")
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.date, jiff::Zoned::now().date());
}

#[rstest]
#[case(Some(95.0), None)]
#[case(None, Some(-181.0))]
fn plan_config_rejects_invalid_depot(#[case] lat: Option<f64>, #[case] lng: Option<f64>) {
    let args = PlanArgs {
        depot_lat: lat,
        depot_lng: lng,
        ..args_for("manifest.json")
    };

    match PlanConfig::try_from(args).expect_err("invalid depot") {
        CliError::InvalidDepot(
            PointError::LatitudeOutOfRange(_) | PointError::LongitudeOutOfRange(_),
        ) => {}
        other => panic!("expected InvalidDepot, found {other:?}"),
    }
}

#[rstest]
fn run_plan_routes_days_usable_deliveries() {
    let (_tmp, root) = utf8_tempdir();
    let manifest_path = root.join("manifest.json");
    write_utf8(&manifest_path, manifest_json().to_string().as_bytes());
    let builder = RecordingBuilder::default();
    let mut stdout = Vec::new();

    plan::run_plan_with(args_for(manifest_path.as_str()), &builder, &mut stdout)
        .expect("command succeeds");

    let route: RouteResult = serde_json::from_slice(&stdout).expect("stdout is a route");
    let mut ids: Vec<_> = route.tracking_ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, ["TRK-101", "TRK-102"]);
    assert_eq!(route.total_points, 4);
    let carried = route
        .ordered_deliveries
        .iter()
        .find(|delivery| delivery.stop.tracking_id == "TRK-102")
        .expect("TRK-102 is routed");
    assert_eq!(
        carried.stop.delivery_time.as_deref(),
        Some("10:00 AM - 12:00 PM")
    );
}

#[rstest]
fn run_plan_on_empty_day_prints_trivial_route() {
    let (_tmp, root) = utf8_tempdir();
    let manifest_path = root.join("manifest.json");
    write_utf8(&manifest_path, manifest_json().to_string().as_bytes());
    let args = PlanArgs {
        date: Some(date(2024, 1, 1)),
        ..args_for(manifest_path.as_str())
    };
    let mut stdout = Vec::new();

    plan::run_plan_with(args, &RecordingBuilder::default(), &mut stdout)
        .expect("command succeeds");

    let route: RouteResult = serde_json::from_slice(&stdout).expect("stdout is a route");
    assert_eq!(route.route, vec![0, 0]);
    assert_eq!(route.total_distance, 0.0);
}

#[rstest]
fn run_plan_rejects_out_of_range_records() {
    let (_tmp, root) = utf8_tempdir();
    let manifest_path = root.join("manifest.json");
    let manifest = serde_json::json!([{
        "trackingId": "TRK-BAD", "latitude": 123.0, "longitude": 72.8,
        "deliveryDate": "2025-03-14",
    }]);
    write_utf8(&manifest_path, manifest.to_string().as_bytes());

    let err = plan::run_plan_with(
        args_for(manifest_path.as_str()),
        &RecordingBuilder::default(),
        &mut Vec::new(),
    )
    .expect_err("out-of-range record should fail");

    match err {
        CliError::InvalidRequest { path, .. } => assert_eq!(path, manifest_path),
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_reads_depot_and_date_from_environment() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "manifest_path": "from-file.json", "depot_name": "Pune Hub" }),
        None,
    );
    composer.push_environment(json!({
        "date": "2025-03-15",
        "depot_lat": 18.5204,
        "depot_lng": 73.8567,
    }));
    composer.push_cli(json!({ "local_only": true }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.manifest_path, "from-file.json");
    assert_eq!(config.date, date(2025, 3, 15));
    assert_eq!(config.depot.location.latitude(), 18.5204);
    assert_eq!(config.depot.name.as_deref(), Some("Pune Hub"));
    assert_eq!(config.depot.address.as_deref(), Some(DEFAULT_DEPOT_ADDRESS));
    assert!(config.settings.local_only);
}
