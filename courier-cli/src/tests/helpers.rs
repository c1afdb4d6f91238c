//! Fixtures and optimiser doubles shared by the CLI tests.

use std::cell::RefCell;

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::{NearestNeighbourSequencer, RouteOptimizer};
use courier_remote::test_support::StubRemoteService;
use courier_remote::{FallbackConfig, FallbackRouteOptimizer, RemoteError};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::settings::{OptimizerBuilder, OptimizerSettings};
use crate::CliError;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// A temporary directory addressed with UTF-8 paths.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// A request for three stops around the Mumbai hub, in wire shape.
pub(super) fn request_json() -> Value {
    json!({
        "deliveries": [
            { "trackingId": "TRK-N", "name": "North", "lat": 19.0860, "lng": 72.8777, "address": "" },
            { "trackingId": "TRK-E", "name": "East", "lat": 19.0760, "lng": 72.8877, "address": "" },
            { "trackingId": "TRK-S", "name": "South", "lat": 19.0660, "lng": 72.8777, "address": "" },
        ],
        "source_point": {
            "lat": 19.0760,
            "lng": 72.8777,
            "name": "Delivery Hub",
            "address": "Mumbai Central Office",
        },
    })
}

/// Records spanning two days, including ones without usable coordinates.
pub(super) fn manifest_json() -> Value {
    json!([
        {
            "trackingId": "TRK-101", "name": "Asha", "address": "Colaba",
            "latitude": 19.0860, "longitude": 72.8777,
            "deliveryDate": "2025-03-14", "product": "Documents",
        },
        {
            "trackingId": "TRK-102", "name": "Ravi", "address": "Dadar",
            "latitude": "19.0660", "longitude": "72.8777",
            "deliveryDate": "2025-03-14T10:15:00Z", "deliveryTime": "10:00 AM - 12:00 PM",
        },
        {
            "trackingId": "TRK-103", "name": "Meera", "address": "Unknown",
            "latitude": null, "longitude": 72.9,
            "deliveryDate": "2025-03-14",
        },
        {
            "trackingId": "TRK-201", "name": "Kiran", "address": "Bandra",
            "latitude": 19.0596, "longitude": 72.8295,
            "deliveryDate": "2025-03-15",
        },
    ])
}

/// Local-only optimiser that records the settings it was built with.
#[derive(Debug, Default)]
pub(super) struct RecordingBuilder {
    pub(super) seen: RefCell<Vec<OptimizerSettings>>,
}

impl OptimizerBuilder for RecordingBuilder {
    fn build(&self, settings: &OptimizerSettings) -> Result<Box<dyn RouteOptimizer>, CliError> {
        self.seen.borrow_mut().push(settings.clone());
        Ok(Box::new(NearestNeighbourSequencer::with_model(
            settings.distance_model,
        )))
    }
}

/// Fallback optimiser whose remote service always refuses the connection.
pub(super) struct UnreachableRemoteBuilder;

impl OptimizerBuilder for UnreachableRemoteBuilder {
    fn build(&self, settings: &OptimizerSettings) -> Result<Box<dyn RouteOptimizer>, CliError> {
        let remote = StubRemoteService::with_error(RemoteError::Network {
            url: settings.remote_url.clone(),
            message: "connection refused".to_owned(),
        });
        let optimizer = FallbackRouteOptimizer::with_config(
            remote,
            NearestNeighbourSequencer::with_model(settings.distance_model),
            FallbackConfig::default().with_deadline(settings.timeout),
        )
        .map_err(|source| CliError::BuildOptimizer {
            endpoint: settings.remote_url.clone(),
            source,
        })?;
        Ok(Box::new(optimizer))
    }
}
