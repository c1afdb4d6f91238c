//! Facade crate for the Courier route sequencing engine.
//!
//! This crate re-exports the core domain types and manifest filtering, and
//! exposes the remote optimiser client and fallback orchestration behind the
//! `remote` feature.

#![forbid(unsafe_code)]

pub use courier_core::{
    DeliveryStop, Depot, DistanceMatrix, DistanceMetric, DistanceModel, Equirectangular,
    GreatCircle, KM_PER_DEGREE, NearestNeighbourSequencer, OptimizeError, OrderedDelivery, Point,
    PointError, RouteConsistencyError, RouteOptimizer, RouteRequest, RouteRequestValidationError,
    RouteResult, UnknownDistanceMetric,
};

pub use courier_core::manifest::{Coordinate, DeliveryManifest, DeliveryRecord, ManifestSelection};

#[cfg(feature = "remote")]
pub use courier_remote::{
    ClientBuildError, FallbackConfig, FallbackRouteOptimizer, RemoteError, RemoteOptimizerClient,
    RemoteOptimizerConfig, RemoteRouteService,
};
