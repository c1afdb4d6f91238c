//! Core domain types for the Courier route sequencing engine.
//!
//! A [`RouteRequest`] pairs a [`Depot`] with the [`DeliveryStop`]s to visit.
//! Any [`RouteOptimizer`] turns it into a [`RouteResult`]; the built-in
//! [`NearestNeighbourSequencer`] does so locally using a pluggable
//! [`DistanceModel`]. Coordinates are validated at the request boundary so
//! malformed input never reaches the distance calculations.

#![forbid(unsafe_code)]

mod distance;
pub mod manifest;
mod optimizer;
mod point;
mod request;
mod route;
mod sequencer;
mod stop;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{
    DistanceMatrix, DistanceMetric, DistanceModel, Equirectangular, GreatCircle, KM_PER_DEGREE,
    UnknownDistanceMetric,
};
pub use optimizer::{OptimizeError, RouteOptimizer};
pub use point::{Point, PointError};
pub use request::{RouteRequest, RouteRequestValidationError};
pub use route::{OrderedDelivery, RouteConsistencyError, RouteResult};
pub use sequencer::NearestNeighbourSequencer;
pub use stop::{DeliveryStop, Depot};
