//! Remote route optimisation with a local fallback.
//!
//! [`RemoteOptimizerClient`] delegates sequencing to an external HTTP service.
//! [`FallbackRouteOptimizer`] wraps any [`RemoteRouteService`] and a local
//! [`RouteOptimizer`](courier_core::RouteOptimizer), returning the remote
//! answer when it is available and consistent and the local one otherwise.
//!
//! # Architecture
//!
//! `RouteOptimizer` is synchronous so the core stays embeddable in
//! synchronous callers. The fallback optimiser bridges to the async HTTP path
//! by blocking on a Tokio runtime it owns, and also exposes the async path
//! directly for callers that already run inside Tokio.
//!
//! # Example
//!
//! ```no_run
//! use courier_core::{DeliveryStop, Depot, Point, RouteOptimizer, RouteRequest};
//! use courier_remote::{FallbackRouteOptimizer, RemoteOptimizerConfig};
//!
//! let optimizer = FallbackRouteOptimizer::from_remote_config(RemoteOptimizerConfig::default())?;
//! let request = RouteRequest::new(
//!     Depot::new(Point::new(19.0760, 72.8777)?),
//!     vec![DeliveryStop::new("TRK-1", "Asha", Point::new(19.08, 72.88)?, "Colaba")],
//! );
//! let route = optimizer.optimize(&request)?;
//! println!("{} km", route.total_distance);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod client;
mod error;
mod fallback;
mod wire;

#[doc(hidden)]
pub mod test_support;

pub use client::{
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, RemoteOptimizerClient,
    RemoteOptimizerConfig, RemoteRouteService,
};
pub use error::{ClientBuildError, RemoteError};
pub use fallback::{FallbackConfig, FallbackRouteOptimizer};
