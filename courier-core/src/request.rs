//! Routing requests and boundary validation.

use thiserror::Error;

use crate::{DeliveryStop, Depot, PointError};

/// Stops to sequence from a depot.
///
/// Field names follow the remote optimiser's wire contract:
/// `{ "deliveries": [..], "source_point": {..} }`.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryStop, Depot, Point, RouteRequest};
///
/// let request = RouteRequest::new(
///     Depot::new(Point::new(19.0760, 72.8777)?),
///     vec![DeliveryStop::new("A", "Asha", Point::new(19.08, 72.88)?, "")],
/// );
/// assert!(request.validate().is_ok());
/// # Ok::<(), courier_core::PointError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Stops to visit, in any order.
    #[cfg_attr(feature = "serde", serde(rename = "deliveries", default))]
    pub stops: Vec<DeliveryStop>,
    /// Start and end of the route.
    #[cfg_attr(feature = "serde", serde(rename = "source_point"))]
    pub depot: Depot,
}

/// Errors returned by [`RouteRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteRequestValidationError {
    /// The depot coordinates are unusable.
    #[error("invalid depot: {0}")]
    InvalidDepot(#[source] PointError),
    /// A stop's coordinates are unusable.
    #[error("invalid delivery {tracking_id:?}: {source}")]
    InvalidStop {
        /// Tracking ID of the offending stop.
        tracking_id: String,
        /// What was wrong with its coordinates.
        #[source]
        source: PointError,
    },
}

impl RouteRequest {
    /// Bundle a depot and its stops.
    #[must_use]
    pub const fn new(depot: Depot, stops: Vec<DeliveryStop>) -> Self {
        Self { stops, depot }
    }

    /// Reject requests whose depot or any stop has malformed coordinates.
    ///
    /// An empty stop list is valid.
    ///
    /// # Errors
    ///
    /// Returns the depot error first, otherwise the first invalid stop in
    /// input order.
    pub fn validate(&self) -> Result<(), RouteRequestValidationError> {
        self.depot
            .location
            .validate()
            .map_err(RouteRequestValidationError::InvalidDepot)?;
        for stop in &self.stops {
            stop.location
                .validate()
                .map_err(|source| RouteRequestValidationError::InvalidStop {
                    tracking_id: stop.tracking_id.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}
