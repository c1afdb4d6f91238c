//! Sequenced routes and their consistency checks.

use std::collections::HashMap;

use thiserror::Error;

use crate::DeliveryStop;

/// A stop annotated with its 1-based position in the visiting order.
///
/// Serialises as the stop's own fields plus `route_order`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedDelivery {
    /// The stop as supplied by the caller.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub stop: DeliveryStop,
    /// Position in the visiting order, starting at 1.
    pub route_order: usize,
}

/// The outcome of sequencing a set of stops from a depot.
///
/// `route` holds raw indices into `[depot, stop_1, .., stop_N]`, opening and
/// closing with the depot index `0`. `total_points` is the length of that
/// closed loop, `N + 2`.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryStop, Depot, NearestNeighbourSequencer, Point};
///
/// let depot = Depot::new(Point::new(19.0760, 72.8777)?);
/// let stops = vec![DeliveryStop::new("A", "", Point::new(19.0860, 72.8777)?, "")];
/// let result = NearestNeighbourSequencer::new().sequence(&depot, &stops);
///
/// assert_eq!(result.route, vec![0, 1, 0]);
/// assert_eq!(result.total_points, 3);
/// assert!(result.check_against(&stops).is_ok());
/// # Ok::<(), courier_core::PointError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Sum of every leg including the return to the depot, in kilometres,
    /// rounded to two decimal places.
    pub total_distance: f64,
    /// Length of the closed route, depot visits included.
    pub total_points: usize,
    /// Visiting order as indices, depot = 0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub route: Vec<usize>,
    /// Stops in visiting order.
    pub ordered_deliveries: Vec<OrderedDelivery>,
}

/// Ways a [`RouteResult`] can disagree with the stops it claims to order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteConsistencyError {
    /// The result orders a different number of stops than were supplied.
    #[error("route orders {actual} deliveries but {expected} were supplied")]
    LengthMismatch {
        /// Number of supplied stops.
        expected: usize,
        /// Number of ordered deliveries in the result.
        actual: usize,
    },
    /// A tracking ID is missing, duplicated or unknown.
    #[error("tracking id {tracking_id:?} appears {actual}x in the route, {expected}x in the input")]
    StopMismatch {
        /// Offending tracking ID.
        tracking_id: String,
        /// Occurrences in the input.
        expected: usize,
        /// Occurrences in the result.
        actual: usize,
    },
    /// `route_order` values are not exactly `1..=N`.
    #[error("route_order values are not a permutation of 1..={len}")]
    RouteOrder {
        /// Number of ordered deliveries.
        len: usize,
    },
    /// The total distance is negative or not finite.
    #[error("total distance {0} is not a finite non-negative number")]
    InvalidDistance(f64),
}

impl RouteResult {
    /// Tracking IDs in visiting order.
    pub fn tracking_ids(&self) -> impl Iterator<Item = &str> {
        self.ordered_deliveries
            .iter()
            .map(|delivery| delivery.stop.tracking_id.as_str())
    }

    /// Check that this result orders exactly `stops`.
    ///
    /// The ordered deliveries must match the input by tracking-ID multiset,
    /// carry `route_order` values forming `1..=N`, and report a finite
    /// non-negative distance. `route` and `total_points` are informational and
    /// not checked.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteConsistencyError`] found.
    pub fn check_against(&self, stops: &[DeliveryStop]) -> Result<(), RouteConsistencyError> {
        if !self.total_distance.is_finite() || self.total_distance < 0.0 {
            return Err(RouteConsistencyError::InvalidDistance(self.total_distance));
        }

        let supplied = stops.len();
        let ordered = self.ordered_deliveries.len();
        if supplied != ordered {
            return Err(RouteConsistencyError::LengthMismatch {
                expected: supplied,
                actual: ordered,
            });
        }

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for stop in stops {
            counts.entry(stop.tracking_id.as_str()).or_default().0 += 1;
        }
        for id in self.tracking_ids() {
            counts.entry(id).or_default().1 += 1;
        }
        if let Some((id, &(expected, actual))) = counts
            .iter()
            .filter(|(_, (want, got))| want != got)
            .min_by_key(|(id, _)| **id)
        {
            return Err(RouteConsistencyError::StopMismatch {
                tracking_id: (*id).to_owned(),
                expected,
                actual,
            });
        }

        let mut seen = vec![false; ordered];
        for delivery in &self.ordered_deliveries {
            let slot = delivery
                .route_order
                .checked_sub(1)
                .and_then(|index| seen.get_mut(index));
            match slot {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(RouteConsistencyError::RouteOrder { len: ordered }),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use rstest::{fixture, rstest};

    fn stop(id: &str) -> DeliveryStop {
        DeliveryStop::new(id, "", Point::new(0.0, 0.0).expect("valid point"), "")
    }

    fn ordered(ids_and_orders: &[(&str, usize)]) -> RouteResult {
        RouteResult {
            total_distance: 1.5,
            total_points: ids_and_orders.len() + 2,
            route: Vec::new(),
            ordered_deliveries: ids_and_orders
                .iter()
                .map(|&(id, route_order)| OrderedDelivery {
                    stop: stop(id),
                    route_order,
                })
                .collect(),
        }
    }

    #[fixture]
    fn stops() -> Vec<DeliveryStop> {
        vec![stop("A"), stop("B"), stop("C")]
    }

    #[rstest]
    fn accepts_any_permutation(stops: Vec<DeliveryStop>) {
        let result = ordered(&[("C", 1), ("A", 2), ("B", 3)]);
        assert_eq!(result.check_against(&stops), Ok(()));
        assert_eq!(result.tracking_ids().collect::<Vec<_>>(), ["C", "A", "B"]);
    }

    #[rstest]
    fn rejects_missing_stop(stops: Vec<DeliveryStop>) {
        let result = ordered(&[("A", 1), ("B", 2)]);
        assert_eq!(
            result.check_against(&stops),
            Err(RouteConsistencyError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[rstest]
    fn rejects_duplicate_in_place_of_missing(stops: Vec<DeliveryStop>) {
        let result = ordered(&[("A", 1), ("A", 2), ("B", 3)]);
        assert_eq!(
            result.check_against(&stops),
            Err(RouteConsistencyError::StopMismatch {
                tracking_id: "A".to_owned(),
                expected: 1,
                actual: 2,
            })
        );
    }

    #[rstest]
    #[case(&[("A", 1), ("B", 1), ("C", 3)])]
    #[case(&[("A", 0), ("B", 1), ("C", 2)])]
    #[case(&[("A", 1), ("B", 2), ("C", 4)])]
    fn rejects_broken_route_order(stops: Vec<DeliveryStop>, #[case] entries: &[(&str, usize)]) {
        let result = ordered(entries);
        assert_eq!(
            result.check_against(&stops),
            Err(RouteConsistencyError::RouteOrder { len: 3 })
        );
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn rejects_invalid_distance(stops: Vec<DeliveryStop>, #[case] total_distance: f64) {
        let mut result = ordered(&[("A", 1), ("B", 2), ("C", 3)]);
        result.total_distance = total_distance;
        assert!(matches!(
            result.check_against(&stops),
            Err(RouteConsistencyError::InvalidDistance(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn ordered_delivery_flattens_stop_fields() {
        let delivery = OrderedDelivery {
            stop: stop("TRK-5"),
            route_order: 2,
        };
        let value = serde_json::to_value(&delivery).expect("delivery should serialise");
        assert_eq!(value["trackingId"], "TRK-5");
        assert_eq!(value["route_order"], 2);
        assert_eq!(value["lat"], 0.0);
    }
}
