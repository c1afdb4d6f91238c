//! Nearest-neighbour route construction.
//!
//! The sequencer starts at the depot, repeatedly travels to the closest
//! unvisited stop, and finally returns to the depot. It is a greedy heuristic
//! with no optimality guarantee and is intended as the local fallback when the
//! remote optimiser is unavailable. Time and space are both `O(N²)` in the
//! number of stops because the full distance matrix is precomputed.

use std::iter;

use log::debug;

use crate::{
    DeliveryStop, Depot, DistanceMatrix, DistanceModel, Equirectangular, OptimizeError,
    OrderedDelivery, Point, RouteOptimizer, RouteRequest, RouteResult,
};

/// Greedy nearest-neighbour sequencer over a pluggable [`DistanceModel`].
///
/// Ties are broken by input order: among stops at exactly the same minimum
/// distance the one supplied first is visited first. Output is fully
/// deterministic for a given input.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryStop, Depot, NearestNeighbourSequencer, Point};
///
/// let depot = Depot::new(Point::new(19.0760, 72.8777)?);
/// let stops = vec![
///     DeliveryStop::new("far", "", Point::new(19.0960, 72.8777)?, ""),
///     DeliveryStop::new("near", "", Point::new(19.0860, 72.8777)?, ""),
/// ];
///
/// let result = NearestNeighbourSequencer::new().sequence(&depot, &stops);
/// let order: Vec<_> = result.tracking_ids().collect();
/// assert_eq!(order, ["near", "far"]);
/// assert_eq!(result.route, vec![0, 2, 1, 0]);
/// # Ok::<(), courier_core::PointError>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighbourSequencer<M = Equirectangular> {
    model: M,
}

impl NearestNeighbourSequencer {
    /// Sequencer using the [`Equirectangular`] approximation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            model: Equirectangular,
        }
    }
}

impl<M> NearestNeighbourSequencer<M>
where
    M: DistanceModel,
{
    /// Sequencer using `model` to measure legs.
    #[must_use]
    pub const fn with_model(model: M) -> Self {
        Self { model }
    }

    /// The distance model in use.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Order `stops` starting and ending at `depot`.
    ///
    /// This is a total function: it does not validate coordinates. Use
    /// [`RouteOptimizer::optimize`] to validate first. An empty `stops`
    /// yields route `[0, 0]`, zero distance and no ordered deliveries.
    #[must_use]
    pub fn sequence(&self, depot: &Depot, stops: &[DeliveryStop]) -> RouteResult {
        let points: Vec<Point> = iter::once(depot.location)
            .chain(stops.iter().map(|stop| stop.location))
            .collect();
        let matrix = DistanceMatrix::build(&self.model, &points);
        let (visits, total) = walk(&matrix);

        let route: Vec<usize> = iter::once(0)
            .chain(visits.iter().copied())
            .chain(iter::once(0))
            .collect();
        let ordered_deliveries: Vec<OrderedDelivery> = visits
            .iter()
            .filter_map(|&index| index.checked_sub(1).and_then(|slot| stops.get(slot)))
            .zip(1..)
            .map(|(stop, route_order)| OrderedDelivery {
                stop: stop.clone(),
                route_order,
            })
            .collect();

        let total_distance = round_to_hundredths(total);
        debug!(
            "sequenced {} stops locally over {total_distance} km",
            ordered_deliveries.len()
        );

        RouteResult {
            total_distance,
            total_points: route.len(),
            route,
            ordered_deliveries,
        }
    }
}

impl<M> RouteOptimizer for NearestNeighbourSequencer<M>
where
    M: DistanceModel,
{
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, OptimizeError> {
        request.validate()?;
        Ok(self.sequence(&request.depot, &request.stops))
    }
}

/// Visit every non-depot index of `matrix` greedily from index 0.
///
/// Returns the visited indices in order and the closed-loop length.
#[expect(clippy::float_arithmetic, reason = "summing leg distances")]
fn walk(matrix: &DistanceMatrix) -> (Vec<usize>, f64) {
    let stop_count = matrix.len().saturating_sub(1);
    let mut visited = vec![false; matrix.len()];
    let mut visits = Vec::with_capacity(stop_count);
    let mut current = 0;
    let mut total = 0.0;

    while visits.len() < stop_count {
        let mut best: Option<(usize, f64)> = None;
        for (candidate, done) in visited.iter().enumerate().skip(1) {
            if *done {
                continue;
            }
            let leg = matrix.get(current, candidate).unwrap_or(f64::INFINITY);
            // Strictly closer only, so the earliest stop wins a tie. A NaN leg
            // is never closer but is still taken if nothing else is left.
            if best.is_none_or(|(_, best_leg)| leg < best_leg) {
                best = Some((candidate, leg));
            }
        }
        let Some((next, leg)) = best else {
            break;
        };
        if let Some(flag) = visited.get_mut(next) {
            *flag = true;
        }
        visits.push(next);
        total += leg;
        current = next;
    }

    total += matrix.get(current, 0).unwrap_or(0.0);
    (visits, total)
}

#[expect(clippy::float_arithmetic, reason = "decimal rounding")]
fn round_to_hundredths(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
