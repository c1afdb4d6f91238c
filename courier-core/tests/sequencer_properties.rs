//! Property-based tests for the nearest-neighbour sequencer.
//!
//! # Invariants tested
//!
//! - **Permutation:** ordered deliveries contain every input stop exactly once.
//! - **Route order:** `route_order` values are exactly `1..=N`.
//! - **Closed loop:** `route` opens and closes at the depot and has `N + 2`
//!   entries.
//! - **Distance:** the total is finite, non-negative, and zero only when there
//!   are no stops or every stop sits on the depot.
//! - **Determinism:** sequencing the same input twice gives the same result.

use std::collections::HashSet;

use courier_core::{
    DeliveryStop, Depot, DistanceMetric, DistanceModel, NearestNeighbourSequencer, Point,
};
use proptest::prelude::*;

fn depot() -> Depot {
    Depot::new(Point::new(19.0760, 72.8777).expect("valid depot"))
}

/// Stops within roughly 20 km of the Mumbai hub.
fn stops_strategy(max: usize) -> impl Strategy<Value = Vec<DeliveryStop>> {
    prop::collection::vec((18.9_f64..19.25, 72.7_f64..73.05), 0..=max).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lng))| {
                DeliveryStop::new(
                    format!("TRK-{i}"),
                    "",
                    Point::new(lat, lng).expect("strategy yields valid points"),
                    "",
                )
            })
            .collect()
    })
}

fn metric_strategy() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![
        Just(DistanceMetric::Equirectangular),
        Just(DistanceMetric::GreatCircle)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn ordered_deliveries_are_a_permutation_of_the_input(
        stops in stops_strategy(24),
        metric in metric_strategy(),
    ) {
        let result = NearestNeighbourSequencer::with_model(metric).sequence(&depot(), &stops);

        prop_assert_eq!(result.ordered_deliveries.len(), stops.len());
        let input: HashSet<&str> = stops.iter().map(|s| s.tracking_id.as_str()).collect();
        let output: HashSet<&str> = result.tracking_ids().collect();
        prop_assert_eq!(input, output);
        prop_assert!(result.check_against(&stops).is_ok());
    }

    #[test]
    fn route_order_is_one_to_n(stops in stops_strategy(24)) {
        let result = NearestNeighbourSequencer::new().sequence(&depot(), &stops);

        let mut orders: Vec<usize> = result
            .ordered_deliveries
            .iter()
            .map(|d| d.route_order)
            .collect();
        orders.sort_unstable();
        let expected: Vec<usize> = (1..=stops.len()).collect();
        prop_assert_eq!(orders, expected);
    }

    #[test]
    fn route_is_a_closed_loop_through_every_index(stops in stops_strategy(24)) {
        let result = NearestNeighbourSequencer::new().sequence(&depot(), &stops);

        prop_assert_eq!(result.total_points, stops.len() + 2);
        prop_assert_eq!(result.route.len(), result.total_points);
        prop_assert_eq!(result.route.first(), Some(&0));
        prop_assert_eq!(result.route.last(), Some(&0));

        let mut inner: Vec<usize> = result
            .route
            .iter()
            .copied()
            .skip(1)
            .take(stops.len())
            .collect();
        inner.sort_unstable();
        let expected: Vec<usize> = (1..=stops.len()).collect();
        prop_assert_eq!(inner, expected);
    }

    #[test]
    fn total_distance_is_finite_and_non_negative(
        stops in stops_strategy(24),
        metric in metric_strategy(),
    ) {
        let result = NearestNeighbourSequencer::with_model(metric).sequence(&depot(), &stops);

        prop_assert!(result.total_distance.is_finite());
        prop_assert!(result.total_distance >= 0.0);
        if stops.is_empty() {
            prop_assert_eq!(result.total_distance, 0.0);
        }
    }

    #[test]
    fn sequencing_is_deterministic(stops in stops_strategy(16)) {
        let sequencer = NearestNeighbourSequencer::new();
        let first = sequencer.sequence(&depot(), &stops);
        let second = sequencer.sequence(&depot(), &stops);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distance_to_self_is_zero(
        lat in -89.0_f64..89.0,
        lng in -179.0_f64..179.0,
        metric in metric_strategy(),
    ) {
        let p = Point::new(lat, lng).expect("strategy yields valid points");
        prop_assert_eq!(metric.distance_km(p, p), 0.0);
    }
}
