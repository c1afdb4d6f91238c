//! Fixtures shared by unit, behaviour and downstream crate tests.

use crate::{DeliveryStop, Depot, Point};

/// Latitude of the default Mumbai hub.
pub const MUMBAI_LATITUDE: f64 = 19.0760;
/// Longitude of the default Mumbai hub.
pub const MUMBAI_LONGITUDE: f64 = 72.8777;

/// A depot at the given coordinates.
///
/// # Panics
///
/// Panics if the coordinates are out of range.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures use literal coordinates")]
pub fn depot(latitude: f64, longitude: f64) -> Depot {
    Depot::new(Point::new(latitude, longitude).expect("fixture depot must be valid"))
}

/// The Mumbai hub used throughout the examples.
#[must_use]
pub fn mumbai_depot() -> Depot {
    depot(MUMBAI_LATITUDE, MUMBAI_LONGITUDE)
        .with_name("Delivery Hub")
        .with_address("Mumbai Central Office")
}

/// A stop named after its tracking ID with an empty address.
///
/// # Panics
///
/// Panics if the coordinates are out of range.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures use literal coordinates")]
pub fn stop(tracking_id: &str, latitude: f64, longitude: f64) -> DeliveryStop {
    DeliveryStop::new(
        tracking_id,
        format!("Recipient {tracking_id}"),
        Point::new(latitude, longitude).expect("fixture stop must be valid"),
        "",
    )
}

/// Stops spread around the Mumbai hub roughly 0.01° apart.
#[must_use]
pub fn mumbai_stops() -> Vec<DeliveryStop> {
    vec![
        stop("TRK-N", 19.0860, 72.8777),
        stop("TRK-E", 19.0760, 72.8877),
        stop("TRK-S", 19.0660, 72.8777),
    ]
}
