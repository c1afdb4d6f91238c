//! Geographic coordinates with range validation.

use geo::Coord;
use thiserror::Error;

/// Valid latitude range in degrees.
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees.
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 coordinate expressed in decimal degrees.
///
/// Fields are private so a `Point` cannot change after construction. Values
/// built through [`Point::new`] are always in range; values decoded from JSON
/// are checked at the request boundary with [`Point::validate`].
///
/// On the wire a point is `{ "lat": .., "lng": .. }`. The long-form keys
/// `latitude` and `longitude` are accepted when decoding.
///
/// # Examples
/// ```
/// use courier_core::Point;
///
/// let hub = Point::new(19.0760, 72.8777)?;
/// assert_eq!(hub.latitude(), 19.0760);
/// assert!(Point::new(91.0, 0.0).is_err());
/// # Ok::<(), courier_core::PointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    #[cfg_attr(feature = "serde", serde(rename = "lat", alias = "latitude"))]
    latitude: f64,
    #[cfg_attr(feature = "serde", serde(rename = "lng", alias = "longitude"))]
    longitude: f64,
}

/// Errors returned by [`Point::new`] and [`Point::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PointError {
    /// Either component was NaN or infinite.
    #[error("coordinates must be finite (latitude {latitude}, longitude {longitude})")]
    NonFinite {
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Point {
    /// Validate and construct a point from latitude and longitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`PointError`] when either component is non-finite or out of
    /// range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PointError> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// Check that both components are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`PointError`] describing the first violation found.
    pub fn validate(&self) -> Result<(), PointError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(PointError::NonFinite {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(PointError::LatitudeOutOfRange(self.latitude));
        }
        if !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(PointError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Build a point without validation, as a decoder would.
    pub(crate) const fn unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// `x` is longitude and `y` is latitude, matching `geo`'s convention.
impl From<Point> for Coord<f64> {
    fn from(point: Point) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(point: Point) -> Self {
        Self::from(Coord::from(point))
    }
}
