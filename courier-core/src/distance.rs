//! Ground-distance models and the pairwise matrix the sequencer consumes.
//!
//! [`Equirectangular`] is the default. It treats the surface as locally flat
//! and is only meaningful within a metro area. It is directional: longitude
//! deltas are scaled by the cosine of the *origin's* latitude, so
//! `distance(a, b)` and `distance(b, a)` differ when the latitudes differ.
//! [`GreatCircle`] is symmetric and uses the haversine formula.

use std::fmt;
use std::str::FromStr;

use geo::{Distance, Haversine};
use thiserror::Error;

use crate::Point;

/// Kilometres per degree of latitude used by [`Equirectangular`].
pub const KM_PER_DEGREE: f64 = 111.0;

const METRES_PER_KM: f64 = 1000.0;

/// Approximate the ground distance between two points.
///
/// Implementations return kilometres and must yield `0.0` for identical
/// points. They are not required to be symmetric.
pub trait DistanceModel: Send + Sync {
    /// Distance in kilometres travelling from `from` to `to`.
    fn distance_km(&self, from: Point, to: Point) -> f64;
}

/// Flat-earth approximation local to the origin's latitude.
///
/// `dx = Δlat · 111`, `dy = Δlng · 111 · cos(from.lat)`, result `√(dx² + dy²)`.
///
/// # Examples
/// ```
/// use courier_core::{DistanceModel, Equirectangular, Point};
///
/// let a = Point::new(0.0, 0.0)?;
/// let b = Point::new(0.01, 0.0)?;
/// let km = Equirectangular.distance_km(a, b);
/// assert!((km - 1.11).abs() < 1e-9);
/// # Ok::<(), courier_core::PointError>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Equirectangular;

impl DistanceModel for Equirectangular {
    #[expect(
        clippy::float_arithmetic,
        reason = "the approximation is defined in floating-point degrees"
    )]
    fn distance_km(&self, from: Point, to: Point) -> f64 {
        let dx = (from.latitude() - to.latitude()) * KM_PER_DEGREE;
        let dy = (from.longitude() - to.longitude())
            * KM_PER_DEGREE
            * from.latitude().to_radians().cos();
        (dx * dx + dy * dy).sqrt()
    }
}

/// Haversine great-circle distance on a spherical earth.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GreatCircle;

impl DistanceModel for GreatCircle {
    #[expect(clippy::float_arithmetic, reason = "metres to kilometres")]
    fn distance_km(&self, from: Point, to: Point) -> f64 {
        Haversine.distance(geo::Point::from(from), geo::Point::from(to)) / METRES_PER_KM
    }
}

/// Runtime selection between the built-in distance models.
///
/// Parses from `"equirectangular"`, `"haversine"` or `"great-circle"`.
///
/// # Examples
/// ```
/// use courier_core::DistanceMetric;
///
/// let metric: DistanceMetric = "haversine".parse()?;
/// assert_eq!(metric, DistanceMetric::GreatCircle);
/// assert_eq!(DistanceMetric::default(), DistanceMetric::Equirectangular);
/// # Ok::<(), courier_core::UnknownDistanceMetric>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DistanceMetric {
    /// See [`Equirectangular`].
    #[default]
    Equirectangular,
    /// See [`GreatCircle`].
    #[cfg_attr(feature = "serde", serde(alias = "haversine"))]
    GreatCircle,
}

/// Error returned when parsing an unrecognised [`DistanceMetric`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown distance model {0:?} (expected equirectangular or haversine)")]
pub struct UnknownDistanceMetric(pub String);

impl FromStr for DistanceMetric {
    type Err = UnknownDistanceMetric;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "equirectangular" => Ok(Self::Equirectangular),
            "haversine" | "great-circle" | "great_circle" => Ok(Self::GreatCircle),
            _ => Err(UnknownDistanceMetric(value.to_owned())),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equirectangular => f.write_str("equirectangular"),
            Self::GreatCircle => f.write_str("haversine"),
        }
    }
}

impl DistanceModel for DistanceMetric {
    fn distance_km(&self, from: Point, to: Point) -> f64 {
        match self {
            Self::Equirectangular => Equirectangular.distance_km(from, to),
            Self::GreatCircle => GreatCircle.distance_km(from, to),
        }
    }
}

/// Directional pairwise distances in kilometres.
///
/// `get(i, j)` is the distance travelling from `points[i]` to `points[j]`.
/// The diagonal is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Compute every ordered pair of `points` with `model`.
    #[must_use]
    pub fn build<M>(model: &M, points: &[Point]) -> Self
    where
        M: DistanceModel + ?Sized,
    {
        let rows = points
            .iter()
            .enumerate()
            .map(|(i, &from)| {
                points
                    .iter()
                    .enumerate()
                    .map(|(j, &to)| {
                        if i == j {
                            0.0
                        } else {
                            model.distance_km(from, to)
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of points the matrix covers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix covers no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance from point `from` to point `to`, if both indices exist.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }
}
