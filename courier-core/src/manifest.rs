//! Daily delivery manifests and selection of routable stops.
//!
//! Records come from the delivery store with loosely typed coordinates: either
//! number, a numeric string, or absent. Only records whose coordinates are
//! both present and finite are routable. Range checking is left to
//! [`RouteRequest::validate`](crate::RouteRequest::validate) so that a bad
//! record fails loudly instead of vanishing from the route.

use jiff::civil::Date;
use log::debug;

use crate::{DeliveryStop, Point};

/// A latitude or longitude as stored, before it is known to be usable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Coordinate {
    /// A numeric value in degrees.
    Degrees(f64),
    /// A textual value such as `"19.0760"`.
    Text(String),
}

impl Coordinate {
    /// The value in degrees when it is a finite number.
    #[must_use]
    pub fn degrees(&self) -> Option<f64> {
        let value = match self {
            Self::Degrees(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self::Degrees(value)
    }
}

/// One booked delivery.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeliveryRecord {
    /// Opaque tracking identifier.
    pub tracking_id: String,
    /// Recipient display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Free-text postal address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
    /// Stored latitude, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<Coordinate>,
    /// Stored longitude, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<Coordinate>,
    /// Day the delivery is scheduled for.
    ///
    /// Decodes from a plain date or an RFC 3339 timestamp, which is taken in
    /// UTC.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::date_or_timestamp"))]
    pub delivery_date: Date,
    /// Optional product description.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub product: Option<String>,
    /// Optional delivery time slot.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub delivery_time: Option<String>,
}

impl DeliveryRecord {
    /// The routable stop for this record, if both coordinates are usable.
    #[must_use]
    pub fn to_stop(&self) -> Option<DeliveryStop> {
        let latitude = self.latitude.as_ref()?.degrees()?;
        let longitude = self.longitude.as_ref()?.degrees()?;
        Some(DeliveryStop {
            tracking_id: self.tracking_id.clone(),
            name: self.name.clone(),
            location: Point::unchecked(latitude, longitude),
            address: self.address.clone(),
            product: self.product.clone(),
            delivery_time: self.delivery_time.clone(),
        })
    }
}

/// Routable stops selected for one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestSelection {
    /// Stops in manifest order.
    pub stops: Vec<DeliveryStop>,
    /// Records for the day that were dropped for unusable coordinates.
    pub skipped: usize,
}

/// An unordered collection of delivery records spanning any number of days.
///
/// # Examples
/// ```
/// use courier_core::manifest::{DeliveryManifest, DeliveryRecord};
/// use jiff::civil::date;
///
/// let day = date(2025, 3, 14);
/// let manifest = DeliveryManifest::new(vec![DeliveryRecord {
///     tracking_id: "TRK-1".into(),
///     name: "Asha".into(),
///     address: "Colaba".into(),
///     latitude: Some(18.91.into()),
///     longitude: None,
///     delivery_date: day,
///     product: None,
///     delivery_time: None,
/// }]);
///
/// let selection = manifest.stops_for(day);
/// assert!(selection.stops.is_empty());
/// assert_eq!(selection.skipped, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DeliveryManifest {
    records: Vec<DeliveryRecord>,
}

impl DeliveryManifest {
    /// Wrap a list of records.
    #[must_use]
    pub const fn new(records: Vec<DeliveryRecord>) -> Self {
        Self { records }
    }

    /// All records in stored order.
    #[must_use]
    pub fn records(&self) -> &[DeliveryRecord] {
        &self.records
    }

    /// Stops scheduled on `date` that have usable coordinates.
    #[must_use]
    pub fn stops_for(&self, date: Date) -> ManifestSelection {
        let mut selection = ManifestSelection::default();
        for record in self.records.iter().filter(|r| r.delivery_date == date) {
            if let Some(stop) = record.to_stop() {
                selection.stops.push(stop);
            } else {
                debug!(
                    "skipping delivery {} on {date}: coordinates missing or not numeric",
                    record.tracking_id
                );
                selection.skipped = selection.skipped.saturating_add(1);
            }
        }
        selection
    }
}

impl From<Vec<DeliveryRecord>> for DeliveryManifest {
    fn from(records: Vec<DeliveryRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(feature = "serde")]
mod de {
    use jiff::Timestamp;
    use jiff::civil::Date;
    use jiff::tz::TimeZone;
    use serde::{Deserialize, Deserializer, de::Error as _};

    pub(super) fn date_or_timestamp<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = raw.parse::<Date>() {
            return Ok(date);
        }
        raw.parse::<Timestamp>()
            .map(|ts| ts.to_zoned(TimeZone::UTC).date())
            .map_err(|err| D::Error::custom(format!("invalid delivery date {raw:?}: {err}")))
    }
}
