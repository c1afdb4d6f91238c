//! Delivery stops and the depot that every route starts and ends at.

use crate::Point;

/// A single delivery destination.
///
/// Product and time-slot metadata is opaque to routing and is carried
/// through to the ordered output unchanged. Tracking IDs are expected to be
/// unique within a request, but this is not enforced.
///
/// On the wire a stop is
/// `{ "trackingId", "name", "lat", "lng", "address", "product"?, "deliveryTime"? }`.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryStop, Point};
///
/// let stop = DeliveryStop::new(
///     "TRK-001",
///     "Asha Rao",
///     Point::new(19.08, 72.88)?,
///     "12 Marine Drive",
/// )
/// .with_product("Documents");
///
/// assert_eq!(stop.tracking_id, "TRK-001");
/// assert_eq!(stop.product.as_deref(), Some("Documents"));
/// # Ok::<(), courier_core::PointError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeliveryStop {
    /// Opaque tracking identifier.
    pub tracking_id: String,
    /// Recipient display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Where the parcel is delivered.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub location: Point,
    /// Free-text postal address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
    /// Optional product description.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub product: Option<String>,
    /// Optional delivery time slot, e.g. `"10:00 AM - 12:00 PM"`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub delivery_time: Option<String>,
}

impl DeliveryStop {
    /// Construct a stop without product or time-slot metadata.
    #[must_use]
    pub fn new(
        tracking_id: impl Into<String>,
        name: impl Into<String>,
        location: Point,
        address: impl Into<String>,
    ) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            name: name.into(),
            location,
            address: address.into(),
            product: None,
            delivery_time: None,
        }
    }

    /// Attach a product description.
    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Attach a delivery time slot.
    #[must_use]
    pub fn with_delivery_time(mut self, delivery_time: impl Into<String>) -> Self {
        self.delivery_time = Some(delivery_time.into());
        self
    }
}

/// The hub a route departs from and returns to.
///
/// # Examples
/// ```
/// use courier_core::{Depot, Point};
///
/// let depot = Depot::new(Point::new(19.0760, 72.8777)?)
///     .with_name("Delivery Hub")
///     .with_address("Mumbai Central Office");
/// assert_eq!(depot.name.as_deref(), Some("Delivery Hub"));
/// # Ok::<(), courier_core::PointError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    /// Depot position.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub location: Point,
    /// Optional display name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    /// Optional postal address.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub address: Option<String>,
}

impl Depot {
    /// Construct an unnamed depot at `location`.
    #[must_use]
    pub const fn new(location: Point) -> Self {
        Self {
            location,
            name: None,
            address: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
