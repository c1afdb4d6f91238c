//! Response body of the remote optimiser.
//!
//! The request body is [`RouteRequest`](courier_core::RouteRequest) serialised
//! as-is. The response mirrors [`RouteResult`], except that the reference
//! service also echoes the closing depot as a final ordered delivery with no
//! `trackingId`. [`RouteReply::into_result`] drops that echo.

use courier_core::{OrderedDelivery, RouteResult};
use serde::Deserialize;
use serde_json::Value;

/// Key that identifies a delivery entry as opposed to a depot echo.
const TRACKING_ID_KEY: &str = "trackingId";

/// Remote optimiser reply before normalisation.
#[derive(Debug, Deserialize)]
pub struct RouteReply {
    /// Total route length in kilometres.
    pub total_distance: f64,
    /// Points in the closed route.
    pub total_points: usize,
    /// Raw visiting order, depot = 0.
    #[serde(default)]
    pub route: Vec<usize>,
    /// Ordered entries, possibly ending with depot echoes.
    pub ordered_deliveries: Vec<Value>,
}

impl RouteReply {
    /// Strip trailing depot echoes and decode the deliveries.
    ///
    /// # Errors
    ///
    /// Returns the decoding error for the first entry that is not an ordered
    /// delivery.
    pub fn into_result(self) -> Result<RouteResult, serde_json::Error> {
        let mut entries = self.ordered_deliveries;
        while entries.last().is_some_and(is_depot_echo) {
            entries.pop();
        }
        let ordered_deliveries = entries
            .into_iter()
            .map(serde_json::from_value::<OrderedDelivery>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RouteResult {
            total_distance: self.total_distance,
            total_points: self.total_points,
            route: self.route,
            ordered_deliveries,
        })
    }
}

fn is_depot_echo(entry: &Value) -> bool {
    entry
        .as_object()
        .is_some_and(|fields| !fields.contains_key(TRACKING_ID_KEY))
}
