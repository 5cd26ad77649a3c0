use google_maps::LatLng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::directions::RouteQuery;

/// Which field of the trip a resolved place lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripEnd {
    Origin,
    Destination,
}

//What the component holds between events. Coordinates are only ever set from
//a resolved place; the route payload is kept verbatim for rendering.
#[derive(Debug, Default, Clone)]
pub struct Trip {
    pub origin: Option<LatLng>,
    pub destination: Option<LatLng>,
    pub route: Option<Value>,
}

impl Trip {
    pub fn set_end(&mut self, end: TripEnd, location: LatLng) {
        match end {
            TripEnd::Origin => self.origin = Some(location),
            TripEnd::Destination => self.destination = Some(location),
        }
    }

    /// The one request this service makes: present only once both ends are
    /// resolved, always driving from now under pessimistic traffic.
    pub fn route_query(&self) -> Option<RouteQuery> {
        Some(RouteQuery::driving(
            self.origin.clone()?,
            self.destination.clone()?,
        ))
    }

    //Unconditional overwrite: with overlapping requests the last response to
    //arrive is the one that stays.
    pub fn store_route(&mut self, route: Value) {
        self.route = Some(route);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
