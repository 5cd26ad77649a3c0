use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::geom::LatLngDto;
use crate::route_geo::{route_line, Distance};
use crate::types::trip::Trip;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDto {
    pub origin: Option<LatLngDto>,
    pub destination: Option<LatLngDto>,
    pub route: Option<RouteDto>,
}

impl TripDto {
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            origin: trip.origin.as_ref().map(LatLngDto::from),
            destination: trip.destination.as_ref().map(LatLngDto::from),
            route: trip.route.as_ref().map(RouteDto::from_payload),
        }
    }
}

//Derived from the stored directions payload at read time. Every field is
//optional because the payload is kept unvalidated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDto {
    pub summary: Option<String>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<i64>,
    pub duration_in_traffic_seconds: Option<i64>,
}

impl RouteDto {
    pub fn from_payload(payload: &Value) -> Self {
        let route = payload.get("routes").and_then(|routes| routes.get(0));
        Self {
            summary: route
                .and_then(|route| route.get("summary"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            distance_meters: route_line(payload).ok().map(|line| line.distance()),
            duration_seconds: route.and_then(|route| leg_seconds_total(route, "duration")),
            duration_in_traffic_seconds: route
                .and_then(|route| leg_seconds_total(route, "duration_in_traffic")),
        }
    }
}

fn leg_seconds_total(route: &Value, field: &str) -> Option<i64> {
    route
        .get("legs")?
        .as_array()?
        .iter()
        .map(|leg| leg.get(field)?.get("value")?.as_i64())
        .sum()
}
