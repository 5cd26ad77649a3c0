use color_eyre::eyre::{eyre, Result};
use google_maps::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::clients::get_google_maps;

/// Parameters of a single directions request.
#[derive(Debug)]
pub struct RouteQuery {
    pub origin: LatLng,
    pub destination: LatLng,
    pub travel_mode: TravelMode,
    pub departure_time: DepartureTime,
    pub traffic_model: TrafficModel,
}

impl RouteQuery {
    /// Car directions leaving now, estimated with pessimistic traffic.
    pub fn driving(origin: LatLng, destination: LatLng) -> Self {
        Self {
            origin,
            destination,
            travel_mode: TravelMode::Driving,
            departure_time: DepartureTime::Now,
            traffic_model: TrafficModel::Pessimistic,
        }
    }
}

/// Runs the directions request and hands back the response verbatim.
pub async fn fetch_route(query: RouteQuery) -> Result<Value> {
    let response = get_google_maps()?
        .directions(
            Location::LatLng(query.origin),
            Location::LatLng(query.destination),
        )
        .with_travel_mode(query.travel_mode)
        .with_departure_time(query.departure_time)
        .with_traffic_model(query.traffic_model)
        .execute()
        .await?;
    if response.routes.is_empty() {
        return Err(eyre!(
            "directions response contained no routes ({:?})",
            response.status
        ));
    }
    debug!("directions returned {} route(s)", response.routes.len());
    Ok(serde_json::to_value(&response)?)
}
