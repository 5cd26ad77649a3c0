use std::sync::OnceLock;

use color_eyre::eyre::{eyre, Result};
use tokio::sync::Mutex;
use tracing::debug;

use crate::places::place_location;
use crate::types::dto::places::PlaceSelection;
use crate::types::trip::{Trip, TripEnd};

static TRIP: OnceLock<Mutex<Trip>> = OnceLock::new();

pub fn init_trip_state() -> &'static Mutex<Trip> {
    TRIP.get_or_init(|| Mutex::new(Trip::default()))
}

pub fn get_trip_state() -> Result<&'static Mutex<Trip>> {
    TRIP.get().ok_or(eyre!("Failed to get trip state"))
}

pub async fn current_trip() -> Result<Trip> {
    Ok(get_trip_state()?.lock().await.clone())
}

/// Resolves a picked prediction and stores its coordinates on the given end.
/// Selections that resolve to nothing leave the trip untouched.
pub async fn apply_place_selection(end: TripEnd, selection: PlaceSelection) -> Result<Trip> {
    let Some(place_id) = selection.place_id else {
        debug!("selection for {end:?} carried no place id, ignoring");
        return current_trip().await;
    };
    match place_location(&place_id).await? {
        Some(location) => {
            let mut trip = get_trip_state()?.lock().await;
            trip.set_end(end, location);
            Ok(trip.clone())
        }
        None => {
            debug!("selection for {end:?} did not resolve, ignoring");
            current_trip().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn selection_without_place_id_is_a_no_op() {
        init_trip_state();
        let trip = apply_place_selection(TripEnd::Origin, PlaceSelection { place_id: None })
            .await
            .unwrap();
        assert!(trip.origin.is_none());
        assert!(trip.destination.is_none());
    }
}
