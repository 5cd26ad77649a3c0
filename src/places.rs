use color_eyre::eyre::{eyre, Result};
use geo_types::Point;
use google_maps::LatLng;
use tracing::debug;

use crate::clients::{get_google_api_key, get_reqwest_client};
use crate::types::places::{AutocompleteResponse, PlaceDetailsResponse, Prediction};

const PLACES_API_URL: &str = "https://maps.googleapis.com/maps/api/place";
const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Place predictions matching a partial search string, best match first.
pub async fn autocomplete_predictions(input: &str) -> Result<Vec<Prediction>> {
    let response = get_reqwest_client()?
        .get(format!("{PLACES_API_URL}/autocomplete/json"))
        .query(&[("input", input), ("key", get_google_api_key()?.as_str())])
        .send()
        .await?
        .json::<AutocompleteResponse>()
        .await?;
    predictions_from(response)
}

fn predictions_from(response: AutocompleteResponse) -> Result<Vec<Prediction>> {
    match response.status.as_str() {
        STATUS_OK | STATUS_ZERO_RESULTS => Ok(response.predictions),
        status => Err(eyre!(
            "autocomplete lookup failed: {status} {}",
            response.error_message.unwrap_or_default()
        )),
    }
}

/// Coordinates of a place, or None when the lookup resolves nothing usable.
pub async fn place_location(place_id: &str) -> Result<Option<LatLng>> {
    let response = get_reqwest_client()?
        .get(format!("{PLACES_API_URL}/details/json"))
        .query(&[
            ("place_id", place_id),
            ("fields", "geometry"),
            ("key", get_google_api_key()?.as_str()),
        ])
        .send()
        .await?
        .json::<PlaceDetailsResponse>()
        .await?;
    location_from(response)
}

fn location_from(response: PlaceDetailsResponse) -> Result<Option<LatLng>> {
    if response.status != STATUS_OK {
        debug!(
            "place details lookup returned {}: {}",
            response.status,
            response.error_message.unwrap_or_default()
        );
        return Ok(None);
    }
    let Some(location) = response
        .result
        .and_then(|place| place.geometry)
        .map(|geometry| geometry.location)
    else {
        debug!("place details result carried no geometry");
        return Ok(None);
    };
    let point = Point::new(location.lng, location.lat);
    Ok(Some(LatLng::try_from(&point)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::places::{PlaceDetails, PlaceGeometry, PlaceLocation, Prediction};
    use num_traits::ToPrimitive;

    fn prediction(description: &str) -> Prediction {
        Prediction {
            description: description.to_string(),
            place_id: Some(format!("ChIJ_{description}")),
            structured_formatting: None,
        }
    }

    fn details_response(status: &str, geometry: Option<PlaceGeometry>) -> PlaceDetailsResponse {
        PlaceDetailsResponse {
            status: status.to_string(),
            result: Some(PlaceDetails { geometry }),
            error_message: None,
        }
    }

    #[test]
    fn ok_statuses_yield_predictions() {
        let response = AutocompleteResponse {
            status: "OK".to_string(),
            predictions: vec![prediction("Tokyo Station"), prediction("Tokyo Tower")],
            error_message: None,
        };
        let predictions = predictions_from(response).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].description, "Tokyo Station");
    }

    #[test]
    fn zero_results_is_an_empty_list_not_an_error() {
        let response = AutocompleteResponse {
            status: "ZERO_RESULTS".to_string(),
            predictions: vec![],
            error_message: None,
        };
        assert!(predictions_from(response).unwrap().is_empty());
    }

    #[test]
    fn denied_autocomplete_is_an_error() {
        let response = AutocompleteResponse {
            status: "REQUEST_DENIED".to_string(),
            predictions: vec![],
            error_message: Some("The provided API key is invalid.".to_string()),
        };
        let err = predictions_from(response).unwrap_err();
        assert!(err.to_string().contains("REQUEST_DENIED"));
    }

    #[test]
    fn details_geometry_becomes_a_latlng() {
        let geometry = PlaceGeometry {
            location: PlaceLocation {
                lat: 35.6812,
                lng: 139.7671,
            },
        };
        let location = location_from(details_response("OK", Some(geometry)))
            .unwrap()
            .unwrap();
        assert!((location.lat.to_f64().unwrap() - 35.6812).abs() < 1e-9);
        assert!((location.lng.to_f64().unwrap() - 139.7671).abs() < 1e-9);
    }

    #[test]
    fn failed_details_lookup_resolves_to_none() {
        assert!(location_from(details_response("NOT_FOUND", None))
            .unwrap()
            .is_none());
    }

    #[test]
    fn details_without_geometry_resolve_to_none() {
        assert!(location_from(details_response("OK", None)).unwrap().is_none());
    }
}
