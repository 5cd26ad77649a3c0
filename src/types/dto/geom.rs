use google_maps::LatLng;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair as plain floats, the shape map frontends consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngDto {
    pub lat: f64,
    pub lng: f64,
}

impl From<&LatLng> for LatLngDto {
    fn from(value: &LatLng) -> Self {
        Self {
            lat: value.lat.to_f64().unwrap_or_default(),
            lng: value.lng.to_f64().unwrap_or_default(),
        }
    }
}
