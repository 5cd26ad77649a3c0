use serde::{Deserialize, Serialize};

//The slice of the Places web service responses this server reads. Everything
//else in the payloads is ignored on deserialization.

#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub description: String,
    pub place_id: Option<String>,
    pub structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    pub secondary_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetails>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetails {
    pub geometry: Option<PlaceGeometry>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceGeometry {
    pub location: PlaceLocation,
}

//Free-typed text never resolves this far: a location is only ever produced
//for a place the autocomplete service itself returned.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}
