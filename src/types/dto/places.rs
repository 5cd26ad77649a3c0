use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteParams {
    pub input: String,
}

/// What the frontend posts back when a suggestion is picked. A missing
/// place id means the field held free-typed text with no resolved place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSelection {
    pub place_id: Option<String>,
}
