use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use super::geom::LatLngDto;

//The frame never moves: the map stays on the default center and zoom even
//once a route is drawn.
pub const MAP_CENTER: LatLngDto = LatLngDto {
    lat: 35.6895,
    lng: 139.6917,
};
pub const MAP_ZOOM: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLngDto,
    pub zoom: u8,
    pub route: Option<FeatureCollection>,
}

impl MapView {
    pub fn with_route(route: Option<FeatureCollection>) -> Self {
        Self {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            route,
        }
    }
}
