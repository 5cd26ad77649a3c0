use color_eyre::eyre;
use color_eyre::eyre::{eyre, Result};
use geo::{BoundingRect, VincentyDistance};
use geo_types::{CoordFloat, CoordNum, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;

//Get the bounding box for a geometry as a vector
pub trait BoundingBox<N> {
    fn bounding_box(&self) -> Option<Vec<N>>;
}

impl<T, N> BoundingBox<N> for T
where
    T: BoundingRect<N>,
    N: CoordNum,
{
    fn bounding_box(&self) -> Option<Vec<N>> {
        self.bounding_rect()
            .into()
            .map(|r| vec![r.min().x, r.min().y, r.max().x, r.max().y])
    }
}

/// Length of a line in metres, excluding point pairs with incalculable distance
pub trait Distance<N> {
    fn distance(&self) -> N;
}

impl<N> Distance<N> for LineString<N>
where
    N: std::iter::Sum + CoordFloat,
    Point<N>: VincentyDistance<N>,
{
    fn distance(&self) -> N {
        self.points()
            .collect::<Vec<Point<N>>>()
            .windows(2)
            .filter_map(|p| p[0].vincenty_distance(&p[1]).ok())
            .sum()
    }
}

/// Properties attached to the route overlay feature
#[derive(Serialize, Deserialize)]
pub struct FeatureProperties {
    pub distance: f64,
    pub summary: Option<String>,
}

impl TryInto<JsonObject> for FeatureProperties {
    type Error = eyre::Error;

    fn try_into(self) -> Result<JsonObject, Self::Error> {
        let value = serde_json::to_value(self)?;
        let properties = value
            .as_object()
            .ok_or(eyre!("Couldn't create object for properties"))?;
        Ok(properties.to_owned())
    }
}

/// Decoded path of the first route in a directions payload.
pub fn route_line(payload: &Value) -> Result<LineString> {
    let points = payload
        .get("routes")
        .and_then(|routes| routes.get(0))
        .and_then(|route| route.get("overview_polyline"))
        .and_then(|overview| overview.get("points"))
        .and_then(Value::as_str)
        .ok_or(eyre!("directions payload carries no overview polyline"))?;
    polyline::decode_polyline(points, 5)
        .map_err(|err| eyre!("failed to decode overview polyline: {err}"))
}

pub trait IntoRouteFeatureCollection {
    fn into_route_feature_collection(&self) -> Result<FeatureCollection>;
}

impl IntoRouteFeatureCollection for Value {
    fn into_route_feature_collection(&self) -> Result<FeatureCollection> {
        let line = route_line(self)?;
        let start = line
            .points()
            .next()
            .ok_or(eyre!("decoded route line is empty"))?;
        let end = line
            .points()
            .last()
            .ok_or(eyre!("decoded route line is empty"))?;
        let summary = self
            .get("routes")
            .and_then(|routes| routes.get(0))
            .and_then(|route| route.get("summary"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        let features = vec![
            route_feature(&line, summary)?,
            feature_point(String::from("start"), &start),
            feature_point(String::from("end"), &end),
        ];
        Ok(FeatureCollection {
            bbox: line.bounding_box(),
            features,
            foreign_members: None,
        })
    }
}

fn route_feature(line: &LineString, summary: Option<String>) -> Result<Feature> {
    let bounding_box = line.bounding_box();
    let geometry = Geometry {
        bbox: bounding_box.to_owned(),
        value: geojson::Value::from(line),
        foreign_members: None,
    };
    let distance = line.distance();
    Ok(Feature {
        id: Some(geojson::feature::Id::String(String::from("route"))),
        bbox: bounding_box,
        geometry: Some(geometry),
        properties: Some(FeatureProperties { distance, summary }.try_into()?),
        ..Default::default()
    })
}

fn feature_point(id: String, point: &Point) -> Feature {
    Feature {
        id: Some(geojson::feature::Id::String(id)),
        geometry: Some(Geometry::new(point.into())),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Reference encoding of (38.5, -120.2), (40.7, -120.95), (43.252, -126.453).
    const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn payload() -> Value {
        json!({
            "routes": [{
                "summary": "US-50 W",
                "overview_polyline": {"points": REFERENCE_POLYLINE},
                "legs": []
            }],
            "status": "OK"
        })
    }

    #[test]
    fn route_line_decodes_the_overview_polyline() {
        let line = route_line(&payload()).unwrap();
        let points: Vec<Point> = line.points().collect();
        assert_eq!(points.len(), 3);
        assert!((points[0].y() - 38.5).abs() < 1e-5);
        assert!((points[0].x() - (-120.2)).abs() < 1e-5);
        assert!((points[2].y() - 43.252).abs() < 1e-5);
        assert!((points[2].x() - (-126.453)).abs() < 1e-5);
    }

    #[test]
    fn payload_without_routes_has_no_line() {
        assert!(route_line(&json!({"routes": [], "status": "ZERO_RESULTS"})).is_err());
        assert!(route_line(&json!({})).is_err());
    }

    #[test]
    fn overlay_carries_route_line_and_endpoint_markers() {
        let collection = payload().into_route_feature_collection().unwrap();
        assert_eq!(collection.features.len(), 3);
        assert!(collection.bbox.is_some());

        let ids: Vec<String> = collection
            .features
            .iter()
            .filter_map(|feature| match &feature.id {
                Some(geojson::feature::Id::String(id)) => Some(id.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["route", "start", "end"]);

        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(
            properties.get("summary").and_then(Value::as_str),
            Some("US-50 W")
        );
        assert!(properties.get("distance").and_then(Value::as_f64).unwrap() > 0.0);
    }

    #[test]
    fn overlay_fails_without_a_polyline() {
        let bare = json!({"routes": [{"summary": "US-50 W"}], "status": "OK"});
        assert!(bare.into_route_feature_collection().is_err());
    }

    #[test]
    fn line_length_is_geodesic() {
        // Tokyo Station to Shibuya Station is a touch over six kilometres.
        let line = LineString::from(vec![(139.7671, 35.6812), (139.7016, 35.6580)]);
        let distance = line.distance();
        assert!(distance > 6_000.0 && distance < 7_000.0, "got {distance}");
    }
}
