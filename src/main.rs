mod clients;
mod directions;
mod net;
mod places;
mod route_geo;
mod trip;
mod types;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use clients::{GMAPS, GOOGLE_API_KEY, REQWEST};
use directions::fetch_route;
use google_maps::GoogleMapsClient;
use net::response::{ResponseError, Result};
use places::autocomplete_predictions;
use route_geo::IntoRouteFeatureCollection;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, instrument, warn};
use trip::{apply_place_selection, current_trip, get_trip_state, init_trip_state};
use types::dto::map::MapView;
use types::dto::places::{AutocompleteParams, PlaceSelection};
use types::dto::trip::TripDto;
use types::places::Prediction;
use types::trip::TripEnd;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    init_google_maps()?;
    init_reqwest_client()?;
    init_trip_state();

    // build our application with a route
    let app = Router::new()
        .route("/places/autocomplete", get(autocomplete_places))
        .route("/trip", get(get_trip))
        .route("/trip", delete(delete_trip))
        .route("/trip/:end/place", post(select_place))
        .route("/trip/route", post(request_route))
        .route("/map", get(get_map))
        .layer(CorsLayer::permissive());

    info!("Running on port 3000");

    // run our app with hyper, listening globally on port 3000
    axum::Server::bind(&"0.0.0.0:3000".parse().unwrap())
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

fn init_google_maps() -> color_eyre::Result<()> {
    let google_api_key = std::env::var("WAYPOINT_GOOGLE_API_KEY")?;
    let google_maps_client = GoogleMapsClient::new(&google_api_key);
    GMAPS.set(google_maps_client).unwrap();
    GOOGLE_API_KEY.set(google_api_key).unwrap();
    Ok(())
}

fn init_reqwest_client() -> color_eyre::Result<()> {
    let client = reqwest::Client::new();
    REQWEST.set(client).unwrap();
    Ok(())
}

async fn autocomplete_places(
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<Vec<Prediction>>> {
    if params.input.is_empty() {
        debug!("empty autocomplete input, skipping lookup");
        return Ok(Json(Vec::new()));
    }
    Ok(Json(autocomplete_predictions(&params.input).await?))
}

#[instrument]
async fn select_place(
    Path(end): Path<TripEnd>,
    Json(selection): Json<PlaceSelection>,
) -> Result<Json<TripDto>> {
    let trip = apply_place_selection(end, selection).await?;
    Ok(Json(TripDto::from_trip(&trip)))
}

#[instrument]
#[axum::debug_handler]
async fn request_route() -> Result<Json<TripDto>> {
    let query = get_trip_state()?
        .lock()
        .await
        .route_query()
        .ok_or(ResponseError::with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter both origin and destination",
        ))?;

    // The state lock is not held while the request is in flight: overlapping
    // requests run independently and the last response to land is kept.
    match fetch_route(query).await {
        Ok(route) => {
            let mut trip = get_trip_state()?.lock().await;
            trip.store_route(route);
            Ok(Json(TripDto::from_trip(&trip)))
        }
        Err(err) => {
            error!("error fetching directions: {err}");
            Ok(Json(TripDto::from_trip(&current_trip().await?)))
        }
    }
}

async fn get_trip() -> Result<Json<TripDto>> {
    Ok(Json(TripDto::from_trip(&current_trip().await?)))
}

async fn delete_trip() -> Result<Json<TripDto>> {
    let mut trip = get_trip_state()?.lock().await;
    trip.clear();
    Ok(Json(TripDto::from_trip(&trip)))
}

async fn get_map() -> Result<Json<MapView>> {
    let trip = current_trip().await?;
    let route = match &trip.route {
        Some(payload) => match payload.into_route_feature_collection() {
            Ok(collection) => Some(collection),
            Err(err) => {
                warn!("stored directions payload has no renderable route: {err}");
                None
            }
        },
        None => None,
    };
    Ok(Json(MapView::with_route(route)))
}
