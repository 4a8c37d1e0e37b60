use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router, error_handling::HandleErrorLayer, extract::State};
use geo::Point;
use serde::{Deserialize, Serialize};
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use gravelo_core::routing::build_routes;

use crate::error::ApiError;
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub routes: Vec<RouteBody>,
    /// Echo of the requested origin and destination
    pub waypoints: Vec<WaypointBody>,
}

#[derive(Debug, Serialize)]
pub struct RouteBody {
    /// Route geometry as a precision-6 polyline
    pub geometry: String,
    /// Estimated riding time in seconds
    pub duration: f64,
    /// Total distance in meters
    pub distance: f64,
    pub metrics: MetricsBody,
}

#[derive(Debug, Serialize)]
pub struct MetricsBody {
    #[serde(rename = "surfaceMetrics")]
    pub surface_metrics: HashMap<String, f64>,
    #[serde(rename = "highwayMetrics")]
    pub highway_metrics: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct WaypointBody {
    /// `[longitude, latitude]`, GeoJSON axis order
    pub location: [f64; 2],
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes", post(route_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|_: BoxError| async {
                    StatusCode::REQUEST_TIMEOUT
                }))
                .timeout(REQUEST_TIMEOUT),
        )
        .with_state(state)
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}

/// Builds alternative routes between the requested origin and
/// destination and assembles the client payload.
async fn route_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let origin = validated_point(&request.origin, "origin")?;
    let destination = validated_point(&request.destination, "destination")?;

    let network = state.tiles.resolve(&origin, &destination)?;
    let (start, _) = network
        .nearest_node(&origin)
        .ok_or(ApiError::RegionUnsupported)?;
    let (end, _) = network
        .nearest_node(&destination)
        .ok_or(ApiError::RegionUnsupported)?;

    let route_set = build_routes(network, start, end, &state.routing)?;
    tracing::debug!(
        routes = route_set.len(),
        outcome = ?route_set.outcome,
        "built candidate routes"
    );

    let mut routes = Vec::with_capacity(route_set.len());
    for route in &route_set.routes {
        let metrics = route.metrics(network)?;
        routes.push(RouteBody {
            geometry: route.encoded_polyline(network)?,
            duration: metrics.duration_s,
            distance: metrics.distance_m,
            metrics: MetricsBody {
                surface_metrics: metrics.surface_composition.into_iter().collect(),
                highway_metrics: metrics.highway_composition.into_iter().collect(),
            },
        });
    }

    Ok(Json(RouteResponse {
        routes,
        waypoints: vec![
            WaypointBody {
                location: [request.origin.longitude, request.origin.latitude],
            },
            WaypointBody {
                location: [request.destination.longitude, request.destination.latitude],
            },
        ],
    }))
}

fn validated_point(waypoint: &Waypoint, field: &str) -> Result<Point<f64>, ApiError> {
    let valid = waypoint.latitude.is_finite()
        && waypoint.longitude.is_finite()
        && waypoint.latitude.abs() <= 90.0
        && waypoint.longitude.abs() <= 180.0;
    if !valid {
        return Err(ApiError::Validation(format!(
            "{field} coordinates ({}, {}) are out of range",
            waypoint.latitude, waypoint.longitude
        )));
    }
    Ok(Point::new(waypoint.longitude, waypoint.latitude))
}
