//! REST API routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;
use fuelopt_core::{
    planner, projector, Feasibility, FuelStop, PlannerParams, PlannerStrategy, ProjectorConfig,
    Route, RoutePoint, Station, TripSummary,
};

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/trips/optimize", post(optimize_trip))
        .route("/v1/trips/plan", post(plan_trip))
        .route("/v1/stations/nearby", get(nearby_stations))
        .route("/v1/stations/cheapest", post(cheapest_stations))
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    /// Trip origin, free text (e.g. "Denver, CO")
    pub start: String,
    /// Trip destination, free text
    pub end: String,
    #[serde(default)]
    pub params: Option<PlannerParams>,
    #[serde(default)]
    pub strategy: Option<PlannerStrategy>,
    /// Include the decoded route points in the response (for map drawing)
    #[serde(default)]
    pub include_points: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// A route obtained elsewhere; the server only runs the core against it
    pub route: Route,
    #[serde(default)]
    pub params: Option<PlannerParams>,
    #[serde(default)]
    pub strategy: Option<PlannerStrategy>,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub total_distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<RoutePoint>>,
}

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub success: bool,
    pub route: RouteSummary,
    pub fuel_stops: Vec<FuelStop>,
    pub summary: TripSummary,
    pub feasibility: Feasibility,
    pub planned_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    /// Search radius in miles, default 5, capped at 50
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CheapestRequest {
    /// Route points to search around
    pub points: Vec<RoutePoint>,
    pub radius: Option<f64>,
    /// Maximum stations to return, default 5
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NearbyStation {
    pub station: Station,
    /// Miles from the query point
    pub distance: f64,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: &str, field: Option<&str>) -> ApiError {
    let mut payload = json!({ "error": message });
    if let Some(field) = field {
        payload["field"] = serde_json::Value::String(field.to_string());
    }
    (StatusCode::BAD_REQUEST, Json(payload))
}

// === Handlers ===

/// Geocode both endpoints, fetch the driving route, and plan fuel stops.
async fn optimize_trip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<TripResponse>, ApiError> {
    if req.start.trim().is_empty() || req.end.trim().is_empty() {
        return Err(bad_request("start and end locations required", None));
    }

    let route = state.ors().route(&req.start, &req.end).await.map_err(|err| {
        tracing::error!("Routing provider failed: {:#}", err);
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": err.to_string() })),
        )
    })?;

    let include_points = req.include_points.unwrap_or(true);
    let response = run_pipeline(&state, route, req.params, req.strategy, include_points)?;
    Ok(Json(response))
}

/// Plan fuel stops for a route the caller already has.
async fn plan_trip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<TripResponse>, ApiError> {
    let response = run_pipeline(&state, req.route, req.params, req.strategy, false)?;
    Ok(Json(response))
}

/// Project, plan, and cost a route against the station catalog.
fn run_pipeline(
    state: &AppState,
    route: Route,
    params: Option<PlannerParams>,
    strategy: Option<PlannerStrategy>,
    include_points: bool,
) -> Result<TripResponse, ApiError> {
    if route.points.is_empty() {
        return Err(bad_request(
            "route must contain at least one point",
            Some("route.points"),
        ));
    }
    if !route.total_distance.is_finite() || route.total_distance <= 0.0 {
        return Err(bad_request(
            "route total_distance must be a positive number of miles",
            Some("route.total_distance"),
        ));
    }

    let params = params.unwrap_or_else(|| state.config().planner_params());
    let strategy = strategy.unwrap_or_default();

    let route_stations =
        projector::project_route_stations(state.index(), &route, &ProjectorConfig::default());
    let trip = planner::plan_trip(&route_stations, route.total_distance, &params, strategy)
        .map_err(|err| bad_request(&err.to_string(), Some("params")))?;

    tracing::info!(
        "Planned {} stops over {:.0} miles ({} candidate stations)",
        trip.stops.len(),
        route.total_distance,
        route_stations.len()
    );

    Ok(TripResponse {
        success: true,
        route: RouteSummary {
            total_distance: route.total_distance,
            points: if include_points { Some(route.points) } else { None },
        },
        fuel_stops: trip.stops,
        summary: trip.summary,
        feasibility: trip.feasibility,
        planned_at: Utc::now(),
    })
}

fn validate_query_point(lat: f64, lon: f64) -> Result<(), ApiError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(bad_request("Latitude out of range", Some("lat")));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(bad_request("Longitude out of range", Some("lon")));
    }
    Ok(())
}

fn validate_radius(radius: Option<f64>) -> Result<f64, ApiError> {
    let radius = radius.unwrap_or(5.0);
    if !radius.is_finite() || radius <= 0.0 || radius > 50.0 {
        return Err(bad_request(
            "radius must be in (0, 50] miles",
            Some("radius"),
        ));
    }
    Ok(radius)
}

/// Stations within a radius of a point, nearest first.
async fn nearby_stations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyStation>>, ApiError> {
    validate_query_point(query.lat, query.lon)?;
    let radius = validate_radius(query.radius)?;

    let mut hits = state.index().nearby(query.lat, query.lon, radius);
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(Json(collect_stations(&state, hits)))
}

/// Cheapest stations near a set of route points, price first with distance
/// breaking ties. A station near several points counts once, at its closest
/// approach.
async fn cheapest_stations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheapestRequest>,
) -> Result<Json<Vec<NearbyStation>>, ApiError> {
    if req.points.is_empty() {
        return Err(bad_request("at least one point required", Some("points")));
    }
    for point in &req.points {
        validate_query_point(point.lat, point.lon)?;
    }
    let radius = validate_radius(req.radius)?;
    let limit = req.limit.unwrap_or(5).min(50);

    let mut hits = state.index().near_route_points(&req.points, radius);
    let stations = state.index().stations();
    hits.sort_by(|a, b| {
        stations[a.0]
            .price
            .total_cmp(&stations[b.0].price)
            .then(a.1.total_cmp(&b.1))
    });
    hits.truncate(limit);

    Ok(Json(collect_stations(&state, hits)))
}

fn collect_stations(state: &AppState, hits: Vec<(usize, f64)>) -> Vec<NearbyStation> {
    hits.into_iter()
        .map(|(idx, distance)| NearbyStation {
            station: state.index().stations()[idx].clone(),
            distance,
        })
        .collect()
}
