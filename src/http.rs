//! HTTP endpoints.
//!
//! - `GET /iso/?lat&lon&mode&range` - isochrones for one rider profile
//! - `GET /reach/?lat&lon&range` - isochrones for both rider presets
//! - `GET /facilities/?lat&lon` - healthcare facilities around the point
//! - `GET /health` - liveness
//!
//! Every response is JSON. Failures are `{"error": "..."}` with 400 for bad
//! query parameters and 500 for provider failures.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use geojson::FeatureCollection;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::{ReachError, UpstreamError, ValidationError};
use crate::geo::Coordinate;
use crate::profile::{RIDER_PRESETS, RiderProfile, TimeRange};
use crate::reach;
use crate::traits::{FacilityProvider, RoutingProvider};

/// Shared handler state: the two upstream providers.
#[derive(Clone)]
pub struct AppState {
    routing: Arc<dyn RoutingProvider>,
    facilities: Arc<dyn FacilityProvider>,
}

impl AppState {
    pub fn new(routing: Arc<dyn RoutingProvider>, facilities: Arc<dyn FacilityProvider>) -> Self {
        Self {
            routing,
            facilities,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/iso", get(isochrones_handler))
        .route("/iso/", get(isochrones_handler))
        .route("/reach", get(ride_options_handler))
        .route("/reach/", get(ride_options_handler))
        .route("/facilities", get(facilities_handler))
        .route("/facilities/", get(facilities_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Parsed `/iso/` query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsochroneQuery {
    pub location: Coordinate,
    pub profile: RiderProfile,
    pub range: TimeRange,
}

impl IsochroneQuery {
    pub fn parse(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let location = parse_location(params)?;
        let profile = match params.get("mode") {
            Some(mode) => mode.trim().parse()?,
            None => RiderProfile::default(),
        };
        let range = parse_range(params)?;

        Ok(Self {
            location,
            profile,
            range,
        })
    }
}

/// Required `lat` and `lon`.
pub fn parse_location(params: &HashMap<String, String>) -> Result<Coordinate, ValidationError> {
    let lat = number(params, "lat")?.ok_or(ValidationError::Missing("lat"))?;
    let lon = number(params, "lon")?.ok_or(ValidationError::Missing("lon"))?;
    Coordinate::new(lat, lon)
}

/// Optional `range`, defaulting to one hour.
pub fn parse_range(params: &HashMap<String, String>) -> Result<TimeRange, ValidationError> {
    match number(params, "range")? {
        Some(secs) => TimeRange::from_secs(secs),
        None => Ok(TimeRange::default()),
    }
}

fn number(
    params: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<f64>, ValidationError> {
    params
        .get(name)
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::NotNumeric {
                    param: name,
                    value: raw.clone(),
                })
        })
        .transpose()
}

async fn isochrones_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let result = match IsochroneQuery::parse(&params) {
        Ok(query) => {
            let routing = Arc::clone(&state.routing);
            run_blocking(move || {
                reach::fetch_isochrones(routing.as_ref(), query.location, query.profile, query.range)
            })
            .await
        }
        Err(err) => Err(err.into()),
    };

    respond("isochrones", result)
}

async fn ride_options_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let parsed = parse_location(&params).and_then(|location| Ok((location, parse_range(&params)?)));

    let result = match parsed {
        Ok((location, range)) => {
            let routing = Arc::clone(&state.routing);
            run_blocking(move || {
                reach::fetch_ride_options(routing.as_ref(), location, &RIDER_PRESETS, range)
            })
            .await
        }
        Err(err) => Err(err.into()),
    };

    respond("ride_options", result)
}

async fn facilities_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let result = match parse_location(&params) {
        Ok(location) => {
            let facilities = Arc::clone(&state.facilities);
            run_blocking(move || reach::fetch_facilities(facilities.as_ref(), location)).await
        }
        Err(err) => Err(err.into()),
    };

    respond("facilities", result)
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// Provider clients block, so they run off the async worker threads. A
/// panic in the worker comes back as [`ReachError::Task`].
async fn run_blocking<F>(work: F) -> Result<FeatureCollection, ReachError>
where
    F: FnOnce() -> Result<FeatureCollection, UpstreamError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| ReachError::Task(err.to_string()))?
        .map_err(ReachError::from)
}

fn respond(endpoint: &'static str, result: Result<FeatureCollection, ReachError>) -> Response {
    match result {
        Ok(collection) => (StatusCode::OK, Json(collection)).into_response(),
        Err(err) => {
            match &err {
                ReachError::Validation(_) => {
                    warn!(endpoint, error = %err, "rejected request")
                }
                _ => error!(endpoint, error = %err, detail = ?err, "request failed"),
            }
            err.into_response()
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ReachError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
