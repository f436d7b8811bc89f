use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::location_resolver::LocationWeatherResolver;
use crate::models::{LocationCoordinates, ResolutionResult};

/// Largest number of locations accepted by the batch endpoint
pub const MAX_BATCH_SIZE: usize = 50;

pub type SharedResolver = Arc<LocationWeatherResolver>;

#[derive(Serialize, Deserialize)]
pub struct WeatherQuery {
    pub location: String,
}

#[derive(Serialize, Deserialize)]
pub struct BatchRequest {
    pub locations: Vec<String>,
}

pub fn router(resolver: SharedResolver) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather", get(get_weather))
        .route("/weather/coordinates", get(get_coordinates))
        .route("/weather/batch", post(resolve_batch))
        .with_state(resolver)
}

async fn health() -> &'static str {
    "OK"
}

async fn get_weather(
    State(resolver): State<SharedResolver>,
    Query(query): Query<WeatherQuery>,
) -> Json<ResolutionResult> {
    Json(resolver.resolve(&query.location).await)
}

async fn get_coordinates(
    State(resolver): State<SharedResolver>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<LocationCoordinates>, StatusCode> {
    resolver
        .resolve_coordinates_only(&query.location)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn resolve_batch(
    State(resolver): State<SharedResolver>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<Vec<ResolutionResult>>, StatusCode> {
    if payload.locations.len() > MAX_BATCH_SIZE {
        tracing::warn!(
            "Rejecting batch of {} locations (max {})",
            payload.locations.len(),
            MAX_BATCH_SIZE
        );
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }

    Ok(Json(resolver.resolve_many(&payload.locations).await))
}
