use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use weather_core::{Location, WeatherProvider};

pub const FETCH_FAILED: &str = "Failed to fetch weather data";

#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    location: Option<String>,
}

pub fn router(provider: Arc<dyn WeatherProvider>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/weather", get(weather))
        .with_state(AppState { provider })
        .layer(cors)
}

async fn root() -> &'static str {
    "Welcome to the Weather API!"
}

fn fetch_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": FETCH_FAILED })),
    )
        .into_response()
}

async fn weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::error!("Rejected weather query string: {rejection}");
            return fetch_failed();
        }
    };

    let raw = query.location.unwrap_or_default();
    tracing::info!(location = %raw, "Weather requested");

    let result = match Location::parse(&raw) {
        Ok(location) => state.provider.fetch_weather(&location).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(bundle) => Json(bundle).into_response(),
        Err(err) => {
            tracing::error!(location = %raw, "Error fetching weather data: {err}");
            fetch_failed()
        }
    }
}
