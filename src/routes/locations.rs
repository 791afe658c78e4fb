//! Station catalogue endpoints.

use axum::{
    extract::Path, http::StatusCode, response::IntoResponse, response::Response, routing::get,
    Json, Router,
};
use tracing::info;

use super::error_response;
use crate::locations::{self, Location};

// ---

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/locations", get(list))
        .route("/api/locations/{id}", get(show))
}

async fn list() -> Json<&'static [Location]> {
    Json(locations::LOCATIONS)
}

async fn show(Path(id): Path<String>) -> Response {
    // ---
    info!("GET /api/locations/{}", id);
    match locations::by_id(&id) {
        Some(location) => (StatusCode::OK, Json(location)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("unknown location '{id}'")),
    }
}
