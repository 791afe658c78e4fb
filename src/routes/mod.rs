//! HTTP gateway: merges the endpoint subrouters and owns the helpers they share.

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    response::Response,
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::source::UpstreamClient;
use crate::Config;

mod forecast;
mod health;
mod locations;
mod stats;
mod weather;

// ---

/// Shared state handed to every handler.
pub type AppState = (UpstreamClient, Config);

/// Upper bound on readings requested from the upstream per call.
pub const MAX_LIMIT: u32 = 5000;

pub fn router(client: UpstreamClient, config: Config) -> Router {
    // ---
    let cors = cors_layer(&config);
    Router::new()
        .merge(weather::router())
        .merge(stats::router())
        .merge(forecast::router())
        .merge(locations::router())
        .merge(health::router())
        .layer(cors)
        .with_state((client, config))
}

/// CORS for the dashboard frontend: read-only methods from one origin.
fn cors_layer(config: &Config) -> CorsLayer {
    // ---
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match HeaderValue::from_str(&config.cors_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            warn!("Ignoring CORS_ORIGIN {:?}: {}", config.cors_origin, e);
            layer
        }
    }
}

// ---

/// Query parameters common to every reading-backed endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ReadingsQuery {
    #[serde(rename = "deviceId", alias = "device_id")]
    device_id: Option<String>,
    limit: Option<u32>,
}

impl ReadingsQuery {
    // ---
    pub fn device_id<'a>(&'a self, config: &'a Config) -> &'a str {
        self.device_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&config.default_device_id)
    }

    /// Requested limit, or `default`, clamped to `1..=MAX_LIMIT`.
    pub fn limit_or(&self, default: u32) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT) as usize
    }
}

/// Query-string extractor whose rejection is a JSON `400` like every other
/// client error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // ---
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_request(rejection.body_text())),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    // ---
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

/// Jitter source for one request: seeded when configured, else from entropy.
pub fn request_rng(config: &Config) -> StdRng {
    // ---
    match config.forecast_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
