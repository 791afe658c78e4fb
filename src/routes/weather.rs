//! Raw reading endpoints: current window, historical window, latest summary.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::{debug, info};

use super::{request_rng, ApiQuery, AppState, ReadingsQuery};
use crate::models::ReadingOrigin;
use crate::source::{self, Fallback};
use crate::summary::{self, LatestSummary};
use crate::{ReferenceInstant, Reading};

// ---

/// Readings fetched for the live dashboard when no limit is given.
const DEFAULT_LIVE_LIMIT: u32 = 100;

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/weather", get(current))
        .route("/api/weather/historical", get(historical))
        .route("/api/weather/latest", get(latest))
}

#[derive(Serialize)]
struct ReadingsResponse {
    source: ReadingOrigin,
    body: Vec<Reading>,
}

#[derive(Serialize)]
struct LatestResponse {
    source: ReadingOrigin,
    summary: Option<LatestSummary>,
}

async fn current(
    ApiQuery(params): ApiQuery<ReadingsQuery>,
    State((client, config)): State<AppState>,
) -> impl IntoResponse {
    // ---
    let device_id = params.device_id(&config);
    info!("GET /api/weather - device {}", device_id);

    let mut rng = request_rng(&config);
    let snapshot = source::fetch_or_synthesize(
        &client,
        device_id,
        params.limit_or(DEFAULT_LIVE_LIMIT),
        Fallback::Recent,
        &ReferenceInstant::now(),
        &mut rng,
    )
    .await;

    debug!("GET /api/weather - returning {} readings", snapshot.readings.len());
    (
        StatusCode::OK,
        Json(ReadingsResponse {
            source: snapshot.origin,
            body: snapshot.readings,
        }),
    )
}

async fn historical(
    ApiQuery(params): ApiQuery<ReadingsQuery>,
    State((client, config)): State<AppState>,
) -> impl IntoResponse {
    // ---
    let device_id = params.device_id(&config);
    let limit = params.limit_or(config.history_limit);
    info!("GET /api/weather/historical - device {}, limit {}", device_id, limit);

    let mut rng = request_rng(&config);
    let snapshot = source::fetch_or_synthesize(
        &client,
        device_id,
        limit,
        Fallback::Historical,
        &ReferenceInstant::now(),
        &mut rng,
    )
    .await;

    (
        StatusCode::OK,
        Json(ReadingsResponse {
            source: snapshot.origin,
            body: snapshot.readings,
        }),
    )
}

async fn latest(
    ApiQuery(params): ApiQuery<ReadingsQuery>,
    State((client, config)): State<AppState>,
) -> impl IntoResponse {
    // ---
    let device_id = params.device_id(&config);
    info!("GET /api/weather/latest - device {}", device_id);

    // Two readings are enough for the change indicators
    let mut rng = request_rng(&config);
    let snapshot = source::fetch_or_synthesize(
        &client,
        device_id,
        2,
        Fallback::Recent,
        &ReferenceInstant::now(),
        &mut rng,
    )
    .await;

    (
        StatusCode::OK,
        Json(LatestResponse {
            source: snapshot.origin,
            summary: summary::latest_summary(&snapshot.readings),
        }),
    )
}
