//! Multi-day forecast endpoint.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, response::Response, routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{bad_request, request_rng, ApiQuery, AppState, ReadingsQuery};
use crate::forecast::{self, Hotspot, Horizon, Prediction};
use crate::insights;
use crate::models::ReadingOrigin;
use crate::source::{self, Fallback};
use crate::ReferenceInstant;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/forecast", get(handler))
}

#[derive(Debug, Deserialize)]
struct HorizonQuery {
    days: Option<u32>,
}

#[derive(Serialize)]
struct ForecastResponse {
    source: ReadingOrigin,
    predictions: Vec<Prediction>,
    hotspots: Vec<Hotspot>,
    insights: Vec<String>,
}

async fn handler(
    ApiQuery(params): ApiQuery<ReadingsQuery>,
    ApiQuery(horizon): ApiQuery<HorizonQuery>,
    State((client, config)): State<AppState>,
) -> Response {
    // ---
    let horizon = match horizon.days.map(Horizon::try_from).transpose() {
        Ok(horizon) => horizon.unwrap_or_default(),
        Err(message) => return bad_request(message),
    };
    let device_id = params.device_id(&config);
    info!("GET /api/forecast - device {}, {} days", device_id, horizon.days());

    let reference = ReferenceInstant::now();
    let mut rng = request_rng(&config);
    let snapshot = source::fetch_or_synthesize(
        &client,
        device_id,
        params.limit_or(config.history_limit),
        Fallback::Historical,
        &reference,
        &mut rng,
    )
    .await;

    let result = forecast::forecast(&snapshot.readings, horizon, &reference, &mut rng);
    let insights = insights::forecast_insights(&result);
    debug!(
        "GET /api/forecast - {} predictions, {} hotspots",
        result.predictions.len(),
        result.hotspots.len()
    );

    (
        StatusCode::OK,
        Json(ForecastResponse {
            source: snapshot.origin,
            predictions: result.predictions,
            hotspots: result.hotspots,
            insights,
        }),
    )
        .into_response()
}
