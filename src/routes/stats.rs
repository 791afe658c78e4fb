//! Bucketed statistics endpoints.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, response::Response,
    routing::get, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{bad_request, request_rng, ApiQuery, AppState, ReadingsQuery};
use crate::insights;
use crate::models::{ReadingOrigin, Snapshot};
use crate::source::{self, Fallback, UpstreamClient};
use crate::stats::{self, BucketAggregate};
use crate::{Config, Reading, ReferenceInstant};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/stats/hourly", get(hourly))
        .route("/api/stats/daily", get(daily))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    source: ReadingOrigin,
    reading_count: usize,
    buckets: Vec<BucketAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ModeQuery {
    mode: Option<String>,
}

async fn history(
    client: &UpstreamClient,
    config: &Config,
    params: &ReadingsQuery,
    reference: &ReferenceInstant,
) -> Snapshot {
    // ---
    let mut rng = request_rng(config);
    source::fetch_or_synthesize(
        client,
        params.device_id(config),
        params.limit_or(config.history_limit),
        Fallback::Historical,
        reference,
        &mut rng,
    )
    .await
}

async fn hourly(
    ApiQuery(params): ApiQuery<ReadingsQuery>,
    State((client, config)): State<AppState>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/stats/hourly - device {}", params.device_id(&config));

    let reference = ReferenceInstant::now();
    let snapshot = history(&client, &config, &params, &reference).await;
    let buckets = stats::compute_hourly_aggregates(&snapshot.readings, &reference);
    let insights = insights::hourly_insights(&buckets);

    (
        StatusCode::OK,
        Json(StatsResponse {
            source: snapshot.origin,
            reading_count: snapshot.readings.len(),
            buckets,
            insights: Some(insights),
        }),
    )
}

async fn daily(
    ApiQuery(params): ApiQuery<ReadingsQuery>,
    ApiQuery(mode): ApiQuery<ModeQuery>,
    State((client, config)): State<AppState>,
) -> Response {
    // ---
    info!(
        "GET /api/stats/daily - device {}, mode {:?}",
        params.device_id(&config),
        mode.mode
    );

    let compute: fn(&[Reading], &ReferenceInstant) -> Vec<BucketAggregate> = match mode.mode.as_deref() {
        None | Some("weekday") => stats::compute_weekday_aggregates,
        Some("offset") => stats::compute_day_offset_aggregates,
        Some(other) => {
            return bad_request(format!(
                "unsupported mode '{other}', expected 'weekday' or 'offset'"
            ))
        }
    };

    let reference = ReferenceInstant::now();
    let snapshot = history(&client, &config, &params, &reference).await;
    let buckets = compute(&snapshot.readings, &reference);

    (
        StatusCode::OK,
        Json(StatsResponse {
            source: snapshot.origin,
            reading_count: snapshot.readings.len(),
            buckets,
            insights: None,
        }),
    )
        .into_response()
}
