use std::net::SocketAddr;

use anyhow::Result;
use axum::{routing::get, Json, Router};
use chrono::{Duration, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use skd_weather::{routes, source::UpstreamClient, Config};

// ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadingsResponse {
    source: String,
    body: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    source: String,
    reading_count: usize,
    buckets: Vec<Value>,
    insights: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    source: String,
    predictions: Vec<Value>,
    hotspots: Vec<Value>,
    insights: Vec<String>,
}

fn config(api_url: String) -> Config {
    // ---
    Config {
        api_url,
        api_key: None,
        default_device_id: "test-device".to_string(),
        api_timeout_secs: 1,
        api_max_attempts: 1,
        history_limit: 1000,
        forecast_seed: Some(7),
        cors_origin: "http://localhost:8080".to_string(),
        port: 0,
    }
}

async fn serve(app: Router) -> Result<SocketAddr> {
    // ---
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(addr)
}

/// Service wired to an upstream that refuses connections, so every endpoint
/// falls back to synthetic readings.
async fn spawn_offline() -> Result<String> {
    // ---
    let cfg = config("http://127.0.0.1:9".to_string());
    let client = UpstreamClient::from_config(&cfg)?;
    let addr = serve(routes::router(client, cfg)).await?;
    Ok(format!("http://{addr}"))
}

/// Fake upstream answering with two valid readings and one malformed item.
async fn spawn_upstream() -> Result<String> {
    // ---
    let now = Utc::now();
    let earlier = now - Duration::minutes(15);
    let body = json!({
        "body": [
            {
                "id": "r-older",
                "device_id": "station-1",
                "measured_at": earlier.to_rfc3339(),
                "data": { "temperature": 18.0, "humidity": 70.0, "pressure": 101000.0, "rain": 0.0 }
            },
            { "id": "broken", "device_id": "station-1" },
            {
                "id": "r-newer",
                "device_id": "station-1",
                "measured_at": now.to_rfc3339(),
                "data": { "temperature": 20.0, "humidity": 65.0, "pressure": 101200.0, "rain": 0.5 }
            }
        ]
    });
    let app = Router::new().route(
        "/{device}/readings",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let addr = serve(app).await?;
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let body: Value = Client::new()
        .get(format!("{base}/health"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    Ok(())
}

#[tokio::test]
async fn weather_falls_back_to_synthetic() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let resp: ReadingsResponse = Client::new()
        .get(format!("{base}/api/weather"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(resp.source, "synthetic");
    assert!(!resp.body.is_empty(), "synthetic fallback should not be empty");
    assert_eq!(resp.body[0]["deviceId"], "test-device");
    Ok(())
}

#[tokio::test]
async fn weather_uses_live_readings_when_upstream_answers() -> Result<()> {
    // ---
    let upstream = spawn_upstream().await?;
    let cfg = config(upstream);
    let client = UpstreamClient::from_config(&cfg)?;
    let base = format!("http://{}", serve(routes::router(client, cfg)).await?);

    let resp: ReadingsResponse = Client::new()
        .get(format!("{base}/api/weather?deviceId=station-1"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(resp.source, "live");
    assert_eq!(resp.body.len(), 2, "malformed item should be skipped");
    assert_eq!(resp.body[0]["id"], "r-newer");

    let latest: Value = Client::new()
        .get(format!("{base}/api/weather/latest?deviceId=station-1"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(latest["source"], "live");
    assert_eq!(latest["summary"]["temperature"]["value"], 20.0);
    Ok(())
}

#[tokio::test]
async fn hourly_stats_have_24_buckets() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let resp: StatsResponse = Client::new()
        .get(format!("{base}/api/stats/hourly"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(resp.source, "synthetic");
    assert_eq!(resp.buckets.len(), 24);
    assert!(resp.insights.is_some());

    let total: u64 = resp
        .buckets
        .iter()
        .map(|b| b["temperature"]["count"].as_u64().unwrap_or(0))
        .sum();
    assert_eq!(total as usize, resp.reading_count);
    Ok(())
}

#[tokio::test]
async fn daily_stats_modes() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let client = Client::new();

    let weekday: StatsResponse = client
        .get(format!("{base}/api/stats/daily"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(weekday.buckets.len(), 7);
    assert!(weekday.insights.is_none());

    let offset: StatsResponse = client
        .get(format!("{base}/api/stats/daily?mode=offset"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(offset.buckets.len(), 7);

    let bad = client
        .get(format!("{base}/api/stats/daily?mode=monthly"))
        .send()
        .await?;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn forecast_covers_requested_horizon() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let resp: ForecastResponse = Client::new()
        .get(format!("{base}/api/forecast?days=14"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(resp.source, "synthetic");
    assert_eq!(resp.predictions.len(), 14);
    assert!(!resp.insights.is_empty());
    assert!(resp.hotspots.iter().all(|h| h["type"].is_string()));

    let dates: Vec<NaiveDate> = resp
        .predictions
        .iter()
        .map(|p| serde_json::from_value(p["date"].clone()))
        .collect::<Result<_, _>>()?;
    for pair in dates.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::days(1));
    }
    Ok(())
}

#[tokio::test]
async fn forecast_rejects_unsupported_horizon() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let resp = Client::new()
        .get(format!("{base}/api/forecast?days=10"))
        .send()
        .await?;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn locations_are_listed_and_resolved() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let client = Client::new();

    let list: Vec<Value> = client
        .get(format!("{base}/api/locations"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(list.len(), 2);

    let id = list[0]["id"].as_str().unwrap_or_default().to_string();
    let one: Value = client
        .get(format!("{base}/api/locations/{id}"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(one["id"], id.as_str());

    let missing = client
        .get(format!("{base}/api/locations/nowhere"))
        .send()
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("nowhere"));
    Ok(())
}

#[tokio::test]
async fn malformed_query_values_return_json_errors() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let client = Client::new();

    for path in ["/api/forecast?days=abc", "/api/stats/hourly?limit=-5", "/api/weather?limit=many"] {
        let resp = client.get(format!("{base}{path}")).send().await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{path}");

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"), "{path}: {content_type}");

        let body: Value = resp.json().await?;
        assert!(body["error"].is_string(), "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_dashboard_origin() -> Result<()> {
    // ---
    let base = spawn_offline().await?;
    let resp = Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/api/weather"))
        .header("Origin", "http://localhost:8080")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await?;

    assert!(resp.status().is_success());
    let allowed = resp
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allowed, Some("http://localhost:8080"));

    let methods = resp
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(methods.contains("GET"), "{methods}");
    Ok(())
}
