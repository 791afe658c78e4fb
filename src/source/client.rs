//! HTTP client for the upstream IoT readings API.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use tracing::{debug, warn};

use crate::models::{RawEnvelope, RawReading};
use crate::{Config, Reading};

// ---

/// Pause before retry `n` is `n` times this.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Upstream attempts are never retried more often than this.
pub const MAX_ATTEMPTS: u32 = 3;

/// Thin wrapper around a shared [`reqwest::Client`] bound to one upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    // ---
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    attempts: u32,
}

impl UpstreamClient {
    // ---
    pub fn from_config(config: &Config) -> Result<Self> {
        // ---
        let base_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid upstream URL '{}'", config.api_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Upstream URL '{}' cannot carry a path", config.api_url));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.api_timeout_secs)))
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            attempts: config.api_max_attempts.clamp(1, MAX_ATTEMPTS),
        })
    }

    /// Readings URL for one device, newest first. The device id is a single
    /// percent-encoded path segment and every query value is form-encoded.
    pub fn readings_url(&self, device_id: &str, limit: usize) -> Url {
        // ---
        let mut url = self.base_url.clone();
        // Checked in `from_config`: the base URL always accepts path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(device_id).push("readings");
        }

        {
            let mut query = url.query_pairs_mut();
            query
                .clear()
                .append_pair("limit", &limit.to_string())
                .append_pair("sort", "measured_at")
                .append_pair("sort_direction", "desc");
            if let Some(key) = &self.api_key {
                query.append_pair("auth", key);
            }
        }
        url.set_fragment(None);
        url
    }

    /// Fetch up to `limit` readings, retrying transport and decode failures.
    pub async fn fetch(&self, device_id: &str, limit: usize) -> Result<Vec<Reading>> {
        // ---
        let url = self.readings_url(device_id, limit);
        let mut last_error = anyhow!("no attempt made");

        for attempt in 1..=self.attempts {
            debug!("Fetching readings (attempt {}/{}) for device {}", attempt, self.attempts, device_id);

            match self.fetch_once(&url, limit).await {
                Ok(readings) => return Ok(readings),
                Err(e) => {
                    warn!("Upstream attempt {} for device {} failed: {:#}", attempt, device_id, e);
                    last_error = e;
                }
            }

            if attempt < self.attempts {
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }
        }

        Err(last_error.context(format!(
            "Upstream fetch for device {} failed after {} attempts",
            device_id, self.attempts
        )))
    }

    async fn fetch_once(&self, url: &Url, limit: usize) -> Result<Vec<Reading>> {
        // ---
        let envelope: RawEnvelope = self
            .http
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(parse_body(envelope, limit))
    }
}

/// Decode the envelope items one by one, skipping malformed ones, and return
/// at most `limit` readings newest first.
pub fn parse_body(envelope: RawEnvelope, limit: usize) -> Vec<Reading> {
    // ---
    let total = envelope.body.len();
    let mut readings: Vec<Reading> = envelope
        .body
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<RawReading>(item) {
            Ok(raw) => Some(raw.to_reading()),
            Err(e) => {
                debug!("Skipping malformed reading {}: {}", i, e);
                None
            }
        })
        .collect();

    if readings.len() < total {
        debug!("Parsed {} of {} upstream readings", readings.len(), total);
    }

    readings.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));
    readings.truncate(limit);
    readings
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    fn config(url: &str, key: Option<&str>, attempts: u32) -> Config {
        // ---
        Config {
            api_url: url.to_string(),
            api_key: key.map(String::from),
            default_device_id: "device-A".to_string(),
            api_timeout_secs: 1,
            api_max_attempts: attempts,
            history_limit: 1000,
            forecast_seed: None,
            cors_origin: "http://localhost:8080".to_string(),
            port: 0,
        }
    }

    fn item(id: &str, measured_at: &str, temperature: f64) -> serde_json::Value {
        // ---
        json!({
            "id": id,
            "device_id": "device-A",
            "measured_at": measured_at,
            "data": { "temperature": temperature, "humidity": 50.0, "pressure": 101325.0, "rain": 0.0 }
        })
    }

    #[test]
    fn test_readings_url() {
        // ---
        let client = UpstreamClient::from_config(&config("https://iot.example/api/v1/devices/", Some("KEY"), 3)).unwrap();
        assert_eq!(
            client.readings_url("abc", 100).as_str(),
            "https://iot.example/api/v1/devices/abc/readings?limit=100&sort=measured_at&sort_direction=desc&auth=KEY"
        );

        let anonymous = UpstreamClient::from_config(&config("https://iot.example/devices", None, 3)).unwrap();
        assert_eq!(
            anonymous.readings_url("abc", 5).as_str(),
            "https://iot.example/devices/abc/readings?limit=5&sort=measured_at&sort_direction=desc"
        );
    }

    #[test]
    fn test_readings_url_encodes_device_and_key() {
        // ---
        let client = UpstreamClient::from_config(&config("https://iot.example/devices", Some("a&b=c"), 3)).unwrap();
        let url = client.readings_url("x/../../admin?limit=1#", 5);

        assert_eq!(url.path(), "/devices/x%2F..%2F..%2Fadmin%3Flimit=1%23/readings");
        assert_eq!(url.fragment(), None);

        let segments: Vec<_> = url.path_segments().unwrap().collect();
        assert_eq!(segments.len(), 3);

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            [
                ("limit".to_string(), "5".to_string()),
                ("sort".to_string(), "measured_at".to_string()),
                ("sort_direction".to_string(), "desc".to_string()),
                ("auth".to_string(), "a&b=c".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        // ---
        assert!(UpstreamClient::from_config(&config("not a url", None, 3)).is_err());
        assert!(UpstreamClient::from_config(&config("mailto:ops@iot.example", None, 3)).is_err());
    }

    #[test]
    fn test_attempts_are_clamped() {
        // ---
        let client = UpstreamClient::from_config(&config("http://x", None, 10)).unwrap();
        assert_eq!(client.attempts, 3);
        let client = UpstreamClient::from_config(&config("http://x", None, 0)).unwrap();
        assert_eq!(client.attempts, 1);
    }

    #[test]
    fn test_parse_body_skips_malformed_and_sorts() {
        // ---
        let envelope = RawEnvelope {
            body: vec![
                item("old", "2025-03-26T10:00:00Z", 10.0),
                json!({ "id": "broken" }),
                item("new", "2025-03-26T12:00:00Z", 12.0),
                item("mid", "2025-03-26T11:00:00Z", 11.0),
            ],
        };
        let readings = parse_body(envelope, 2);

        let ids: Vec<_> = readings.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid"]);
    }

    #[test]
    fn test_fetch_unreachable_upstream_fails() {
        // ---
        // Port 9 (discard) is closed on test hosts, so the connect is refused
        let client = UpstreamClient::from_config(&config("http://127.0.0.1:9/devices", None, 2)).unwrap();
        let result = tokio_test::block_on(client.fetch("device-A", 10));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("after 2 attempts"), "{message}");
    }
}
