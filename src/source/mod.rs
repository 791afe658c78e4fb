//! Reading source: the upstream API with a synthetic fallback.
//!
//! The engines never see a fetch failure. When the upstream call fails or
//! returns nothing usable, generated readings are handed over instead and the
//! snapshot is tagged [`ReadingOrigin::Synthetic`].

use rand::Rng;
use tracing::{info, warn};

use crate::clock::ReferenceInstant;
use crate::models::{ReadingOrigin, Snapshot};

mod client;
pub mod synthetic;

pub use client::{parse_body, UpstreamClient, MAX_ATTEMPTS};

// ---

/// Which synthetic profile to substitute on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Fixed-size current-conditions snapshot.
    Recent,
    /// `limit` readings with a diurnal cycle.
    Historical,
}

/// Fetch `limit` readings for `device_id`, substituting synthetic data when
/// the upstream is unavailable or returns no readings.
pub async fn fetch_or_synthesize<R: Rng + ?Sized>(
    client: &UpstreamClient,
    device_id: &str,
    limit: usize,
    fallback: Fallback,
    reference: &ReferenceInstant,
    rng: &mut R,
) -> Snapshot {
    // ---
    match client.fetch(device_id, limit).await {
        Ok(readings) if !readings.is_empty() => {
            info!("Fetched {} live readings for device {}", readings.len(), device_id);
            return Snapshot {
                origin: ReadingOrigin::Live,
                readings,
            };
        }
        Ok(_) => warn!("Upstream returned no readings for device {}, using synthetic data", device_id),
        Err(e) => warn!("{:#}; using synthetic data", e),
    }

    let readings = match fallback {
        Fallback::Recent => synthetic::recent(device_id, reference, rng),
        Fallback::Historical => synthetic::historical(device_id, limit, reference, rng),
    };
    Snapshot {
        origin: ReadingOrigin::Synthetic,
        readings,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::Config;
    use chrono::{FixedOffset, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unreachable_upstream_falls_back_to_synthetic() {
        // ---
        let config = Config {
            api_url: "http://127.0.0.1:9/devices".to_string(),
            api_key: None,
            default_device_id: "device-A".to_string(),
            api_timeout_secs: 1,
            api_max_attempts: 1,
            history_limit: 1000,
            forecast_seed: None,
            cors_origin: "http://localhost:8080".to_string(),
            port: 0,
        };
        let client = UpstreamClient::from_config(&config).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let reference = ReferenceInstant::at(utc.with_ymd_and_hms(2025, 3, 26, 18, 0, 0).unwrap());
        let mut rng = StdRng::seed_from_u64(1);

        let historical = tokio_test::block_on(fetch_or_synthesize(
            &client,
            "device-A",
            300,
            Fallback::Historical,
            &reference,
            &mut rng,
        ));
        assert_eq!(historical.origin, ReadingOrigin::Synthetic);
        assert_eq!(historical.readings.len(), 300);

        let recent = tokio_test::block_on(fetch_or_synthesize(
            &client,
            "device-A",
            300,
            Fallback::Recent,
            &reference,
            &mut rng,
        ));
        assert_eq!(recent.readings.len(), synthetic::RECENT_COUNT);
    }
}
