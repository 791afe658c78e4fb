//! Current conditions: the newest reading compared with the one before it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Reading;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// Relative change against the previous reading, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    pub value: f64,
    pub direction: Direction,
}

impl Change {
    /// `None` when there is nothing (or zero) to compare against.
    pub fn between(current: f64, previous: Option<f64>) -> Option<Self> {
        // ---
        let previous = previous.filter(|p| *p != 0.0)?;
        let change = (current - previous) / previous * 100.0;
        Some(Self {
            value: change.abs(),
            direction: if change > 0.0 {
                Direction::Increase
            } else {
                Direction::Decrease
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Change>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSummary {
    // ---
    pub measured_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<&'static str>,
    pub temperature: Metric,
    pub humidity: Metric,
    pub pressure: Metric,
    pub rain: Metric,
}

/// Summarize the newest of a newest-first sequence; `None` when empty.
pub fn latest_summary(readings: &[Reading]) -> Option<LatestSummary> {
    // ---
    let latest = readings.first()?;
    let previous = readings.get(1);
    let metric = |f: fn(&Reading) -> f64| Metric {
        value: f(latest),
        change: Change::between(f(latest), previous.map(f)),
    };

    Some(LatestSummary {
        measured_at: latest.measured_at,
        station: crate::locations::by_device_id(&latest.device_id).map(|l| l.name),
        temperature: metric(|r| r.temperature),
        humidity: metric(|r| r.humidity),
        pressure: metric(|r| r.pressure),
        rain: metric(|r| r.rain),
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_empty_has_no_summary() {
        assert!(latest_summary(&[]).is_none());
    }

    #[test]
    fn test_changes_against_previous() {
        // ---
        let now = Utc.with_ymd_and_hms(2025, 3, 26, 18, 0, 0).unwrap();
        let mut latest = Reading::new(now, 22.0, 45.0, 100_000.0, 0.5);
        latest.device_id = "c055eef5-b6dc-406e-ad5a-65dec60db90e".to_string();
        let previous = Reading::new(now - Duration::minutes(30), 20.0, 50.0, 100_000.0, 0.0);

        let summary = latest_summary(&[latest, previous]).unwrap();

        assert_eq!(summary.station, Some("Kaiserplatz"));
        let t = summary.temperature.change.unwrap();
        assert!((t.value - 10.0).abs() < 1e-9);
        assert_eq!(t.direction, Direction::Increase);
        let h = summary.humidity.change.unwrap();
        assert!((h.value - 10.0).abs() < 1e-9);
        assert_eq!(h.direction, Direction::Decrease);
        // Previous rain was zero: no relative change
        assert!(summary.rain.change.is_none());
    }

    #[test]
    fn test_single_reading_has_no_change() {
        // ---
        let now = Utc.with_ymd_and_hms(2025, 3, 26, 18, 0, 0).unwrap();
        let summary = latest_summary(&[Reading::new(now, 22.0, 45.0, 100_000.0, 0.5)]).unwrap();
        assert!(summary.temperature.change.is_none());
        assert!(summary.station.is_none());
    }
}
