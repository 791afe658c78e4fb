//! Flags forecast days whose values cross a severity threshold.

use chrono::NaiveDate;
use serde::Serialize;

use super::tuning::*;
use super::{Prediction, RainForecastIntensity};

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotKind {
    TemperatureExtreme,
    RainHeavy,
    PressureDrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Critical,
}

/// An anomalous forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    // ---
    pub date: NaiveDate,
    pub day_name: &'static str,
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    pub severity: Severity,
    pub description: String,
    pub confidence: f64,
}

/// Scan predictions in order; one day may raise several hotspots.
pub fn detect(predictions: &[Prediction]) -> Vec<Hotspot> {
    // ---
    let mut hotspots = Vec::new();

    for p in predictions {
        let flag = |kind, severity, description: String, confidence| Hotspot {
            date: p.date,
            day_name: p.day_name,
            kind,
            severity,
            description,
            confidence,
        };

        let t = &p.temperature;
        if t.max > HOTSPOT_HOT_C || t.min < HOTSPOT_COLD_C {
            let severity = if t.max > HOTSPOT_CRITICAL_HOT_C || t.min < HOTSPOT_CRITICAL_COLD_C {
                Severity::Critical
            } else {
                Severity::High
            };
            hotspots.push(flag(
                HotspotKind::TemperatureExtreme,
                severity,
                format!("Extreme temperature: {:.1}°C to {:.1}°C", t.min, t.max),
                t.confidence,
            ));
        }

        let rain = &p.rain;
        if rain.probability > HOTSPOT_RAIN_PROBABILITY && rain.intensity == RainForecastIntensity::Heavy {
            let severity = if rain.probability > HOTSPOT_CRITICAL_RAIN_PROBABILITY {
                Severity::Critical
            } else {
                Severity::High
            };
            hotspots.push(flag(
                HotspotKind::RainHeavy,
                severity,
                format!("Heavy rain expected: {:.0}% probability", rain.probability * 100.0),
                HOTSPOT_RAIN_CONFIDENCE,
            ));
        }

        let pressure = &p.pressure;
        if pressure.predicted < HOTSPOT_PRESSURE_PA {
            let severity = if pressure.predicted < HOTSPOT_CRITICAL_PRESSURE_PA {
                Severity::Critical
            } else {
                Severity::High
            };
            hotspots.push(flag(
                HotspotKind::PressureDrop,
                severity,
                format!("Low pressure system: {:.0} hPa", pressure.predicted / 100.0),
                pressure.confidence,
            ));
        }
    }

    hotspots
}
