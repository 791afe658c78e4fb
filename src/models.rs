//! Data models for weather station readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Response envelope returned by the upstream IoT API.
#[derive(Debug, Deserialize)]
pub struct RawEnvelope {
    // ---
    #[serde(default)]
    pub body: Vec<serde_json::Value>,
}

/// Raw reading as delivered by the upstream IoT API
#[derive(Debug, Deserialize)]
pub struct RawReading {
    // ---
    pub id: String,
    pub device_id: String,
    pub measured_at: DateTime<Utc>,
    #[serde(default)]
    pub inserted_at: Option<DateTime<Utc>>,
    pub data: RawReadingData,
}

/// Measurement payload of a raw reading. Only the four channels the engines
/// use are mandatory; everything else is passed through when present.
#[derive(Debug, Deserialize)]
pub struct RawReadingData {
    // ---
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub rain: f64,
    #[serde(default)]
    pub battery: Option<f64>,
    #[serde(default)]
    pub irradiation: Option<f64>,
    #[serde(default)]
    pub irr_max: Option<f64>,
    #[serde(default)]
    pub t_min: Option<f64>,
    #[serde(default)]
    pub t_max: Option<f64>,
    #[serde(default)]
    pub gps_lat: Option<f64>,
    #[serde(default)]
    pub gps_lon: Option<f64>,
    #[serde(default)]
    pub device_name: Option<String>,
}

/// One sensor observation: temperature in °C, humidity in %, pressure in Pa
/// and rain in mm. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    // ---
    pub id: String,
    pub device_id: String,
    pub measured_at: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub rain: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irradiation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irradiation_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

impl Reading {
    // ---
    /// A reading carrying only the four channels the engines consume.
    pub fn new(
        measured_at: DateTime<Utc>,
        temperature: f64,
        humidity: f64,
        pressure: f64,
        rain: f64,
    ) -> Self {
        // ---
        Self {
            id: String::new(),
            device_id: String::new(),
            measured_at,
            temperature,
            humidity,
            pressure,
            rain,
            battery: None,
            irradiation: None,
            irradiation_max: None,
            temperature_min: None,
            temperature_max: None,
            gps_lat: None,
            gps_lon: None,
            device_name: None,
        }
    }
}

impl RawReading {
    // ---
    pub fn to_reading(&self) -> Reading {
        // ---
        let data = &self.data;
        Reading {
            id: self.id.clone(),
            device_id: self.device_id.clone(),
            measured_at: self.measured_at,
            temperature: data.temperature,
            humidity: data.humidity,
            pressure: data.pressure,
            rain: data.rain,
            battery: data.battery,
            irradiation: data.irradiation,
            irradiation_max: data.irr_max,
            temperature_min: data.t_min,
            temperature_max: data.t_max,
            gps_lat: data.gps_lat,
            gps_lon: data.gps_lon,
            device_name: data.device_name.clone(),
        }
    }
}

/// Where the readings handed to the engines came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingOrigin {
    Live,
    Synthetic,
}

/// Immutable batch of readings, newest first, as handed to the engines.
#[derive(Debug, Clone)]
pub struct Snapshot {
    // ---
    pub origin: ReadingOrigin,
    pub readings: Vec<Reading>,
}
