//! Plausible stand-in readings for when the upstream API is unavailable.
//!
//! Readings are spaced 30 minutes apart going back from the reference
//! instant, newest first, with the station identity of the Kaiserplatz
//! weather station.

use std::f64::consts::PI;

use chrono::{Duration, Timelike};
use rand::Rng;
use uuid::Uuid;

use crate::clock::ReferenceInstant;
use crate::Reading;

// ---

pub const SPACING_MINUTES: i64 = 30;

/// Size of the synthetic current-conditions snapshot.
pub const RECENT_COUNT: usize = 50;

const BASE_TEMPERATURE_C: f64 = 18.5;
const BASE_PRESSURE_PA: f64 = 100_475.0;
const BATTERY_FULL_V: f64 = 4.15;
const DEVICE_NAME: &str = "Barani MeteoHelix IoT Pro - 2212LH010 - Kaiserplatz";
const GPS: (f64, f64) = (49.010414, 8.388769);

fn station_reading<R: Rng + ?Sized>(
    device_id: &str,
    reference: &ReferenceInstant,
    index: usize,
    rng: &mut R,
) -> Reading {
    // ---
    let measured_at = reference.utc() - Duration::minutes(SPACING_MINUTES * index as i64);
    let mut reading = Reading::new(measured_at, 0.0, 0.0, 0.0, 0.0);
    reading.id = Uuid::from_bytes(rng.gen()).to_string();
    reading.device_id = device_id.to_string();
    reading.gps_lat = Some(GPS.0);
    reading.gps_lon = Some(GPS.1);
    reading.device_name = Some(DEVICE_NAME.to_string());
    reading
}

/// Historical profile: diurnal temperature cycle, humidity moving against
/// it, slow pressure drift and a 10 % chance of rain per reading.
pub fn historical<R: Rng + ?Sized>(
    device_id: &str,
    limit: usize,
    reference: &ReferenceInstant,
    rng: &mut R,
) -> Vec<Reading> {
    // ---
    (0..limit)
        .map(|i| {
            let mut reading = station_reading(device_id, reference, i, rng);
            let hour = reference.localize(&reading.measured_at).hour() as f64;
            let step = i as f64;

            let diurnal = ((hour - 6.0) * PI / 12.0).sin() * 5.0;
            let drift = (step * 0.01).sin() * 2.0;
            let temperature = BASE_TEMPERATURE_C + diurnal + drift + rng.gen_range(-1.0..1.0);
            let sun = ((hour - 12.0) * PI / 12.0).sin();

            reading.temperature = temperature;
            reading.temperature_min = Some(temperature - 1.0);
            reading.temperature_max = Some(temperature + 1.0);
            reading.humidity = (70.0 - diurnal * 2.0 + rng.gen_range(-5.0..5.0)).clamp(0.0, 100.0);
            reading.pressure =
                BASE_PRESSURE_PA + (step * 0.005).sin() * 1000.0 + rng.gen_range(-500.0..500.0);
            reading.rain = if rng.gen_bool(0.1) {
                rng.gen_range(0.0..2.0)
            } else {
                0.0
            };
            reading.irradiation = Some((58.0 + sun * 40.0 + rng.gen_range(-7.0..8.0)).max(0.0));
            reading.irradiation_max = Some((66.0 + sun * 50.0 + rng.gen_range(-10.0..10.0)).max(0.0));
            reading.battery = Some(BATTERY_FULL_V - step * 0.001);
            reading
        })
        .collect()
}

/// Current-conditions profile: a gentle oscillation around a humid, mild day.
pub fn recent<R: Rng + ?Sized>(
    device_id: &str,
    reference: &ReferenceInstant,
    rng: &mut R,
) -> Vec<Reading> {
    // ---
    (0..RECENT_COUNT)
        .map(|i| {
            let mut reading = station_reading(device_id, reference, i, rng);
            let step = i as f64;
            let temperature = BASE_TEMPERATURE_C + (step * 0.2).sin() * 3.0 + rng.gen_range(-1.0..1.0);

            reading.temperature = temperature;
            reading.temperature_min = Some(temperature - 1.0);
            reading.temperature_max = Some(temperature + 1.0);
            reading.humidity = 86.4 + rng.gen_range(-5.0..5.0);
            reading.pressure = BASE_PRESSURE_PA + rng.gen_range(-500.0..500.0);
            reading.rain = rng.gen_range(0.0..0.5);
            reading.irradiation = Some(58.0 + rng.gen_range(-7.0..8.0));
            reading.irradiation_max = Some(66.0 + rng.gen_range(-10.0..10.0));
            reading.battery = Some(BATTERY_FULL_V - step * 0.01);
            reading
        })
        .collect()
}
