//! Baseline and additive adjustments that make up a predicted value.

use std::ops::{Add, Sub};

use chrono::{Datelike, NaiveDate, Weekday};

use super::tuning::*;
use crate::stats::BucketAggregate;
use crate::Reading;

// ---

/// One value per forecast channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Channels {
    // ---
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Channels {
    // ---
    pub const fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
        }
    }

    /// Per-channel mean; zero for an empty slice.
    pub fn mean_of(readings: &[Reading]) -> Self {
        // ---
        if readings.is_empty() {
            return Self::default();
        }
        let n = readings.len() as f64;
        let sum = readings.iter().fold(Self::default(), |acc, r| {
            acc + Self::new(r.temperature, r.humidity, r.pressure)
        });
        sum.scale(1.0 / n)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(
            self.temperature * factor,
            self.humidity * factor,
            self.pressure * factor,
        )
    }
}

impl Add for Channels {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.temperature + rhs.temperature,
            self.humidity + rhs.humidity,
            self.pressure + rhs.pressure,
        )
    }
}

impl Sub for Channels {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.temperature - rhs.temperature,
            self.humidity - rhs.humidity,
            self.pressure - rhs.pressure,
        )
    }
}

/// Mean of the newest [`DELTA_WINDOW`] readings minus the mean of the
/// [`DELTA_WINDOW`] readings before them. Zero when either window is empty.
pub fn window_delta(readings: &[Reading]) -> Channels {
    // ---
    let split = DELTA_WINDOW.min(readings.len());
    let end = (2 * DELTA_WINDOW).min(readings.len());
    let (recent, older) = (&readings[..split], &readings[split..end]);

    if recent.is_empty() || older.is_empty() {
        return Channels::default();
    }
    Channels::mean_of(recent) - Channels::mean_of(older)
}

/// Weekday baseline from its statistics bucket, or the fixed fallback when
/// no history falls on that weekday.
pub fn baseline(bucket: &BucketAggregate) -> Channels {
    // ---
    if bucket.temperature.count == 0 {
        return Channels::new(
            FALLBACK_TEMPERATURE_C,
            FALLBACK_HUMIDITY_PCT,
            FALLBACK_PRESSURE_PA,
        );
    }
    Channels::new(
        bucket.temperature.average,
        bucket.humidity.average,
        bucket.pressure.average,
    )
}

/// `exp(-days_ahead / 7)`: influence of current conditions on a future day.
pub fn decay(days_ahead: u32) -> f64 {
    (-(days_ahead as f64) / DECAY_DAYS).exp()
}

pub fn trend_adjustment(delta: Channels, days_ahead: u32) -> Channels {
    delta.scale(decay(days_ahead))
}

fn seasonal_offset(day_of_year: u32) -> Channels {
    // ---
    let phase = day_of_year as f64 / DAYS_PER_YEAR * std::f64::consts::TAU;
    Channels::new(
        SEASONAL_TEMPERATURE_AMPLITUDE * phase.sin(),
        SEASONAL_HUMIDITY_AMPLITUDE * (phase + std::f64::consts::PI).sin(),
        0.0,
    )
}

/// Seasonal offset of `target` relative to the seasonal offset of `today`.
pub fn seasonal_adjustment(target: NaiveDate, today: NaiveDate) -> Channels {
    seasonal_offset(target.ordinal()) - seasonal_offset(today.ordinal())
}

/// Recent delta, with temperature and humidity amplified on weekends.
/// Pressure carries over unscaled.
pub fn weekly_adjustment(delta: Channels, weekday: Weekday) -> Channels {
    // ---
    match weekday {
        Weekday::Sat | Weekday::Sun => Channels::new(
            delta.temperature * WEEKEND_FACTOR,
            delta.humidity * WEEKEND_FACTOR,
            delta.pressure,
        ),
        _ => delta,
    }
}

/// `max(0.2, 1 - days_ahead / 30)`.
pub fn time_decay(days_ahead: u32) -> f64 {
    (1.0 - days_ahead as f64 / CONFIDENCE_HORIZON_DAYS).max(CONFIDENCE_FLOOR)
}

/// Data quality (saturating at five readings on the weekday) times time decay.
pub fn confidence(readings_on_weekday: usize, days_ahead: u32) -> f64 {
    // ---
    let data_quality = (readings_on_weekday as f64 / FULL_CONFIDENCE_READINGS).min(1.0);
    data_quality * time_decay(days_ahead)
}
