//! Heuristic day-by-day forecast built on the weekday statistics.
//!
//! Each future day starts from the historical mean of its weekday and adds
//! three adjustments: the recent trend (decaying with distance), a relative
//! seasonal shift, and a weekday/weekend delta. Derived fields (sky
//! condition, rain, risk, UV, wind) are classified from the result and the
//! finished predictions are scanned for hotspots.
//!
//! The only non-determinism is the time-of-day and wind jitter, which is
//! drawn from the caller's [`rand::Rng`]. A seeded generator plus a pinned
//! [`ReferenceInstant`] makes the whole forecast reproducible.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use serde::Serialize;

use crate::clock::ReferenceInstant;
use crate::stats::{self, BucketAggregate};
use crate::Reading;

mod adjust;
mod classify;
mod hotspot;
pub mod tuning;

pub use adjust::{confidence, time_decay, Channels};
pub use classify::{RainForecastIntensity, RiskLevel, Tendency, WeatherCondition};
pub use hotspot::{Hotspot, HotspotKind, Severity};

use tuning::*;

// ---

/// Supported forecast lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizon {
    #[default]
    Week,
    Fortnight,
    Month,
}

impl Horizon {
    // ---
    pub const fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Fortnight => 14,
            Self::Month => 30,
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(Self::Week),
            14 => Ok(Self::Fortnight),
            30 => Ok(Self::Month),
            other => Err(format!("unsupported forecast horizon {other}, expected 7, 14 or 30")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureForecast {
    // ---
    pub predicted: f64,
    pub confidence: f64,
    pub trend: Tendency,
    pub min: f64,
    pub max: f64,
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
}

impl TemperatureForecast {
    // ---
    /// Spread a daily value over morning, afternoon and evening; the day's
    /// extremes come from those sub-estimates rather than the daily value.
    fn spread<R: Rng + ?Sized>(
        predicted: f64,
        confidence: f64,
        trend: Tendency,
        rng: &mut R,
    ) -> Self {
        // ---
        let mut jitter = || rng.gen_range(0.0..JITTER_SPAN_C);
        let morning = predicted + MORNING_OFFSET_C + jitter();
        let afternoon = predicted + AFTERNOON_OFFSET_C + jitter();
        let evening = predicted + EVENING_OFFSET_C + jitter();

        Self {
            predicted,
            confidence,
            trend,
            min: morning.min(evening),
            max: afternoon,
            morning,
            afternoon,
            evening,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelForecast {
    // ---
    pub predicted: f64,
    pub confidence: f64,
    pub trend: Tendency,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainForecast {
    // ---
    pub probability: f64,
    pub intensity: RainForecastIntensity,
    /// Heuristic amount in mm.
    pub amount: f64,
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
}

impl RainForecast {
    pub fn from_probability(probability: f64) -> Self {
        // ---
        Self {
            probability,
            intensity: RainForecastIntensity::from_probability(probability),
            amount: probability * RAIN_AMOUNT_SCALE_MM,
            morning: probability * RAIN_MORNING_FACTOR,
            afternoon: probability * RAIN_AFTERNOON_FACTOR,
            evening: probability * RAIN_EVENING_FACTOR,
        }
    }
}

/// Forecast for one future calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    // ---
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub temperature: TemperatureForecast,
    pub humidity: ChannelForecast,
    pub pressure: ChannelForecast,
    pub rain: RainForecast,
    pub weather_condition: WeatherCondition,
    pub risk_level: RiskLevel,
    pub uv_index: u32,
    /// Estimated wind speed in km/h.
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forecast {
    // ---
    pub predictions: Vec<Prediction>,
    pub hotspots: Vec<Hotspot>,
}

pub const fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Predict `horizon` days after `reference` from newest-first `readings`.
///
/// Fewer than [`MIN_HISTORY_READINGS`] readings yield an empty forecast.
pub fn forecast<R: Rng + ?Sized>(
    readings: &[Reading],
    horizon: Horizon,
    reference: &ReferenceInstant,
    rng: &mut R,
) -> Forecast {
    // ---
    if readings.len() < MIN_HISTORY_READINGS {
        tracing::debug!(
            "Forecast skipped: {} readings, need at least {}",
            readings.len(),
            MIN_HISTORY_READINGS
        );
        return Forecast::default();
    }

    let context = DayContext {
        weekdays: stats::compute_weekday_aggregates(readings, reference),
        delta: adjust::window_delta(readings),
        reference,
    };

    let predictions: Vec<Prediction> = (1..=horizon.days())
        .map(|days_ahead| context.predict(days_ahead, rng))
        .collect();
    let hotspots = hotspot::detect(&predictions);

    tracing::debug!(
        "Forecast of {} days from {} readings, {} hotspots",
        predictions.len(),
        readings.len(),
        hotspots.len()
    );

    Forecast {
        predictions,
        hotspots,
    }
}

/// Inputs shared by every day of one forecast run.
struct DayContext<'a> {
    // ---
    weekdays: Vec<BucketAggregate>,
    delta: Channels,
    reference: &'a ReferenceInstant,
}

impl DayContext<'_> {
    // ---
    fn predict<R: Rng + ?Sized>(&self, days_ahead: u32, rng: &mut R) -> Prediction {
        // ---
        let date = self.reference.date_after(i64::from(days_ahead));
        let today = self.reference.local().date_naive();
        let weekday = date.weekday();
        let bucket = &self.weekdays[weekday.num_days_from_sunday() as usize];

        let trend = adjust::trend_adjustment(self.delta, days_ahead);
        let mut value = adjust::baseline(bucket)
            + trend
            + adjust::seasonal_adjustment(date, today)
            + adjust::weekly_adjustment(self.delta, weekday);
        value.humidity = value.humidity.clamp(0.0, 100.0);

        let confidence = adjust::confidence(bucket.temperature.count, days_ahead);
        let condition = WeatherCondition::classify(value.temperature, value.humidity, value.pressure);
        let rain = RainForecast::from_probability(bucket.rain.probability * adjust::decay(days_ahead));
        let risk_level =
            RiskLevel::assess(value.temperature, value.humidity, value.pressure, rain.probability);

        let temperature = TemperatureForecast::spread(
            value.temperature,
            confidence,
            Tendency::from_adjustment(trend.temperature),
            rng,
        );
        let humidity = ChannelForecast {
            predicted: value.humidity,
            confidence,
            trend: Tendency::from_adjustment(trend.humidity),
            min: (value.humidity - HUMIDITY_SPREAD_PCT).max(0.0),
            max: (value.humidity + HUMIDITY_SPREAD_PCT).min(100.0),
        };
        let pressure = ChannelForecast {
            predicted: value.pressure,
            confidence,
            trend: Tendency::from_adjustment(trend.pressure),
            min: value.pressure - PRESSURE_SPREAD_PA,
            max: value.pressure + PRESSURE_SPREAD_PA,
        };

        Prediction {
            date,
            day_name: day_name(weekday),
            uv_index: classify::uv_index(date, condition),
            wind_speed: classify::wind_speed(value.pressure, value.temperature, rng),
            temperature,
            humidity,
            pressure,
            rain,
            weather_condition: condition,
            risk_level,
        }
    }
}
