//! Bucketed descriptive statistics over a window of readings.
//!
//! Readings are grouped by a time-derived key (hour of day, weekday, or day
//! offset from the reference instant) and every bucket is summarized per
//! channel. One aggregate is produced for every possible key, so empty
//! buckets show up as all-zero aggregates instead of being skipped.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

use crate::clock::ReferenceInstant;
use crate::math::{self, Trend};
use crate::Reading;

// ---

/// Average rain (mm) above which a bucket's rain is classified `high`.
pub const RAIN_HIGH_MM: f64 = 1.0;

/// Average rain (mm) above which a bucket's rain is classified `medium`.
pub const RAIN_MEDIUM_MM: f64 = 0.3;

/// Readings further back than this many days are left out of day-offset buckets.
pub const DAY_OFFSET_WINDOW: usize = 7;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// How readings are assigned to buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKey {
    /// Local hour of `measured_at`, 0–23.
    HourOfDay,
    /// Local weekday of `measured_at`, 0 = Sunday through 6 = Saturday.
    DayOfWeek,
    /// Whole days before the reference instant, 0 = today through 6.
    DayOffset,
}

impl BucketKey {
    // ---
    pub const fn bucket_count(self) -> usize {
        match self {
            Self::HourOfDay => 24,
            Self::DayOfWeek => 7,
            Self::DayOffset => DAY_OFFSET_WINDOW,
        }
    }

    /// Bucket index for a timestamp, or `None` if it falls outside every bucket.
    pub fn key_for(self, measured_at: &DateTime<Utc>, reference: &ReferenceInstant) -> Option<usize> {
        // ---
        match self {
            Self::HourOfDay => Some(reference.localize(measured_at).hour() as usize),
            Self::DayOfWeek => Some(
                reference
                    .localize(measured_at)
                    .weekday()
                    .num_days_from_sunday() as usize,
            ),
            Self::DayOffset => {
                let elapsed = (reference.utc() - *measured_at).num_milliseconds().abs() as f64;
                let offset = ((elapsed / MILLIS_PER_DAY).ceil() as i64 - 1).max(0) as usize;
                (offset < DAY_OFFSET_WINDOW).then_some(offset)
            }
        }
    }
}

/// Descriptive statistics for one channel within one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAggregate {
    // ---
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub standard_deviation: f64,
    pub trend: Trend,
}

impl ChannelAggregate {
    // ---
    pub fn empty() -> Self {
        Self {
            average: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0,
            standard_deviation: 0.0,
            trend: Trend::Stable,
        }
    }

    /// Summarize a newest-first series of channel values.
    pub fn from_values(values: &[f64]) -> Self {
        // ---
        let Some((min, max)) = math::extrema(values) else {
            return Self::empty();
        };

        Self {
            average: math::mean(values),
            min,
            max,
            count: values.len(),
            standard_deviation: math::population_std_dev(values),
            trend: math::classify_trend(values),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RainIntensity {
    Low,
    Medium,
    High,
}

impl RainIntensity {
    pub fn from_average(average_mm: f64) -> Self {
        if average_mm > RAIN_HIGH_MM {
            Self::High
        } else if average_mm > RAIN_MEDIUM_MM {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Rain summary for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RainAggregate {
    // ---
    pub average: f64,
    /// Fraction of the bucket's readings with any rain at all.
    pub probability: f64,
    pub count: usize,
    pub intensity: RainIntensity,
}

impl RainAggregate {
    // ---
    pub fn empty() -> Self {
        Self {
            average: 0.0,
            probability: 0.0,
            count: 0,
            intensity: RainIntensity::Low,
        }
    }

    pub fn from_values(values: &[f64]) -> Self {
        // ---
        if values.is_empty() {
            return Self::empty();
        }
        let wet = values.iter().filter(|&&mm| mm > 0.0).count();
        let average = math::mean(values);

        Self {
            average,
            probability: wet as f64 / values.len() as f64,
            count: values.len(),
            intensity: RainIntensity::from_average(average),
        }
    }
}

/// All channel summaries for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketAggregate {
    // ---
    pub bucket: usize,
    pub temperature: ChannelAggregate,
    pub humidity: ChannelAggregate,
    pub pressure: ChannelAggregate,
    pub rain: RainAggregate,
}

impl BucketAggregate {
    // ---
    fn from_readings(bucket: usize, readings: &[&Reading]) -> Self {
        // ---
        let channel = |f: fn(&Reading) -> f64| readings.iter().map(|r| f(r)).collect::<Vec<_>>();

        Self {
            bucket,
            temperature: ChannelAggregate::from_values(&channel(|r| r.temperature)),
            humidity: ChannelAggregate::from_values(&channel(|r| r.humidity)),
            pressure: ChannelAggregate::from_values(&channel(|r| r.pressure)),
            rain: RainAggregate::from_values(&channel(|r| r.rain)),
        }
    }
}

/// Group readings by `key` and summarize every bucket.
///
/// Input order is preserved inside each bucket, which is what the
/// recent-versus-older trend split relies on.
pub fn aggregate_by(
    readings: &[Reading],
    key: BucketKey,
    reference: &ReferenceInstant,
) -> Vec<BucketAggregate> {
    // ---
    let mut buckets: Vec<Vec<&Reading>> = vec![Vec::new(); key.bucket_count()];
    for reading in readings {
        if let Some(index) = key.key_for(&reading.measured_at, reference) {
            buckets[index].push(reading);
        }
    }

    buckets
        .iter()
        .enumerate()
        .map(|(index, members)| BucketAggregate::from_readings(index, members))
        .collect()
}

/// 24 buckets keyed by local hour of day.
pub fn compute_hourly_aggregates(
    readings: &[Reading],
    reference: &ReferenceInstant,
) -> Vec<BucketAggregate> {
    aggregate_by(readings, BucketKey::HourOfDay, reference)
}

/// 7 buckets keyed by local weekday (0 = Sunday).
pub fn compute_weekday_aggregates(
    readings: &[Reading],
    reference: &ReferenceInstant,
) -> Vec<BucketAggregate> {
    aggregate_by(readings, BucketKey::DayOfWeek, reference)
}

/// 7 buckets keyed by days before the reference instant (0 = today).
pub fn compute_day_offset_aggregates(
    readings: &[Reading],
    reference: &ReferenceInstant,
) -> Vec<BucketAggregate> {
    aggregate_by(readings, BucketKey::DayOffset, reference)
}
