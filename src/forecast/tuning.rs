//! Empirical constants of the heuristic forecast.
//!
//! None of these are physical constants. They are hand-picked weights and
//! thresholds and can be tuned freely.

// Baseline used when no history falls on the target weekday
pub const FALLBACK_TEMPERATURE_C: f64 = 20.0;
pub const FALLBACK_HUMIDITY_PCT: f64 = 60.0;
pub const FALLBACK_PRESSURE_PA: f64 = 101_325.0;

/// Below this many readings no forecast is produced.
pub const MIN_HISTORY_READINGS: usize = 24;

/// Size of each of the two adjacent windows compared for trend and weekly deltas.
pub const DELTA_WINDOW: usize = 24;

/// e-folding time of the trend and rain decay, in days.
pub const DECAY_DAYS: f64 = 7.0;

// Seasonal sine model
pub const SEASONAL_TEMPERATURE_AMPLITUDE: f64 = 10.0;
pub const SEASONAL_HUMIDITY_AMPLITUDE: f64 = 20.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

pub const WEEKEND_FACTOR: f64 = 1.2;

// Confidence
pub const FULL_CONFIDENCE_READINGS: f64 = 5.0;
pub const CONFIDENCE_HORIZON_DAYS: f64 = 30.0;
pub const CONFIDENCE_FLOOR: f64 = 0.2;

/// Adjustments smaller than this (in channel units) report a stable tendency.
pub const TENDENCY_DEADBAND: f64 = 0.5;

// Time-of-day temperature offsets, before jitter in [0, JITTER_SPAN)
pub const MORNING_OFFSET_C: f64 = -2.0;
pub const AFTERNOON_OFFSET_C: f64 = 3.0;
pub const EVENING_OFFSET_C: f64 = -1.0;
pub const JITTER_SPAN_C: f64 = 2.0;

pub const HUMIDITY_SPREAD_PCT: f64 = 10.0;
pub const PRESSURE_SPREAD_PA: f64 = 1000.0;

// Rain
pub const RAIN_HEAVY_PROBABILITY: f64 = 0.7;
pub const RAIN_MODERATE_PROBABILITY: f64 = 0.4;
pub const RAIN_LIGHT_PROBABILITY: f64 = 0.1;
pub const RAIN_AMOUNT_SCALE_MM: f64 = 5.0;
pub const RAIN_MORNING_FACTOR: f64 = 0.7;
pub const RAIN_AFTERNOON_FACTOR: f64 = 1.2;
pub const RAIN_EVENING_FACTOR: f64 = 0.8;

// Weather condition
pub const FOG_HUMIDITY_PCT: f64 = 90.0;
pub const FOG_TEMPERATURE_C: f64 = 10.0;
pub const RAIN_HUMIDITY_PCT: f64 = 85.0;
pub const RAIN_PRESSURE_PA: f64 = 100_000.0;
pub const STORM_PRESSURE_PA: f64 = 99_000.0;
pub const CLOUD_HUMIDITY_PCT: f64 = 70.0;

// Risk score
pub const RISK_HOT_C: f64 = 35.0;
pub const RISK_COLD_C: f64 = -10.0;
pub const RISK_HUMIDITY_PCT: f64 = 95.0;
pub const RISK_PRESSURE_PA: f64 = 98_000.0;
pub const RISK_RAIN_PROBABILITY: f64 = 0.8;
pub const RISK_TEMPERATURE_WEIGHT: u32 = 3;
pub const RISK_HUMIDITY_WEIGHT: u32 = 2;
pub const RISK_PRESSURE_WEIGHT: u32 = 2;
pub const RISK_RAIN_WEIGHT: u32 = 2;
pub const RISK_HIGH_SCORE: u32 = 6;
pub const RISK_MEDIUM_SCORE: u32 = 3;

// UV index
pub const UV_SUMMER_BASE: f64 = 7.0;
pub const UV_OTHER_BASE: f64 = 3.0;
pub const UV_SUMMER_MONTHS: std::ops::RangeInclusive<u32> = 5..=8;
pub const UV_CLOUDY_FACTOR: f64 = 0.6;
pub const UV_RAINY_FACTOR: f64 = 0.3;
pub const UV_STORMY_FACTOR: f64 = 0.2;
pub const UV_FOGGY_FACTOR: f64 = 0.4;

// Wind speed estimate
pub const WIND_BASE: f64 = 5.0;
pub const WIND_JITTER_SPAN: f64 = 10.0;
pub const WIND_PRESSURE_DIVISOR: f64 = 1000.0;
pub const WIND_TEMPERATURE_DIVISOR: f64 = 10.0;
pub const WIND_CAP: f64 = 50.0;
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;
pub const REFERENCE_TEMPERATURE_C: f64 = 20.0;

// Hotspots
pub const HOTSPOT_HOT_C: f64 = 35.0;
pub const HOTSPOT_COLD_C: f64 = -10.0;
pub const HOTSPOT_CRITICAL_HOT_C: f64 = 40.0;
pub const HOTSPOT_CRITICAL_COLD_C: f64 = -15.0;
pub const HOTSPOT_RAIN_PROBABILITY: f64 = 0.8;
pub const HOTSPOT_CRITICAL_RAIN_PROBABILITY: f64 = 0.9;
pub const HOTSPOT_RAIN_CONFIDENCE: f64 = 0.8;
pub const HOTSPOT_PRESSURE_PA: f64 = 99_000.0;
pub const HOTSPOT_CRITICAL_PRESSURE_PA: f64 = 98_000.0;
