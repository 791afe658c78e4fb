//! Short human-readable summaries of hourly statistics and forecasts.

use crate::forecast::{Forecast, RiskLevel, WeatherCondition};
use crate::math::{self, Trend};
use crate::stats::BucketAggregate;

// ---

/// Rain probability above which a forecast day counts as a rain day.
pub const RAIN_DAY_PROBABILITY: f64 = 0.3;

/// Headline figures for a set of hourly buckets.
pub fn hourly_insights(buckets: &[BucketAggregate]) -> Vec<String> {
    // ---
    if buckets.is_empty() {
        return Vec::new();
    }
    let mut insights = Vec::new();

    // Empty buckets count as zero, as in the 24-hour chart
    let temperatures: Vec<f64> = buckets.iter().map(|b| b.temperature.average).collect();
    insights.push(format!("Average temperature: {:.1}°C", math::mean(&temperatures)));

    let rising = buckets.iter().filter(|b| b.temperature.trend == Trend::Increasing).count();
    let falling = buckets.iter().filter(|b| b.temperature.trend == Trend::Decreasing).count();
    if rising > falling {
        insights.push("Temperature is mostly rising".to_string());
    } else if falling > rising {
        insights.push("Temperature is mostly falling".to_string());
    }

    let probabilities: Vec<f64> = buckets.iter().map(|b| b.rain.probability).collect();
    insights.push(format!(
        "Rain probability: {:.0}%",
        math::mean(&probabilities) * 100.0
    ));

    insights
}

/// Headline figures for a finished forecast.
pub fn forecast_insights(forecast: &Forecast) -> Vec<String> {
    // ---
    let predictions = &forecast.predictions;
    if predictions.is_empty() {
        return Vec::new();
    }
    let days = predictions.len();
    let mut insights = Vec::new();

    let predicted: Vec<f64> = predictions.iter().map(|p| p.temperature.predicted).collect();
    insights.push(format!("Average temperature: {:.1}°C", math::mean(&predicted)));

    let warmest = predictions
        .iter()
        .map(|p| p.temperature.max)
        .fold(f64::NEG_INFINITY, f64::max);
    let coldest = predictions
        .iter()
        .map(|p| p.temperature.min)
        .fold(f64::INFINITY, f64::min);
    insights.push(format!("Temperature range: {:.1}°C", warmest - coldest));

    let rain_days = predictions
        .iter()
        .filter(|p| p.rain.probability > RAIN_DAY_PROBABILITY)
        .count();
    insights.push(format!("Rain days: {rain_days} of {days}"));

    let high_risk = predictions
        .iter()
        .filter(|p| p.risk_level == RiskLevel::High)
        .count();
    if high_risk > 0 {
        insights.push(format!("High-risk days: {high_risk}"));
    }

    if !forecast.hotspots.is_empty() {
        insights.push(format!("Weather warnings: {}", forecast.hotspots.len()));
    }

    let sunny = predictions
        .iter()
        .filter(|p| p.weather_condition == WeatherCondition::Sunny)
        .count();
    insights.push(format!("Sunny days: {sunny} of {days}"));

    insights
}
