//! Derived per-day classifications: tendency, sky condition, rain, risk,
//! UV index and wind estimate.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::Serialize;

use super::tuning::*;

// ---

/// Direction of a channel's trend adjustment for one forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tendency {
    Rising,
    Falling,
    Stable,
}

impl Tendency {
    pub fn from_adjustment(change: f64) -> Self {
        // ---
        if change.abs() < TENDENCY_DEADBAND {
            Self::Stable
        } else if change > 0.0 {
            Self::Rising
        } else {
            Self::Falling
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Foggy,
}

impl WeatherCondition {
    /// First matching rule wins: fog, rain, storm, cloud, else sun.
    pub fn classify(temperature: f64, humidity: f64, pressure: f64) -> Self {
        // ---
        if humidity > FOG_HUMIDITY_PCT && temperature < FOG_TEMPERATURE_C {
            Self::Foggy
        } else if humidity > RAIN_HUMIDITY_PCT && pressure < RAIN_PRESSURE_PA {
            Self::Rainy
        } else if pressure < STORM_PRESSURE_PA {
            Self::Stormy
        } else if humidity > CLOUD_HUMIDITY_PCT {
            Self::Cloudy
        } else {
            Self::Sunny
        }
    }

    const fn uv_factor(self) -> f64 {
        match self {
            Self::Sunny => 1.0,
            Self::Cloudy => UV_CLOUDY_FACTOR,
            Self::Rainy => UV_RAINY_FACTOR,
            Self::Stormy => UV_STORMY_FACTOR,
            Self::Foggy => UV_FOGGY_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RainForecastIntensity {
    None,
    Light,
    Moderate,
    Heavy,
}

impl RainForecastIntensity {
    pub fn from_probability(probability: f64) -> Self {
        // ---
        if probability > RAIN_HEAVY_PROBABILITY {
            Self::Heavy
        } else if probability > RAIN_MODERATE_PROBABILITY {
            Self::Moderate
        } else if probability > RAIN_LIGHT_PROBABILITY {
            Self::Light
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn assess(temperature: f64, humidity: f64, pressure: f64, rain_probability: f64) -> Self {
        // ---
        let mut score = 0;
        if temperature > RISK_HOT_C || temperature < RISK_COLD_C {
            score += RISK_TEMPERATURE_WEIGHT;
        }
        if humidity > RISK_HUMIDITY_PCT {
            score += RISK_HUMIDITY_WEIGHT;
        }
        if pressure < RISK_PRESSURE_PA {
            score += RISK_PRESSURE_WEIGHT;
        }
        if rain_probability > RISK_RAIN_PROBABILITY {
            score += RISK_RAIN_WEIGHT;
        }

        if score >= RISK_HIGH_SCORE {
            Self::High
        } else if score >= RISK_MEDIUM_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Seasonal UV base scaled down by cloud cover, floored to an integer.
pub fn uv_index(date: NaiveDate, condition: WeatherCondition) -> u32 {
    // ---
    let base = if UV_SUMMER_MONTHS.contains(&date.month()) {
        UV_SUMMER_BASE
    } else {
        UV_OTHER_BASE
    };
    (base * condition.uv_factor()).floor() as u32
}

/// Wind estimate (km/h) from distance to standard pressure and to a mild
/// reference temperature, plus a random gust component.
pub fn wind_speed<R: Rng + ?Sized>(pressure: f64, temperature: f64, rng: &mut R) -> f64 {
    // ---
    let gust = rng.gen_range(0.0..WIND_JITTER_SPAN);
    let pressure_effect = (pressure - STANDARD_PRESSURE_PA).abs() / WIND_PRESSURE_DIVISOR;
    let temperature_effect = (temperature - REFERENCE_TEMPERATURE_C).abs() / WIND_TEMPERATURE_DIVISOR;
    (WIND_BASE + gust + pressure_effect + temperature_effect).min(WIND_CAP)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tendency_deadband() {
        // ---
        assert_eq!(Tendency::from_adjustment(0.49), Tendency::Stable);
        assert_eq!(Tendency::from_adjustment(-0.49), Tendency::Stable);
        assert_eq!(Tendency::from_adjustment(0.5), Tendency::Rising);
        assert_eq!(Tendency::from_adjustment(-3.0), Tendency::Falling);
    }

    #[test]
    fn test_condition_rule_order() {
        // ---
        // Fog wins over rain when it is cold
        assert_eq!(WeatherCondition::classify(5.0, 95.0, 99_500.0), WeatherCondition::Foggy);
        assert_eq!(WeatherCondition::classify(15.0, 95.0, 99_500.0), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::classify(15.0, 60.0, 98_500.0), WeatherCondition::Stormy);
        assert_eq!(WeatherCondition::classify(15.0, 75.0, 101_000.0), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::classify(25.0, 40.0, 101_325.0), WeatherCondition::Sunny);
    }

    #[test]
    fn test_rain_intensity_thresholds() {
        // ---
        assert_eq!(RainForecastIntensity::from_probability(0.75), RainForecastIntensity::Heavy);
        assert_eq!(RainForecastIntensity::from_probability(0.7), RainForecastIntensity::Moderate);
        assert_eq!(RainForecastIntensity::from_probability(0.2), RainForecastIntensity::Light);
        assert_eq!(RainForecastIntensity::from_probability(0.1), RainForecastIntensity::None);
    }

    #[test]
    fn test_risk_score() {
        // ---
        assert_eq!(RiskLevel::assess(20.0, 60.0, 101_325.0, 0.1), RiskLevel::Low);
        assert_eq!(RiskLevel::assess(36.0, 60.0, 101_325.0, 0.1), RiskLevel::Medium);
        assert_eq!(RiskLevel::assess(20.0, 96.0, 97_000.0, 0.1), RiskLevel::Medium);
        assert_eq!(RiskLevel::assess(-12.0, 96.0, 101_325.0, 0.9), RiskLevel::High);
        assert_eq!(RiskLevel::assess(20.0, 96.0, 97_000.0, 0.9), RiskLevel::High);
    }

    #[test]
    fn test_uv_index() {
        // ---
        let july = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        let january = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        assert_eq!(uv_index(july, WeatherCondition::Sunny), 7);
        assert_eq!(uv_index(july, WeatherCondition::Cloudy), 4);
        assert_eq!(uv_index(july, WeatherCondition::Stormy), 1);
        assert_eq!(uv_index(january, WeatherCondition::Sunny), 3);
        assert_eq!(uv_index(january, WeatherCondition::Rainy), 0);
    }

    #[test]
    fn test_wind_speed_bounds() {
        // ---
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let calm = wind_speed(101_325.0, 20.0, &mut rng);
            assert!((5.0..15.0).contains(&calm));
        }
        assert_eq!(wind_speed(50_000.0, 20.0, &mut rng), 50.0);
    }
}
