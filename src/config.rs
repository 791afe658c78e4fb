//! Configuration loader for the `skd-weather` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
use std::env;

use anyhow::{anyhow, Result};
use axum::http::HeaderValue;

use crate::locations;

/// Frontend origin allowed by default.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

/// Parse an optional environment variable into `$ty`, failing on bad input.
macro_rules! parse_env_opt {
    ($lookup:expr, $var_name:expr, $ty:ty) => {
        $lookup($var_name)
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        parse_env_opt!($lookup, $var_name, u32).unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($lookup:expr, $var_name:expr) => {
        $lookup($var_name).ok_or_else(|| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Base URL of the upstream devices collection.
    pub api_url: String,

    /// Value of the upstream `auth` query parameter, if the API needs one.
    pub api_key: Option<String>,

    /// Device queried when a request names none.
    pub default_device_id: String,

    /// Per-attempt timeout for upstream requests.
    pub api_timeout_secs: u32,

    /// Upstream attempts per fetch (clamped to 1..=3 by the client).
    pub api_max_attempts: u32,

    /// Default number of readings for historical statistics and forecasts.
    pub history_limit: u32,

    /// Seed for forecast jitter; unseeded when absent.
    pub forecast_seed: Option<u64>,

    /// Browser origin allowed to call the API (the dashboard frontend).
    pub cors_origin: String,

    /// HTTP listening port.
    pub port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `SENSOR_API_URL` – upstream devices collection URL
///
/// Optional:
/// - `SENSOR_API_KEY` – upstream `auth` parameter (default: none)
/// - `DEFAULT_DEVICE_ID` – default device (default: Kaiserplatz station)
/// - `API_TIMEOUT_SECS` – per-attempt timeout (default: 10)
/// - `API_MAX_ATTEMPTS` – attempts per fetch (default: 3)
/// - `HISTORY_LIMIT` – readings for historical endpoints (default: 1000)
/// - `FORECAST_SEED` – seed for reproducible forecasts (default: none)
/// - `CORS_ORIGIN` – allowed browser origin (default: `http://localhost:8080`)
/// - `PORT` – listening port (default: 3001)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    load_with(|name| env::var(name).ok())
}

/// Load configuration from an arbitrary variable lookup.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    // ---
    let api_url = require_env!(lookup, "SENSOR_API_URL");
    let api_key = lookup("SENSOR_API_KEY").filter(|k| !k.is_empty());
    let default_device_id = lookup("DEFAULT_DEVICE_ID")
        .unwrap_or_else(|| locations::default_location().device_id.to_string());
    let api_timeout_secs = parse_env_u32!(lookup, "API_TIMEOUT_SECS", 10);
    let api_max_attempts = parse_env_u32!(lookup, "API_MAX_ATTEMPTS", 3);
    let history_limit = parse_env_u32!(lookup, "HISTORY_LIMIT", 1000);
    let forecast_seed = parse_env_opt!(lookup, "FORECAST_SEED", u64);
    let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
    if cors_origin.parse::<HeaderValue>().is_err() {
        return Err(anyhow!("Invalid CORS_ORIGIN: {:?}", cors_origin));
    }
    let port = u16::try_from(parse_env_u32!(lookup, "PORT", 3001))
        .map_err(|e| anyhow!("Invalid PORT: {}", e))?;

    Ok(Config {
        api_url,
        api_key,
        default_device_id,
        api_timeout_secs,
        api_max_attempts,
        history_limit,
        forecast_seed,
        cors_origin,
        port,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the upstream API key while showing all other configuration
    /// values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_key = match &self.api_key {
            Some(key) if key.chars().count() > 4 => {
                format!("{}****", key.chars().take(4).collect::<String>())
            }
            Some(_) => "****".to_string(),
            None => "<none>".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  SENSOR_API_URL    : {}", self.api_url);
        tracing::info!("  SENSOR_API_KEY    : {}", masked_key);
        tracing::info!("  DEFAULT_DEVICE_ID : {}", self.default_device_id);
        tracing::info!("  API_TIMEOUT_SECS  : {}", self.api_timeout_secs);
        tracing::info!("  API_MAX_ATTEMPTS  : {}", self.api_max_attempts);
        tracing::info!("  HISTORY_LIMIT     : {}", self.history_limit);
        tracing::info!("  FORECAST_SEED     : {:?}", self.forecast_seed);
        tracing::info!("  CORS_ORIGIN       : {}", self.cors_origin);
        tracing::info!("  PORT              : {}", self.port);
    }
}
