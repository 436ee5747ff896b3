//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`
//! (after `dotenvy` has had the chance to populate it from a `.env` file).
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `ORS_API_KEY`: OpenRouteService API key used for geocoding and directions
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,locator=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 5000)
//! - `ORS_BASE_URL`: Provider base URL (default: "https://api.openrouteservice.org")
//! - `GEOCODE_COUNTRY`: Country filter for geocoding, empty for none (default: "US")
//! - `LOCATIONS_FILE`: CSV location table (default: "locations_with_coords.csv")
//! - `MAX_CANDIDATES`: Locations kept by the straight-line pre-filter (default: 10)
//! - `MAX_RADIUS_KM`: Pre-filter radius in km (default: 500)
//! - `TOP_K`: Results returned per search (default: 5)
//! - `ASSUMED_SPEED_KMH`: Speed for fallback drive-time estimates (default: 80)
//! - `ROUTING_CONCURRENCY`: Router calls in flight per request (default: 1)
//! - `GEOCODE_MIN_INTERVAL_MS`: Minimum spacing of geocode calls (default: 1000)
//! - `AUTOCOMPLETE_MIN_INTERVAL_MS`: Minimum spacing of autocomplete calls (default: 200)
//! - `ROUTING_MIN_INTERVAL_MS`: Minimum spacing of directions calls (default: 750)
//! - `REQUEST_TIMEOUT_SECS`: Per-call upstream timeout (default: 10)
//! - `RETRY_MAX_ATTEMPTS`: Attempts per upstream call (default: 3)
//! - `RETRY_BASE_DELAY_MS`: Backoff base, multiplied by the attempt number (default: 1000)
//! - `AUTOCOMPLETE_CACHE_TTL_SECS`: Suggestion cache lifetime (default: 3600)
//! - `AUTOCOMPLETE_MIN_CHARS`: Shorter queries get no suggestions (default: 2)
//! - `AUTOCOMPLETE_LIMIT`: Suggestions requested per query (default: 5)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS allow-list, empty allows any (default: empty)

use crate::{
    application::{autocomplete::dto::SuggestSettings, find_closest::dto::SearchSettings},
    infrastructure::{
        geocoding::ors_client::DEFAULT_ORS_BASE_URL,
        lookup::{LookupSettings, RetryPolicy},
    },
};
use serde::Deserialize;
use std::time::Duration;

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// OpenRouteService API key
    pub ors_api_key: String,

    /// OpenRouteService base URL, overridable for self-hosted instances
    pub ors_base_url: String,

    /// ISO country code restricting geocoding results
    pub geocode_country: Option<String>,

    /// Path to the CSV location table
    pub locations_file: String,

    pub max_candidates: usize,
    pub max_radius_km: f64,
    pub top_k: usize,
    pub assumed_speed_kmh: f64,
    pub routing_concurrency: usize,

    pub geocode_min_interval_ms: u64,
    pub autocomplete_min_interval_ms: u64,
    pub routing_min_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub retry_max_attempts: u32,
    pub retry_base_delay_ms: u64,

    pub autocomplete_cache_ttl_secs: u64,
    pub autocomplete_min_chars: usize,
    pub autocomplete_limit: usize,

    /// Origins allowed by CORS; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value cannot be
    /// parsed, or a value is out of its valid range.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 5000)?,
            ors_api_key: env_required("ORS_API_KEY")?,
            ors_base_url: env_or("ORS_BASE_URL", DEFAULT_ORS_BASE_URL.to_string())?,
            geocode_country: Some(env_or("GEOCODE_COUNTRY", "US".to_string())?)
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            locations_file: env_or("LOCATIONS_FILE", "locations_with_coords.csv".to_string())?,
            max_candidates: env_or("MAX_CANDIDATES", 10)?,
            max_radius_km: env_or("MAX_RADIUS_KM", 500.0)?,
            top_k: env_or("TOP_K", 5)?,
            assumed_speed_kmh: env_or("ASSUMED_SPEED_KMH", 80.0)?,
            routing_concurrency: env_or("ROUTING_CONCURRENCY", 1)?,
            geocode_min_interval_ms: env_or("GEOCODE_MIN_INTERVAL_MS", 1000)?,
            autocomplete_min_interval_ms: env_or("AUTOCOMPLETE_MIN_INTERVAL_MS", 200)?,
            routing_min_interval_ms: env_or("ROUTING_MIN_INTERVAL_MS", 750)?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 10)?,
            retry_max_attempts: env_or("RETRY_MAX_ATTEMPTS", 3)?,
            retry_base_delay_ms: env_or("RETRY_BASE_DELAY_MS", 1000)?,
            autocomplete_cache_ttl_secs: env_or("AUTOCOMPLETE_CACHE_TTL_SECS", 3600)?,
            autocomplete_min_chars: env_or("AUTOCOMPLETE_MIN_CHARS", 2)?,
            autocomplete_limit: env_or("AUTOCOMPLETE_LIMIT", 5)?,
            allowed_origins: env_list("ALLOWED_ORIGINS"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the search cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ors_api_key.trim().is_empty() {
            anyhow::bail!("ORS_API_KEY must not be empty");
        }
        if self.max_candidates == 0 || self.top_k == 0 {
            anyhow::bail!("MAX_CANDIDATES and TOP_K must be at least 1");
        }
        if !(self.max_radius_km.is_finite() && self.max_radius_km > 0.0) {
            anyhow::bail!("MAX_RADIUS_KM must be a positive number");
        }
        if !(self.assumed_speed_kmh.is_finite() && self.assumed_speed_kmh > 0.0) {
            anyhow::bail!("ASSUMED_SPEED_KMH must be a positive number");
        }
        if self.routing_concurrency == 0 || self.retry_max_attempts == 0 {
            anyhow::bail!("ROUTING_CONCURRENCY and RETRY_MAX_ATTEMPTS must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            max_candidates: self.max_candidates,
            max_radius_km: self.max_radius_km,
            top_k: self.top_k,
            assumed_speed_kmh: self.assumed_speed_kmh,
            routing_concurrency: self.routing_concurrency,
        }
    }

    pub fn lookup_settings(&self) -> LookupSettings {
        LookupSettings {
            geocode_interval: Duration::from_millis(self.geocode_min_interval_ms),
            autocomplete_interval: Duration::from_millis(self.autocomplete_min_interval_ms),
            routing_interval: Duration::from_millis(self.routing_min_interval_ms),
            call_timeout: self.request_timeout(),
            retry: RetryPolicy::new(
                self.retry_max_attempts,
                Duration::from_millis(self.retry_base_delay_ms),
            ),
        }
    }

    pub fn suggest_settings(&self) -> SuggestSettings {
        SuggestSettings {
            min_chars: self.autocomplete_min_chars,
            limit: self.autocomplete_limit,
            cache_ttl: Duration::from_secs(self.autocomplete_cache_ttl_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// Returns the parsed environment variable if set, otherwise returns the default.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list; unset or blank yields an empty list.
fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
