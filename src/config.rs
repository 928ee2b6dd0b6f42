// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ride/route persistence backend
    pub api_base_url: String,
    /// Bearer token for the backend (optional; unauthenticated calls are skipped)
    pub api_token: Option<String>,
    /// Base URL of the directions service
    pub directions_base_url: String,
    /// API key for the directions service
    pub directions_api_key: String,
    /// Base URL of the geocoding service
    pub geocoding_base_url: String,
    /// Interval between fixes when replaying a recorded ride, in milliseconds
    pub replay_tick_ms: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            api_token: None,
            directions_base_url: "https://maps.googleapis.com/maps/api/directions".to_string(),
            directions_api_key: "test_api_key".to_string(),
            geocoding_base_url: "https://nominatim.openstreetmap.org".to_string(),
            replay_tick_ms: 100,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Tests pass a map here
    /// instead of mutating the process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: get("CICLOMAPA_API_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            api_token: get("CICLOMAPA_TOKEN").filter(|t| !t.is_empty()),
            directions_base_url: get("DIRECTIONS_URL").unwrap_or_else(|| {
                "https://maps.googleapis.com/maps/api/directions".to_string()
            }),
            directions_api_key: get("MAPS_API_KEY")
                .ok_or(ConfigError::Missing("MAPS_API_KEY"))?,
            geocoding_base_url: get("GEOCODING_URL")
                .unwrap_or_else(|| "https://nominatim.openstreetmap.org".to_string()),
            replay_tick_ms: get("REPLAY_TICK_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
