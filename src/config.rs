//! Environment configuration
//!
//! Every knob has a logged default so the server starts with no
//! environment at all. Invalid values fail startup rather than limping
//! along misconfigured.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Default upstream provider
const DEFAULT_UPSTREAM_URL: &str = "https://restcountries.com/v3.1";

/// Runtime configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the server listens on
    pub port: u16,
    /// Base URL of the upstream country API
    pub upstream_url: String,
    /// How long a cached dataset stays fresh, in seconds
    pub cache_ttl_secs: u64,
    /// Hard cap on upstream request duration, in seconds
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn load() -> Self {
        Self {
            port: try_load("ATLAS_PORT", "3000"),
            upstream_url: try_load("ATLAS_UPSTREAM_URL", DEFAULT_UPSTREAM_URL),
            cache_ttl_secs: try_load("ATLAS_CACHE_TTL_SECS", "3600"),
            upstream_timeout_secs: try_load("ATLAS_UPSTREAM_TIMEOUT_SECS", "10"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
