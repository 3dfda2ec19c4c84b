//! Configuration module for the Kompi browser
//!
//! Handles loading environment variables and application configuration.

use std::env;
use std::str::FromStr;
use tracing::warn;

use crate::cache::DEFAULT_CAPACITY;
use crate::client::ClientConfig;
use crate::constants::DEFAULT_API_BASE_URL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL of the upstream content API
    pub api_base_url: String,
    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,
    /// Upstream connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Number of titles whose episode lists are kept
    pub episode_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            episode_cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Every variable is optional; unset or unparseable values fall back to
    /// the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            api_base_url: lookup("API_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                lookup("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout_secs,
            ),
            connect_timeout_secs: parse_or(
                "CONNECT_TIMEOUT_SECS",
                lookup("CONNECT_TIMEOUT_SECS"),
                defaults.connect_timeout_secs,
            ),
            episode_cache_capacity: parse_or(
                "EPISODE_CACHE_CAPACITY",
                lookup("EPISODE_CACHE_CAPACITY"),
                defaults.episode_cache_capacity,
            ),
        }
    }

    /// Upstream client settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            timeout_secs: self.request_timeout_secs,
            connect_timeout_secs: self.connect_timeout_secs,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value {:?} for {}, using default", raw, key);
            default
        }),
        None => default,
    }
}
