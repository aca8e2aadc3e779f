//! Gateway configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Backend REST API base URL, without a trailing slash.
    pub api_url: String,
    pub port: u16,
    /// Mark cookies set by the gate as `Secure`.
    pub cookie_secure: bool,
    pub relay_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            port: DEFAULT_PORT,
            cookie_secure: false,
            relay_timeout: Duration::from_secs(DEFAULT_RELAY_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `VANYA_API_URL`: backend base URL (default `http://localhost:8000`)
    /// - `PORT`: listen port (default 3000)
    /// - `COOKIE_SECURE`: `1|true|yes|on` / `0|false|no|off` (default false)
    /// - `RELAY_TIMEOUT_SECS`: backend request timeout (default 15)
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `RELAY_TIMEOUT_SECS` is set but not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("VANYA_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or(false);
        let relay_timeout = Duration::from_secs(env_parse("RELAY_TIMEOUT_SECS", DEFAULT_RELAY_TIMEOUT_SECS)?);

        Ok(Self { api_url, port, cookie_secure, relay_timeout })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
