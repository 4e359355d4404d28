//! API server configuration.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default cap on a single CSV upload (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Pause between successive AI calls during batch scoring.
    #[serde(default = "default_pacing_ms")]
    pub scoring_pacing_ms: u64,
    /// Largest accepted request body for lead uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_pacing_ms() -> u64 {
    100
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

#[derive(Debug, Error)]
#[error("invalid value for {var}: '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl ApiConfig {
    /// Load config from environment variables (`HOST`, `PORT`,
    /// `SCORING_PACING_MS`, `MAX_UPLOAD_BYTES`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            host: non_blank("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", non_blank("PORT"))?.unwrap_or(defaults.port),
            scoring_pacing_ms: parse_var("SCORING_PACING_MS", non_blank("SCORING_PACING_MS"))?
                .unwrap_or(defaults.scoring_pacing_ms),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", non_blank("MAX_UPLOAD_BYTES"))?
                .unwrap_or(defaults.max_upload_bytes),
        })
    }

    pub fn scoring_pacing(&self) -> Duration {
        Duration::from_millis(self.scoring_pacing_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError { var, value })
    })
    .transpose()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scoring_pacing_ms: default_pacing_ms(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
