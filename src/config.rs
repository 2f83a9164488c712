//! Client settings, read from the environment (and `.env` via `dotenvy`).

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Settings for reaching the meeting-point service.
///
/// | Variable                          | Default                 |
/// |-----------------------------------|-------------------------|
/// | `WHERE2MEET_API_URL`              | `http://localhost:8000` |
/// | `WHERE2MEET_TIMEOUT_SECS`         | `30`                    |
/// | `WHERE2MEET_CONNECT_TIMEOUT_SECS` | `10`                    |
/// | `WHERE2MEET_USE_TFL_API`          | `true`                  |
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub use_tfl_api: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            use_tfl_api: true,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("WHERE2MEET_API_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("WHERE2MEET_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("WHERE2MEET_TIMEOUT_SECS is not a number: {secs:?}"))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = lookup("WHERE2MEET_CONNECT_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().with_context(|| {
                format!("WHERE2MEET_CONNECT_TIMEOUT_SECS is not a number: {secs:?}")
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("WHERE2MEET_USE_TFL_API") {
            config.use_tfl_api = parse_flag(&flag)
                .with_context(|| format!("WHERE2MEET_USE_TFL_API is not a boolean: {flag:?}"))?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
