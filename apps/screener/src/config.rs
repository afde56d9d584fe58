//! Environment-backed configuration for the screener binary.

use anyhow::{Context, Result};

use bondfolio_core::Settings;

/// Runtime configuration assembled from environment variables.
///
/// `TINKOFF_TOKEN` is required; everything else falls back to the
/// [`Settings`] defaults.
pub struct Config {
    pub token: String,
    pub settings: Settings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("TINKOFF_TOKEN")
            .context("TINKOFF_TOKEN must be set to a Tinkoff Invest API token")?;

        let mut settings = Settings::default();
        if let Some(quota) = parse_env("SCREENER_REQUESTS_PER_MINUTE")? {
            settings.requests_per_minute = quota;
        }
        if let Some(attempts) = parse_env("SCREENER_MAX_RETRY_ATTEMPTS")? {
            settings.max_retry_attempts = attempts;
        }

        Ok(Self { token, settings })
    }
}

fn parse_env(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(value) => {
            let parsed = value
                .parse::<u32>()
                .with_context(|| format!("{} must be a positive integer, got '{}'", name, value))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}
