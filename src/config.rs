//! Environment-driven configuration. A `.env` file is honoured when present.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_REGISTRY_URL: &str = "https://www.tax.service.gov.uk/check-the-awrs-register";
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Fixed pause before the search form is submitted.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    BindAddr { var: &'static str, value: String },

    #[error("{var} is not a valid URL: {source}")]
    Url {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{var} must be a positive integer, got '{value}'")]
    Number { var: &'static str, value: String },

    #[error("{var} must be a non-negative number of milliseconds, got '{value}'")]
    Millis { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub registry_url: Url,
    pub submit_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine; real env vars still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup so tests don't have to touch the process env.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|_| ConfigError::BindAddr {
            var: "BIND_ADDR",
            value: bind.clone(),
        })?;

        let max_workers = match get("MAX_WORKERS") {
            Some(raw) => parse_positive("MAX_WORKERS", &raw)? as usize,
            None => DEFAULT_MAX_WORKERS,
        };

        let registry = get("AWRS_REGISTRY_URL").unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        let registry_url = Url::parse(&registry).map_err(|source| ConfigError::Url {
            var: "AWRS_REGISTRY_URL",
            source,
        })?;

        let submit_delay_ms = match get("SUBMIT_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Millis {
                var: "SUBMIT_DELAY_MS",
                value: raw.clone(),
            })?,
            None => DEFAULT_SUBMIT_DELAY_MS,
        };

        Ok(Self {
            bind_addr,
            max_workers,
            registry_url,
            submit_delay: Duration::from_millis(submit_delay_ms),
        })
    }

    /// Configuration pointing at an arbitrary registry, used by tests.
    #[cfg(test)]
    pub fn for_registry(registry_url: &str) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("valid default addr"),
            max_workers: 1,
            registry_url: Url::parse(registry_url).expect("valid registry url"),
            submit_delay: Duration::ZERO,
        }
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Number {
            var,
            value: raw.to_string(),
        }),
    }
}
