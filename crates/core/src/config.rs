//! Process configuration
//!
//! Everything comes from environment variables, optionally seeded from a
//! `.env` file in the working directory.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::{PromptbaseError, Result};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url:    String,
    pub addr:            SocketAddr,
    pub max_connections: u32,
    pub logging:         LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level:  String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:  "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber. `RUST_LOG` wins over the configured level.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            },
            _ => {
                fmt().with_env_filter(filter).init();
            },
        }
    }
}

impl Config {
    /// Load `.env` (if any) and read the process environment
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PromptbaseError::Config("DATABASE_URL is not set".into()))?;

        let addr_raw = lookup("PROMPTBASE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.parse::<SocketAddr>().map_err(|e| {
            PromptbaseError::Config(format!("invalid PROMPTBASE_ADDR '{}': {}", addr_raw, e))
        })?;

        let max_connections = match lookup("PROMPTBASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(PromptbaseError::Config(format!(
                        "invalid PROMPTBASE_MAX_CONNECTIONS '{}'",
                        raw
                    )))
                },
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level:  lookup("PROMPTBASE_LOG").unwrap_or(defaults.level),
            format: lookup("PROMPTBASE_LOG_FORMAT").unwrap_or(defaults.format),
        };

        Ok(Self {
            database_url,
            addr,
            max_connections,
            logging,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/promptbase")]).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/promptbase");
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert_eq!(err.category(), "config");
        assert!(err.to_string().contains("DATABASE_URL"));

        assert!(load(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/prompts"),
            ("PROMPTBASE_ADDR", "0.0.0.0:9000"),
            ("PROMPTBASE_MAX_CONNECTIONS", "12"),
            ("PROMPTBASE_LOG", "debug"),
            ("PROMPTBASE_LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("DATABASE_URL", "x"), ("PROMPTBASE_ADDR", "nope")]).is_err());
        assert!(load(&[("DATABASE_URL", "x"), ("PROMPTBASE_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("DATABASE_URL", "x"), ("PROMPTBASE_MAX_CONNECTIONS", "many")]).is_err());
    }
}
