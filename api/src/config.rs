/// Server configuration module
/// Reads settings from the environment (optionally seeded from `.env`)

use std::env;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://wantbox.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8089";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid bind address: {0}")]
    InvalidBindAddr(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
            Ok(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Top-level server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw =
            lookup("WANTBOX_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid max_connections: {}", e)))?;

        // Validate pool size is reasonable
        if !(1..=100).contains(&max_connections) {
            return Err(ConfigError::InvalidConfig(
                "DB_MAX_CONNECTIONS must be between 1 and 100".to_string(),
            ));
        }

        debug!(max_connections, "Database configuration loaded");
        info!(bind_addr = %bind_addr, database_url = %url, "Configuration loaded");

        Ok(AppConfig {
            bind_addr,
            database: DatabaseConfig {
                url,
                max_connections,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8089".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("WANTBOX_BIND_ADDR", "127.0.0.1:3000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "8"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 8);
    }

    #[test]
    fn test_blank_database_url_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("WANTBOX_BIND_ADDR", "nowhere")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBindAddr("nowhere".to_string()));

        assert!(AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "lots")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "101")])).is_err());
    }
}
