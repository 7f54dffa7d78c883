//! Configuration module for the employee records backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid EMPLOYEE_BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("Invalid EMPLOYEE_DB_MAX_CONNECTIONS {value:?}: {source}")]
    InvalidMaxConnections {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Upper bound on pooled SQLite connections
    pub db_max_connections: u32,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("EMPLOYEE_DB_PATH")
            .unwrap_or_else(|_| "./data/employees.sqlite".to_string())
            .into();

        let max_connections =
            env::var("EMPLOYEE_DB_MAX_CONNECTIONS").unwrap_or_else(|_| "5".to_string());
        let db_max_connections =
            max_connections
                .parse::<u32>()
                .map_err(|source| ConfigError::InvalidMaxConnections {
                    value: max_connections.clone(),
                    source,
                })?;

        let bind = env::var("EMPLOYEE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind.clone(),
                source,
            })?;

        let log_level = env::var("EMPLOYEE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            db_path,
            db_max_connections,
            bind_addr,
            log_level,
        })
    }
}
