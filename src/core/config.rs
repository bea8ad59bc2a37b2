//! Configuration management for the Tuiter backend
//!
//! Settings come from defaults, an optional TOML file, environment variables
//! and finally command line flags, in that order of precedence.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::{info, warn};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "tuiter.toml";

/// Available storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// In-process store backed by DashMap
    Memory,
    /// MongoDB server reached through the official driver
    Mongo,
}

impl std::str::FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(StorageType::Memory),
            "mongo" | "mongodb" => Ok(StorageType::Mongo),
            _ => Err(Error::config(format!(
                "Invalid storage type: {}. Valid options: memory, mongo",
                s
            ))),
        }
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageType::Memory => f.write_str("memory"),
            StorageType::Mongo => f.write_str("mongo"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Metrics configuration
    pub metrics: MetricsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend type
    pub storage_type: StorageType,

    /// MongoDB connection string
    pub mongo_uri: String,

    /// MongoDB database name
    pub database: String,
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Serve Prometheus metrics at `/metrics`
    pub enable_prometheus: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 4000)),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::Memory,
            mongo_uri: "mongodb://localhost:27017".to_string(),
            database: "tuiter".to_string(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable_prometheus: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, or from `tuiter.toml` when
    /// it exists, then apply environment overrides and validate.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                info!("Loaded configuration from: {}", path);
                config
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                info!("No config file specified, using defaults");
                Config::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        use std::env;

        if let Ok(addr) = env::var("TUITER_HTTP_ADDR") {
            self.server.http_addr = addr
                .parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        } else if let Ok(port) = env::var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|e| Error::config(format!("Invalid port: {}", e)))?;
            self.server.http_addr.set_port(port);
        }

        if let Ok(storage_type) = env::var("TUITER_STORAGE") {
            self.storage.storage_type = storage_type.parse()?;
        }

        if let Ok(uri) = env::var("TUITER_MONGO_URI") {
            self.storage.mongo_uri = uri;
        }

        if let Ok(database) = env::var("TUITER_DATABASE") {
            self.storage.database = database;
        }

        if let Ok(level) = env::var("TUITER_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = env::var("TUITER_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(Error::config(format!("Invalid log level: {}", other))),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => return Err(Error::config(format!("Invalid log format: {}", other))),
        }

        if self.storage.storage_type == StorageType::Mongo {
            if self.storage.mongo_uri.trim().is_empty() {
                return Err(Error::config("MongoDB connection string is empty"));
            }
            if self.storage.database.trim().is_empty() {
                return Err(Error::config("MongoDB database name is empty"));
            }
        } else if self.storage.mongo_uri != StorageConfig::default().mongo_uri {
            warn!("mongo_uri is set but the memory storage backend is selected");
        }

        Ok(())
    }
}
