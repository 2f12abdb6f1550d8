//! Configuration loading and management
//!
//! Configuration is read from YAML. Every section and field has a default,
//! so an empty document is a valid configuration. A few values can be
//! overridden from the environment for container deployments.

use crate::core::query::PaginationLimits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Relational store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://petstore.db` or `sqlite::memory:`
    pub url: String,
    /// Pool size; forced to 1 for in-memory databases
    pub max_connections: u32,
    /// Create the tables on startup when missing
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://petstore.db".to_string(),
            max_connections: 5,
            create_schema: true,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            create_schema: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,sqlx=warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    ///
    /// Fails when a subscriber is already installed.
    pub fn init_tracing(&self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .with_context(|| format!("invalid log filter '{}'", self.filter))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
    }
}

/// Authentication settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Require a bearer token on API routes
    pub enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Complete configuration of the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationLimits,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("failed to parse '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Override values from `PETSTORE_*` environment variables
    pub fn apply_env_overrides(mut self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("PETSTORE_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = lookup("PETSTORE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PETSTORE_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PETSTORE_PORT is not a port number: '{}'", port))?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.pagination.default_limit < 1 {
            anyhow::bail!("pagination.default_limit must be at least 1");
        }
        if self.pagination.max_limit < self.pagination.default_limit {
            anyhow::bail!("pagination.max_limit must not be below pagination.default_limit");
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }
        Ok(())
    }

    /// Configuration for tests: in-memory database, no auth
    pub fn test_config() -> Self {
        Self {
            database: DatabaseConfig::in_memory(),
            logging: LoggingConfig {
                filter: "debug".to_string(),
            },
            auth: AuthConfig { enabled: false },
            ..Self::default()
        }
    }
}
