//! # Configuration Settings
//!
//! Defines the configuration structure for secretkeeper and how it is loaded.

use crate::errors::{KeeperError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Environment variable prefix, nested keys are separated by `__`
/// (for example `SECRETKEEPER__DATABASE__URL`).
pub const ENV_PREFIX: &str = "SECRETKEEPER";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Database configuration
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file overlaid with environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_database_url(path, None)
    }

    /// Like [`AppConfig::load`], with a database URL that takes precedence over
    /// both the file and the environment. Validation runs after the override.
    pub fn load_with_database_url(path: Option<&Path>, database_url: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", database_url.map(str::to_string))?
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(KeeperError::from)?;
        self.database.validate_custom()
    }
}

/// Supported database engines, derived from the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Sqlite => "sqlite",
            DatabaseKind::Postgres => "postgresql",
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Maximum number of connections in the pool
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[validate(range(min = 0, max = 50, message = "Min connections must be between 0 and 50"))]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[validate(range(
        min = 1,
        max = 60,
        message = "Connect timeout must be between 1 and 60 seconds"
    ))]
    pub connect_timeout_seconds: u64,

    /// Idle timeout in seconds (0 = no timeout)
    pub idle_timeout_seconds: u64,

    /// Create the secrets table on connect
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/secretkeeper.db".to_string(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 600, // 10 minutes
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Get idle timeout as Duration (None if 0)
    pub fn idle_timeout(&self) -> Option<Duration> {
        if self.idle_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_timeout_seconds))
        }
    }

    /// Database engine selected by the URL scheme, if supported
    pub fn kind(&self) -> Option<DatabaseKind> {
        if self.url.starts_with("sqlite:") {
            Some(DatabaseKind::Sqlite)
        } else if self.url.starts_with("postgres://") || self.url.starts_with("postgresql://") {
            Some(DatabaseKind::Postgres)
        } else {
            None
        }
    }

    /// Check if this is a SQLite configuration
    pub fn is_sqlite(&self) -> bool {
        self.kind() == Some(DatabaseKind::Sqlite)
    }

    /// Check if this is a PostgreSQL configuration
    pub fn is_postgresql(&self) -> bool {
        self.kind() == Some(DatabaseKind::Postgres)
    }

    /// Checks the validator derive cannot express
    pub fn validate_custom(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(KeeperError::validation_field("database URL cannot be empty", "url"));
        }

        if self.kind().is_none() {
            return Err(KeeperError::validation_field(
                "database URL must start with 'sqlite:', 'postgres://' or 'postgresql://'",
                "url",
            ));
        }

        if self.max_connections == 0 {
            return Err(KeeperError::validation_field(
                "max_connections must be greater than 0",
                "max_connections",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(KeeperError::validation_field(
                "min_connections cannot be greater than max_connections",
                "min_connections",
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to startup logs
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "secretkeeper".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}
