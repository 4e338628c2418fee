//! # Database Connection Pool Management
//!
//! Builds sqlx pools for the SQLite and PostgreSQL backends.

use crate::config::DatabaseConfig;
use crate::errors::{KeeperError, Result};
use sqlx::{
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    PgPool, SqlitePool,
};
use std::{str::FromStr, time::Duration};

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a SQLite connection pool with the specified configuration
pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    config.validate_custom()?;
    if !config.is_sqlite() {
        return Err(KeeperError::validation_field("expected a 'sqlite:' database URL", "url"));
    }

    let connect_options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            KeeperError::database(
                e,
                format!("Invalid SQLite connection string: {}", sanitize_url(&config.url)),
            )
        })?
        .create_if_missing(true)
        .busy_timeout(SQLITE_BUSY_TIMEOUT)
        .journal_mode(SqliteJournalMode::Wal);

    let pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(config.idle_timeout())
        .test_before_acquire(true);

    let pool = pool_options.connect_with(connect_options).await.map_err(|e| {
        tracing::error!(
            error = %e,
            url = %sanitize_url(&config.url),
            busy_timeout_ms = SQLITE_BUSY_TIMEOUT.as_millis(),
            "Failed to create SQLite database pool"
        );
        KeeperError::database(
            e,
            format!("Failed to connect to database: {}", sanitize_url(&config.url)),
        )
    })?;

    log_pool_created(config);
    Ok(pool)
}

/// Create a PostgreSQL connection pool with the specified configuration
pub async fn create_postgres_pool(config: &DatabaseConfig) -> Result<PgPool> {
    config.validate_custom()?;
    if !config.is_postgresql() {
        return Err(KeeperError::validation_field(
            "expected a 'postgres://' or 'postgresql://' database URL",
            "url",
        ));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(config.idle_timeout())
        .test_before_acquire(true)
        .connect(&config.url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, url = %sanitize_url(&config.url), "Failed to create database pool");
            KeeperError::database(
                e,
                format!("Failed to connect to database: {}", sanitize_url(&config.url)),
            )
        })?;

    log_pool_created(config);
    Ok(pool)
}

fn log_pool_created(config: &DatabaseConfig) {
    tracing::info!(
        database_type = config.kind().map(|k| k.as_str()).unwrap_or("unknown"),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_ms = config.connect_timeout().as_millis(),
        idle_timeout_ms = config.idle_timeout().map(|d| d.as_millis()),
        "Database connection pool created"
    );
}

/// Sanitize database URL for logging (remove credentials)
pub fn sanitize_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if parsed.password().is_some() || !parsed.username().is_empty() {
            format!(
                "{}://***:***@{}{}",
                parsed.scheme(),
                parsed.host_str().unwrap_or("unknown"),
                parsed.path()
            )
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
