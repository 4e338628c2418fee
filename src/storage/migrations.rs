//! # Database Schema
//!
//! Creates the `secrets` table. Statements are idempotent so they can run on
//! every start when `auto_migrate` is enabled.

use crate::errors::{KeeperError, Result};
use sqlx::{PgPool, SqlitePool};
use tracing::info;

/// Uniqueness of `secret_id` is enforced here and nowhere else.
const SQLITE_SCHEMA: &[&str] = &["CREATE TABLE IF NOT EXISTS secrets (
        secret_id TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )"];

const POSTGRES_SCHEMA: &[&str] = &["CREATE TABLE IF NOT EXISTS secrets (
        secret_id TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )"];

/// Apply the schema to a SQLite database
pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<()> {
    for statement in SQLITE_SCHEMA {
        sqlx::query(*statement).execute(pool).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to apply SQLite schema");
            KeeperError::database(e, "Failed to apply SQLite schema")
        })?;
    }

    info!(backend = "sqlite", statements = SQLITE_SCHEMA.len(), "Database schema is up to date");
    Ok(())
}

/// Apply the schema to a PostgreSQL database
pub async fn run_postgres_migrations(pool: &PgPool) -> Result<()> {
    for statement in POSTGRES_SCHEMA {
        sqlx::query(*statement).execute(pool).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to apply PostgreSQL schema");
            KeeperError::database(e, "Failed to apply PostgreSQL schema")
        })?;
    }

    info!(
        backend = "postgresql",
        statements = POSTGRES_SCHEMA.len(),
        "Database schema is up to date"
    );
    Ok(())
}
