//! # Storage and Persistence
//!
//! Storage adapters for secret records. Each backend implements
//! [`SecretStore`] over an sqlx pool; [`connect`] picks one from the
//! configured database URL.

pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod record;
pub mod sqlite;
pub mod store;

pub use migrations::{run_postgres_migrations, run_sqlite_migrations};
pub use pool::{create_postgres_pool, create_sqlite_pool, sanitize_url};
pub use postgres::PostgresSecretStore;
pub use record::SecretRecord;
pub use sqlite::SqliteSecretStore;
pub use store::{SecretPredicate, SecretStore, StoreError, StoreResult};

use crate::config::{DatabaseConfig, DatabaseKind};
use crate::errors::{KeeperError, Result};
use std::sync::Arc;

/// Open the storage backend named by `config.url`
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn SecretStore>> {
    match config.kind() {
        Some(DatabaseKind::Sqlite) => Ok(Arc::new(SqliteSecretStore::connect(config).await?)),
        Some(DatabaseKind::Postgres) => Ok(Arc::new(PostgresSecretStore::connect(config).await?)),
        None => Err(KeeperError::validation_field(
            format!("unsupported database URL: {}", sanitize_url(&config.url)),
            "url",
        )),
    }
}

/// Apply the schema for the backend named by `config.url`
pub async fn migrate(config: &DatabaseConfig) -> Result<()> {
    match config.kind() {
        Some(DatabaseKind::Sqlite) => run_sqlite_migrations(&create_sqlite_pool(config).await?).await,
        Some(DatabaseKind::Postgres) => {
            run_postgres_migrations(&create_postgres_pool(config).await?).await
        }
        None => Err(KeeperError::validation_field(
            format!("unsupported database URL: {}", sanitize_url(&config.url)),
            "url",
        )),
    }
}
