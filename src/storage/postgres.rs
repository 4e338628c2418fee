//! PostgreSQL storage adapter

use super::migrations::run_postgres_migrations;
use super::pool::create_postgres_pool;
use super::record::SecretRecord;
use super::store::{SecretPredicate, SecretStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;
use crate::errors::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;

/// Secret store backed by PostgreSQL
#[derive(Clone)]
pub struct PostgresSecretStore {
    pool: PgPool,
}

impl PostgresSecretStore {
    /// Wrap an existing pool. The schema must already exist.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a pool from configuration, applying the schema when
    /// `auto_migrate` is set.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = create_postgres_pool(config).await?;
        if config.auto_migrate {
            run_postgres_migrations(&pool).await?;
        }
        Ok(Self::new(pool))
    }

    /// Get the database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SecretStore for PostgresSecretStore {
    fn backend(&self) -> &'static str {
        "postgresql"
    }

    async fn insert(&self, record: &SecretRecord) -> StoreResult<()> {
        let span =
            crate::db_span!("insert", backend = "postgresql", secret_id = %record.secret_id);

        sqlx::query("INSERT INTO secrets (secret_id, value) VALUES ($1, $2)")
            .bind(&record.secret_id)
            .bind(&record.value)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        Ok(())
    }

    async fn find_one(&self, predicate: &SecretPredicate) -> StoreResult<SecretRecord> {
        let span =
            crate::db_span!("find_one", backend = "postgresql", predicate = predicate.column());

        let row = match predicate {
            SecretPredicate::SecretIdEquals(secret_id) => {
                sqlx::query_as::<_, SecretRecord>(
                    "SELECT secret_id, value FROM secrets WHERE secret_id = $1 LIMIT 1",
                )
                .bind(secret_id)
                .fetch_optional(&self.pool)
                .instrument(span)
                .await?
            }
        };

        row.ok_or(StoreError::NotFound)
    }

    async fn delete_where(&self, predicate: &SecretPredicate) -> StoreResult<u64> {
        let span = crate::db_span!(
            "delete_where",
            backend = "postgresql",
            predicate = predicate.column()
        );

        let result = match predicate {
            SecretPredicate::SecretIdEquals(secret_id) => {
                sqlx::query("DELETE FROM secrets WHERE secret_id = $1")
                    .bind(secret_id)
                    .execute(&self.pool)
                    .instrument(span)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }
}

impl std::fmt::Debug for PostgresSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSecretStore").field("pool", &"[PgPool]").finish()
    }
}
