//! Storage adapter contract.
//!
//! A [`SecretStore`] exposes the three primitives the DAL builds on: insert a
//! record, find one record matching a predicate, and delete every record
//! matching a predicate. Engine-specific "no rows" signals are folded into
//! [`StoreError::NotFound`].

use super::record::SecretRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for storage adapter operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by a storage adapter
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record matched the predicate
    #[error("no matching record found")]
    NotFound,

    /// The database engine reported a failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// True when the engine rejected a write because of a unique constraint
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

/// Record selection conditions understood by every backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPredicate {
    /// `secret_id = <value>`
    SecretIdEquals(String),
}

impl SecretPredicate {
    /// Name of the column the predicate applies to
    pub fn column(&self) -> &'static str {
        match self {
            Self::SecretIdEquals(_) => "secret_id",
        }
    }
}

/// Storage backend for secret records.
///
/// Implementations must not log record values.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Short backend name used in logs
    fn backend(&self) -> &'static str;

    /// Insert a new record. Uniqueness violations are returned as
    /// [`StoreError::Database`].
    async fn insert(&self, record: &SecretRecord) -> StoreResult<()>;

    /// Fetch a single record matching the predicate.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if nothing matches
    /// - [`StoreError::Database`] for any engine failure
    async fn find_one(&self, predicate: &SecretPredicate) -> StoreResult<SecretRecord>;

    /// Delete all records matching the predicate, returning how many were
    /// removed. Zero matches is not an error.
    async fn delete_where(&self, predicate: &SecretPredicate) -> StoreResult<u64>;
}
