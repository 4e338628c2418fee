//! Relational implementation of the secret DAL.
//!
//! Converts between the public [`Secret`] and the storage-shaped
//! [`SecretRecord`], dispatches each [`SecretQuery`] variant to a storage
//! predicate, and maps storage outcomes onto [`DalError`].

use super::error::{DalError, DalResult};
use super::SecretDal;
use crate::domain::{Secret, SecretQuery};
use crate::storage::{SecretPredicate, SecretRecord, SecretStore, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Counter incremented once per DAL call, labelled by operation and outcome
pub const OPERATIONS_METRIC: &str = "secretkeeper_dal_operations_total";

/// Secret DAL over any [`SecretStore`]
pub struct RelationalDal<S: SecretStore + ?Sized + 'static = dyn SecretStore> {
    store: Arc<S>,
}

impl<S: SecretStore + ?Sized + 'static> RelationalDal<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get the underlying storage adapter
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: SecretStore + ?Sized + 'static> Clone for RelationalDal<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: SecretStore + ?Sized + 'static> std::fmt::Debug for RelationalDal<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationalDal").field("backend", &self.store.backend()).finish()
    }
}

#[async_trait]
impl<S: SecretStore + ?Sized + 'static> SecretDal for RelationalDal<S> {
    #[instrument(skip(self, secret), fields(secret_id = %secret.secret_id), name = "dal_create_secret")]
    async fn create_secret(&self, secret: &Secret) -> DalResult<()> {
        let record = SecretRecord::import(secret);

        let result = self.store.insert(&record).await.map_err(|e| {
            tracing::error!(
                error = %e,
                unique_violation = e.is_unique_violation(),
                backend = self.store.backend(),
                "Failed to create secret"
            );
            DalError::storage("relational: error creating secret", e)
        });

        if result.is_ok() {
            tracing::info!(backend = self.store.backend(), "Created secret");
        }

        record_outcome("create", &result);
        result
    }

    #[instrument(
        skip(self, query),
        fields(query_kind = query.kind(), secret_id = %query.secret_id()),
        name = "dal_find_secret"
    )]
    async fn find_secret(&self, query: SecretQuery) -> DalResult<Secret> {
        let result = match query {
            SecretQuery::FindBySecretId(secret_id) => {
                let predicate = SecretPredicate::SecretIdEquals(secret_id);
                match self.store.find_one(&predicate).await {
                    Ok(record) => Ok(record.export()),
                    Err(StoreError::NotFound) => {
                        tracing::debug!("No matching secret found");
                        Err(DalError::unknown_secret("relational: no matching secret found"))
                    }
                    Err(e) => {
                        tracing::error!(error = %e, backend = self.store.backend(), "Failed to look up secret");
                        Err(DalError::storage("relational: error looking up secret", e))
                    }
                }
            }
            other => {
                tracing::warn!(query_kind = other.kind(), "Unsupported query for find_secret");
                Err(DalError::BadQuery)
            }
        };

        record_outcome("find", &result);
        result
    }

    #[instrument(
        skip(self, query),
        fields(query_kind = query.kind(), secret_id = %query.secret_id()),
        name = "dal_delete_secret"
    )]
    async fn delete_secret(&self, query: SecretQuery) -> DalResult<()> {
        let result = match query {
            SecretQuery::DeleteBySecretId(secret_id) => {
                let predicate = SecretPredicate::SecretIdEquals(secret_id);
                match self.store.delete_where(&predicate).await {
                    Ok(deleted) => {
                        tracing::info!(deleted, "Deleted secrets");
                        Ok(())
                    }
                    Err(e) => {
                        tracing::error!(error = %e, backend = self.store.backend(), "Failed to delete secret");
                        Err(DalError::storage("relational: error deleting secret", e))
                    }
                }
            }
            other => {
                tracing::warn!(query_kind = other.kind(), "Unsupported query for delete_secret");
                Err(DalError::BadQuery)
            }
        };

        record_outcome("delete", &result);
        result
    }
}

fn record_outcome<T>(operation: &'static str, result: &DalResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind().as_str(),
    };
    metrics::counter!(OPERATIONS_METRIC, "operation" => operation, "outcome" => outcome)
        .increment(1);
}
