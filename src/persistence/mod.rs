//! # Secret Data Access Layer
//!
//! The only supported entry point for secret persistence. Callers describe
//! lookups and deletions with [`SecretQuery`] values; each operation accepts
//! the variants it understands and rejects everything else with
//! [`DalError::BadQuery`] before any storage call is made.
//!
//! Find and delete deliberately differ on absent secrets: `find_secret`
//! reports [`DalError::UnknownSecret`], while `delete_secret` succeeds when
//! nothing matched.
//!
//! ```rust,no_run
//! use secretkeeper::config::DatabaseConfig;
//! use secretkeeper::persistence::{RelationalDal, SecretDal};
//! use secretkeeper::{Secret, SecretQuery};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = secretkeeper::storage::connect(&DatabaseConfig::default()).await?;
//! let dal = RelationalDal::new(store);
//!
//! dal.create_secret(&Secret::new("abc", "topsecret")).await?;
//! let secret = dal.find_secret(SecretQuery::find_by_secret_id("abc")).await?;
//! dal.delete_secret(SecretQuery::delete_by_secret_id(secret.secret_id)).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod relational;

pub use error::{DalError, DalErrorKind, DalResult};
pub use relational::{RelationalDal, OPERATIONS_METRIC};

use crate::domain::{Secret, SecretQuery};
use async_trait::async_trait;

/// Persistence operations for secrets
#[async_trait]
pub trait SecretDal: Send + Sync {
    /// Persist a fully formed secret.
    ///
    /// No existence check is made; a duplicate `secret_id` is rejected by the
    /// store and reported as [`DalError::Storage`].
    async fn create_secret(&self, secret: &Secret) -> DalResult<()>;

    /// Look up a single secret.
    ///
    /// # Errors
    ///
    /// - [`DalError::BadQuery`] for any variant other than `FindBySecretId`
    /// - [`DalError::UnknownSecret`] if no secret matches
    /// - [`DalError::Storage`] for any other store failure
    async fn find_secret(&self, query: SecretQuery) -> DalResult<Secret>;

    /// Delete every secret matching the query. Deleting an absent secret
    /// succeeds.
    ///
    /// # Errors
    ///
    /// - [`DalError::BadQuery`] for any variant other than `DeleteBySecretId`
    /// - [`DalError::Storage`] for store failures
    async fn delete_secret(&self, query: SecretQuery) -> DalResult<()>;
}
