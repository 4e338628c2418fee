//! Secret domain types
//!
//! The public shape of a stored secret and the query objects used to look
//! secrets up or remove them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A secret as seen by callers of the data access layer.
///
/// `Default` yields the zero value (empty identifier and payload). The payload
/// is redacted from `Debug` output so secrets cannot leak through logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Unique, caller-assigned identifier
    pub secret_id: String,
    /// Opaque protected payload
    pub value: String,
}

impl Secret {
    pub fn new(secret_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self { secret_id: secret_id.into(), value: value.into() }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("secret_id", &self.secret_id)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Query objects accepted by the secret DAL.
///
/// Each variant carries only its key and is meant for exactly one operation.
/// DAL methods dispatch over the variants they understand and reject all
/// others with `DalError::BadQuery`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "secret_id", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SecretQuery {
    /// Look up the secret with this identifier
    FindBySecretId(String),
    /// Delete every secret with this identifier
    DeleteBySecretId(String),
}

impl SecretQuery {
    pub fn find_by_secret_id(secret_id: impl Into<String>) -> Self {
        Self::FindBySecretId(secret_id.into())
    }

    pub fn delete_by_secret_id(secret_id: impl Into<String>) -> Self {
        Self::DeleteBySecretId(secret_id.into())
    }

    /// Stable name of the variant, used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FindBySecretId(_) => "find_by_secret_id",
            Self::DeleteBySecretId(_) => "delete_by_secret_id",
        }
    }

    /// Identifier the query targets
    pub fn secret_id(&self) -> &str {
        match self {
            Self::FindBySecretId(id) | Self::DeleteBySecretId(id) => id,
        }
    }
}
