//! Error taxonomy of the secret DAL.

use crate::storage::StoreError;
use thiserror::Error;

/// Result type for DAL operations.
pub type DalResult<T> = std::result::Result<T, DalError>;

/// Errors returned by [`super::SecretDal`] operations.
///
/// Compare errors with [`DalError::kind`], never by message text.
#[derive(Error, Debug)]
pub enum DalError {
    /// The query variant is not supported by the called operation.
    #[error("bad query")]
    BadQuery,

    /// No secret matched the lookup.
    #[error("unknown secret: {0}")]
    UnknownSecret(String),

    /// The storage backend failed.
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: StoreError,
    },
}

/// Category of a [`DalError`], independent of its diagnostic detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DalErrorKind {
    BadQuery,
    UnknownSecret,
    Storage,
}

impl DalError {
    /// Create an unknown secret error
    pub fn unknown_secret(detail: impl Into<String>) -> Self {
        Self::UnknownSecret(detail.into())
    }

    /// Wrap a storage failure with the failing operation
    pub fn storage(context: impl Into<String>, source: StoreError) -> Self {
        Self::Storage { context: context.into(), source }
    }

    pub fn kind(&self) -> DalErrorKind {
        match self {
            Self::BadQuery => DalErrorKind::BadQuery,
            Self::UnknownSecret(_) => DalErrorKind::UnknownSecret,
            Self::Storage { .. } => DalErrorKind::Storage,
        }
    }

    pub fn is_bad_query(&self) -> bool {
        self.kind() == DalErrorKind::BadQuery
    }

    pub fn is_unknown_secret(&self) -> bool {
        self.kind() == DalErrorKind::UnknownSecret
    }

    pub fn is_storage(&self) -> bool {
        self.kind() == DalErrorKind::Storage
    }

    /// The underlying storage error, if any
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl DalErrorKind {
    /// Label used for the `outcome` metric dimension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadQuery => "bad_query",
            Self::UnknownSecret => "unknown_secret",
            Self::Storage => "storage_error",
        }
    }
}
