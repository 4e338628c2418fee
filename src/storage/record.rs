//! Storage-shaped secret record and its conversions to and from the public
//! [`Secret`] type.

use crate::domain::Secret;
use sqlx::FromRow;
use std::fmt;

/// Database row structure for secrets
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct SecretRecord {
    pub secret_id: String,
    pub value: String,
}

impl SecretRecord {
    /// Convert a public secret into its storage shape
    pub fn import(secret: &Secret) -> Self {
        Self { secret_id: secret.secret_id.clone(), value: secret.value.clone() }
    }

    /// Convert this row into the public secret shape
    pub fn export(self) -> Secret {
        Secret { secret_id: self.secret_id, value: self.value }
    }
}

impl fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRecord")
            .field("secret_id", &self.secret_id)
            .field("value", &"[REDACTED]")
            .finish()
    }
}
