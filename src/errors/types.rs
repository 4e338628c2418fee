//! # Error Types
//!
//! Crate-level error type for setup concerns: configuration, connection pools
//! and schema migrations. Errors raised by the secret DAL itself live in
//! [`crate::persistence::DalError`].

/// Custom result type for secretkeeper setup operations
pub type Result<T> = std::result::Result<T, KeeperError>;

/// Main error type for configuration and storage bootstrapping
#[derive(thiserror::Error, Debug)]
pub enum KeeperError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },
}

impl KeeperError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create a database error with context
    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }
}

impl From<config::ConfigError> for KeeperError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for KeeperError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_validation_messages("", &errors, &mut fields);
        fields.sort();

        Self::validation(format!("Validation failed: {}", fields.join("; ")))
    }
}

/// Flatten nested validation errors into `path: message` strings
fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path =
            if prefix.is_empty() { field.to_string() } else { format!("{}.{}", prefix, field) };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                out.push(format!("{}: {}", path, messages.join(", ")));
            }
            ValidationErrorsKind::Struct(nested) => collect_validation_messages(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = KeeperError::config("missing database section");
        assert!(matches!(error, KeeperError::Config { .. }));
        assert_eq!(error.to_string(), "Configuration error: missing database section");
    }

    #[test]
    fn test_validation_error() {
        let error = KeeperError::validation_field("must not be empty", "database.url");
        if let KeeperError::Validation { field, .. } = error {
            assert_eq!(field, Some("database.url".to_string()));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_database_error_keeps_source_and_context() {
        use std::error::Error as _;

        let error = KeeperError::database(sqlx::Error::PoolTimedOut, "Failed to apply SQLite schema");
        assert_eq!(error.to_string(), "Database error: Failed to apply SQLite schema");
        assert!(error.source().is_some_and(|s| s.to_string().contains("timed out")));
    }

    #[test]
    fn test_config_error_conversion() {
        let error: KeeperError = config::ConfigError::NotFound("database".to_string()).into();
        assert!(matches!(error, KeeperError::Config { source: Some(_), .. }));
    }
}
