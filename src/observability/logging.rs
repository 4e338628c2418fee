//! # Structured Logging
//!
//! Span macros and startup logging helpers built on the tracing ecosystem.
//! Secret values must never be attached to a span or event; only identifiers.

/// Create a tracing span for a storage backend operation.
///
/// ```rust,ignore
/// let span = db_span!("find_one", backend = "sqlite");
/// ```
#[macro_export]
macro_rules! db_span {
    ($operation:expr) => {
        tracing::debug_span!(
            "db_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4()
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "db_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::AppConfig) {
    tracing::info!(
        service_name = %config.observability.service_name,
        database_url = %crate::storage::pool::sanitize_url(&config.database.url),
        database_type = config.database.kind().map(|k| k.as_str()).unwrap_or("unknown"),
        max_connections = config.database.max_connections,
        auto_migrate = config.database.auto_migrate,
        json_logging = config.observability.json_logging,
        "secretkeeper configuration"
    );
}
