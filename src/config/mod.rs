//! # Configuration Management
//!
//! Configuration is read with the `config` crate from an optional TOML file and
//! `SECRETKEEPER__*` environment variables, then checked with `validator`.

pub mod settings;

pub use settings::{AppConfig, DatabaseConfig, DatabaseKind, ObservabilityConfig, ENV_PREFIX};
