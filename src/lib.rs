//! # secretkeeper
//!
//! A data access layer for secret records. Callers create, look up and delete
//! secrets through the [`persistence::SecretDal`] trait; storage engines sit
//! behind the [`storage::SecretStore`] adapter.
//!
//! ## Architecture
//!
//! ```text
//! caller → SecretDal (SecretQuery) → SecretStore (SecretPredicate) → SQLite / PostgreSQL
//!              ↓                            ↓
//!          DalError                    StoreError
//! ```
//!
//! - **domain**: the public `Secret` record and `SecretQuery` objects
//! - **persistence**: query dispatch and the `DalError` taxonomy
//! - **storage**: sqlx-backed adapters, pools and schema
//! - **config** / **observability**: settings loading and structured logging

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod persistence;
pub mod storage;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use domain::{Secret, SecretQuery};
pub use errors::{KeeperError, Result};
pub use persistence::{DalError, DalErrorKind, RelationalDal, SecretDal};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
