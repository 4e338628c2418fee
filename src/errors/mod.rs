//! # Error Handling
//!
//! Setup-time errors for secretkeeper, defined with `thiserror`.

pub mod types;

pub use types::{KeeperError, Result};
