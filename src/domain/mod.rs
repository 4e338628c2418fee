//! Domain layer
//!
//! Plain data types shared by the DAL and its callers, with no storage
//! dependencies.

pub mod secret;

pub use secret::{Secret, SecretQuery};
