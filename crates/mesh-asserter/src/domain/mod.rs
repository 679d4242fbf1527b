//! Domain module for the Validation Engine
//!
//! Contains the error taxonomy and the assertions that need no configuration.

pub mod assertions;
pub mod construction;
pub mod errors;

pub use errors::{AsserterError, ConfigError};
