//! # Mesh Types Crate
//!
//! This crate contains the data API records consumed by the conformance
//! engine, together with the numeric and identity primitives shared by the
//! asserter and the parser.
//!
//! ## Design Principles
//!
//! - **Plain Records**: Every entity is an immutable value produced by the
//!   deserialization layer. Nothing in this workspace mutates them.
//! - **Schema Optionality**: Fields the data API allows to be absent are
//!   `Option`; required fields are plain and enforced by the decoder.
//! - **Canonical Identity**: Composite identifiers are compared through
//!   [`hash`], never through field-by-field equality on metadata.

pub mod construction;
pub mod entities;
pub mod errors;
pub mod primitives;

pub use construction::*;
pub use entities::*;
pub use errors::TypesError;
pub use primitives::{amount_value, big_int, hash, print_struct};

/// Re-exported so callers can name amount values without a direct dependency.
pub use num_bigint::{BigInt, Sign};
