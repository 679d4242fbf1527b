//! # Mesh Conformance Test Suite
//!
//! Unified test crate exercising the asserter and the parser together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs          # Shared engine configs and object builders
//! └── integration/         # Cross-crate flows
//!     ├── block_flows.rs
//!     ├── construction_flows.rs
//!     └── matcher_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mesh-tests
//!
//! # By category
//! cargo test -p mesh-tests integration::block_flows::
//!
//! # Benchmarks
//! cargo bench -p mesh-tests
//! ```

pub mod fixtures;
pub mod integration;
