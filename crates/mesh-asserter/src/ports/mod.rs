//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that conformance harnesses call

pub mod inbound;
