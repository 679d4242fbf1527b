//! Cross-crate flows.

pub mod block_flows;
pub mod construction_flows;
pub mod matcher_flows;
