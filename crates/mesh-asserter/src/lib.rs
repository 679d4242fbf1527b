//! # Mesh Asserter
//!
//! Validation engine for the blockchain data API. Given catalogs of allowed
//! operation types, statuses and errors, it checks that blocks, transactions,
//! operations and construction responses returned by an implementation are
//! well-formed, and reports the first violated invariant.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): error taxonomy and catalog-free assertions
//! - **Config** (`config.rs`): catalogs and the payment/fee validation profile
//! - **Ports Layer** (`ports/`): the inbound [`BlockValidationApi`]
//! - **Service Layer** (`service/`): the configured [`Asserter`]
//!
//! ## Example
//!
//! ```
//! use mesh_asserter::{Asserter, AsserterConfig};
//! use mesh_types::{BlockIdentifier, Block, OperationStatus};
//!
//! let config = AsserterConfig::new(
//!     vec!["TRANSFER".to_string()],
//!     vec![OperationStatus::new("SUCCESS", true)],
//! )
//! .with_genesis(BlockIdentifier::new(0, "genesis"));
//! let asserter = Asserter::new(config).unwrap();
//!
//! let block = Block {
//!     block_identifier: BlockIdentifier::new(1, "b1"),
//!     parent_block_identifier: BlockIdentifier::new(0, "genesis"),
//!     timestamp: 1_600_000_000_000,
//!     ..Default::default()
//! };
//! assert!(asserter.block(&block).is_ok());
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::{AsserterConfig, ChainType, OperationRule, ValidationOperation, ValidationProfile};
pub use domain::assertions::{
    account_array, account_identifier, amount, assert_unique_amounts, block_identifier,
    bytes_array_zero, coin_action, coin_change, coin_identifier, currency, direction,
    duplicate_related_transaction, error_descriptor, network_identifier, operation_identifier,
    partial_block_identifier, sub_network_identifier, timestamp, transaction_identifier,
    MAX_UNIX_EPOCH, MIN_UNIX_EPOCH,
};
pub use domain::construction::{
    construction_combine_response, construction_derive_response, construction_metadata_response,
    construction_payloads_response, construction_preprocess_response, curve_type, public_key,
    signature_type, signatures, signing_payload, transaction_identifier_response,
};
pub use domain::errors::{AsserterError, ConfigError};
pub use ports::inbound::BlockValidationApi;
pub use service::Asserter;
