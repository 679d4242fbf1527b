//! # Mesh Parser
//!
//! Declarative operation pattern matcher. Callers describe the operations a
//! transaction intent consists of (a fee debit, a transfer credit, ...) and
//! [`match_operations`] binds a flat operation list to those descriptions,
//! then checks amount and address relationships between the resulting groups.
//!
//! Matching is greedy and first-fit: each operation is bound to the first open
//! description it satisfies and never reconsidered. Callers that need a
//! different assignment must order their operations or tighten their
//! descriptions.
//!
//! ```
//! use mesh_parser::{match_operations, AmountDescription, AmountSign, Descriptions, OperationDescription};
//! use mesh_types::{AccountIdentifier, Amount, Currency, Operation, OperationIdentifier};
//!
//! let op = |index: i64, op_type: &str, value: &str| Operation {
//!     operation_identifier: OperationIdentifier::new(index),
//!     operation_type: op_type.to_string(),
//!     account: Some(AccountIdentifier::new("addr")),
//!     amount: Some(Amount::new(value, Currency::new("ETH", 18))),
//!     ..Default::default()
//! };
//! let described = |op_type: &str, sign: AmountSign| {
//!     OperationDescription::of_type(op_type).with_amount(AmountDescription {
//!         exists: true,
//!         sign,
//!         currency: None,
//!     })
//! };
//!
//! let descriptions = Descriptions {
//!     operation_descriptions: vec![
//!         described("fee", AmountSign::Negative),
//!         described("transfer", AmountSign::Positive),
//!     ],
//!     opposite_amounts: vec![vec![0, 1]],
//!     ..Default::default()
//! };
//! let operations = vec![op(0, "fee", "-5"), op(1, "transfer", "5")];
//!
//! let matches = match_operations(&descriptions, &operations).unwrap();
//! assert_eq!(matches[0].first().unwrap().0.operation_type, "fee");
//! ```

pub mod domain;

pub use domain::descriptions::{
    AccountDescription, AmountDescription, AmountSign, Descriptions, MetadataDescription,
    OperationDescription, ValueKind,
};
pub use domain::errors::ParserError;
pub use domain::matching::{match_operations, Match};
