//! # Parser Errors
//!
//! Matching and group-constraint failures, one variant per rule. Like the
//! asserter, diagnostic context is layered with [`ParserError::Context`].

use mesh_types::TypesError;
use thiserror::Error;

/// Errors returned by the operation pattern matcher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParserError {
    /// Diagnostic context wrapped around a deeper failure.
    #[error("{context}: {inner}")]
    Context {
        context: String,
        inner: Box<ParserError>,
    },

    // =========================================================================
    // Match Operations
    // =========================================================================
    #[error("unable to match anything to zero operations")]
    MatchOperationsNoOperations,

    #[error("no descriptions to match")]
    MatchOperationsDescriptionsMissing,

    #[error("unable to find match for operation at index {index}")]
    MatchOperationsMatchNotFound { index: usize },

    #[error("operation description {index} is not matched")]
    MatchOperationsDescriptionNotMatched { index: usize },

    // =========================================================================
    // Group Constraints
    // =========================================================================
    #[error("cannot check opposites of {len} operations")]
    OppositesLength { len: usize },

    #[error("match index {index} out of range")]
    MatchIndexOutOfRange { index: usize },

    #[error("match index {index} has no matched operations")]
    MatchIndexEmpty { index: usize },

    #[error("cannot check equality of 0 operations")]
    EqualAmountsNoOperations,

    #[error("operation amount {expected} is not equal to {actual}")]
    EqualAmountsNotEqual { expected: String, actual: String },

    #[error("{a} and {b} have the same sign")]
    OppositeAmountsSameSign { a: String, b: String },

    #[error("the absolute value of {a} and {b} is not same")]
    OppositeAmountsAbsValMismatch { a: String, b: String },

    #[error("got {count} operations, cannot check equality of addresses")]
    EqualAddressesTooFewOperations { count: usize },

    #[error("account is missing, cannot check equality of addresses")]
    EqualAddressesAccountIsNil,

    #[error("operation address {actual} is not equal to {expected}")]
    EqualAddressesAddrMismatch { expected: String, actual: String },

    // =========================================================================
    // Account Match
    // =========================================================================
    #[error("account is missing")]
    AccountMatchAccountMissing,

    #[error("sub account is missing")]
    AccountMatchSubAccountMissing,

    #[error("sub account is populated")]
    AccountMatchSubAccountPopulated,

    #[error("expected sub account address {expected} but got {actual}")]
    AccountMatchUnexpectedSubAccountAddr { expected: String, actual: String },

    // =========================================================================
    // Amount Match
    // =========================================================================
    #[error("amount is missing")]
    AmountMatchAmountMissing,

    #[error("amount is populated")]
    AmountMatchAmountPopulated,

    #[error("expected amount sign of amount {amount} is {sign}")]
    AmountMatchUnexpectedSign { amount: String, sign: String },

    #[error("expected currency {expected} but got {actual}")]
    AmountMatchUnexpectedCurrency { expected: String, actual: String },

    // =========================================================================
    // Coin & Metadata Match
    // =========================================================================
    #[error("coin change is missing, expected coin action {action}")]
    CoinActionMatchCoinChangeIsNil { action: String },

    #[error("expected coin action {expected} but got {actual}")]
    CoinActionMatchUnexpectedCoinAction { expected: String, actual: String },

    #[error("metadata key {key} not found")]
    MetadataMatchKeyNotFound { key: String },

    #[error("value of {key} is not of kind {kind}")]
    MetadataMatchKeyValueMismatch { key: String, kind: String },

    // =========================================================================
    // Primitives
    // =========================================================================
    #[error("invalid amount: {0}")]
    Amount(#[from] TypesError),
}

impl ParserError {
    /// Wrap this error with a layer of diagnostic context.
    pub fn context(self, context: impl Into<String>) -> Self {
        ParserError::Context {
            context: context.into(),
            inner: Box::new(self),
        }
    }

    /// The innermost error, with every context layer removed.
    pub fn root_cause(&self) -> &ParserError {
        let mut current = self;
        while let ParserError::Context { inner, .. } = current {
            current = inner;
        }
        current
    }
}
