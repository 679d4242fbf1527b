//! # Asserter Errors
//!
//! One variant per violated invariant. Positional context is layered on with
//! [`AsserterError::Context`] while the error unwinds out of the object graph;
//! [`AsserterError::root_cause`] recovers the leaf for matching.

use mesh_types::TypesError;
use thiserror::Error;

/// Errors returned by the validation engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AsserterError {
    /// Diagnostic context wrapped around a deeper failure.
    #[error("{context}: {inner}")]
    Context {
        context: String,
        inner: Box<AsserterError>,
    },

    // =========================================================================
    // Amount & Currency
    // =========================================================================
    #[error("amount value is missing")]
    AmountValueMissing,

    #[error("amount value {value} is not an integer")]
    AmountIsNotInt { value: String },

    #[error("amount currency is missing")]
    AmountCurrencyIsNil,

    #[error("amount currency symbol is empty")]
    AmountCurrencySymbolEmpty,

    #[error("amount currency has negative decimals: {decimals}")]
    AmountCurrencyHasNegDecimals { decimals: i32 },

    #[error("currency {currency} is used multiple times")]
    DuplicateCurrency { currency: String },

    // =========================================================================
    // Identifiers
    // =========================================================================
    #[error("expected operation identifier index {expected} but got {actual}")]
    OperationIdentifierIndexOutOfOrder { expected: i64, actual: i64 },

    #[error("operation identifier network index {network_index} is negative")]
    OperationIdentifierNetworkIndexInvalid { network_index: i64 },

    #[error("account is missing")]
    AccountIsNil,

    #[error("account address is missing")]
    AccountAddrMissing,

    #[error("sub account address is missing")]
    AccountSubAccountAddrMissing,

    #[error("block identifier hash is missing")]
    BlockIdentifierHashMissing,

    #[error("block identifier index {index} is negative")]
    BlockIdentifierIndexIsNeg { index: i64 },

    #[error("partial block identifier hash is empty")]
    PartialBlockIdentifierHashIsEmpty,

    #[error("partial block identifier index {index} is negative")]
    PartialBlockIdentifierIndexIsNegative { index: i64 },

    #[error("transaction identifier hash is missing")]
    TxIdentifierHashMissing,

    #[error("network identifier blockchain is missing")]
    NetworkIdentifierBlockchainMissing,

    #[error("network identifier network is missing")]
    NetworkIdentifierNetworkMissing,

    #[error("sub network identifier network is missing")]
    SubNetworkIdentifierInvalid,

    #[error("coin identifier is not set")]
    CoinIdentifierNotSet,

    #[error("coin action is invalid")]
    CoinActionInvalid,

    // =========================================================================
    // Operations & Ordering
    // =========================================================================
    #[error("operation status is missing")]
    OperationStatusMissing,

    #[error("operation status {status} must be empty for construction")]
    OperationStatusNotEmptyForConstruction { status: String },

    #[error("operation status {status} is invalid")]
    OperationStatusInvalid { status: String },

    #[error("operation type {operation_type:?} is invalid")]
    OperationTypeInvalid { operation_type: String },

    #[error("operations cannot be empty for construction")]
    NoOperationsForConstruction,

    #[error("related operation index {related} >= operation index {index}")]
    RelatedOperationIndexOutOfOrder { related: i64, index: i64 },

    #[error("related operation index {related} found multiple times for operation index {index}")]
    RelatedOperationIndexDuplicate { related: i64, index: i64 },

    #[error("related operations are required but none exist")]
    RelatedOperationMissing,

    // =========================================================================
    // Payment & Fee Aggregates
    // =========================================================================
    #[error("fee operation {index} must not have related operations")]
    RelatedOperationInFeeNotAllowed { index: i64 },

    #[error("fee operation {index} amount {value} is not negative")]
    FeeAmountNotNegative { index: i64, value: String },

    #[error("expected {expected} payment operations but found {actual}")]
    PaymentCountMismatch { expected: i64, actual: usize },

    #[error("payment amounts sum to {total}, expected zero")]
    PaymentAmountNotBalancing { total: String },

    #[error("expected {expected} fee operations but found {actual}")]
    FeeCountMismatch { expected: i64, actual: usize },

    #[error("fee amounts sum to {total}, expected zero")]
    FeeAmountNotBalancing { total: String },

    // =========================================================================
    // Transactions
    // =========================================================================
    #[error("related transaction {related} is duplicated")]
    DuplicateRelatedTransaction { related: String },

    #[error("related transaction direction is invalid")]
    InvalidDirection,

    // =========================================================================
    // Blocks
    // =========================================================================
    #[error("block hash {hash} equals parent block hash")]
    BlockHashEqualsParentBlockHash { hash: String },

    #[error("block index {index} precedes or equals parent block index {parent_index}")]
    BlockIndexPrecedesParentBlockIndex { index: i64, parent_index: i64 },

    #[error("timestamp {timestamp} is before 01/01/2000")]
    TimestampBeforeMin { timestamp: i64 },

    #[error("timestamp {timestamp} is after 01/01/2040")]
    TimestampAfterMax { timestamp: i64 },

    // =========================================================================
    // Error Catalog
    // =========================================================================
    #[error("error code {code} is negative")]
    ErrorCodeIsNeg { code: i32 },

    #[error("error message is missing")]
    ErrorMessageMissing,

    #[error("error code {code} is not in the allowed errors")]
    ErrorUnexpectedCode { code: i32 },

    #[error("error code {code}: expected message {expected:?} but got {actual:?}")]
    ErrorMessageMismatch {
        code: i32,
        expected: String,
        actual: String,
    },

    #[error("error code {code}: expected retriable {expected} but got {actual}")]
    ErrorRetriableMismatch {
        code: i32,
        expected: bool,
        actual: bool,
    },

    // =========================================================================
    // Construction
    // =========================================================================
    #[error("construction metadata response metadata is missing")]
    ConstructionMetadataResponseMetadataMissing,

    #[error("signed transaction is empty")]
    SignedTxEmpty,

    #[error("construction parse response operations are empty")]
    ConstructionParseResponseOperationsEmpty,

    #[error("signers are empty on a signed transaction")]
    ConstructionParseResponseSignersEmptyOnSignedTx,

    #[error("signers are not empty on an unsigned transaction")]
    ConstructionParseResponseSignersNonEmptyOnUnsignedTx,

    #[error("unsigned transaction is empty")]
    ConstructionPayloadsResponseUnsignedTxEmpty,

    #[error("signing payloads are empty")]
    ConstructionPayloadsResponsePayloadsEmpty,

    #[error("public key bytes are empty")]
    PublicKeyBytesEmpty,

    #[error("public key bytes are all zero")]
    PublicKeyBytesZero,

    #[error("curve type is not supported")]
    CurveTypeNotSupported,

    #[error("signing payload bytes are empty")]
    SigningPayloadBytesEmpty,

    #[error("signing payload bytes are all zero")]
    SigningPayloadBytesZero,

    #[error("signatures are empty")]
    SignaturesEmpty,

    #[error("requested signature type {requested} but got {returned}")]
    SignaturesReturnedSigMismatch { requested: String, returned: String },

    #[error("signature bytes are empty")]
    SignatureBytesEmpty,

    #[error("signature bytes are all zero")]
    SignatureBytesZero,

    #[error("signature type is not supported")]
    SignatureTypeNotSupported,

    #[error("{name} is empty")]
    AccountArrayEmpty { name: String },

    #[error("{name} contains duplicate account {account}")]
    AccountArrayDuplicateAccount { name: String, account: String },

    // =========================================================================
    // Primitives
    // =========================================================================
    #[error("unable to compute canonical form: {0}")]
    Serialization(String),
}

impl AsserterError {
    /// Wrap this error with a layer of diagnostic context.
    pub fn context(self, context: impl Into<String>) -> Self {
        AsserterError::Context {
            context: context.into(),
            inner: Box::new(self),
        }
    }

    /// The innermost error, with every context layer removed.
    pub fn root_cause(&self) -> &AsserterError {
        let mut current = self;
        while let AsserterError::Context { inner, .. } = current {
            current = inner;
        }
        current
    }
}

impl From<TypesError> for AsserterError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::AmountMissing => AsserterError::AmountValueMissing,
            TypesError::NotAnInteger { value } => AsserterError::AmountIsNotInt { value },
            TypesError::Serialization(reason) => AsserterError::Serialization(reason),
        }
    }
}

/// Lazily attach context to a failed validation step.
pub(crate) trait WithContext<T> {
    fn with_context<C, F>(self, context: F) -> Result<T, AsserterError>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> WithContext<T> for Result<T, AsserterError> {
    fn with_context<C, F>(self, context: F) -> Result<T, AsserterError>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.context(context()))
    }
}

/// Errors raised while building an [`crate::Asserter`] from its configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unable to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("unable to parse configuration: {0}")]
    Parse(String),

    #[error("no operation types are allowed")]
    NoOperationTypes,

    #[error("operation type at position {position} is empty")]
    OperationTypeEmpty { position: usize },

    #[error("operation type {operation_type} is allowed multiple times")]
    DuplicateOperationType { operation_type: String },

    #[error("no operation statuses are allowed")]
    NoOperationStatuses,

    #[error("operation status at position {position} is empty")]
    OperationStatusEmpty { position: usize },

    #[error("operation status {status} is allowed multiple times")]
    DuplicateOperationStatus { status: String },

    #[error("no successful operation status is allowed")]
    NoSuccessfulOperationStatus,

    #[error("error code {code} is allowed multiple times")]
    DuplicateErrorCode { code: i32 },

    #[error("allowed error {code} is invalid: {source}")]
    InvalidErrorDescriptor {
        code: i32,
        #[source]
        source: AsserterError,
    },

    #[error("genesis block identifier is invalid: {source}")]
    InvalidGenesisBlock {
        #[source]
        source: AsserterError,
    },

    #[error("timestamp start index {index} is negative")]
    TimestampStartIndexInvalid { index: i64 },

    #[error("validation profile is invalid: {reason}")]
    InvalidValidationProfile { reason: String },
}
