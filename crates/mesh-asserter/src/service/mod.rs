//! # Validation Engine
//!
//! [`Asserter`] holds the catalogs loaded from configuration and exposes one
//! validation method per object kind. The catalogs are immutable after
//! construction, so a single engine can be shared across threads without
//! locking.

mod block;
mod construction;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use mesh_types::{Block, BlockIdentifier, ErrorDescriptor, Operation, Transaction};
use tracing::info;

use crate::config::{AsserterConfig, ValidationProfile};
use crate::domain::assertions::{block_identifier, error_descriptor};
use crate::domain::errors::{AsserterError, ConfigError};
use crate::ports::inbound::BlockValidationApi;

/// The configured validation engine.
#[derive(Debug, Clone)]
pub struct Asserter {
    operation_types: HashSet<String>,
    /// Status name -> whether it is a successful status.
    operation_status_map: HashMap<String, bool>,
    error_type_map: HashMap<i32, ErrorDescriptor>,
    genesis_block: Option<BlockIdentifier>,
    timestamp_start_index: i64,
    validations: ValidationProfile,
    strict: bool,
}

impl Asserter {
    /// Build an engine, rejecting malformed catalogs.
    pub fn new(config: AsserterConfig) -> Result<Self, ConfigError> {
        let operation_types = operation_types(&config.operation_types)?;
        let operation_status_map = operation_statuses(&config)?;
        let error_type_map = errors(&config.errors)?;

        if let Some(genesis) = &config.genesis_block_identifier {
            block_identifier(genesis)
                .map_err(|source| ConfigError::InvalidGenesisBlock { source })?;
        }

        let timestamp_start_index = match config.timestamp_start_index {
            Some(index) if index < 0 => {
                return Err(ConfigError::TimestampStartIndexInvalid { index })
            }
            Some(index) => index,
            None => config
                .genesis_block_identifier
                .as_ref()
                .map_or(0, |genesis| genesis.index + 1),
        };

        config.validation.check()?;

        info!(
            operation_types = operation_types.len(),
            operation_statuses = operation_status_map.len(),
            errors = error_type_map.len(),
            timestamp_start_index,
            strict = config.strict,
            validation_enabled = config.validation.enabled,
            "Asserter configured"
        );

        Ok(Self {
            operation_types,
            operation_status_map,
            error_type_map,
            genesis_block: config.genesis_block_identifier,
            timestamp_start_index,
            validations: config.validation,
            strict: config.strict,
        })
    }

    /// Build an engine from a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::new(AsserterConfig::from_file(path)?)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn genesis_block(&self) -> Option<&BlockIdentifier> {
        self.genesis_block.as_ref()
    }

    pub fn timestamp_start_index(&self) -> i64 {
        self.timestamp_start_index
    }

    pub fn validations(&self) -> &ValidationProfile {
        &self.validations
    }

    /// Whether `operation` has a status flagged successful in the catalog.
    pub fn operation_successful(&self, operation: &Operation) -> Result<bool, AsserterError> {
        let status = match operation.status.as_deref() {
            Some(status) if !status.is_empty() => status,
            _ => return Err(AsserterError::OperationStatusMissing),
        };

        self.operation_status_map
            .get(status)
            .copied()
            .ok_or_else(|| AsserterError::OperationStatusInvalid {
                status: status.to_string(),
            })
    }

    /// Check an error descriptor against the allowed error catalog.
    ///
    /// In lenient mode only the structural check applies.
    pub fn error(&self, err: &ErrorDescriptor) -> Result<(), AsserterError> {
        error_descriptor(err)?;

        if !self.strict {
            return Ok(());
        }

        let expected = self
            .error_type_map
            .get(&err.code)
            .ok_or(AsserterError::ErrorUnexpectedCode { code: err.code })?;

        if expected.message != err.message {
            return Err(AsserterError::ErrorMessageMismatch {
                code: err.code,
                expected: expected.message.clone(),
                actual: err.message.clone(),
            });
        }

        if expected.retriable != err.retriable {
            return Err(AsserterError::ErrorRetriableMismatch {
                code: err.code,
                expected: expected.retriable,
                actual: err.retriable,
            });
        }

        Ok(())
    }
}

impl BlockValidationApi for Asserter {
    fn validate_block(&self, block: &Block) -> Result<(), AsserterError> {
        self.block(block)
    }

    fn validate_transaction(&self, transaction: &Transaction) -> Result<(), AsserterError> {
        self.transaction(transaction)
    }

    fn validate_operations(
        &self,
        operations: &[Operation],
        construction: bool,
    ) -> Result<(), AsserterError> {
        self.operations(operations, construction)
    }

    fn validate_error(&self, error: &ErrorDescriptor) -> Result<(), AsserterError> {
        self.error(error)
    }
}

fn operation_types(types: &[String]) -> Result<HashSet<String>, ConfigError> {
    if types.is_empty() {
        return Err(ConfigError::NoOperationTypes);
    }

    let mut parsed = HashSet::with_capacity(types.len());
    for (position, operation_type) in types.iter().enumerate() {
        if operation_type.is_empty() {
            return Err(ConfigError::OperationTypeEmpty { position });
        }

        if !parsed.insert(operation_type.clone()) {
            return Err(ConfigError::DuplicateOperationType {
                operation_type: operation_type.clone(),
            });
        }
    }

    Ok(parsed)
}

fn operation_statuses(config: &AsserterConfig) -> Result<HashMap<String, bool>, ConfigError> {
    let statuses = &config.operation_statuses;
    if statuses.is_empty() {
        return Err(ConfigError::NoOperationStatuses);
    }

    let mut parsed = HashMap::with_capacity(statuses.len());
    for (position, status) in statuses.iter().enumerate() {
        if status.status.is_empty() {
            return Err(ConfigError::OperationStatusEmpty { position });
        }

        if parsed
            .insert(status.status.clone(), status.successful)
            .is_some()
        {
            return Err(ConfigError::DuplicateOperationStatus {
                status: status.status.clone(),
            });
        }
    }

    if !parsed.values().any(|successful| *successful) {
        return Err(ConfigError::NoSuccessfulOperationStatus);
    }

    Ok(parsed)
}

fn errors(errors: &[ErrorDescriptor]) -> Result<HashMap<i32, ErrorDescriptor>, ConfigError> {
    let mut parsed = HashMap::with_capacity(errors.len());
    for err in errors {
        error_descriptor(err).map_err(|source| ConfigError::InvalidErrorDescriptor {
            code: err.code,
            source,
        })?;

        if parsed.insert(err.code, err.clone()).is_some() {
            return Err(ConfigError::DuplicateErrorCode { code: err.code });
        }
    }

    Ok(parsed)
}
