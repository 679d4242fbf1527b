//! Configuration for the Validation Engine
//!
//! Everything here is read once at startup (typically from the network's
//! supported options plus an optional validation file) and frozen inside an
//! [`crate::Asserter`].

use std::fs;
use std::path::Path;

use mesh_types::{BlockIdentifier, ErrorDescriptor, OperationStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigError;

/// Ledger model of the chain under test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    /// Balances are tracked per account; payment/fee sums are checked.
    #[default]
    Account,
    /// Balances are tracked per coin.
    Utxo,
}

/// Count and balancing requirements for one operation type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRule {
    /// Exact number of matching operations per transaction; `-1` disables the check.
    #[serde(default = "unchecked_count")]
    pub count: i64,
    /// Whether the matching amounts must sum to zero.
    #[serde(default)]
    pub should_balance: bool,
}

impl Default for OperationRule {
    fn default() -> Self {
        Self {
            count: unchecked_count(),
            should_balance: false,
        }
    }
}

fn unchecked_count() -> i64 {
    -1
}

/// An operation type name and the rule applied to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOperation {
    pub name: String,
    #[serde(default)]
    pub operation: OperationRule,
}

impl ValidationOperation {
    pub fn new(name: impl Into<String>, count: i64, should_balance: bool) -> Self {
        Self {
            name: name.into(),
            operation: OperationRule {
                count,
                should_balance,
            },
        }
    }
}

/// Payment/fee validation profile.
///
/// Disabled by default; when disabled only per-operation checks run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationProfile {
    #[serde(default)]
    pub enabled: bool,
    /// At least one related-operation edge must exist in every operation list.
    #[serde(default)]
    pub related_ops_exists: bool,
    #[serde(default)]
    pub chain_type: ChainType,
    #[serde(default)]
    pub payment: ValidationOperation,
    #[serde(default)]
    pub fee: ValidationOperation,
}

impl ValidationProfile {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse_json(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }

    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        for (kind, rule) in [("payment", &self.payment), ("fee", &self.fee)] {
            if rule.name.is_empty() {
                return Err(ConfigError::InvalidValidationProfile {
                    reason: format!("{kind} operation name is empty"),
                });
            }

            if rule.operation.count < -1 {
                return Err(ConfigError::InvalidValidationProfile {
                    reason: format!("{kind} count {} is below -1", rule.operation.count),
                });
            }
        }

        Ok(())
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsserterConfig {
    /// Block exempt from the parent hash/index checks.
    #[serde(default)]
    pub genesis_block_identifier: Option<BlockIdentifier>,
    pub operation_types: Vec<String>,
    pub operation_statuses: Vec<OperationStatus>,
    #[serde(default)]
    pub errors: Vec<ErrorDescriptor>,
    /// First block index whose timestamp is checked.
    /// Defaults to the genesis index + 1, or 0 without a genesis block.
    #[serde(default)]
    pub timestamp_start_index: Option<i64>,
    #[serde(default)]
    pub validation: ValidationProfile,
    /// Reject operation types, statuses and error codes missing from the catalogs.
    #[serde(default = "strict_by_default")]
    pub strict: bool,
}

fn strict_by_default() -> bool {
    true
}

impl AsserterConfig {
    pub fn new(operation_types: Vec<String>, operation_statuses: Vec<OperationStatus>) -> Self {
        Self {
            genesis_block_identifier: None,
            operation_types,
            operation_statuses,
            errors: Vec::new(),
            timestamp_start_index: None,
            validation: ValidationProfile::default(),
            strict: true,
        }
    }

    pub fn with_genesis(mut self, genesis: BlockIdentifier) -> Self {
        self.genesis_block_identifier = Some(genesis);
        self
    }

    pub fn with_errors(mut self, errors: Vec<ErrorDescriptor>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_timestamp_start_index(mut self, index: i64) -> Self {
        self.timestamp_start_index = Some(index);
        self
    }

    pub fn with_validation(mut self, validation: ValidationProfile) -> Self {
        self.validation = validation;
        self
    }

    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse_json(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }
}

fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_json(&contents)
}
