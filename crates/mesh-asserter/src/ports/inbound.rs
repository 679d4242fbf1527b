//! # Inbound Ports (Driving Ports / API)

use mesh_types::{Block, ErrorDescriptor, Operation, Transaction};

use crate::domain::errors::AsserterError;

/// Validation entry points of a configured engine.
///
/// Implementations must be thread-safe (`Send + Sync`) so one engine can be
/// shared by concurrent harness workers.
pub trait BlockValidationApi: Send + Sync {
    /// Validate a block and everything it contains.
    fn validate_block(&self, block: &Block) -> Result<(), AsserterError>;

    fn validate_transaction(&self, transaction: &Transaction) -> Result<(), AsserterError>;

    /// Validate an operation list; `construction` relaxes the status rules.
    fn validate_operations(
        &self,
        operations: &[Operation],
        construction: bool,
    ) -> Result<(), AsserterError>;

    /// Validate a returned error against the allowed catalog.
    fn validate_error(&self, error: &ErrorDescriptor) -> Result<(), AsserterError>;
}
