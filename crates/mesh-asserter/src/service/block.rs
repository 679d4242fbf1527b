//! Block, transaction and operation validation.
//!
//! Validation is a depth-first, left-to-right walk that stops at the first
//! violated invariant.

use std::collections::HashSet;

use mesh_types::{
    amount_value, print_struct, BigInt, Block, Operation, RelatedTransaction, Sign, Transaction,
};
use tracing::debug;

use super::Asserter;
use crate::config::ChainType;
use crate::domain::assertions::{
    account_identifier, amount, block_identifier, coin_change, direction,
    duplicate_related_transaction, network_identifier, operation_identifier, timestamp,
    transaction_identifier,
};
use crate::domain::errors::{AsserterError, WithContext};

/// Running payment and fee totals for one operation list.
#[derive(Debug, Default)]
struct Totals {
    payment: BigInt,
    payment_count: usize,
    fee: BigInt,
    fee_count: usize,
}

impl Asserter {
    /// Validate an operation status.
    ///
    /// Outside construction an empty status is always an error and a status
    /// missing from the catalog is an error in strict mode. In construction no
    /// status may be set at all; an empty string is tolerated because older
    /// implementations still populate the field.
    pub fn operation_status(
        &self,
        status: Option<&str>,
        construction: bool,
    ) -> Result<(), AsserterError> {
        let status = match status {
            Some(status) if !status.is_empty() => status,
            _ if construction => return Ok(()),
            _ => return Err(AsserterError::OperationStatusMissing),
        };

        if construction {
            return Err(AsserterError::OperationStatusNotEmptyForConstruction {
                status: status.to_string(),
            });
        }

        if self.strict && !self.operation_status_map.contains_key(status) {
            return Err(AsserterError::OperationStatusInvalid {
                status: status.to_string(),
            });
        }

        Ok(())
    }

    pub fn operation_type(&self, operation_type: &str) -> Result<(), AsserterError> {
        if operation_type.is_empty()
            || (self.strict && !self.operation_types.contains(operation_type))
        {
            return Err(AsserterError::OperationTypeInvalid {
                operation_type: operation_type.to_string(),
            });
        }

        Ok(())
    }

    /// Validate a single operation expected at position `index`.
    pub fn operation(
        &self,
        operation: &Operation,
        index: i64,
        construction: bool,
    ) -> Result<(), AsserterError> {
        operation_identifier(&operation.operation_identifier, index).with_context(|| {
            format!(
                "operation identifier {} is invalid in operation {index}",
                print_struct(&operation.operation_identifier)
            )
        })?;

        self.operation_type(&operation.operation_type)
            .with_context(|| format!("operation type is invalid in operation {index}"))?;

        self.operation_status(operation.status.as_deref(), construction)
            .with_context(|| {
                format!(
                    "operation status {} is invalid in operation {index}",
                    print_struct(&operation.status)
                )
            })?;

        if let Some(op_amount) = &operation.amount {
            account_identifier(operation.account.as_ref()).with_context(|| {
                format!(
                    "operation account identifier {} is invalid in operation {index}",
                    print_struct(&operation.account)
                )
            })?;

            amount(op_amount).with_context(|| {
                format!(
                    "operation amount {} is invalid in operation {index}",
                    print_struct(op_amount)
                )
            })?;
        }

        if let Some(change) = &operation.coin_change {
            coin_change(change).with_context(|| {
                format!(
                    "operation coin change {} is invalid in operation {index}",
                    print_struct(change)
                )
            })?;
        }

        Ok(())
    }

    /// Validate an ordered operation list.
    ///
    /// Operation `i` must carry index `i`, related operations may only point
    /// to earlier operations, and (when the validation profile is enabled) the
    /// payment/fee rules are enforced.
    pub fn operations(
        &self,
        operations: &[Operation],
        construction: bool,
    ) -> Result<(), AsserterError> {
        if operations.is_empty() && construction {
            return Err(AsserterError::NoOperationsForConstruction);
        }

        let profile = &self.validations;
        let mut totals = Totals::default();
        let mut related_ops_exist = false;

        for (position, op) in operations.iter().enumerate() {
            self.operation(op, position as i64, construction)
                .with_context(|| format!("operation {} is invalid", print_struct(op)))?;

            let index = op.operation_identifier.index;

            if profile.enabled {
                if op.operation_type == profile.payment.name {
                    let value = amount_value(op.amount.as_ref()).map_err(|err| {
                        AsserterError::from(err)
                            .context(format!("payment operation {index} has no usable amount"))
                    })?;
                    totals.payment += value;
                    totals.payment_count += 1;
                }

                if op.operation_type == profile.fee.name {
                    self.fee_operation(op, &mut totals)?;
                }
            }

            let mut related_indexes = HashSet::with_capacity(op.related_operations.len());
            for related in &op.related_operations {
                related_ops_exist = true;

                if related.index >= index {
                    return Err(AsserterError::RelatedOperationIndexOutOfOrder {
                        related: related.index,
                        index,
                    });
                }

                if !related_indexes.insert(related.index) {
                    return Err(AsserterError::RelatedOperationIndexDuplicate {
                        related: related.index,
                        index,
                    });
                }
            }
        }

        if profile.enabled && profile.related_ops_exists && !related_ops_exist {
            return Err(AsserterError::RelatedOperationMissing);
        }

        if profile.enabled && profile.chain_type == ChainType::Account {
            return self.validate_payment_and_fee(&totals);
        }

        Ok(())
    }

    fn fee_operation(&self, op: &Operation, totals: &mut Totals) -> Result<(), AsserterError> {
        let index = op.operation_identifier.index;

        if !op.related_operations.is_empty() {
            return Err(AsserterError::RelatedOperationInFeeNotAllowed { index }
                .context(format!("operation {} is invalid", print_struct(op))));
        }

        let value = amount_value(op.amount.as_ref()).map_err(|err| {
            AsserterError::from(err).context(format!("fee operation {index} has no usable amount"))
        })?;

        if value.sign() != Sign::Minus {
            return Err(AsserterError::FeeAmountNotNegative {
                index,
                value: value.to_string(),
            }
            .context(format!("operation {} is invalid", print_struct(op))));
        }

        totals.fee += value;
        totals.fee_count += 1;
        Ok(())
    }

    fn validate_payment_and_fee(&self, totals: &Totals) -> Result<(), AsserterError> {
        let payment = &self.validations.payment.operation;
        if payment.count != -1 && payment.count != totals.payment_count as i64 {
            return Err(AsserterError::PaymentCountMismatch {
                expected: payment.count,
                actual: totals.payment_count,
            });
        }

        if payment.should_balance && totals.payment.sign() != Sign::NoSign {
            return Err(AsserterError::PaymentAmountNotBalancing {
                total: totals.payment.to_string(),
            });
        }

        let fee = &self.validations.fee.operation;
        if fee.count != -1 && fee.count != totals.fee_count as i64 {
            return Err(AsserterError::FeeCountMismatch {
                expected: fee.count,
                actual: totals.fee_count,
            });
        }

        if fee.should_balance && totals.fee.sign() != Sign::NoSign {
            return Err(AsserterError::FeeAmountNotBalancing {
                total: totals.fee.to_string(),
            });
        }

        Ok(())
    }

    pub fn transaction(&self, transaction: &Transaction) -> Result<(), AsserterError> {
        transaction_identifier(&transaction.transaction_identifier).with_context(|| {
            format!(
                "transaction identifier {} is invalid",
                print_struct(&transaction.transaction_identifier)
            )
        })?;

        self.operations(&transaction.operations, false)
            .with_context(|| "invalid operation in transaction operations")?;

        self.related_transactions(&transaction.related_transactions)
            .with_context(|| "invalid related transaction in related transactions")
    }

    pub fn related_transactions(
        &self,
        related_transactions: &[RelatedTransaction],
    ) -> Result<(), AsserterError> {
        if let Some(dup) = duplicate_related_transaction(related_transactions)? {
            return Err(AsserterError::DuplicateRelatedTransaction {
                related: print_struct(dup),
            });
        }

        for (i, related) in related_transactions.iter().enumerate() {
            if let Some(network) = &related.network_identifier {
                network_identifier(network).with_context(|| {
                    format!(
                        "network identifier {} is invalid in related transaction at index {i}",
                        print_struct(network)
                    )
                })?;
            }

            transaction_identifier(&related.transaction_identifier).with_context(|| {
                format!(
                    "invalid transaction identifier {} in related transaction at index {i}",
                    print_struct(&related.transaction_identifier)
                )
            })?;

            direction(&related.direction).with_context(|| {
                format!(
                    "invalid direction {} in related transaction at index {i}",
                    print_struct(&related.direction)
                )
            })?;
        }

        Ok(())
    }

    /// Validate a block and every transaction in it.
    ///
    /// The parent hash/index checks are skipped at the genesis index, and the
    /// timestamp is only checked in strict mode from the configured start index.
    pub fn block(&self, block: &Block) -> Result<(), AsserterError> {
        let result = self.check_block(block);
        if let Err(err) = &result {
            debug!(
                index = block.block_identifier.index,
                hash = %block.block_identifier.hash,
                error = %err,
                "Block rejected"
            );
        }
        result
    }

    fn check_block(&self, block: &Block) -> Result<(), AsserterError> {
        let current = &block.block_identifier;
        let parent = &block.parent_block_identifier;

        block_identifier(current).with_context(|| {
            format!("block identifier {} is invalid", print_struct(current))
        })?;

        block_identifier(parent).with_context(|| {
            format!("parent block identifier {} is invalid", print_struct(parent))
        })?;

        let is_genesis = self
            .genesis_block
            .as_ref()
            .is_some_and(|genesis| genesis.index == current.index);

        if !is_genesis {
            if current.hash == parent.hash {
                return Err(AsserterError::BlockHashEqualsParentBlockHash {
                    hash: current.hash.clone(),
                });
            }

            if current.index <= parent.index {
                return Err(AsserterError::BlockIndexPrecedesParentBlockIndex {
                    index: current.index,
                    parent_index: parent.index,
                });
            }
        }

        if self.strict && self.timestamp_start_index <= current.index {
            timestamp(block.timestamp)
                .with_context(|| format!("timestamp {} is invalid", block.timestamp))?;
        }

        for transaction in &block.transactions {
            self.transaction(transaction).with_context(|| {
                format!(
                    "transaction {} is invalid",
                    print_struct(&transaction.transaction_identifier)
                )
            })?;
        }

        Ok(())
    }
}
