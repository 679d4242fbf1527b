//! Shared fixtures for flows and benchmarks.

use mesh_asserter::{AsserterConfig, ChainType, ValidationOperation, ValidationProfile};
use mesh_parser::{AccountDescription, AmountDescription, AmountSign, Descriptions, OperationDescription};
use mesh_types::{
    AccountIdentifier, Amount, Block, BlockIdentifier, Currency, ErrorDescriptor, Operation,
    OperationIdentifier, OperationStatus, Transaction, TransactionIdentifier,
};

pub const GENESIS_HASH: &str = "genesis";
pub const VALID_TIMESTAMP: i64 = 1_600_000_000_000;

/// Strict engine configuration with a small catalog and a genesis block at 0.
pub fn engine_config() -> AsserterConfig {
    AsserterConfig::new(
        vec![
            "PAYMENT".to_string(),
            "FEE".to_string(),
            "TRANSFER".to_string(),
        ],
        vec![
            OperationStatus::new("SUCCESS", true),
            OperationStatus::new("FAILURE", false),
        ],
    )
    .with_genesis(BlockIdentifier::new(0, GENESIS_HASH))
    .with_errors(vec![
        ErrorDescriptor::new(1, "invalid request", false),
        ErrorDescriptor::new(2, "node unavailable", true),
    ])
}

/// Account-model profile: two balancing payments and exactly one fee.
pub fn account_profile() -> ValidationProfile {
    ValidationProfile {
        enabled: true,
        related_ops_exists: true,
        chain_type: ChainType::Account,
        payment: ValidationOperation::new("PAYMENT", 2, true),
        fee: ValidationOperation::new("FEE", 1, false),
    }
}

pub fn eth(value: &str) -> Amount {
    Amount::new(value, Currency::new("ETH", 18))
}

pub fn operation(
    index: i64,
    operation_type: &str,
    address: &str,
    value: Option<&str>,
    related: &[i64],
) -> Operation {
    Operation {
        operation_identifier: OperationIdentifier::new(index),
        related_operations: related
            .iter()
            .map(|index| OperationIdentifier::new(*index))
            .collect(),
        operation_type: operation_type.to_string(),
        status: Some("SUCCESS".to_string()),
        account: Some(AccountIdentifier::new(address)),
        amount: value.map(eth),
        ..Default::default()
    }
}

/// A payment from alice to bob plus a fee paid by alice.
pub fn payment_transaction(hash: &str, amount: u64, fee: u64) -> Transaction {
    let debit = format!("-{amount}");
    let credit = amount.to_string();
    let fee = format!("-{fee}");

    Transaction {
        transaction_identifier: TransactionIdentifier::new(hash),
        operations: vec![
            operation(0, "PAYMENT", "alice", Some(&debit), &[]),
            operation(1, "PAYMENT", "bob", Some(&credit), &[0]),
            operation(2, "FEE", "alice", Some(&fee), &[]),
        ],
        ..Default::default()
    }
}

/// Block `index` chained to block `index - 1` (or to genesis).
pub fn block(index: i64, transactions: Vec<Transaction>) -> Block {
    let parent_hash = if index <= 1 {
        GENESIS_HASH.to_string()
    } else {
        format!("block-{}", index - 1)
    };

    Block {
        block_identifier: BlockIdentifier::new(index, format!("block-{index}")),
        parent_block_identifier: BlockIdentifier::new((index - 1).max(0), parent_hash),
        timestamp: VALID_TIMESTAMP,
        transactions,
        metadata: None,
    }
}

fn described(operation_type: &str, sign: AmountSign) -> OperationDescription {
    OperationDescription::of_type(operation_type)
        .with_account(AccountDescription {
            exists: true,
            ..Default::default()
        })
        .with_amount(AmountDescription {
            exists: true,
            sign,
            currency: Some(Currency::new("ETH", 18)),
        })
}

/// Sender debit, receiver credit and a fee; sender and fee payer share an address.
pub fn payment_descriptions() -> Descriptions {
    Descriptions {
        operation_descriptions: vec![
            described("PAYMENT", AmountSign::Negative),
            described("PAYMENT", AmountSign::Positive),
            described("FEE", AmountSign::Negative),
        ],
        opposite_amounts: vec![vec![0, 1]],
        equal_addresses: vec![vec![0, 2]],
        err_unmatched: true,
        ..Default::default()
    }
}
