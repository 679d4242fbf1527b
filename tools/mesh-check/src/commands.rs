//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mesh_asserter::Asserter;
use mesh_parser::{match_operations, Descriptions};
use mesh_types::{Block, ErrorDescriptor, Operation, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// One description's match group as printed by `match`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MatchReport {
    pub operations: Vec<Operation>,
    /// Parsed amounts as decimal strings; `null` where the operation has none.
    pub amounts: Vec<Option<String>>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("unable to parse {}", path.display()))
}

fn load_asserter(config: &Path) -> Result<Asserter> {
    Asserter::from_file(config)
        .with_context(|| format!("invalid engine configuration {}", config.display()))
}

pub fn check_block(config: &Path, file: &Path) -> Result<()> {
    let asserter = load_asserter(config)?;
    let block: Block = read_json(file)?;

    asserter
        .block(&block)
        .with_context(|| format!("block {} rejected", block.block_identifier.index))?;

    info!(
        index = block.block_identifier.index,
        hash = %block.block_identifier.hash,
        transactions = block.transactions.len(),
        "Block accepted"
    );
    Ok(())
}

pub fn check_transaction(config: &Path, file: &Path) -> Result<()> {
    let asserter = load_asserter(config)?;
    let transaction: Transaction = read_json(file)?;

    asserter.transaction(&transaction).with_context(|| {
        format!(
            "transaction {} rejected",
            transaction.transaction_identifier.hash
        )
    })?;

    info!(
        hash = %transaction.transaction_identifier.hash,
        operations = transaction.operations.len(),
        "Transaction accepted"
    );
    Ok(())
}

pub fn check_error(config: &Path, file: &Path) -> Result<()> {
    let asserter = load_asserter(config)?;
    let error: ErrorDescriptor = read_json(file)?;

    asserter
        .error(&error)
        .with_context(|| format!("error {} rejected", error.code))?;

    info!(code = error.code, "Error accepted");
    Ok(())
}

pub fn match_file(descriptions: &Path, file: &Path) -> Result<Vec<MatchReport>> {
    let descriptions: Descriptions = read_json(descriptions)?;
    let operations: Vec<Operation> = read_json(file)?;

    let matches =
        match_operations(&descriptions, &operations).context("operations do not match")?;

    info!(groups = matches.len(), "Operations matched");
    Ok(matches
        .into_iter()
        .map(|matched| MatchReport {
            operations: matched.operations.into_iter().cloned().collect(),
            amounts: matched
                .amounts
                .iter()
                .map(|amount| amount.as_ref().map(ToString::to_string))
                .collect(),
        })
        .collect())
}
