//! # mesh-check
//!
//! Loads an engine configuration and JSON objects from disk and runs the
//! validation engine or the operation matcher over them. Any rejection is
//! returned as an error so the binary exits non-zero.

pub mod commands;
pub mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// mesh-check: conformance checks for data API objects
#[derive(Parser, Debug)]
#[command(name = "mesh-check")]
#[command(about = "Validate blocks, transactions and errors, or match operations against descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Validate a block and every transaction in it
    Block {
        /// Engine configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,
        /// Block to validate (JSON)
        file: PathBuf,
    },

    /// Validate a single transaction
    Transaction {
        #[arg(short, long)]
        config: PathBuf,
        file: PathBuf,
    },

    /// Validate an error descriptor against the allowed catalog
    Error {
        #[arg(short, long)]
        config: PathBuf,
        file: PathBuf,
    },

    /// Match an operation list against descriptions and print the groups
    Match {
        /// Descriptions (JSON)
        #[arg(short, long)]
        descriptions: PathBuf,
        /// Operation list (JSON array)
        file: PathBuf,
    },
}

/// Execute `cli`, returning text to print on success.
pub fn run(cli: &Cli) -> Result<Option<String>> {
    match &cli.command {
        Command::Block { config, file } => {
            commands::check_block(config, file)?;
            Ok(None)
        }
        Command::Transaction { config, file } => {
            commands::check_transaction(config, file)?;
            Ok(None)
        }
        Command::Error { config, file } => {
            commands::check_error(config, file)?;
            Ok(None)
        }
        Command::Match { descriptions, file } => {
            let reports = commands::match_file(descriptions, file)?;
            Ok(Some(serde_json::to_string_pretty(&reports)?))
        }
    }
}
