//! Greedy first-fit matching of operations to descriptions.
//!
//! Operations are visited once, left to right. Each goes to the first
//! description it satisfies that is still open (unmatched, or repeatable);
//! there is no backtracking.

use mesh_types::{big_int, BigInt, Operation};
use tracing::{debug, trace};

use super::comparisons::comparison_match;
use super::descriptions::{
    account_match, amount_match, coin_action_match, metadata_match, Descriptions,
    OperationDescription,
};
use super::errors::ParserError;

/// Operations bound to one description, with their parsed amounts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Match<'a> {
    pub operations: Vec<&'a Operation>,
    /// Same length as `operations`; `None` where the operation has no amount.
    pub amounts: Vec<Option<BigInt>>,
}

impl<'a> Match<'a> {
    /// The first matched operation and its amount, for non-repeating
    /// descriptions.
    pub fn first(&self) -> Option<(&'a Operation, Option<&BigInt>)> {
        let operation = self.operations.first()?;
        let amount = self.amounts.first().and_then(Option::as_ref);
        Some((*operation, amount))
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    fn push(&mut self, operation: &'a Operation, amount: Option<BigInt>) {
        self.operations.push(operation);
        self.amounts.push(amount);
    }
}

/// Match `operations` against `descriptions`.
///
/// Returns one [`Match`] per description, in description order. A match is
/// empty only for an optional description nothing matched.
pub fn match_operations<'a>(
    descriptions: &Descriptions,
    operations: &'a [Operation],
) -> Result<Vec<Match<'a>>, ParserError> {
    if operations.is_empty() {
        return Err(ParserError::MatchOperationsNoOperations);
    }

    let operation_descriptions = &descriptions.operation_descriptions;
    if operation_descriptions.is_empty() {
        return Err(ParserError::MatchOperationsDescriptionsMissing);
    }

    let mut matches = vec![Match::default(); operation_descriptions.len()];

    for (index, operation) in operations.iter().enumerate() {
        let found = operation_match(operation, operation_descriptions, &mut matches);
        if !found && descriptions.err_unmatched {
            debug!(index, operation_type = %operation.operation_type, "Operation unmatched");
            return Err(ParserError::MatchOperationsMatchNotFound { index });
        }
    }

    for (index, (matched, description)) in matches.iter().zip(operation_descriptions).enumerate()
    {
        if matched.is_empty() && !description.optional {
            debug!(index, "Operation description unmatched");
            return Err(ParserError::MatchOperationsDescriptionNotMatched { index });
        }
    }

    comparison_match(descriptions, &matches)
        .map_err(|err| err.context("group descriptions not met"))?;

    Ok(matches)
}

/// Bind `operation` to the first open description it satisfies.
fn operation_match<'a>(
    operation: &'a Operation,
    descriptions: &[OperationDescription],
    matches: &mut [Match<'a>],
) -> bool {
    for (index, description) in descriptions.iter().enumerate() {
        if !matches[index].is_empty() && !description.allow_repeats {
            continue;
        }

        if !description.operation_type.is_empty()
            && description.operation_type != operation.operation_type
        {
            continue;
        }

        let checked = account_match(description.account.as_ref(), operation.account.as_ref())
            .and_then(|_| amount_match(description.amount.as_ref(), operation.amount.as_ref()))
            .and_then(|_| metadata_match(&description.metadata, operation.metadata.as_ref()))
            .and_then(|_| {
                coin_action_match(
                    description.coin_action.as_ref(),
                    operation.coin_change.as_ref(),
                )
            });

        if let Err(err) = checked {
            trace!(
                description = index,
                operation = operation.operation_identifier.index,
                reason = %err,
                "Description skipped"
            );
            continue;
        }

        let amount = match &operation.amount {
            Some(amount) => match big_int(&amount.value) {
                Ok(value) => Some(value),
                Err(_) => continue,
            },
            None => None,
        };

        trace!(
            description = index,
            operation = operation.operation_identifier.index,
            "Operation matched"
        );
        matches[index].push(operation, amount);
        return true;
    }

    false
}
