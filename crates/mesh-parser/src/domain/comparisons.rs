//! Constraints between match groups.

use mesh_types::{amount_value, print_struct, BigInt, Operation, Sign};

use super::descriptions::Descriptions;
use super::errors::ParserError;
use super::matching::Match;

/// Opposite-amount constraints always compare exactly two groups.
const OPPOSITES_LENGTH: usize = 2;

/// Check every group constraint in `descriptions` against `matches`.
///
/// Order: equal amounts, equal addresses, opposite amounts, opposite or
/// zero amounts.
pub(crate) fn comparison_match(
    descriptions: &Descriptions,
    matches: &[Match<'_>],
) -> Result<(), ParserError> {
    check_ops(&descriptions.equal_amounts, matches, equal_amounts)
        .map_err(|err| err.context("operation amounts are not equal"))?;

    check_ops(&descriptions.equal_addresses, matches, equal_addresses)
        .map_err(|err| err.context("operation addresses are not equal"))?;

    compare_opposite_matches(&descriptions.opposite_amounts, matches, opposite_amounts)
        .map_err(|err| err.context("operation amounts are not opposite"))?;

    compare_opposite_matches(
        &descriptions.opposite_or_zero_amounts,
        matches,
        opposite_or_zero_amounts,
    )
    .map_err(|err| err.context("both operation amounts not opposite and not zero"))
}

fn match_index_valid(matches: &[Match<'_>], index: usize) -> Result<(), ParserError> {
    match matches.get(index) {
        None => Err(ParserError::MatchIndexOutOfRange { index }),
        Some(matched) if matched.is_empty() => Err(ParserError::MatchIndexEmpty { index }),
        Some(_) => Ok(()),
    }
}

/// Pool the operations of each index batch and run `valid` over the pool.
fn check_ops<F>(requests: &[Vec<usize>], matches: &[Match<'_>], valid: F) -> Result<(), ParserError>
where
    F: Fn(&[&Operation]) -> Result<(), ParserError>,
{
    for batch in requests {
        let mut ops = Vec::new();
        for &index in batch {
            match_index_valid(matches, index)?;
            ops.extend_from_slice(&matches[index].operations);
        }

        valid(ops.as_slice()).map_err(|err| {
            err.context(format!("operations {} are invalid", print_struct(&ops)))
        })?;
    }

    Ok(())
}

/// Each pair of groups must be internally equal; then the first operation of
/// each group goes through `checker`.
fn compare_opposite_matches<F>(
    pairs: &[Vec<usize>],
    matches: &[Match<'_>],
    checker: F,
) -> Result<(), ParserError>
where
    F: Fn(&Operation, &Operation) -> Result<(), ParserError>,
{
    for pair in pairs {
        if pair.len() != OPPOSITES_LENGTH {
            return Err(ParserError::OppositesLength { len: pair.len() });
        }
        let (first, second) = (pair[0], pair[1]);

        match_index_valid(matches, first)?;
        match_index_valid(matches, second)?;

        let first_ops = &matches[first].operations;
        let second_ops = &matches[second].operations;

        equal_amounts(first_ops).map_err(|err| {
            err.context(format!(
                "operation amounts are not equal for match index {first}"
            ))
        })?;
        equal_amounts(second_ops).map_err(|err| {
            err.context(format!(
                "operation amounts are not equal for match index {second}"
            ))
        })?;

        checker(first_ops[0], second_ops[0])?;
    }

    Ok(())
}

fn value_of(operation: &Operation) -> Result<BigInt, ParserError> {
    amount_value(operation.amount.as_ref()).map_err(|err| {
        ParserError::from(err).context(format!(
            "failed to parse amount of operation {}",
            operation.operation_identifier.index
        ))
    })
}

fn equal_amounts(ops: &[&Operation]) -> Result<(), ParserError> {
    let Some(first) = ops.first() else {
        return Err(ParserError::EqualAmountsNoOperations);
    };

    let expected = value_of(first)?;
    for op in ops {
        let actual = value_of(op)?;
        if actual != expected {
            return Err(ParserError::EqualAmountsNotEqual {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    Ok(())
}

fn opposite_amounts(a: &Operation, b: &Operation) -> Result<(), ParserError> {
    let a_value = value_of(a)?;
    let b_value = value_of(b)?;
    check_opposite(&a_value, &b_value)
}

fn opposite_or_zero_amounts(a: &Operation, b: &Operation) -> Result<(), ParserError> {
    let a_value = value_of(a)?;
    let b_value = value_of(b)?;

    if a_value.sign() == Sign::NoSign && b_value.sign() == Sign::NoSign {
        return Ok(());
    }

    check_opposite(&a_value, &b_value)
}

fn check_opposite(a: &BigInt, b: &BigInt) -> Result<(), ParserError> {
    if a.sign() == b.sign() {
        return Err(ParserError::OppositeAmountsSameSign {
            a: a.to_string(),
            b: b.to_string(),
        });
    }

    if a.magnitude() != b.magnitude() {
        return Err(ParserError::OppositeAmountsAbsValMismatch {
            a: a.to_string(),
            b: b.to_string(),
        });
    }

    Ok(())
}

fn equal_addresses(ops: &[&Operation]) -> Result<(), ParserError> {
    if ops.len() <= 1 {
        return Err(ParserError::EqualAddressesTooFewOperations { count: ops.len() });
    }

    // The base is taken from the first non-empty address.
    let mut base = "";
    for op in ops {
        let account = op
            .account
            .as_ref()
            .ok_or(ParserError::EqualAddressesAccountIsNil)?;

        if base.is_empty() {
            base = account.address.as_str();
            continue;
        }

        if base != account.address {
            return Err(ParserError::EqualAddressesAddrMismatch {
                expected: base.to_string(),
                actual: account.address.clone(),
            });
        }
    }

    Ok(())
}
