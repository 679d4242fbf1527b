//! Stateless assertions.
//!
//! Checks that depend only on the record being examined and never on the
//! engine's configured catalogs.

use std::collections::HashSet;

use mesh_types::{
    big_int, hash, print_struct, AccountIdentifier, Amount, BlockIdentifier, CoinAction,
    CoinChange, CoinIdentifier, Currency, Direction, ErrorDescriptor, NetworkIdentifier,
    OperationIdentifier, PartialBlockIdentifier, RelatedTransaction, SubNetworkIdentifier,
    TransactionIdentifier,
};

use super::errors::{AsserterError, WithContext};

/// 01/01/2000 00:00:00 UTC in milliseconds.
pub const MIN_UNIX_EPOCH: i64 = 946_713_600_000;

/// 01/01/2040 00:00:00 UTC in milliseconds.
pub const MAX_UNIX_EPOCH: i64 = 2_209_017_600_000;

pub fn currency(currency: &Currency) -> Result<(), AsserterError> {
    if currency.symbol.is_empty() {
        return Err(AsserterError::AmountCurrencySymbolEmpty);
    }

    if currency.decimals < 0 {
        return Err(AsserterError::AmountCurrencyHasNegDecimals {
            decimals: currency.decimals,
        });
    }

    Ok(())
}

/// An amount must carry an integer value and a valid currency.
pub fn amount(amount: &Amount) -> Result<(), AsserterError> {
    if amount.value.is_empty() {
        return Err(AsserterError::AmountValueMissing);
    }

    big_int(&amount.value)?;

    let currency_ref = amount
        .currency
        .as_ref()
        .ok_or(AsserterError::AmountCurrencyIsNil)?;
    currency(currency_ref)
}

/// Operation indices must equal their position in the transaction.
pub fn operation_identifier(
    identifier: &OperationIdentifier,
    index: i64,
) -> Result<(), AsserterError> {
    if identifier.index != index {
        return Err(AsserterError::OperationIdentifierIndexOutOfOrder {
            expected: index,
            actual: identifier.index,
        });
    }

    match identifier.network_index {
        Some(network_index) if network_index < 0 => {
            Err(AsserterError::OperationIdentifierNetworkIndexInvalid { network_index })
        }
        _ => Ok(()),
    }
}

pub fn account_identifier(account: Option<&AccountIdentifier>) -> Result<(), AsserterError> {
    let account = account.ok_or(AsserterError::AccountIsNil)?;

    if account.address.is_empty() {
        return Err(AsserterError::AccountAddrMissing);
    }

    match &account.sub_account {
        Some(sub_account) if sub_account.address.is_empty() => {
            Err(AsserterError::AccountSubAccountAddrMissing)
        }
        _ => Ok(()),
    }
}

pub fn block_identifier(identifier: &BlockIdentifier) -> Result<(), AsserterError> {
    if identifier.hash.is_empty() {
        return Err(AsserterError::BlockIdentifierHashMissing);
    }

    if identifier.index < 0 {
        return Err(AsserterError::BlockIdentifierIndexIsNeg {
            index: identifier.index,
        });
    }

    Ok(())
}

pub fn partial_block_identifier(identifier: &PartialBlockIdentifier) -> Result<(), AsserterError> {
    if identifier.hash.as_deref() == Some("") {
        return Err(AsserterError::PartialBlockIdentifierHashIsEmpty);
    }

    match identifier.index {
        Some(index) if index < 0 => {
            Err(AsserterError::PartialBlockIdentifierIndexIsNegative { index })
        }
        _ => Ok(()),
    }
}

pub fn transaction_identifier(identifier: &TransactionIdentifier) -> Result<(), AsserterError> {
    if identifier.hash.is_empty() {
        return Err(AsserterError::TxIdentifierHashMissing);
    }

    Ok(())
}

pub fn sub_network_identifier(identifier: &SubNetworkIdentifier) -> Result<(), AsserterError> {
    if identifier.network.is_empty() {
        return Err(AsserterError::SubNetworkIdentifierInvalid);
    }

    Ok(())
}

pub fn network_identifier(identifier: &NetworkIdentifier) -> Result<(), AsserterError> {
    if identifier.blockchain.is_empty() {
        return Err(AsserterError::NetworkIdentifierBlockchainMissing);
    }

    if identifier.network.is_empty() {
        return Err(AsserterError::NetworkIdentifierNetworkMissing);
    }

    match &identifier.sub_network_identifier {
        Some(sub_network) => sub_network_identifier(sub_network),
        None => Ok(()),
    }
}

pub fn coin_identifier(identifier: &CoinIdentifier) -> Result<(), AsserterError> {
    if identifier.identifier.is_empty() {
        return Err(AsserterError::CoinIdentifierNotSet);
    }

    Ok(())
}

pub fn coin_action(action: &CoinAction) -> Result<(), AsserterError> {
    match action {
        CoinAction::CoinCreated | CoinAction::CoinSpent => Ok(()),
        CoinAction::Unsupported(_) => Err(AsserterError::CoinActionInvalid),
    }
}

pub fn coin_change(change: &CoinChange) -> Result<(), AsserterError> {
    coin_identifier(&change.coin_identifier).with_context(|| {
        format!(
            "coin identifier {} is invalid",
            print_struct(&change.coin_identifier)
        )
    })?;

    coin_action(&change.coin_action)
}

pub fn direction(direction: &Direction) -> Result<(), AsserterError> {
    match direction {
        Direction::Forward | Direction::Backward => Ok(()),
        Direction::Unsupported(_) => Err(AsserterError::InvalidDirection),
    }
}

/// Block timestamps must fall within [`MIN_UNIX_EPOCH`, `MAX_UNIX_EPOCH`].
///
/// Second-resolution and sentinel timestamps land outside this window.
pub fn timestamp(timestamp: i64) -> Result<(), AsserterError> {
    if timestamp < MIN_UNIX_EPOCH {
        return Err(AsserterError::TimestampBeforeMin { timestamp });
    }

    if timestamp > MAX_UNIX_EPOCH {
        return Err(AsserterError::TimestampAfterMax { timestamp });
    }

    Ok(())
}

/// Structural check of an error descriptor, independent of any catalog.
pub fn error_descriptor(err: &ErrorDescriptor) -> Result<(), AsserterError> {
    if err.code < 0 {
        return Err(AsserterError::ErrorCodeIsNeg { code: err.code });
    }

    if err.message.is_empty() {
        return Err(AsserterError::ErrorMessageMissing);
    }

    Ok(())
}

/// The first related transaction that structurally repeats an earlier one.
pub fn duplicate_related_transaction(
    items: &[RelatedTransaction],
) -> Result<Option<&RelatedTransaction>, AsserterError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(hash(item)?) {
            return Ok(Some(item));
        }
    }

    Ok(None)
}

/// Every amount must be valid and no currency may appear twice.
pub fn assert_unique_amounts(amounts: &[Amount]) -> Result<(), AsserterError> {
    let mut seen = HashSet::with_capacity(amounts.len());
    for item in amounts {
        amount(item).with_context(|| format!("amount {} is invalid", print_struct(item)))?;

        if !seen.insert(hash(&item.currency)?) {
            return Err(AsserterError::DuplicateCurrency {
                currency: print_struct(&item.currency),
            });
        }
    }

    Ok(())
}

/// A named, non-empty list of valid and distinct accounts.
pub fn account_array(name: &str, accounts: &[AccountIdentifier]) -> Result<(), AsserterError> {
    if accounts.is_empty() {
        return Err(AsserterError::AccountArrayEmpty {
            name: name.to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(accounts.len());
    for account in accounts {
        account_identifier(Some(account))
            .with_context(|| format!("{name} account {} is invalid", print_struct(account)))?;

        if !seen.insert(hash(account)?) {
            return Err(AsserterError::AccountArrayDuplicateAccount {
                name: name.to_string(),
                account: print_struct(account),
            });
        }
    }

    Ok(())
}

pub fn bytes_array_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| *b == 0)
}
