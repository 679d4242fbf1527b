//! Operation descriptions.
//!
//! A description lists the fields an operation must satisfy. Every field is
//! optional; an unpopulated field matches anything.

use std::fmt;

use mesh_types::{
    amount_value, hash, print_struct, AccountIdentifier, Amount, CoinAction, CoinChange, Currency,
    Metadata, Sign, SubAccountIdentifier,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ParserError;

/// Required signedness of an amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSign {
    #[default]
    Any,
    Negative,
    Positive,
    PositiveOrZero,
    NegativeOrZero,
}

impl AmountSign {
    /// Whether `amount` has this sign. A missing or non-integer amount only
    /// satisfies [`AmountSign::Any`].
    pub fn matches(self, amount: Option<&Amount>) -> bool {
        if self == AmountSign::Any {
            return true;
        }

        let Ok(value) = amount_value(amount) else {
            return false;
        };

        match (self, value.sign()) {
            (AmountSign::Negative, Sign::Minus) => true,
            (AmountSign::Positive, Sign::Plus) => true,
            (AmountSign::PositiveOrZero, Sign::Plus | Sign::NoSign) => true,
            (AmountSign::NegativeOrZero, Sign::Minus | Sign::NoSign) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AmountSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AmountSign::Any => "any",
            AmountSign::Negative => "negative",
            AmountSign::Positive => "positive",
            AmountSign::PositiveOrZero => "positive or zero",
            AmountSign::NegativeOrZero => "negative or zero",
        };
        f.write_str(name)
    }
}

/// JSON kind of a metadata value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A metadata key that must be present with a value of the given kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDescription {
    pub key: String,
    pub value_kind: ValueKind,
}

impl MetadataDescription {
    pub fn new(key: impl Into<String>, value_kind: ValueKind) -> Self {
        Self {
            key: key.into(),
            value_kind,
        }
    }
}

/// Shape of an operation's account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountDescription {
    pub exists: bool,
    /// Ignore sub-account existence and metadata; only the address is
    /// checked, and only when a sub-account is present.
    pub sub_account_optional: bool,
    pub sub_account_exists: bool,
    /// Required sub-account address; empty means any.
    pub sub_account_address: String,
    pub sub_account_metadata_keys: Vec<MetadataDescription>,
}

/// Shape of an operation's amount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountDescription {
    pub exists: bool,
    pub sign: AmountSign,
    pub currency: Option<Currency>,
}

/// Everything a single operation must satisfy to join a match group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationDescription {
    pub account: Option<AccountDescription>,
    pub amount: Option<AmountDescription>,
    pub metadata: Vec<MetadataDescription>,
    /// Required operation type; empty matches any type.
    #[serde(rename = "type")]
    pub operation_type: String,
    /// Allow more than one operation to match this description.
    pub allow_repeats: bool,
    /// Finding no operation for this description is not an error.
    pub optional: bool,
    /// Required coin action; the coin change is not inspected when unset.
    pub coin_action: Option<CoinAction>,
}

impl OperationDescription {
    pub fn of_type(operation_type: impl Into<String>) -> Self {
        Self {
            operation_type: operation_type.into(),
            ..Default::default()
        }
    }

    pub fn with_account(mut self, account: AccountDescription) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_amount(mut self, amount: AmountDescription) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.allow_repeats = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Operation descriptions plus the constraints between their match groups.
///
/// Group constraints refer to descriptions by position in
/// `operation_descriptions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Descriptions {
    pub operation_descriptions: Vec<OperationDescription>,
    /// Every operation across each listed group has the same amount.
    pub equal_amounts: Vec<Vec<usize>>,
    /// Each pair of groups has opposite amounts.
    pub opposite_amounts: Vec<Vec<usize>>,
    /// Each pair of groups has opposite amounts or both are zero.
    pub opposite_or_zero_amounts: Vec<Vec<usize>>,
    /// Every operation across each listed group has the same address.
    pub equal_addresses: Vec<Vec<usize>>,
    /// Fail when an operation matches no description.
    pub err_unmatched: bool,
}

impl Descriptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub(crate) fn metadata_match(
    requirements: &[MetadataDescription],
    metadata: Option<&Metadata>,
) -> Result<(), ParserError> {
    for requirement in requirements {
        let value = metadata
            .and_then(|metadata| metadata.get(&requirement.key))
            .ok_or_else(|| ParserError::MetadataMatchKeyNotFound {
                key: requirement.key.clone(),
            })?;

        if ValueKind::of(value) != requirement.value_kind {
            return Err(ParserError::MetadataMatchKeyValueMismatch {
                key: requirement.key.clone(),
                kind: requirement.value_kind.to_string(),
            });
        }
    }

    Ok(())
}

pub(crate) fn account_match(
    requirement: Option<&AccountDescription>,
    account: Option<&AccountIdentifier>,
) -> Result<(), ParserError> {
    let Some(requirement) = requirement else {
        return Ok(());
    };

    let Some(account) = account else {
        if requirement.exists {
            return Err(ParserError::AccountMatchAccountMissing);
        }
        return Ok(());
    };

    if requirement.sub_account_optional {
        if let Some(sub_account) = &account.sub_account {
            sub_account_address(&requirement.sub_account_address, sub_account)?;
        }
        return Ok(());
    }

    let Some(sub_account) = &account.sub_account else {
        if requirement.sub_account_exists {
            return Err(ParserError::AccountMatchSubAccountMissing);
        }
        return Ok(());
    };

    if !requirement.sub_account_exists {
        return Err(ParserError::AccountMatchSubAccountPopulated);
    }

    sub_account_address(&requirement.sub_account_address, sub_account)?;

    metadata_match(
        &requirement.sub_account_metadata_keys,
        sub_account.metadata.as_ref(),
    )
    .map_err(|err| err.context("account metadata keys mismatch"))
}

fn sub_account_address(
    required: &str,
    sub_account: &SubAccountIdentifier,
) -> Result<(), ParserError> {
    if !required.is_empty() && sub_account.address != required {
        return Err(ParserError::AccountMatchUnexpectedSubAccountAddr {
            expected: required.to_string(),
            actual: sub_account.address.clone(),
        });
    }

    Ok(())
}

pub(crate) fn amount_match(
    requirement: Option<&AmountDescription>,
    amount: Option<&Amount>,
) -> Result<(), ParserError> {
    let Some(requirement) = requirement else {
        return Ok(());
    };

    let Some(amount) = amount else {
        if requirement.exists {
            return Err(ParserError::AmountMatchAmountMissing);
        }
        return Ok(());
    };

    if !requirement.exists {
        return Err(ParserError::AmountMatchAmountPopulated);
    }

    if !requirement.sign.matches(Some(amount)) {
        return Err(ParserError::AmountMatchUnexpectedSign {
            amount: print_struct(amount),
            sign: requirement.sign.to_string(),
        });
    }

    let Some(expected) = &requirement.currency else {
        return Ok(());
    };

    let same_currency = match &amount.currency {
        Some(actual) => hash(actual)? == hash(expected)?,
        None => false,
    };

    if !same_currency {
        return Err(ParserError::AmountMatchUnexpectedCurrency {
            expected: print_struct(expected),
            actual: print_struct(&amount.currency),
        });
    }

    Ok(())
}

pub(crate) fn coin_action_match(
    required: Option<&CoinAction>,
    coin_change: Option<&CoinChange>,
) -> Result<(), ParserError> {
    let Some(required) = required else {
        return Ok(());
    };

    let Some(coin_change) = coin_change else {
        return Err(ParserError::CoinActionMatchCoinChangeIsNil {
            action: print_struct(required),
        });
    };

    if coin_change.coin_action != *required {
        return Err(ParserError::CoinActionMatchUnexpectedCoinAction {
            expected: print_struct(required),
            actual: print_struct(&coin_change.coin_action),
        });
    }

    Ok(())
}
