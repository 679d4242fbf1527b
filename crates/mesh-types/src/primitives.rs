//! # Numeric & Identity Primitives
//!
//! Pure helpers for interpreting amount strings and for comparing composite
//! records by canonical serialization.

use num_bigint::BigInt;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::entities::Amount;
use crate::errors::TypesError;

/// Parse a base-10 integer string (optionally signed) into a `BigInt`.
///
/// Only an optional leading `+`/`-` followed by ASCII digits is accepted.
pub fn big_int(value: &str) -> Result<BigInt, TypesError> {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypesError::NotAnInteger {
            value: value.to_string(),
        });
    }

    BigInt::parse_bytes(value.as_bytes(), 10).ok_or_else(|| TypesError::NotAnInteger {
        value: value.to_string(),
    })
}

/// Parse the value of an amount, failing if the amount is absent.
pub fn amount_value(amount: Option<&Amount>) -> Result<BigInt, TypesError> {
    let amount = amount.ok_or(TypesError::AmountMissing)?;
    big_int(&amount.value)
}

/// Canonical identity of a record: SHA-256 over its JSON form with every
/// object's keys sorted, hex encoded.
pub fn hash<T: Serialize + ?Sized>(value: &T) -> Result<String, TypesError> {
    let json =
        serde_json::to_value(value).map_err(|e| TypesError::Serialization(e.to_string()))?;
    let canonical = serde_json::to_vec(&sort_keys(json))
        .map_err(|e| TypesError::Serialization(e.to_string()))?;

    Ok(hex::encode(Sha256::digest(&canonical)))
}

/// Compact JSON rendering of a record for diagnostics.
pub fn print_struct<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "unable to print struct".to_string())
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
