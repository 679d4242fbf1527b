//! Construction response assertions.
//!
//! These cover objects exchanged before a transaction is broadcast. The
//! operation-bearing parse response lives on the engine because it needs the
//! configured catalogs.

use mesh_types::{
    print_struct, ConstructionCombineResponse, ConstructionDeriveResponse,
    ConstructionMetadataResponse, ConstructionPayloadsResponse, ConstructionPreprocessResponse,
    CurveType, PublicKey, Signature, SignatureType, SigningPayload, TransactionIdentifierResponse,
};

use super::assertions::{
    account_identifier, assert_unique_amounts, bytes_array_zero, transaction_identifier,
};
use super::errors::{AsserterError, WithContext};

/// Every required public key must name a valid account.
pub fn construction_preprocess_response(
    response: &ConstructionPreprocessResponse,
) -> Result<(), AsserterError> {
    for account in &response.required_public_keys {
        account_identifier(Some(account))
            .with_context(|| format!("account identifier {} is invalid", print_struct(account)))?;
    }

    Ok(())
}

/// Metadata must be present and suggested fees must use distinct currencies.
pub fn construction_metadata_response(
    response: &ConstructionMetadataResponse,
) -> Result<(), AsserterError> {
    if response.metadata.is_none() {
        return Err(AsserterError::ConstructionMetadataResponseMetadataMissing);
    }

    assert_unique_amounts(&response.suggested_fee).with_context(|| {
        format!(
            "suggested fee {} is invalid",
            print_struct(&response.suggested_fee)
        )
    })
}

pub fn transaction_identifier_response(
    response: &TransactionIdentifierResponse,
) -> Result<(), AsserterError> {
    transaction_identifier(&response.transaction_identifier).with_context(|| {
        format!(
            "transaction identifier {} is invalid",
            print_struct(&response.transaction_identifier)
        )
    })
}

pub fn construction_combine_response(
    response: &ConstructionCombineResponse,
) -> Result<(), AsserterError> {
    if response.signed_transaction.is_empty() {
        return Err(AsserterError::SignedTxEmpty);
    }

    Ok(())
}

pub fn construction_derive_response(
    response: &ConstructionDeriveResponse,
) -> Result<(), AsserterError> {
    account_identifier(response.account_identifier.as_ref()).with_context(|| {
        format!(
            "account identifier {} is invalid",
            print_struct(&response.account_identifier)
        )
    })
}

pub fn construction_payloads_response(
    response: &ConstructionPayloadsResponse,
) -> Result<(), AsserterError> {
    if response.unsigned_transaction.is_empty() {
        return Err(AsserterError::ConstructionPayloadsResponseUnsignedTxEmpty);
    }

    if response.payloads.is_empty() {
        return Err(AsserterError::ConstructionPayloadsResponsePayloadsEmpty);
    }

    for payload in &response.payloads {
        signing_payload(payload)
            .with_context(|| format!("signing payload {} is invalid", print_struct(payload)))?;
    }

    Ok(())
}

pub fn public_key(key: &PublicKey) -> Result<(), AsserterError> {
    if key.hex_bytes.is_empty() {
        return Err(AsserterError::PublicKeyBytesEmpty);
    }

    if bytes_array_zero(&key.hex_bytes) {
        return Err(AsserterError::PublicKeyBytesZero);
    }

    curve_type(&key.curve_type)
}

pub fn curve_type(curve: &CurveType) -> Result<(), AsserterError> {
    match curve {
        CurveType::Secp256k1
        | CurveType::Secp256r1
        | CurveType::Edwards25519
        | CurveType::Tweedle
        | CurveType::Pallas => Ok(()),
        CurveType::Unsupported(_) => Err(AsserterError::CurveTypeNotSupported),
    }
}

pub fn signature_type(signature: &SignatureType) -> Result<(), AsserterError> {
    match signature {
        SignatureType::Ecdsa
        | SignatureType::EcdsaRecovery
        | SignatureType::Ed25519
        | SignatureType::Schnorr1
        | SignatureType::SchnorrPoseidon => Ok(()),
        SignatureType::Unsupported(_) => Err(AsserterError::SignatureTypeNotSupported),
    }
}

/// A signing payload needs an account and non-zero bytes; the requested
/// signature type is optional.
pub fn signing_payload(payload: &SigningPayload) -> Result<(), AsserterError> {
    account_identifier(payload.account_identifier.as_ref()).with_context(|| {
        format!(
            "account identifier {} is invalid",
            print_struct(&payload.account_identifier)
        )
    })?;

    if payload.hex_bytes.is_empty() {
        return Err(AsserterError::SigningPayloadBytesEmpty);
    }

    if bytes_array_zero(&payload.hex_bytes) {
        return Err(AsserterError::SigningPayloadBytesZero);
    }

    match &payload.signature_type {
        Some(requested) => signature_type(requested),
        None => Ok(()),
    }
}

pub fn signatures(signatures: &[Signature]) -> Result<(), AsserterError> {
    if signatures.is_empty() {
        return Err(AsserterError::SignaturesEmpty);
    }

    for signature in signatures {
        signing_payload(&signature.signing_payload).with_context(|| {
            format!(
                "signing payload {} is invalid",
                print_struct(&signature.signing_payload)
            )
        })?;

        public_key(&signature.public_key).with_context(|| {
            format!(
                "public key {} is invalid",
                print_struct(&signature.public_key)
            )
        })?;

        signature_type(&signature.signature_type)?;

        if let Some(requested) = &signature.signing_payload.signature_type {
            if *requested != signature.signature_type {
                return Err(AsserterError::SignaturesReturnedSigMismatch {
                    requested: print_struct(requested),
                    returned: print_struct(&signature.signature_type),
                });
            }
        }

        if signature.hex_bytes.is_empty() {
            return Err(AsserterError::SignatureBytesEmpty);
        }

        if bytes_array_zero(&signature.hex_bytes) {
            return Err(AsserterError::SignatureBytesZero);
        }
    }

    Ok(())
}
