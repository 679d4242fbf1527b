//! # Construction Flows
//!
//! The construction sequence (preprocess, metadata, payloads, parse, combine,
//! submit) as a harness sees it: each response checked in turn, with the
//! parsed operations fed to the matcher to recover the intent.

#[cfg(test)]
mod tests {
    use mesh_asserter::{
        construction_combine_response, construction_metadata_response,
        construction_payloads_response, construction_preprocess_response, signatures,
        transaction_identifier_response, Asserter, AsserterError,
    };
    use mesh_parser::match_operations;
    use mesh_types::{
        AccountIdentifier, ConstructionCombineResponse, ConstructionMetadataResponse,
        ConstructionParseResponse, ConstructionPayloadsResponse, ConstructionPreprocessResponse,
        CurveType, Operation, PublicKey, Signature, SignatureType, SigningPayload,
        TransactionIdentifier, TransactionIdentifierResponse,
    };

    use crate::fixtures::{engine_config, eth, payment_descriptions, payment_transaction};

    fn unsigned_operations() -> Vec<Operation> {
        payment_transaction("unused", 40, 2)
            .operations
            .into_iter()
            .map(|mut op| {
                op.status = None;
                op
            })
            .collect()
    }

    fn alice_payload() -> SigningPayload {
        SigningPayload {
            account_identifier: Some(AccountIdentifier::new("alice")),
            hex_bytes: vec![0xde, 0xad, 0xbe, 0xef],
            signature_type: Some(SignatureType::Ecdsa),
        }
    }

    #[test]
    fn test_full_construction_sequence() {
        let engine = Asserter::new(engine_config()).unwrap();

        let preprocess = ConstructionPreprocessResponse {
            options: None,
            required_public_keys: vec![AccountIdentifier::new("alice")],
        };
        construction_preprocess_response(&preprocess).unwrap();

        let metadata = ConstructionMetadataResponse {
            metadata: Some(Default::default()),
            suggested_fee: vec![eth("2")],
        };
        construction_metadata_response(&metadata).unwrap();

        let payloads = ConstructionPayloadsResponse {
            unsigned_transaction: "0xunsigned".to_string(),
            payloads: vec![alice_payload()],
        };
        construction_payloads_response(&payloads).unwrap();

        let unsigned_parse = ConstructionParseResponse {
            operations: unsigned_operations(),
            account_identifier_signers: vec![],
            metadata: None,
        };
        engine
            .construction_parse_response(&unsigned_parse, false)
            .unwrap();

        let matches = match_operations(&payment_descriptions(), &unsigned_parse.operations).unwrap();
        assert_eq!(matches.len(), 3);

        let signed = vec![Signature {
            signing_payload: alice_payload(),
            public_key: PublicKey {
                hex_bytes: vec![0x02; 33],
                curve_type: CurveType::Secp256k1,
            },
            signature_type: SignatureType::Ecdsa,
            hex_bytes: vec![0x11; 64],
        }];
        signatures(&signed).unwrap();

        construction_combine_response(&ConstructionCombineResponse {
            signed_transaction: "0xsigned".to_string(),
        })
        .unwrap();

        let signed_parse = ConstructionParseResponse {
            operations: unsigned_operations(),
            account_identifier_signers: vec![AccountIdentifier::new("alice")],
            metadata: None,
        };
        engine
            .construction_parse_response(&signed_parse, true)
            .unwrap();

        transaction_identifier_response(&TransactionIdentifierResponse {
            transaction_identifier: TransactionIdentifier::new("0xhash"),
            metadata: None,
        })
        .unwrap();
    }

    #[test]
    fn test_confirmed_operations_rejected_in_construction() {
        let engine = Asserter::new(engine_config()).unwrap();
        let parse = ConstructionParseResponse {
            operations: payment_transaction("tx", 40, 2).operations,
            account_identifier_signers: vec![],
            metadata: None,
        };

        assert!(matches!(
            engine
                .construction_parse_response(&parse, false)
                .unwrap_err()
                .root_cause(),
            AsserterError::OperationStatusNotEmptyForConstruction { .. }
        ));
    }

    #[test]
    fn test_signature_type_must_match_request() {
        let signed = vec![Signature {
            signing_payload: alice_payload(),
            public_key: PublicKey {
                hex_bytes: vec![0x02; 33],
                curve_type: CurveType::Secp256k1,
            },
            signature_type: SignatureType::EcdsaRecovery,
            hex_bytes: vec![0x11; 65],
        }];

        assert!(matches!(
            signatures(&signed),
            Err(AsserterError::SignaturesReturnedSigMismatch { .. })
        ));
    }

    #[test]
    fn test_signature_json_uses_hex() {
        let signature: Signature = serde_json::from_str(
            r#"{
                "signing_payload": {
                    "account_identifier": {"address": "alice"},
                    "hex_bytes": "deadbeef",
                    "signature_type": "ed25519"
                },
                "public_key": {"hex_bytes": "0202", "curve_type": "edwards25519"},
                "signature_type": "ed25519",
                "hex_bytes": "0101"
            }"#,
        )
        .unwrap();

        assert_eq!(signature.signing_payload.hex_bytes, vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(signatures(&[signature]).is_ok());
    }
}
