//! # Matcher Flows
//!
//! Operations that already passed the validation engine are matched against
//! intent descriptions, the way a downstream parser extracts sender,
//! receiver and fee from a transaction.

#[cfg(test)]
mod tests {
    use mesh_asserter::{Asserter, BlockValidationApi};
    use mesh_parser::{
        match_operations, AmountDescription, AmountSign, Descriptions, OperationDescription,
        ParserError,
    };
    use mesh_types::{BigInt, Operation};
    use proptest::prelude::*;

    use crate::fixtures::{
        engine_config, eth, operation, payment_descriptions, payment_transaction,
    };

    #[test]
    fn test_validated_payment_is_parsed() {
        let engine = Asserter::new(engine_config()).unwrap();
        let tx = payment_transaction("tx", 250, 3);
        engine.validate_transaction(&tx).unwrap();

        let matches = match_operations(&payment_descriptions(), &tx.operations).unwrap();

        let (sender, sent) = matches[0].first().unwrap();
        let (receiver, received) = matches[1].first().unwrap();
        let (payer, fee) = matches[2].first().unwrap();

        assert_eq!(sender.account.as_ref().unwrap().address, "alice");
        assert_eq!(receiver.account.as_ref().unwrap().address, "bob");
        assert_eq!(payer.account.as_ref().unwrap().address, "alice");
        assert_eq!(sent, Some(&BigInt::from(-250)));
        assert_eq!(received, Some(&BigInt::from(250)));
        assert_eq!(fee, Some(&BigInt::from(-3)));
    }

    #[test]
    fn test_fee_paid_by_third_party_rejected() {
        let mut tx = payment_transaction("tx", 250, 3);
        tx.operations[2].account = Some(mesh_types::AccountIdentifier::new("carol"));

        let err = match_operations(&payment_descriptions(), &tx.operations).unwrap_err();
        assert_eq!(
            err.root_cause(),
            &ParserError::EqualAddressesAddrMismatch {
                expected: "alice".to_string(),
                actual: "carol".to_string()
            }
        );
    }

    #[test]
    fn test_extra_operation_with_err_unmatched() {
        let mut tx = payment_transaction("tx", 250, 3);
        tx.operations
            .push(operation(3, "TRANSFER", "dave", Some("1"), &[]));

        assert_eq!(
            match_operations(&payment_descriptions(), &tx.operations),
            Err(ParserError::MatchOperationsMatchNotFound { index: 3 })
        );

        let mut lenient = payment_descriptions();
        lenient.err_unmatched = false;
        let matches = match_operations(&lenient, &tx.operations).unwrap();
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|matched| matched.len() == 1));
    }

    #[test]
    fn test_currency_mismatch_leaves_description_unmatched() {
        let mut tx = payment_transaction("tx", 250, 3);
        tx.operations[2].amount = Some(mesh_types::Amount::new(
            "-3",
            mesh_types::Currency::new("BTC", 8),
        ));

        let mut descriptions = payment_descriptions();
        descriptions.err_unmatched = false;
        assert_eq!(
            match_operations(&descriptions, &tx.operations),
            Err(ParserError::MatchOperationsDescriptionNotMatched { index: 2 })
        );
    }

    #[test]
    fn test_descriptions_from_json_file_format() {
        let descriptions = Descriptions::from_json(
            r#"{
                "operation_descriptions": [
                    {"type": "fee", "amount": {"exists": true, "sign": "negative"}},
                    {"type": "transfer", "amount": {"exists": true, "sign": "positive"}}
                ],
                "opposite_amounts": [[0, 1]]
            }"#,
        )
        .unwrap();

        let ops: Vec<Operation> = vec![
            Operation {
                operation_type: "fee".to_string(),
                amount: Some(eth("-5")),
                ..Default::default()
            },
            Operation {
                operation_type: "transfer".to_string(),
                amount: Some(eth("5")),
                ..Default::default()
            },
        ];

        let matches = match_operations(&descriptions, &ops).unwrap();
        assert_eq!(matches[0].len(), 1);
        assert_eq!(matches[1].len(), 1);
    }

    fn fee_transfer_ops(fee: i64, transfer: i64) -> Vec<Operation> {
        vec![
            operation(0, "fee", "a", Some(&fee.to_string()), &[]),
            operation(1, "transfer", "b", Some(&transfer.to_string()), &[]),
        ]
    }

    fn any_sign_pair() -> Descriptions {
        Descriptions {
            operation_descriptions: vec![
                OperationDescription::of_type("fee").with_amount(AmountDescription {
                    exists: true,
                    sign: AmountSign::Any,
                    currency: None,
                }),
                OperationDescription::of_type("transfer").with_amount(AmountDescription {
                    exists: true,
                    sign: AmountSign::Any,
                    currency: None,
                }),
            ],
            opposite_or_zero_amounts: vec![vec![0, 1]],
            ..Default::default()
        }
    }

    proptest! {
        #[test]
        fn prop_opposite_or_zero(a in -1_000i64..1_000, b in -1_000i64..1_000) {
            let ops = fee_transfer_ops(a, b);
            let result = match_operations(&any_sign_pair(), &ops);
            let expected = (a == 0 && b == 0) || (a == -b && a != 0);
            prop_assert_eq!(result.is_ok(), expected);
        }

        #[test]
        fn prop_matching_is_deterministic(amount in 1u64..1_000_000, fee in 1u64..1_000) {
            let tx = payment_transaction("tx", amount, fee);
            let descriptions = payment_descriptions();
            prop_assert_eq!(
                match_operations(&descriptions, &tx.operations),
                match_operations(&descriptions, &tx.operations)
            );
        }
    }
}
