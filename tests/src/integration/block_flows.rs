//! # Block Validation Flows
//!
//! Blocks built from realistic payment transactions, validated end to end
//! through the inbound API, including a shared engine used from several
//! threads and JSON fixtures decoded the way a harness would receive them.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use mesh_asserter::{
        Asserter, AsserterError, BlockValidationApi, MAX_UNIX_EPOCH, MIN_UNIX_EPOCH,
    };
    use mesh_types::{Block, ErrorDescriptor, Operation};
    use proptest::prelude::*;

    use crate::fixtures::{
        account_profile, block, engine_config, operation, payment_transaction,
    };

    fn profiled_engine() -> Asserter {
        Asserter::new(engine_config().with_validation(account_profile())).unwrap()
    }

    // =========================================================================
    // Happy paths
    // =========================================================================

    #[test]
    fn test_chain_of_payment_blocks() {
        let engine = profiled_engine();

        for index in 1..=5 {
            let transactions = (0..3)
                .map(|n| payment_transaction(&format!("tx-{index}-{n}"), 100 + n, 1))
                .collect();
            assert!(engine.validate_block(&block(index, transactions)).is_ok());
        }
    }

    #[test]
    fn test_block_decoded_from_json() {
        let engine = profiled_engine();
        let block: Block = serde_json::from_str(
            r#"{
                "block_identifier": {"index": 7, "hash": "0xabc"},
                "parent_block_identifier": {"index": 6, "hash": "0xabb"},
                "timestamp": 1600000000000,
                "transactions": [{
                    "transaction_identifier": {"hash": "0xt1"},
                    "operations": [
                        {"operation_identifier": {"index": 0}, "type": "PAYMENT", "status": "SUCCESS",
                         "account": {"address": "alice"},
                         "amount": {"value": "-25", "currency": {"symbol": "ETH", "decimals": 18}}},
                        {"operation_identifier": {"index": 1}, "related_operations": [{"index": 0}],
                         "type": "PAYMENT", "status": "SUCCESS",
                         "account": {"address": "bob"},
                         "amount": {"value": "25", "currency": {"symbol": "ETH", "decimals": 18}}},
                        {"operation_identifier": {"index": 2}, "type": "FEE", "status": "SUCCESS",
                         "account": {"address": "alice"},
                         "amount": {"value": "-1", "currency": {"symbol": "ETH", "decimals": 18}}}
                    ]
                }]
            }"#,
        )
        .unwrap();

        assert!(engine.validate_block(&block).is_ok());
    }

    #[test]
    fn test_shared_engine_across_threads() {
        let engine: Arc<dyn BlockValidationApi> = Arc::new(profiled_engine());

        let handles: Vec<_> = (1..=4)
            .map(|index| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    let tx = payment_transaction(&format!("tx-{index}"), 10, 1);
                    engine.validate_block(&block(index, vec![tx]))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    }

    // =========================================================================
    // Rejections
    // =========================================================================

    #[test]
    fn test_unbalanced_payment_rejected_with_context() {
        let engine = profiled_engine();
        let mut tx = payment_transaction("tx-bad", 100, 1);
        tx.operations[1].amount = Some(crate::fixtures::eth("99"));

        let err = engine.validate_block(&block(3, vec![tx])).unwrap_err();
        assert_eq!(
            err.root_cause(),
            &AsserterError::PaymentAmountNotBalancing {
                total: "-1".to_string()
            }
        );
        assert!(err.to_string().contains("tx-bad"));
    }

    #[test]
    fn test_first_violation_wins() {
        let engine = profiled_engine();
        let mut first = payment_transaction("tx-1", 10, 1);
        first.operations[0].status = Some("PENDING".to_string());
        let mut second = payment_transaction("tx-2", 10, 1);
        second.transaction_identifier.hash.clear();

        let err = engine
            .validate_block(&block(2, vec![first, second]))
            .unwrap_err();
        assert_eq!(
            err.root_cause(),
            &AsserterError::OperationStatusInvalid {
                status: "PENDING".to_string()
            }
        );
    }

    #[test]
    fn test_missing_related_operations_rejected() {
        let engine = profiled_engine();
        let mut tx = payment_transaction("tx", 10, 1);
        tx.operations[1].related_operations.clear();

        assert_eq!(
            engine.validate_transaction(&tx).unwrap_err().root_cause(),
            &AsserterError::RelatedOperationMissing
        );
    }

    #[test]
    fn test_genesis_block_may_reference_itself() {
        let engine = profiled_engine();
        let mut genesis = block(0, vec![]);
        genesis.block_identifier.hash = "genesis".to_string();
        genesis.parent_block_identifier.hash = "genesis".to_string();

        assert!(engine.validate_block(&genesis).is_ok());

        let mut not_genesis = block(4, vec![]);
        not_genesis.parent_block_identifier.hash = not_genesis.block_identifier.hash.clone();
        assert!(matches!(
            engine.validate_block(&not_genesis),
            Err(AsserterError::BlockHashEqualsParentBlockHash { .. })
        ));
    }

    #[test]
    fn test_error_catalog_through_api() {
        let engine = profiled_engine();
        assert!(engine
            .validate_error(&ErrorDescriptor::new(2, "node unavailable", true))
            .is_ok());
        assert!(matches!(
            engine.validate_error(&ErrorDescriptor::new(2, "node unavailable", false)),
            Err(AsserterError::ErrorRetriableMismatch { code: 2, .. })
        ));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let engine = profiled_engine();
        let mut tx = payment_transaction("tx", 10, 0);
        tx.operations[2].amount = Some(crate::fixtures::eth("0"));
        let candidate = block(9, vec![tx]);

        let first = engine.validate_block(&candidate);
        assert!(first.is_err());
        assert_eq!(first, engine.validate_block(&candidate));
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn sequential(len: usize) -> Vec<Operation> {
        (0..len as i64)
            .map(|index| {
                let related: Vec<i64> = if index > 0 { vec![index - 1] } else { vec![] };
                operation(index, "TRANSFER", "addr", Some("1"), &related)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_sequential_indices_accepted(len in 1usize..20) {
            let engine = Asserter::new(engine_config()).unwrap();
            prop_assert!(engine.validate_operations(&sequential(len), false).is_ok());
        }

        #[test]
        fn prop_misnumbered_operation_rejected(len in 2usize..20, pick in any::<prop::sample::Index>(), shift in 1i64..5) {
            let engine = Asserter::new(engine_config()).unwrap();
            let mut ops = sequential(len);
            let position = pick.index(len);
            ops[position].operation_identifier.index += shift;

            let err = engine.validate_operations(&ops, false).unwrap_err();
            let is_index_error = matches!(
                err.root_cause(),
                AsserterError::OperationIdentifierIndexOutOfOrder { .. }
            );
            prop_assert!(is_index_error);
        }

        #[test]
        fn prop_forward_related_reference_rejected(len in 2usize..20, pick in any::<prop::sample::Index>()) {
            let engine = Asserter::new(engine_config()).unwrap();
            let mut ops = sequential(len);
            let position = pick.index(len);
            let target = position as i64 + pick.index(3) as i64;
            ops[position].related_operations = vec![mesh_types::OperationIdentifier::new(target)];

            let rejected = matches!(
                engine.validate_operations(&ops, false),
                Err(AsserterError::RelatedOperationIndexOutOfOrder { .. })
            );
            prop_assert!(rejected);
        }

        #[test]
        fn prop_non_negative_fee_always_rejected(fee in 0u64..1_000_000, amount in 1u64..1_000_000) {
            let engine = profiled_engine();
            let mut tx = payment_transaction("tx", amount, 1);
            tx.operations[2].amount = Some(crate::fixtures::eth(&fee.to_string()));

            let rejected = matches!(
                engine.validate_transaction(&tx).unwrap_err().root_cause(),
                AsserterError::FeeAmountNotNegative { .. }
            );
            prop_assert!(rejected);
        }

        #[test]
        fn prop_timestamp_window(ts in (MIN_UNIX_EPOCH - 1_000)..(MAX_UNIX_EPOCH + 1_000)) {
            let engine = Asserter::new(engine_config()).unwrap();
            let mut candidate = block(5, vec![]);
            candidate.timestamp = ts;

            let in_window = (MIN_UNIX_EPOCH..=MAX_UNIX_EPOCH).contains(&ts);
            prop_assert_eq!(engine.validate_block(&candidate).is_ok(), in_window);
        }
    }
}
