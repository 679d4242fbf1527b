//! # Conformance Benchmarks
//!
//! Both components are linear in their input:
//!
//! | Component | Cost |
//! |-----------|------|
//! | Validation engine | total object-graph size |
//! | Pattern matcher | operations × descriptions |

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mesh_asserter::{Asserter, BlockValidationApi};
use mesh_parser::{
    match_operations, AmountDescription, AmountSign, Descriptions, OperationDescription,
};
use mesh_tests::fixtures::{
    account_profile, block, engine_config, operation, payment_descriptions, payment_transaction,
};

fn bench_block_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("asserter-block");
    group.measurement_time(Duration::from_secs(5));

    let engine = Asserter::new(engine_config().with_validation(account_profile()))
        .expect("valid benchmark config");

    for tx_count in [1u64, 10, 100, 500] {
        let transactions = (0..tx_count)
            .map(|n| payment_transaction(&format!("tx-{n}"), 1_000 + n, 7))
            .collect();
        let candidate = block(42, transactions);

        group.throughput(Throughput::Elements(tx_count));
        group.bench_with_input(
            BenchmarkId::new("payment_transactions", tx_count),
            &candidate,
            |b, candidate| b.iter(|| black_box(engine.validate_block(candidate).is_ok())),
        );
    }

    group.finish();
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser-match");

    let tx = payment_transaction("tx", 1_000, 7);
    let descriptions = payment_descriptions();
    group.bench_function("payment_intent", |b| {
        b.iter(|| black_box(match_operations(&descriptions, &tx.operations).is_ok()))
    });

    // Many inputs collected by one repeatable description against a wide
    // description list that never matches.
    for op_count in [10usize, 100, 1_000] {
        let operations: Vec<_> = (0..op_count as i64)
            .map(|index| operation(index, "TRANSFER", "addr", Some("-1"), &[]))
            .collect();

        let mut operation_descriptions: Vec<_> = (0..20)
            .map(|n| OperationDescription::of_type(format!("UNUSED_{n}")).optional())
            .collect();
        operation_descriptions.push(
            OperationDescription::of_type("TRANSFER")
                .with_amount(AmountDescription {
                    exists: true,
                    sign: AmountSign::Negative,
                    currency: None,
                })
                .repeatable(),
        );
        let descriptions = Descriptions {
            operation_descriptions,
            equal_amounts: vec![vec![20]],
            ..Default::default()
        };

        group.throughput(Throughput::Elements(op_count as u64));
        group.bench_with_input(
            BenchmarkId::new("repeatable_group", op_count),
            &operations,
            |b, operations| b.iter(|| black_box(match_operations(&descriptions, operations).is_ok())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_block_validation, bench_matching);
criterion_main!(benches);
