//! Benchmarks for the exposure control.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use wager_controls::{
    clamp_to_exposure, ConfiguredStrategy, ControlConfig, ExposureControl, ExposureSnapshot,
};
use wager_core::types::{
    Market, Order, OrderAmount, OrderPackageType, OrderViolation, SelectionExposures, Side,
    StrategyLimits,
};

fn generate_orders(size: usize) -> Vec<Order> {
    (0..size)
        .map(|i| {
            let side = if i % 2 == 0 { Side::Back } else { Side::Lay };
            let price = Decimal::new(101 + (i as i64 % 2000), 2);
            let amount = if i % 3 == 0 {
                OrderAmount::limit_on_close(Decimal::new(500 + i as i64, 1), price)
            } else {
                OrderAmount::limit(Decimal::new(500 + i as i64, 1), price)
            };
            Order::new("bench", "1.100", (i % 20) as u64, side, amount)
        })
        .collect()
}

fn generate_snapshot() -> ExposureSnapshot {
    let mut snapshot = ExposureSnapshot::new();
    for selection in 0..20u64 {
        let matched = Decimal::new(selection as i64 * 25 - 250, 0);
        snapshot.set("bench", "1.100", selection, SelectionExposures::matched(matched));
    }
    snapshot
}

fn benchmark_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ExposureControl");

    for size in [100, 1000, 10000].iter() {
        let orders = generate_orders(*size);

        group.bench_with_input(BenchmarkId::new("validate", size), &orders, |b, orders| {
            let control = ExposureControl::new(ControlConfig::default(), generate_snapshot());
            let mut strategy = ConfiguredStrategy::new("bench", StrategyLimits::default());
            b.iter(|| {
                let mut market = Market::new("1.100");
                let mut errors: Vec<OrderViolation> = Vec::new();
                for order in orders {
                    black_box(control.validate(
                        black_box(order),
                        OrderPackageType::Place,
                        &mut strategy,
                        &mut market,
                        &mut errors,
                    ));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_clamp(c: &mut Criterion) {
    let orders = generate_orders(1000);
    let target = Decimal::new(100, 0);

    c.bench_function("clamp_to_exposure", |b| {
        b.iter(|| {
            for order in &orders {
                black_box(clamp_to_exposure(
                    order.side,
                    black_box(order.amount),
                    target,
                ));
            }
        })
    });
}

criterion_group!(benches, benchmark_validate, benchmark_clamp);
criterion_main!(benches);
