use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, Utc};
use stockflow_allocation::{allocate, AllocationStrategy, StockBucket};
use stockflow_core::{Money, ProductId, StockBucketId, WarehouseId};
use uuid::Uuid;

fn build_buckets(count: u128) -> Vec<StockBucket> {
    let received = Utc::now() - Duration::days(90);
    (0..count)
        .map(|seq| StockBucket {
            id: StockBucketId::from_uuid(Uuid::from_u128(seq + 1)),
            product_id: ProductId::from_uuid(Uuid::from_u128(1)),
            warehouse_id: WarehouseId::from_uuid(Uuid::from_u128(1)),
            location_id: None,
            quantity: 10 + (seq as i64 % 37),
            reserved: seq as i64 % 5,
            batch_no: None,
            serial_no: None,
            // Every third bucket is undated to exercise the FIFO pass.
            expires_at: (seq % 3 != 0)
                .then(|| received + Duration::days(100 + (seq as i64 * 7) % 200)),
            received_at: received + Duration::hours(seq as i64 % 720),
            unit_cost: Money::from_minor(250),
        })
        .collect()
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");

    for &size in &[10u128, 100, 1000] {
        let buckets = build_buckets(size);
        let demand = (size as i64) * 5;
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("expiry_then_receipt", size),
            &buckets,
            |b, buckets| {
                let cutoff = Utc::now();
                b.iter(|| {
                    allocate(
                        black_box(demand),
                        black_box(buckets),
                        AllocationStrategy::ExpiryThenReceipt { cutoff },
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("smallest_available_first", size),
            &buckets,
            |b, buckets| {
                b.iter(|| {
                    allocate(
                        black_box(demand),
                        black_box(buckets),
                        AllocationStrategy::SmallestAvailableFirst,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_allocate);
criterion_main!(benches);
