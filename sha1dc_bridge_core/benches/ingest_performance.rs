//! Performance benchmarks for buffer ingestion
//!
//! Measures the bridge's overhead per ingestion path (copy, pin, direct and
//! single bytes) on top of the collision-detecting engine.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sha1dc_bridge_core::{
    CarrierLayout, DigestCarrier, HeapRegion, IngestStrategy, SessionManager, Sha1CdEngine,
};
use std::hint::black_box;

fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn format_size(size: usize) -> String {
    if size >= 1_048_576 {
        format!("{}MB", size / 1_048_576)
    } else {
        format!("{}KB", size / 1_024)
    }
}

/// Hash a whole buffer through each region path
fn benchmark_region_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_paths");
    let manager = SessionManager::<Sha1CdEngine>::default();
    let layout = CarrierLayout::digest_carrier();

    for size in [1_024, 65_536, 1_048_576] {
        let data = generate_test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for strategy in [IngestStrategy::Copy, IngestStrategy::Pin] {
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), format_size(size)),
                &data,
                |b, data| {
                    let region = HeapRegion::new(data);
                    b.iter(|| {
                        let handle = manager.allocate().unwrap();
                        manager
                            .consume_region(handle, &region, 0, data.len() as i32, strategy)
                            .unwrap();
                        let mut carrier = DigestCarrier::default();
                        let collided = manager.finalize(handle, &layout, &mut carrier).unwrap();
                        manager.release(handle).unwrap();
                        black_box((collided, carrier));
                    })
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::new("direct", format_size(size)),
            &data,
            |b, data| {
                b.iter(|| {
                    let handle = manager.allocate().unwrap();
                    manager
                        .consume_external_region(handle, data, 0, data.len() as i32)
                        .unwrap();
                    let mut carrier = DigestCarrier::default();
                    let collided = manager.finalize(handle, &layout, &mut carrier).unwrap();
                    manager.release(handle).unwrap();
                    black_box((collided, carrier));
                })
            },
        );
    }

    group.finish();
}

/// Per-call overhead of the byte path
fn benchmark_single_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_bytes");
    let manager = SessionManager::<Sha1CdEngine>::default();
    let handle = manager.allocate().unwrap();
    group.throughput(Throughput::Bytes(4_096));

    group.bench_function("consume_byte_4KB", |b| {
        b.iter(|| {
            for i in 0..4_096u32 {
                manager.consume_byte(handle, black_box(i as u8)).unwrap();
            }
        })
    });

    group.finish();
}

/// Cost of allocating, cloning and releasing sessions
fn benchmark_session_lifecycle(c: &mut Criterion) {
    let manager = SessionManager::<Sha1CdEngine>::default();

    c.bench_function("allocate_release", |b| {
        b.iter(|| {
            let handle = manager.allocate().unwrap();
            manager.release(black_box(handle)).unwrap();
        })
    });

    let base = manager.allocate().unwrap();
    manager
        .consume_region(base, &HeapRegion::new(&[0u8; 100]), 0, 100, IngestStrategy::Pin)
        .unwrap();
    c.bench_function("clone_release", |b| {
        b.iter(|| {
            let cloned = manager.clone_session(base).unwrap();
            manager.release(black_box(cloned)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_region_paths,
    benchmark_single_bytes,
    benchmark_session_lifecycle
);
criterion_main!(benches);
