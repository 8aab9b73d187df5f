use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use mimc_accumulator::{Accumulator, FieldElement, FrontierAccumulator};

fn make_leaves(count: usize) -> Vec<FieldElement> {
    (0..count as u64)
        .map(|i| FieldElement::from(i.wrapping_mul(0x9e37_79b9_7f4a_7c15)))
        .collect()
}

fn bench_insert_leaf(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_leaf_h32");
    for &prefix in &[0usize, 1023] {
        let leaves = make_leaves(prefix);
        group.bench_with_input(BenchmarkId::from_parameter(prefix), &leaves, |b, leaves| {
            b.iter_batched(
                || {
                    let mut accumulator = Accumulator::new();
                    accumulator.insert_leaves(leaves).unwrap();
                    accumulator
                },
                |mut accumulator| accumulator.insert_leaf(FieldElement::ONE).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_insert_leaves(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_leaves_h20");
    group.sample_size(10);
    for &size in &[16usize, 256, 1024] {
        let leaves = make_leaves(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &leaves, |b, leaves| {
            b.iter_batched(
                FrontierAccumulator::<20>::new,
                |mut accumulator| accumulator.insert_leaves(leaves).unwrap(),
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("single", size), &leaves, |b, leaves| {
            b.iter_batched(
                FrontierAccumulator::<20>::new,
                |mut accumulator| {
                    for leaf in leaves {
                        accumulator.insert_leaf(*leaf).unwrap();
                    }
                    accumulator.root()
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(accumulator, bench_insert_leaf, bench_insert_leaves);
criterion_main!(accumulator);
