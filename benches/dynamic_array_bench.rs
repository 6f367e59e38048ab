use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dynarray::{DynamicArray, GrowthPolicy, GrowthStrategy};

fn bench_push_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_array_push");

    for size in [100usize, 1_000, 10_000, 100_000].iter() {
        let size = *size;

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("DynamicArray::push", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut array = DynamicArray::new();
                    for i in 0..size {
                        array.push(black_box(i as u64)).unwrap();
                    }
                    array
                });
            },
        );

        // std::Vec::push for comparison
        group.bench_with_input(
            BenchmarkId::new("std::Vec::push", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut vec = Vec::new();
                    for i in 0..size {
                        vec.push(black_box(i as u64));
                    }
                    vec
                });
            },
        );
    }

    group.finish();
}

fn bench_growth_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_array_growth");
    let size = 50_000usize;
    group.throughput(Throughput::Elements(size as u64));

    let strategies = [
        GrowthStrategy::Doubling,
        GrowthStrategy::GoldenRatio,
        GrowthStrategy::Linear { step: 1024 },
    ];

    for strategy in strategies {
        group.bench_with_input(
            BenchmarkId::new("push", strategy.to_string()),
            &strategy,
            |b, strategy| {
                b.iter(|| {
                    let mut array = DynamicArray::with_policy(GrowthPolicy::from(*strategy));
                    for i in 0..size {
                        array.push(black_box(i as u32)).unwrap();
                    }
                    array
                });
            },
        );
    }

    group.finish();
}

fn bench_shifting_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_array_shift");

    for size in [100usize, 1_000, 10_000].iter() {
        let size = *size;

        group.bench_with_input(
            BenchmarkId::new("insert_front", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut array = DynamicArray::new();
                    for i in 0..size {
                        array.insert(0, black_box(i as u64)).unwrap();
                    }
                    array
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("remove_front", size),
            &size,
            |b, &size| {
                b.iter_with_setup(
                    || DynamicArray::from_values(0..size as u64).unwrap(),
                    |mut array| {
                        while !array.is_empty() {
                            black_box(array.remove(0).unwrap());
                        }
                        array
                    },
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("std::Vec::insert_front", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut vec = Vec::new();
                    for i in 0..size {
                        vec.insert(0, black_box(i as u64));
                    }
                    vec
                });
            },
        );
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_array_iteration");

    for size in [1_000usize, 100_000].iter() {
        let size = *size;
        let mut array = DynamicArray::from_values(0..size as u64).unwrap();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(BenchmarkId::new("for_each", size), |b| {
            b.iter(|| array.for_each(|x| *x = black_box(x.wrapping_add(1))));
        });

        group.bench_function(BenchmarkId::new("checked_get", size), |b| {
            b.iter(|| {
                let mut sum = 0u64;
                for i in 0..array.len() {
                    sum = sum.wrapping_add(*array.get(i).unwrap());
                }
                black_box(sum)
            });
        });

        group.bench_function(BenchmarkId::new("cursor_walk", size), |b| {
            b.iter(|| {
                let mut sum = 0u64;
                let end = array.end();
                let mut cursor = array.begin();
                while cursor != end {
                    sum = sum.wrapping_add(*cursor.get(&array).unwrap());
                    cursor.advance();
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_operations,
    bench_growth_policies,
    bench_shifting_operations,
    bench_iteration
);
criterion_main!(benches);
