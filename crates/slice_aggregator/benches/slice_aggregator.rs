use bench::apply_runtime_config;
use bench::default_rng;
use bench::point_updates;
use bench::ranges;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use slice_aggregator::SliceAggregator;
use slice_aggregator::Zero;
use slice_aggregator::by_ixs;
use slice_aggregator::by_slices;
use std::hint::black_box;

const SIZES: [usize; 3] = [1_024, 16_384, 65_536];
const SPARSE_SPAN: i64 = 1_000_000_000_000;

fn bench_by_slices(c: &mut Criterion) {
    let mut rng = default_rng();
    let mut group = c.benchmark_group("by_slices/update_then_query");

    for &size in &SIZES {
        apply_runtime_config(&mut group, size);
        let dense_updates = point_updates(&mut rng, 0..=(size as i64 - 1), size);
        let dense_queries = ranges(&mut rng, 0..=(size as i64), size);
        let sparse_updates = point_updates(&mut rng, -SPARSE_SPAN..=SPARSE_SPAN, size);
        let sparse_queries = ranges(&mut rng, -SPARSE_SPAN..=SPARSE_SPAN, size);

        group.bench_function(BenchmarkId::new("fixed_size", size), |bencher| {
            bencher.iter(|| {
                let mut a = by_slices::fixed_size(size, Zero::of(0_i64));
                for &(ix, value) in &dense_updates {
                    a.inc(black_box(ix), value).unwrap();
                }
                let mut acc = 0_i64;
                for &(start, stop) in &dense_queries {
                    acc ^= a.get(Some(black_box(start)), Some(black_box(stop))).unwrap();
                }
                black_box(acc);
            })
        });

        group.bench_function(BenchmarkId::new("flexible", size), |bencher| {
            bencher.iter(|| {
                let mut a = by_slices::flexible(Zero::of(0_i64));
                for &(ix, value) in &sparse_updates {
                    a.inc(black_box(ix), value).unwrap();
                }
                let mut acc = 0_i64;
                for &(start, stop) in &sparse_queries {
                    acc ^= a.get(Some(black_box(start)), Some(black_box(stop))).unwrap();
                }
                black_box(acc);
            })
        });
    }

    group.finish();
}

fn bench_by_ixs(c: &mut Criterion) {
    let mut rng = default_rng();
    let mut group = c.benchmark_group("by_ixs/update_then_query");

    for &size in &SIZES {
        apply_runtime_config(&mut group, size);
        let increments = ranges(&mut rng, -SPARSE_SPAN..=SPARSE_SPAN, size);
        let points = point_updates(&mut rng, -SPARSE_SPAN..=SPARSE_SPAN, size);

        group.bench_function(BenchmarkId::new("flexible", size), |bencher| {
            bencher.iter(|| {
                let mut a = by_ixs::flexible(Zero::of(0_i64));
                for (i, &(start, stop)) in increments.iter().enumerate() {
                    a.inc(Some(black_box(start)), Some(black_box(stop)), i as i64)
                        .unwrap();
                }
                let mut acc = 0_i64;
                for &(ix, _) in &points {
                    acc ^= a.get(black_box(ix)).unwrap();
                }
                black_box(acc);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_by_slices, bench_by_ixs);
criterion_main!(benches);
