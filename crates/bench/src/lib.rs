use std::ops::RangeInclusive;
use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const LARGE_RUNTIME_THRESHOLD: usize = 16_384;
const RNG_SEED: u64 = 0x5EED_2026;

pub fn apply_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, ops: usize) {
    let (samples, warm_up, measure) = if ops <= LARGE_RUNTIME_THRESHOLD {
        (
            SMALL_RUNTIME_SAMPLE_SIZE,
            SMALL_RUNTIME_WARM_UP_MS,
            SMALL_RUNTIME_MEASURE_MS,
        )
    } else {
        (
            LARGE_RUNTIME_SAMPLE_SIZE,
            LARGE_RUNTIME_WARM_UP_MS,
            LARGE_RUNTIME_MEASURE_MS,
        )
    };
    group.sample_size(samples);
    group.warm_up_time(Duration::from_millis(warm_up));
    group.measurement_time(Duration::from_millis(measure));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// `(ix, value)` pairs with `ix` drawn from `span`.
pub fn point_updates<R: Rng + ?Sized>(
    rng: &mut R,
    span: RangeInclusive<i64>,
    count: usize,
) -> Vec<(i64, i64)> {
    (0..count)
        .map(|_| {
            (
                rng.random_range(span.clone()),
                rng.random_range(-1_000..=1_000),
            )
        })
        .collect()
}

/// Ordered half-open ranges `[start, stop)` inside `span`.
pub fn ranges<R: Rng + ?Sized>(
    rng: &mut R,
    span: RangeInclusive<i64>,
    count: usize,
) -> Vec<(i64, i64)> {
    (0..count)
        .map(|_| {
            let a = rng.random_range(span.clone());
            let b = rng.random_range(span.clone());
            (a.min(b), a.max(b))
        })
        .collect()
}
