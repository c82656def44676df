pub mod by_ixs;
pub mod by_slices;
mod error;
mod group;
mod heap;
mod util;

pub use by_slices::{
    DenseTable, FixedSizeAggregator, FlexibleAggregator, LeftBoundedAggregator, SliceAggregator,
    SparseTable, Table, UnboundedAggregator, VariableSizeLeftBoundedAggregator, binary_tail,
};
pub use error::{AggregatorError, Result};
pub use group::{Value, Zero};
pub use heap::IndexedUniqueMaxHeap;

/// Assign values to indices and aggregate them by slices.
///
/// - Indices cover every `i64`; storage is sparse.
/// - `get(start, stop)` sums the half-open range `[start, stop)`.
pub fn ixs_by_slices<V: Value>(zero: Zero<V>) -> by_slices::FlexibleAggregator<V> {
    by_slices::flexible(zero)
}

/// Assign values to slices and aggregate them by indices.
///
/// - `inc(start, stop, v)` adds `v` to every index of `[start, stop)`.
/// - `get(ix)` sums every increment whose range contains `ix`.
pub fn slices_by_ixs<V: Value>(zero: Zero<V>) -> by_ixs::FlexibleAggregator<V> {
    by_ixs::Aggregator::new(ixs_by_slices(zero))
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{SliceAggregator, Zero, by_ixs, ixs_by_slices, slices_by_ixs};

    #[derive(Clone, Copy, Debug)]
    struct Increment {
        start: Option<i64>,
        stop: Option<i64>,
        value: i64,
    }

    fn covers(inc: &Increment, ix: i64) -> bool {
        inc.start.is_none_or(|s| s <= ix) && inc.stop.is_none_or(|e| ix < e)
    }

    fn random_increment(rng: &mut StdRng, lo: i64, hi: i64) -> Increment {
        let start = rng.random_bool(0.85).then(|| rng.random_range(lo..hi));
        let stop = rng.random_bool(0.85).then(|| rng.random_range(lo..hi));
        let (start, stop) = match (start, stop) {
            (Some(s), Some(e)) if s > e => (Some(e), Some(s)),
            bounds => bounds,
        };
        Increment {
            start,
            stop,
            value: rng.random_range(-20..=20),
        }
    }

    #[test]
    fn convenience_constructors_are_duals() {
        let mut by_index = ixs_by_slices(Zero::of(0_i64));
        by_index.set(3, 5).unwrap();
        by_index.inc(-2, 4).unwrap();
        assert_eq!(by_index.get(Some(-2), Some(4)), Ok(9));
        assert_eq!(by_index.sum(..), Ok(9));

        let mut by_slice = slices_by_ixs(Zero::of(0_i64));
        by_slice.inc(Some(-2), Some(4), 5).unwrap();
        assert_eq!(by_slice.get(-2), Ok(5));
        assert_eq!(by_slice.get(4), Ok(0));
    }

    #[test]
    fn range_increments_sum_at_every_covered_index() {
        const LO: i64 = -1_000;
        const HI: i64 = 1_000;

        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut flexible = slices_by_ixs(Zero::of(0_i64));
        let mut fixed = by_ixs::fixed_size(HI as usize, Zero::of(0_i64));
        let mut history = Vec::new();

        for round in 0..400 {
            let inc = random_increment(&mut rng, LO, HI);
            flexible.inc(inc.start, inc.stop, inc.value).unwrap();

            let clipped = Increment {
                start: inc.start.map(|s| s.max(0)),
                stop: inc.stop.map(|e| e.max(0)),
                value: inc.value,
            };
            fixed
                .inc(clipped.start, clipped.stop, clipped.value)
                .unwrap();
            history.push((inc, clipped));

            if round % 20 != 19 {
                continue;
            }
            for _ in 0..50 {
                let ix = rng.random_range(LO..HI);
                let expected: i64 = history
                    .iter()
                    .filter(|(inc, _)| covers(inc, ix))
                    .map(|(inc, _)| inc.value)
                    .sum();
                assert_eq!(flexible.get(ix), Ok(expected), "round={round} ix={ix}");

                if ix >= 0 {
                    let expected: i64 = history
                        .iter()
                        .filter(|(_, clipped)| covers(clipped, ix))
                        .map(|(_, clipped)| clipped.value)
                        .sum();
                    assert_eq!(fixed.get(ix), Ok(expected), "round={round} ix={ix}");
                }
            }
        }
    }
}
