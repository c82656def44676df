use std::ops::{Bound, RangeBounds};

/// Converts a range into optional half-open `[start, stop)` bounds.
///
/// Returns `None` for a range that starts past `i64::MAX`, which holds no index.
#[inline]
pub(crate) fn half_open_bounds<R: RangeBounds<i64>>(
    range: &R,
) -> Option<(Option<i64>, Option<i64>)> {
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => Some(start.checked_add(1)?),
        Bound::Unbounded => None,
    };
    let stop = match range.end_bound() {
        // `..=i64::MAX` reaches the end of the domain.
        Bound::Included(&stop) => stop.checked_add(1),
        Bound::Excluded(&stop) => Some(stop),
        Bound::Unbounded => None,
    };
    Some((start, stop))
}

/// Position of a negative index inside the mirrored `[0, inf)` domain.
#[inline(always)]
pub(crate) fn reflect(ix: i64) -> u64 {
    debug_assert!(ix < 0);
    !ix as u64
}
