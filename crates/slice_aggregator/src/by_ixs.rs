//! Assign values to slices, read them back by index.
//!
//! A range increment of `v` over `[start, stop)` is stored on a point-indexed
//! dual as `-v` at `start - 1` and `+v` at `stop - 1`. The value at `ix` is
//! then the dual's suffix sum from `ix` plus `value_offset`, which collects
//! increments whose range has no start.

use std::ops::RangeBounds;

use log::debug;

use crate::by_slices::{self, DenseTable, SliceAggregator, UnboundedAggregator};
use crate::error::{AggregatorError, Result};
use crate::group::{Value, Zero};
use crate::util::half_open_bounds;

#[derive(Clone, Debug)]
pub struct Aggregator<D: SliceAggregator> {
    dual: D,
    value_offset: D::Value,
}

pub type FixedSizeAggregator<V> = Aggregator<UnboundedAggregator<V, DenseTable<V>>>;
pub type FlexibleAggregator<V> = Aggregator<by_slices::FlexibleAggregator<V>>;

impl<D: SliceAggregator> Aggregator<D> {
    pub fn new(dual: D) -> Self {
        let value_offset = dual.zero();
        Self { dual, value_offset }
    }

    pub fn dual(&self) -> &D {
        &self.dual
    }

    pub fn value_offset(&self) -> &D::Value {
        &self.value_offset
    }

    /// Sum of every increment whose range contains `ix`.
    pub fn get(&self, ix: i64) -> Result<D::Value> {
        Ok(self.dual.get(Some(ix), None)? + self.value_offset.clone())
    }

    /// Adds `value` to every index in `[start, stop)`.
    ///
    /// `start > stop` is rejected; `start == stop` is a no-op.
    pub fn inc(&mut self, start: Option<i64>, stop: Option<i64>, value: D::Value) -> Result<()> {
        // Nothing lies below i64::MIN.
        let start = start.filter(|&start| start != i64::MIN);
        match (start, stop) {
            (None, None) => self.shift_offset(value),
            (None, Some(stop)) => {
                if let Some(last) = stop.checked_sub(1) {
                    self.dual.inc(last, value)?;
                }
            }
            (Some(start), None) => {
                self.dual.dec(start - 1, value.clone())?;
                self.shift_offset(value);
            }
            (Some(start), Some(stop)) if start < stop => {
                self.dual.check_ix(start - 1)?;
                self.dual.check_ix(stop - 1)?;
                self.dual.dec(start - 1, value.clone())?;
                self.dual.inc(stop - 1, value)?;
            }
            (Some(start), Some(stop)) if start == stop => {}
            (Some(start), Some(stop)) => {
                debug!("rejected range increment with start={start} > stop={stop}");
                return Err(AggregatorError::ReversedRange { start, stop });
            }
        }
        Ok(())
    }

    pub fn dec(&mut self, start: Option<i64>, stop: Option<i64>, value: D::Value) -> Result<()> {
        self.inc(start, stop, -value)
    }

    pub fn add<R: RangeBounds<i64>>(&mut self, range: R, value: D::Value) -> Result<()> {
        match half_open_bounds(&range) {
            Some((start, stop)) => self.inc(start, stop, value),
            None => Ok(()),
        }
    }

    pub fn sub<R: RangeBounds<i64>>(&mut self, range: R, value: D::Value) -> Result<()> {
        match half_open_bounds(&range) {
            Some((start, stop)) => self.dec(start, stop, value),
            None => Ok(()),
        }
    }

    fn shift_offset(&mut self, value: D::Value) {
        self.value_offset = self.value_offset.clone() + value;
    }
}

/// Range-indexed aggregator over `[0, size)`.
///
/// Ranges must lie within `[0, size]`; the dual keeps one extra slot for
/// index `-1`, where increments starting at `0` put their lower edge.
pub fn fixed_size<V: Value>(size: usize, zero: Zero<V>) -> FixedSizeAggregator<V> {
    Aggregator::new(UnboundedAggregator::new(
        by_slices::fixed_size(1, zero.clone()),
        by_slices::fixed_size(size, zero),
    ))
}

/// Range-indexed aggregator over every `i64`.
pub fn flexible<V: Value>(zero: Zero<V>) -> FlexibleAggregator<V> {
    Aggregator::new(by_slices::flexible(zero))
}
