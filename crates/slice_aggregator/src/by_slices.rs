//! Assign values to indices, aggregate them over slices.
//!
//! The core is a Fenwick tree that walks *down* on update and *up* on query,
//! so a query needs to know how far up a non-zero slot can sit. Dense tables
//! know this from their length; sparse tables track it with an
//! [`IndexedUniqueMaxHeap`] of populated indices.

use std::collections::HashMap;
use std::ops::RangeBounds;

use log::trace;

use crate::error::{AggregatorError, Result};
use crate::group::{Value, Zero};
use crate::heap::IndexedUniqueMaxHeap;
use crate::util::{half_open_bounds, reflect};

/// The lowest set bit of `n` and the zeros after it, as a number.
///
/// `binary_tail(0) == 0`.
#[inline(always)]
pub fn binary_tail(n: u64) -> u64 {
    n & n.wrapping_neg()
}

/// Point-update / range-query interface.
///
/// - Ranges are half-open: `[start, stop)`; `None` leaves that side unbounded.
/// - A query with `start >= stop` is the zero value.
pub trait SliceAggregator {
    type Value: Value;

    /// A fresh additive identity.
    fn zero(&self) -> Self::Value;

    /// Fails if `ix` is outside the updatable domain.
    fn check_ix(&self, ix: i64) -> Result<()>;

    fn get(&self, start: Option<i64>, stop: Option<i64>) -> Result<Self::Value>;

    fn inc(&mut self, ix: i64, value: Self::Value) -> Result<()>;

    fn dec(&mut self, ix: i64, value: Self::Value) -> Result<()> {
        self.inc(ix, -value)
    }

    /// Value assigned to the single index `ix`.
    fn at(&self, ix: i64) -> Result<Self::Value> {
        self.get(Some(ix), ix.checked_add(1))
    }

    fn set(&mut self, ix: i64, value: Self::Value) -> Result<()> {
        self.check_ix(ix)?;
        let current = self.at(ix)?;
        self.inc(ix, value + -current)
    }

    fn sum<R: RangeBounds<i64>>(&self, range: R) -> Result<Self::Value> {
        match half_open_bounds(&range) {
            Some((start, stop)) => self.get(start, stop),
            None => Ok(self.zero()),
        }
    }
}

/// Backing storage of a [`LeftBoundedAggregator`].
pub trait Table<V> {
    /// Whether [`point_changed`](Self::point_changed) needs to be called.
    const TRACKS_POINTS: bool = false;

    /// Greatest index that can hold a non-zero slot, `None` if there is none.
    fn nonzero_ix_upper_bound(&self) -> Option<u64>;

    /// Slot at `ix`; `None` reads as zero.
    fn slot(&self, ix: u64) -> Option<&V>;

    fn accepts(&self, ix: u64) -> bool;

    fn add_to_slot(&mut self, ix: u64, delta: &V);

    /// The point value at `ix` is now `value`.
    fn point_changed(&mut self, _ix: u64, _value: &V) {}
}

/// Dense table over `[0, len)`.
#[derive(Clone, Debug)]
pub struct DenseTable<V> {
    slots: Vec<V>,
}

impl<V> DenseTable<V> {
    pub fn new(len: usize, zero: &Zero<V>) -> Self {
        Self {
            slots: (0..len).map(|_| zero.make()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<V: Value> Table<V> for DenseTable<V> {
    fn nonzero_ix_upper_bound(&self) -> Option<u64> {
        (self.slots.len() as u64).checked_sub(1)
    }

    fn slot(&self, ix: u64) -> Option<&V> {
        usize::try_from(ix).ok().and_then(|ix| self.slots.get(ix))
    }

    fn accepts(&self, ix: u64) -> bool {
        ix < self.slots.len() as u64
    }

    fn add_to_slot(&mut self, ix: u64, delta: &V) {
        let slot = &mut self.slots[ix as usize];
        *slot = slot.clone() + delta.clone();
    }
}

/// Sparse table over `[0, inf)`.
///
/// Slots equal to zero are never stored, and `heap` holds exactly the
/// indices whose point value is non-zero.
#[derive(Clone, Debug)]
pub struct SparseTable<V> {
    slots: HashMap<u64, V>,
    heap: IndexedUniqueMaxHeap,
    zero: Zero<V>,
}

impl<V> SparseTable<V> {
    pub fn new(zero: Zero<V>) -> Self {
        Self {
            slots: HashMap::new(),
            heap: IndexedUniqueMaxHeap::new(),
            zero,
        }
    }

    /// Number of stored (non-zero) slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_key(&self, ix: u64) -> bool {
        self.slots.contains_key(&ix)
    }

    pub fn heap(&self) -> &IndexedUniqueMaxHeap {
        &self.heap
    }
}

impl<V: Value> Table<V> for SparseTable<V> {
    const TRACKS_POINTS: bool = true;

    fn nonzero_ix_upper_bound(&self) -> Option<u64> {
        self.heap.max()
    }

    fn slot(&self, ix: u64) -> Option<&V> {
        self.slots.get(&ix)
    }

    fn accepts(&self, _ix: u64) -> bool {
        true
    }

    fn add_to_slot(&mut self, ix: u64, delta: &V) {
        let updated = match self.slots.remove(&ix) {
            Some(current) => current + delta.clone(),
            None => delta.clone(),
        };
        if !self.zero.is_zero(&updated) {
            self.slots.insert(ix, updated);
        }
    }

    fn point_changed(&mut self, ix: u64, value: &V) {
        let before = self.heap.max();
        if self.zero.is_zero(value) {
            self.heap.remove(ix);
        } else {
            self.heap.add(ix);
        }
        let after = self.heap.max();
        if before != after {
            trace!("nonzero upper bound moved from {before:?} to {after:?}");
        }
    }
}

/// Fenwick tree over indices `[0, inf)`.
///
/// `table[i]` holds the sum of the point values in
/// `[i, i + binary_tail(i + 1))`, so a suffix sum from `i` is collected by
/// repeatedly stepping `i += binary_tail(i + 1)`.
#[derive(Clone, Debug)]
pub struct LeftBoundedAggregator<V, T> {
    table: T,
    zero: Zero<V>,
}

pub type FixedSizeAggregator<V> = LeftBoundedAggregator<V, DenseTable<V>>;
pub type VariableSizeLeftBoundedAggregator<V> = LeftBoundedAggregator<V, SparseTable<V>>;

impl<V: Value> FixedSizeAggregator<V> {
    pub fn new(size: usize, zero: Zero<V>) -> Self {
        Self {
            table: DenseTable::new(size, &zero),
            zero,
        }
    }
}

impl<V: Value> VariableSizeLeftBoundedAggregator<V> {
    pub fn new(zero: Zero<V>) -> Self {
        Self {
            table: SparseTable::new(zero.clone()),
            zero,
        }
    }
}

impl<V: Value, T: Table<V>> LeftBoundedAggregator<V, T> {
    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn nonzero_ix_upper_bound(&self) -> Option<u64> {
        self.table.nonzero_ix_upper_bound()
    }

    pub(crate) fn accepts(&self, ix: u64) -> bool {
        self.table.accepts(ix)
    }

    pub(crate) fn fold(&self, start: Option<u64>, stop: Option<u64>) -> V {
        let mut result = self.zero.make();
        if matches!((start, stop), (Some(start), Some(stop)) if start >= stop) {
            return result;
        }
        let Some(bound) = self.nonzero_ix_upper_bound() else {
            return result;
        };

        let mut start = start.unwrap_or(0);
        let mut stop = stop.unwrap_or(bound.saturating_add(1));
        while start != stop && (start <= bound || stop <= bound) {
            if start < stop {
                if let Some(value) = self.table.slot(start) {
                    result = result + value.clone();
                }
                start += binary_tail(start + 1);
            } else {
                if let Some(value) = self.table.slot(stop) {
                    result = result + -value.clone();
                }
                stop += binary_tail(stop + 1);
            }
        }
        result
    }

    /// Caller has checked `accepts(ix)`.
    pub(crate) fn inc_unchecked(&mut self, ix: u64, value: V) {
        debug_assert!(self.table.accepts(ix));
        let point = if T::TRACKS_POINTS {
            Some(self.fold(Some(ix), Some(ix + 1)) + value.clone())
        } else {
            None
        };

        let mut slot = ix;
        loop {
            self.table.add_to_slot(slot, &value);
            let step = binary_tail(slot + 1);
            if step > slot {
                break;
            }
            slot -= step;
        }

        if let Some(point) = point {
            self.table.point_changed(ix, &point);
        }
    }
}

impl<V: Value, T: Table<V>> SliceAggregator for LeftBoundedAggregator<V, T> {
    type Value = V;

    fn zero(&self) -> V {
        self.zero.make()
    }

    fn check_ix(&self, ix: i64) -> Result<()> {
        match u64::try_from(ix) {
            Ok(unsigned) if self.accepts(unsigned) => Ok(()),
            _ => Err(AggregatorError::IndexOutOfRange { ix }),
        }
    }

    fn get(&self, start: Option<i64>, stop: Option<i64>) -> Result<V> {
        let start = start
            .map(|start| {
                u64::try_from(start).map_err(|_| AggregatorError::StartOutOfRange { start })
            })
            .transpose()?;
        let stop = stop
            .map(|stop| u64::try_from(stop).map_err(|_| AggregatorError::StopOutOfRange { stop }))
            .transpose()?;
        Ok(self.fold(start, stop))
    }

    fn inc(&mut self, ix: i64, value: V) -> Result<()> {
        self.check_ix(ix)?;
        self.inc_unchecked(ix as u64, value);
        Ok(())
    }
}

/// Two left-bounded aggregators covering every `i64`.
///
/// Non-negative indices go to `nonnegative` as they are; a negative index
/// `i` goes to `negative` at `-1 - i`.
#[derive(Clone, Debug)]
pub struct UnboundedAggregator<V, T> {
    negative: LeftBoundedAggregator<V, T>,
    nonnegative: LeftBoundedAggregator<V, T>,
}

pub type FlexibleAggregator<V> = UnboundedAggregator<V, SparseTable<V>>;

impl<V: Value, T: Table<V>> UnboundedAggregator<V, T> {
    pub fn new(
        negative: LeftBoundedAggregator<V, T>,
        nonnegative: LeftBoundedAggregator<V, T>,
    ) -> Self {
        Self {
            negative,
            nonnegative,
        }
    }

    pub fn negative(&self) -> &LeftBoundedAggregator<V, T> {
        &self.negative
    }

    pub fn nonnegative(&self) -> &LeftBoundedAggregator<V, T> {
        &self.nonnegative
    }
}

impl<V: Value, T: Table<V>> SliceAggregator for UnboundedAggregator<V, T> {
    type Value = V;

    fn zero(&self) -> V {
        self.nonnegative.zero()
    }

    fn check_ix(&self, ix: i64) -> Result<()> {
        let accepted = if ix < 0 {
            self.negative.accepts(reflect(ix))
        } else {
            self.nonnegative.accepts(ix as u64)
        };
        if accepted {
            Ok(())
        } else {
            Err(AggregatorError::IndexOutOfRange { ix })
        }
    }

    fn get(&self, start: Option<i64>, stop: Option<i64>) -> Result<V> {
        let negative = &self.negative;
        let nonnegative = &self.nonnegative;
        let result = match (start, stop) {
            (None, None) => negative.fold(None, None) + nonnegative.fold(None, None),
            (None, Some(stop)) if stop > 0 => {
                negative.fold(None, None) + nonnegative.fold(None, Some(stop as u64))
            }
            (None, Some(stop)) => negative.fold(Some(stop.unsigned_abs()), None),
            (Some(start), None) if start >= 0 => nonnegative.fold(Some(start as u64), None),
            (Some(start), None) => {
                negative.fold(None, Some(start.unsigned_abs())) + nonnegative.fold(None, None)
            }
            (Some(start), Some(stop)) if start >= stop => self.zero(),
            (Some(start), Some(stop)) if start >= 0 => {
                nonnegative.fold(Some(start as u64), Some(stop as u64))
            }
            (Some(start), Some(stop)) if stop <= 0 => {
                negative.fold(Some(stop.unsigned_abs()), Some(start.unsigned_abs()))
            }
            (Some(start), Some(stop)) => {
                negative.fold(None, Some(start.unsigned_abs()))
                    + nonnegative.fold(None, Some(stop as u64))
            }
        };
        Ok(result)
    }

    fn inc(&mut self, ix: i64, value: V) -> Result<()> {
        self.check_ix(ix)?;
        if ix < 0 {
            self.negative.inc_unchecked(reflect(ix), value);
        } else {
            self.nonnegative.inc_unchecked(ix as u64, value);
        }
        Ok(())
    }
}

/// Dense aggregator over `[0, size)`.
pub fn fixed_size<V: Value>(size: usize, zero: Zero<V>) -> FixedSizeAggregator<V> {
    FixedSizeAggregator::new(size, zero)
}

/// Sparse aggregator over every `i64`.
pub fn flexible<V: Value>(zero: Zero<V>) -> FlexibleAggregator<V> {
    UnboundedAggregator::new(
        VariableSizeLeftBoundedAggregator::new(zero.clone()),
        VariableSizeLeftBoundedAggregator::new(zero),
    )
}
