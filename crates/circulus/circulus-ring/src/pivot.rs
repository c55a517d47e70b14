//! Pivot bookkeeping: the mapping between logical indices and physical slots.
//!
//! The controller never touches element storage. It tracks where logical
//! index 0 lives (the pivot), how many elements are live, and a version
//! counter that moves on every structural mutation. The owning
//! [`RingBuffer`](crate::RingBuffer) asks it to translate indices or to run a
//! transition, then reads or writes the slot it gets back.
//!
//! # Eviction
//!
//! ```text
//! capacity = 4, full, pivot = 1
//!
//!   slot:    [ 0 ][ 1 ][ 2 ][ 3 ]
//!   value:     4    1    2    3        logical = [1, 2, 3, 4]
//!                   ^ pivot
//!
//! advance() → (current = 2, prior = 1)
//!
//!   slot:    [ 0 ][ 1 ][ 2 ][ 3 ]
//!   value:     4    x    2    3        logical = [2, 3, 4, x]
//!                        ^ pivot
//! ```
//!
//! The prior pivot is the slot that held the evicted element and is now the
//! logical tail, so the caller writes the incoming element there.

use crate::capacity::{RingConfig, slot_index};
use crate::error::RingError;

#[derive(Debug, Clone)]
pub(crate) struct PivotController {
    capacity: usize,
    mask: usize,
    pivot: usize,
    count: usize,
    version: u64,
}

impl PivotController {
    /// Rounds `requested` and starts with an empty window at slot 0.
    #[cfg(test)]
    pub(crate) fn new(requested: usize) -> Result<Self, RingError> {
        Ok(Self::from_config(RingConfig::new(requested)?))
    }

    pub(crate) fn from_config(config: RingConfig) -> Self {
        Self {
            capacity: config.capacity(),
            mask: config.mask(),
            pivot: 0,
            count: 0,
            version: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Registers one more element.
    ///
    /// Returns `(current_pivot, prior_pivot)`. When full, the pivot moves one
    /// slot forward and the prior pivot names the evicted slot. Otherwise the
    /// count grows and both values are the unchanged pivot.
    pub(crate) fn advance(&mut self) -> (usize, usize) {
        self.version += 1;
        let prior = self.pivot;

        if self.is_full() {
            self.pivot = (self.pivot + 1) & self.mask;
        } else {
            self.count += 1;
        }

        (self.pivot, prior)
    }

    /// Drops the logical tail. The caller has already closed the gap.
    pub(crate) fn retreat(&mut self) {
        debug_assert!(self.count > 0, "retreat on an empty window");
        self.version += 1;
        self.count -= 1;
    }

    pub(crate) fn increment_count(&mut self) {
        debug_assert!(self.count < self.capacity, "count would exceed capacity");
        self.count += 1;
    }

    pub(crate) fn increment_version(&mut self) {
        self.version += 1;
    }

    pub(crate) fn clear(&mut self) {
        self.version += 1;
        self.pivot = 0;
        self.count = 0;
    }

    /// Translates a logical index into its physical slot.
    ///
    /// # Errors
    /// [`RingError::IndexOutOfRange`] if `index >= len()`.
    #[inline]
    pub(crate) fn convert(&self, index: usize) -> Result<usize, RingError> {
        if index >= self.count {
            return Err(RingError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }
        Ok(slot_index(index, self.pivot, self.mask))
    }

    /// Slot of an index the caller has already bounds-checked.
    #[inline]
    pub(crate) fn slot_unchecked(&self, index: usize) -> usize {
        debug_assert!(index < self.count, "logical index {index} past count");
        slot_index(index, self.pivot, self.mask)
    }

    /// Slot of the newest element. The window must not be empty.
    #[inline]
    pub(crate) fn tail_slot(&self) -> usize {
        self.slot_unchecked(self.count - 1)
    }
}
