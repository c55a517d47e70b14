//! Capacity rounding and index arithmetic for power-of-two ring storage.
//!
//! This module provides the foundational primitives the ring buffer is built on:
//! - Capacity validation and rounding up to the next power of two
//! - Logical-to-physical slot mapping using bitmasks

use crate::error::RingError;

/// Largest capacity a ring buffer can be created with (2^30 slots).
pub const MAX_CAPACITY: usize = 1 << 30;

const TABLE_LEN: usize = 31;

/// Ascending powers of two, 2^0 through 2^30.
const CAPACITY_TABLE: [usize; TABLE_LEN] = build_capacity_table();

const fn build_capacity_table() -> [usize; TABLE_LEN] {
    let mut table = [0usize; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = 1 << i;
        i += 1;
    }
    table
}

/// Rounds a requested capacity up to the smallest power of two that holds it.
///
/// # Errors
/// - [`RingError::InvalidCapacity`] if `requested` is 0
/// - [`RingError::CapacityOutOfRange`] if `requested` exceeds [`MAX_CAPACITY`]
///
/// # Example
/// ```
/// use circulus_ring::round_capacity;
/// assert_eq!(round_capacity(100), Ok(128));
/// assert_eq!(round_capacity(64), Ok(64));
/// assert!(round_capacity(0).is_err());
/// ```
pub fn round_capacity(requested: usize) -> Result<usize, RingError> {
    if requested == 0 {
        return Err(RingError::InvalidCapacity { requested });
    }
    if requested > MAX_CAPACITY {
        return Err(RingError::CapacityOutOfRange { requested });
    }

    CAPACITY_TABLE
        .iter()
        .copied()
        .find(|&candidate| candidate >= requested)
        .ok_or(RingError::CapacityOutOfRange { requested })
}

/// Configuration for a ring buffer.
///
/// The capacity is always a power of 2, enabling index calculations via
/// bitmasking instead of modulo division.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RingConfig {
    capacity: usize,
}

impl RingConfig {
    /// Creates a configuration holding at least `requested` slots.
    ///
    /// # Errors
    /// Propagates the failures of [`round_capacity`].
    ///
    /// # Example
    /// ```
    /// use circulus_ring::RingConfig;
    /// let cfg = RingConfig::new(1000).unwrap();
    /// assert_eq!(cfg.capacity(), 1024);
    /// ```
    pub fn new(requested: usize) -> Result<Self, RingError> {
        Ok(Self {
            capacity: round_capacity(requested)?,
        })
    }

    /// Number of slots in the ring. Always a power of 2.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the bitmask for index calculation.
    ///
    /// The mask is `capacity - 1`, which has all lower bits set to 1.
    /// Using `i & mask` is equivalent to `i % capacity`.
    ///
    /// # Example
    /// ```
    /// use circulus_ring::RingConfig;
    /// let cfg = RingConfig::new(8).unwrap();
    /// assert_eq!(cfg.mask(), 7);  // 0b111 in binary
    /// ```
    #[inline(always)]
    pub fn mask(&self) -> usize {
        self.capacity - 1
    }
}

/// Maps a logical index to its physical slot.
///
/// With `capacity = 4` (mask = `0b11`) and the pivot at slot 2:
/// ```text
/// logical 0 → (0 + 2) & 3 = 2
/// logical 1 → (1 + 2) & 3 = 3
/// logical 2 → (2 + 2) & 3 = 0  (wraps around)
/// logical 3 → (3 + 2) & 3 = 1
/// ```
///
/// Both operands are below `MAX_CAPACITY`, so the sum cannot overflow.
#[inline(always)]
pub fn slot_index(logical: usize, pivot: usize, mask: usize) -> usize {
    (logical + pivot) & mask
}
