//! Fixed-capacity list whose appends evict the oldest element once full.
//!
//! # Design
//! - **Storage**: one boxed slice of `capacity` slots, allocated at
//!   construction and never resized.
//! - **Indexing**: every logical index is translated by the
//!   pivot controller, which owns the pivot/count/version triple.
//! - **Eviction**: appending to a full buffer moves the pivot one slot forward
//!   and overwrites the slot that held the oldest element.
//!
//! Cleared or removed slots keep their stale values until overwritten; they
//! are unreachable through the public API.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::capacity::RingConfig;
use crate::error::RingError;
use crate::iter::{Cursor, Iter};
use crate::pivot::PivotController;

/// A list-like ring buffer with a fixed, power-of-two capacity.
///
/// # Example
/// ```
/// use circulus_ring::RingBuffer;
///
/// let mut ring = RingBuffer::<u32>::new(3).unwrap();
/// assert_eq!(ring.capacity(), 4);
///
/// for i in 0..6 {
///     ring.push(i);
/// }
/// assert_eq!(ring.to_vec(), vec![2, 3, 4, 5]);
/// ```
#[derive(Clone)]
pub struct RingBuffer<T> {
    storage: Box<[T]>,
    pivot: PivotController,
}

impl<T: Default> RingBuffer<T> {
    /// Creates an empty buffer holding at least `requested` elements.
    ///
    /// The capacity is rounded up to the next power of two.
    ///
    /// # Errors
    /// - [`RingError::InvalidCapacity`] if `requested` is 0
    /// - [`RingError::CapacityOutOfRange`] if `requested` exceeds
    ///   [`MAX_CAPACITY`](crate::MAX_CAPACITY)
    pub fn new(requested: usize) -> Result<Self, RingError> {
        let config = RingConfig::new(requested)?;
        tracing::debug!(
            requested,
            capacity = config.capacity(),
            "allocating ring buffer"
        );
        Ok(Self::with_config(config))
    }

    /// Creates an empty buffer from an already validated configuration.
    pub fn with_config(config: RingConfig) -> Self {
        let storage = std::iter::repeat_with(T::default)
            .take(config.capacity())
            .collect();
        Self {
            storage,
            pivot: PivotController::from_config(config),
        }
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// one position toward the front.
    ///
    /// # Errors
    /// [`RingError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, RingError> {
        let len = self.len();
        if index >= len {
            return Err(RingError::IndexOutOfRange { index, len });
        }

        for i in index..len - 1 {
            self.swap_logical(i, i + 1)?;
        }

        let tail = self.pivot.convert(len - 1)?;
        let removed = mem::take(&mut self.storage[tail]);
        self.pivot.retreat();
        Ok(removed)
    }

    /// Removes the first element equal to `item`.
    ///
    /// Returns `false` without touching the buffer if no element matches.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(item) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }
}

impl<T> RingBuffer<T> {
    /// Number of slots. Always a power of two.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.pivot.capacity()
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.pivot.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` once the next append would evict.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.pivot.is_full()
    }

    /// Always `false`; the buffer supports every mutating operation.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        false
    }

    #[inline]
    pub(crate) fn version(&self) -> u64 {
        self.pivot.version()
    }

    /// Appends `item` at the logical tail, evicting the oldest element when full.
    pub fn push(&mut self, item: T) {
        if self.pivot.is_full() {
            self.evict_into(item);
        } else {
            self.grow_into(item);
        }
    }

    /// Appends `item` and returns the element it evicted, if any.
    pub fn push_evict(&mut self, item: T) -> Option<T> {
        if self.pivot.is_full() {
            Some(self.evict_into(item))
        } else {
            self.grow_into(item);
            None
        }
    }

    /// Appends `item` and reports whether an element was overwritten.
    ///
    /// Returns `(true, evicted)` when the buffer was full. Otherwise there was
    /// no previous occupant and the result is `(false, item)`.
    pub fn push_exchange(&mut self, item: T) -> (bool, T)
    where
        T: Clone,
    {
        if self.pivot.is_full() {
            (true, self.evict_into(item))
        } else {
            let echo = item.clone();
            self.grow_into(item);
            (false, echo)
        }
    }

    /// Full buffer: move the pivot and overwrite the evicted slot.
    fn evict_into(&mut self, item: T) -> T {
        let (_, evicted_slot) = self.pivot.advance();
        mem::replace(&mut self.storage[evicted_slot], item)
    }

    /// Partially filled buffer: register growth, then write the new tail
    /// through the translated slot so a wrapped pivot is honoured.
    fn grow_into(&mut self, item: T) {
        self.pivot.advance();
        let tail = self.pivot.tail_slot();
        self.storage[tail] = item;
    }

    /// # Errors
    /// [`RingError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, RingError> {
        let slot = self.pivot.convert(index)?;
        Ok(&self.storage[slot])
    }

    /// # Errors
    /// [`RingError::IndexOutOfRange`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, RingError> {
        let slot = self.pivot.convert(index)?;
        Ok(&mut self.storage[slot])
    }

    /// Replaces the element at `index`, returning the previous value.
    ///
    /// # Errors
    /// [`RingError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, RingError> {
        let slot = self.pivot.convert(index)?;
        Ok(mem::replace(&mut self.storage[slot], value))
    }

    /// Oldest element.
    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Newest element.
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.get(last).ok())
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|candidate| candidate == item)
    }

    /// Logical index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|candidate| candidate == item)
    }

    /// Inserts `item` at logical `index`.
    ///
    /// While the buffer has room, `index` may be anywhere in `0..len()` and
    /// the elements from `index` onward shift one position toward the tail.
    /// `index == 0` is also accepted on an empty buffer. Appending belongs to
    /// [`push`](Self::push), so `index == len()` is rejected.
    ///
    /// A full buffer accepts `0..len()`:
    /// - `index == 0` overwrites the oldest element in place.
    /// - `index > 0` evicts the oldest element first, then inserts into the
    ///   resulting window.
    ///
    /// ```text
    /// capacity 4, [0, 1, 2, 3]
    /// insert(1, 42) → [1, 42, 2, 3]
    /// insert(0, 43) → [43, 42, 2, 3]
    /// insert(2, 44) → [42, 2, 44, 3]
    /// ```
    ///
    /// # Errors
    /// [`RingError::IndexOutOfRange`] if `index` is outside the accepted range.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), RingError> {
        let len = self.len();

        if self.pivot.is_full() {
            if index >= len {
                return Err(RingError::IndexOutOfRange { index, len });
            }
            if index == 0 {
                let front = self.pivot.convert(0)?;
                self.storage[front] = item;
                self.pivot.increment_version();
                return Ok(());
            }
            self.pivot.advance();
        } else {
            if index == 0 {
                self.pivot.advance();
            } else if index >= len {
                return Err(RingError::IndexOutOfRange { index, len });
            } else {
                self.pivot.increment_count();
                self.pivot.increment_version();
            }
        }

        for i in (index + 1..self.len()).rev() {
            self.swap_logical(i, i - 1)?;
        }

        let slot = self.pivot.convert(index)?;
        self.storage[slot] = item;
        Ok(())
    }

    /// Forgets every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        tracing::trace!(dropped = self.len(), "clearing ring buffer");
        self.pivot.clear();
    }

    /// Clones the elements, oldest first, into `dest[offset..]`.
    ///
    /// # Errors
    /// [`RingError::DestinationTooSmall`] if `dest[offset..]` cannot hold
    /// `len()` elements, including when `offset > dest.len()`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), RingError>
    where
        T: Clone,
    {
        let needed = self.len();
        let available = dest.len().saturating_sub(offset);
        if offset > dest.len() || needed > available {
            return Err(RingError::DestinationTooSmall { needed, available });
        }

        for (slot, item) in dest[offset..].iter_mut().zip(self.iter()) {
            slot.clone_from(item);
        }
        Ok(())
    }

    /// Elements in logical order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Borrowing iterator, oldest first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Detached enumeration handle that fails once the buffer is modified.
    ///
    /// See [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.version())
    }

    /// Element at an index the caller already checked against `len()`.
    #[inline]
    pub(crate) fn slot_at(&self, index: usize) -> &T {
        &self.storage[self.pivot.slot_unchecked(index)]
    }

    fn swap_logical(&mut self, a: usize, b: usize) -> Result<(), RingError> {
        let a = self.pivot.convert(a)?;
        let b = self.pivot.convert(b)?;
        self.storage.swap(a, b);
        Ok(())
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    /// # Panics
    /// Panics if `index >= len()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for RingBuffer<T> {
    /// # Panics
    /// Panics if `index >= len()`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    /// Compares logical contents. Capacity and pivot position are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
