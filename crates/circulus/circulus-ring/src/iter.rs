//! Enumeration over a ring buffer in logical order.
//!
//! Two flavours are provided:
//! - [`Iter`]: a borrowing iterator. It holds a shared borrow for its whole
//!   life, so the buffer cannot change underneath it.
//! - [`Cursor`]: a detached read position that does not hold a borrow between
//!   steps. It snapshots the buffer's version when created and re-checks it
//!   before every step, much like a seqlock reader compares sequence numbers
//!   around a read. A structural mutation in between (append, insert, remove,
//!   clear) turns the next step into [`RingError::ConcurrentModification`].

use std::iter::FusedIterator;

use crate::error::RingError;
use crate::ring_buffer::RingBuffer;

/// Borrowing iterator over a [`RingBuffer`], oldest element first.
#[derive(Debug)]
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(ring: &'a RingBuffer<T>) -> Self {
        Self {
            ring,
            front: 0,
            back: ring.len(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.ring.slot_at(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.ring.slot_at(self.back))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Version-checked enumeration handle created by [`RingBuffer::cursor`].
///
/// The cursor is finite and cannot be rewound; call `cursor()` again for a
/// fresh pass. It must be stepped with the buffer that created it.
///
/// # Example
/// ```
/// use circulus_ring::{RingBuffer, RingError};
///
/// let mut ring = RingBuffer::<u8>::new(4).unwrap();
/// ring.extend([1, 2, 3]);
///
/// let mut cursor = ring.cursor();
/// assert_eq!(cursor.next(&ring), Some(Ok(&1)));
///
/// ring.push(4);
/// assert_eq!(cursor.next(&ring), Some(Err(RingError::ConcurrentModification)));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Version of the buffer when the cursor was created.
    version: u64,
    /// Logical index of the next element to yield.
    position: usize,
    /// Set once the end was reached; later calls keep returning `None`.
    finished: bool,
}

impl Cursor {
    pub(crate) fn new(version: u64) -> Self {
        Self {
            version,
            position: 0,
            finished: false,
        }
    }

    /// Yields the next element, or the modification error if the buffer was
    /// structurally mutated since this cursor was created.
    ///
    /// Returns `None` once every element has been yielded, and keeps
    /// returning `None` from then on.
    pub fn next<'a, T>(&mut self, ring: &'a RingBuffer<T>) -> Option<Result<&'a T, RingError>> {
        if self.finished {
            return None;
        }
        if ring.version() != self.version {
            return Some(Err(RingError::ConcurrentModification));
        }

        match ring.get(self.position) {
            Ok(item) => {
                self.position += 1;
                Some(Ok(item))
            }
            Err(_) => {
                self.finished = true;
                None
            }
        }
    }

    /// Number of elements already yielded.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_with(items: &[u32]) -> RingBuffer<u32> {
        let mut ring = RingBuffer::new(4).expect("valid capacity");
        ring.extend(items.iter().copied());
        ring
    }

    #[test]
    fn iter_walks_both_ends() {
        let mut ring = ring_with(&[0, 1, 2, 3]);
        ring.push(4);

        let mut iter = ring.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_on_empty_buffer_is_empty() {
        let ring = ring_with(&[]);
        assert_eq!(ring.iter().count(), 0);
    }

    #[test]
    fn cursor_yields_all_then_stops() {
        let ring = ring_with(&[7, 8, 9]);
        let mut cursor = ring.cursor();

        assert_eq!(cursor.next(&ring), Some(Ok(&7)));
        assert_eq!(cursor.next(&ring), Some(Ok(&8)));
        assert_eq!(cursor.next(&ring), Some(Ok(&9)));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.next(&ring), None);
        assert_eq!(cursor.next(&ring), None);
    }

    #[test]
    fn cursor_detects_every_structural_mutation() {
        let mutations: [fn(&mut RingBuffer<u32>); 5] = [
            |ring| ring.push(10),
            |ring| ring.insert(1, 10).expect("insert in range"),
            |ring| {
                ring.remove_at(0).expect("remove in range");
            },
            |ring| {
                ring.remove(&2);
            },
            |ring| ring.clear(),
        ];

        for mutate in mutations {
            let mut ring = ring_with(&[1, 2, 3]);
            let mut cursor = ring.cursor();
            assert_eq!(cursor.next(&ring), Some(Ok(&1)));

            mutate(&mut ring);
            assert_eq!(
                cursor.next(&ring),
                Some(Err(RingError::ConcurrentModification))
            );
        }
    }

    #[test]
    fn cursor_tolerates_element_replacement() {
        let mut ring = ring_with(&[1, 2, 3]);
        let mut cursor = ring.cursor();
        assert_eq!(cursor.next(&ring), Some(Ok(&1)));

        ring.set(1, 20).expect("index in range");
        assert_eq!(cursor.next(&ring), Some(Ok(&20)));
    }

    #[test]
    fn fresh_cursor_sees_new_state() {
        let mut ring = ring_with(&[1, 2]);
        let mut stale = ring.cursor();
        ring.push(3);
        assert!(matches!(stale.next(&ring), Some(Err(_))));

        let mut fresh = ring.cursor();
        let collected: Vec<u32> = std::iter::from_fn(|| fresh.next(&ring))
            .map(|step| *step.expect("unmodified"))
            .collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted_after_mutation() {
        let mut ring = ring_with(&[1]);
        let mut cursor = ring.cursor();
        assert_eq!(cursor.next(&ring), Some(Ok(&1)));
        assert_eq!(cursor.next(&ring), None);

        ring.push(2);
        assert_eq!(cursor.next(&ring), None);
        assert_eq!(cursor.position(), 1);
    }
}
