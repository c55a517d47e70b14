//! Shared assertions for the ring buffer integration tests.

use std::fmt::Debug;

use circulus_ring::RingBuffer;

/// Pairs every element with its position, starting at 0.
pub fn with_index<I: IntoIterator>(source: I) -> impl Iterator<Item = (I::Item, usize)> {
    source.into_iter().enumerate().map(|(index, item)| (item, index))
}

/// Asserts that `ring` holds exactly `expected`, oldest first.
///
/// Checks the length, the borrowing iterator, the indexed accessor and the
/// version-checked cursor against each other so that a bug in any one of the
/// read paths shows up.
pub fn assert_contents<T: PartialEq + Debug>(ring: &RingBuffer<T>, expected: &[T]) {
    assert_eq!(ring.len(), expected.len(), "length of {ring:?}");

    for (actual, index) in with_index(ring) {
        assert_eq!(actual, &expected[index], "iterated element {index}");
        assert_eq!(actual, &ring[index], "indexed element {index}");
    }

    let mut cursor = ring.cursor();
    for (index, want) in expected.iter().enumerate() {
        match cursor.next(ring) {
            Some(Ok(actual)) => assert_eq!(actual, want, "cursor element {index}"),
            other => panic!("cursor element {index}: got {other:?}"),
        }
    }
    assert!(cursor.next(ring).is_none(), "cursor ran past {}", expected.len());
}
