/// Errors reported by ring buffer construction, indexing and enumeration.
///
/// Every variant is raised synchronously at the call that violated the
/// contract. Nothing is retried or recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    #[error("capacity must be at least 1 (requested {requested})")]
    InvalidCapacity { requested: usize },

    #[error("capacity {requested} exceeds the maximum of {max}", max = crate::MAX_CAPACITY)]
    CapacityOutOfRange { requested: usize },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("destination too small: need {needed} slots, {available} available")]
    DestinationTooSmall { needed: usize, available: usize },

    #[error("ring buffer was modified during enumeration")]
    ConcurrentModification,
}
