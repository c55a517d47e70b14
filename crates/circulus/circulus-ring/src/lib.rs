#![forbid(unsafe_code)]

mod capacity;
mod error;
mod iter;
mod pivot;
mod ring_buffer;

pub use capacity::{MAX_CAPACITY, RingConfig, round_capacity};
pub use error::RingError;
pub use iter::{Cursor, Iter};
pub use ring_buffer::RingBuffer;
