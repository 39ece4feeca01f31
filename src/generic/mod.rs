//! Generic structures, independent of the rest of the library.

pub mod index_heap;
pub mod luby;
pub mod random;
