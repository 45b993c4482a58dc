// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for `DynArray`.
//!
//! These errors cover the failures the container raises itself: bounds,
//! length limits, allocator failures and allocator mismatches. Panics from
//! element constructors (`Clone`, `Default`, user closures) are not mapped
//! into this type; they unwind through the container unchanged.

/// Errors returned by operations on [`DynArray`](crate::DynArray).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A checked index was at or beyond the current length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The length at the time of the request.
        len: usize,
    },
    /// The requested element count exceeds [`DynArray::max_size`](crate::DynArray::max_size).
    #[error("requested {requested} elements, maximum is {max}")]
    LengthExceeded {
        /// Number of elements asked for.
        requested: usize,
        /// Largest representable element count.
        max: usize,
    },
    /// The allocator could not provide the requested block.
    #[error("memory allocation failed")]
    AllocFailed,
    /// Storage exchange was requested between allocators that neither compare
    /// equal nor propagate.
    #[error("allocators are not interchangeable")]
    AllocatorMismatch,
}
