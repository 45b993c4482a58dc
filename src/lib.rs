// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `dyn-array`
//!
//! A `no_std` growable, contiguous array whose storage comes from a
//! user-supplied allocator, with explicit error values instead of aborts and
//! the strong panic-safety guarantee on every reallocating operation.
//!
//! The core type, [`DynArray<T, A>`], owns one block of `capacity()` slots and
//! tracks a logical length `len ∈ 0..=capacity`. Only `[0, len)` holds live
//! elements.
//!
//! ## When to use this crate
//!
//! This crate may be useful when:
//!
//! - You need a `Vec`-like container in `no_std` + `alloc` code.
//! - Storage must come from a specific allocator (a pool, an arena, a
//!   tracking allocator) and you care what happens to that allocator when
//!   containers are copied, moved or swapped.
//! - Allocation failure must be a recoverable [`Error`], not an abort.
//!
//! It may not be the best fit if you only ever use the global allocator and
//! are happy with `alloc::vec::Vec`.
//!
//! ## Allocators and policies
//!
//! Raw memory comes from any `allocator_api2` [`Allocator`]. The
//! [`AllocPolicy`] trait layers container semantics on top of it:
//!
//! - `PROPAGATE_ON_COPY_ASSIGN`, `PROPAGATE_ON_MOVE_ASSIGN`,
//!   `PROPAGATE_ON_SWAP` decide whether the allocator instance travels with
//!   the contents;
//! - `IS_ALWAYS_EQUAL` and [`AllocPolicy::same_pool`] decide whether two
//!   containers may hand blocks to each other in O(1);
//! - [`AllocPolicy::max_bytes`] bounds [`DynArray::max_size`];
//! - [`AllocPolicy::select_on_copy`] picks the allocator of a copy.
//!
//! [`Global`] is always equal and propagates on move-assignment. Borrowed
//! allocators (`&Arena`) compare by identity.
//!
//! ## Growth
//!
//! When an append or insert finds no spare slot, the capacity becomes
//! `max(2 × capacity, 1)`, clamped to `max_size()`. Sized operations
//! (`reserve`, `resize`, copies) allocate exactly what they need.
//!
//! ## Failure model
//!
//! - Container failures are returned as [`Error`]:
//!   [`Error::OutOfRange`], [`Error::LengthExceeded`], [`Error::AllocFailed`],
//!   [`Error::AllocatorMismatch`].
//! - Element failures are panics from `Clone`, `Default` or a user closure.
//!   Every operation that builds a new block constructs into it before touching
//!   the old one, so a panic (or error) leaves the array as it was.
//! - Trait methods that cannot return a `Result` (`Clone`, `FromIterator`,
//!   `Extend`) panic with the error message; each has a `try_` counterpart.
//!
//! ## Features
//!
//! - `serde`: `Serialize` / `Deserialize` as a sequence (requires `A: Default`
//!   for deserialization).
//! - `std`: enables `allocator-api2/std`.
//!
//! ## Example
//!
//! ```rust
//! use dyn_array::DynArray;
//!
//! let mut v: DynArray<u8> = DynArray::new();
//! v.push(1).unwrap();
//! v.extend_from_slice(&[2, 3]).unwrap();
//! assert_eq!(v.as_slice(), &[1, 2, 3]);
//! assert_eq!(v.capacity(), 3);
//! ```
//!
//! See [`DynArray`] for detailed behavior.

#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate alloc;

// Modules
mod error;
mod index;
mod iter;
mod policy;
mod raw;
#[cfg(feature = "serde")]
mod serde;
#[cfg(test)]
mod testing;
mod uninit;
mod vec;

// Public exports (crate API surface)
pub use allocator_api2::alloc::{Allocator, Global};
pub use error::Error;
pub use iter::IntoIter;
pub use policy::AllocPolicy;
pub use vec::DynArray;
