// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{policy::AllocPolicy, vec::DynArray};

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: By invariant, `ptr[..len]` are initialized (and `ptr` is
        // dangling but well aligned when `len == 0`).
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: By invariant, `ptr[..len]` are initialized, and `&mut self`
        // guarantees exclusive access.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Returns a raw pointer to the start of the block.
    ///
    /// Only the first `len` slots hold live elements. The pointer is dangling
    /// when no block is owned, and is invalidated by any reallocation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable raw pointer to the start of the block.
    ///
    /// Writing past `len` does **not** update `len`; such writes are not
    /// reflected in the logical contents of the array.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}
