// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{policy::AllocPolicy, vec::DynArray};

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Removes the last element and returns it, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: Before decrementing, `ptr[..old_len]` were initialized, so
            // the old last slot still holds a `T`, now owned by the caller.
            Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
        }
    }

    /// Destroys elements from the back until `len() <= new_len`.
    ///
    /// Capacity is unchanged.
    #[inline]
    pub fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: the slot at the old last index was initialized and
            // `len` no longer covers it.
            unsafe { core::ptr::drop_in_place(self.ptr.as_ptr().add(self.len)) };
        }
    }

    /// Destroys every element, last first. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}
