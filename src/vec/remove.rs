// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{error::Error, policy::AllocPolicy, vec::DynArray};

// Core imports
use core::ptr;

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Removes and returns the element at `index`, shifting subsequent elements left.
    ///
    /// Returns `None` if `index >= len`.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len;
        if index >= len {
            return None;
        }
        // SAFETY: `index < len`, so the slot is initialized; after reading it
        // out, `[index + 1, len)` is shifted down over it and `len` shrinks.
        unsafe {
            let hole = self.ptr.as_ptr().add(index);
            let out = hole.read();
            ptr::copy(hole.add(1), hole, len - index - 1);
            self.len = len - 1;
            Some(out)
        }
    }

    /// Fallible variant of [`remove`](DynArray::remove), returning
    /// [`Error::OutOfRange`] when `index >= len`.
    #[inline]
    pub fn try_remove(&mut self, index: usize) -> Result<T, Error> {
        let len = self.len;
        self.remove(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Removes and returns the element at `index` by moving the last element
    /// into its slot. O(1); does not preserve order.
    #[inline]
    pub fn swap_remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        self.len -= 1;
        let last = self.len;
        // SAFETY: both `index` and `last` were within the initialized prefix;
        // the last slot is now outside `len` and its value moves into the hole.
        unsafe {
            let base = self.ptr.as_ptr();
            let out = base.add(index).read();
            if index != last {
                ptr::copy_nonoverlapping(base.add(last), base.add(index), 1);
            }
            Some(out)
        }
    }
}
