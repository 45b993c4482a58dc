// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{error::Error, policy::AllocPolicy, raw::PendingBlock, vec::DynArray};

// Core imports
use core::ptr;

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Inserts `value` at `index`, shifting later elements one slot right. O(n).
    ///
    /// Returns [`Error::OutOfRange`] if `index > len`. `index == len` appends.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        self.insert_with(index, move || value)
    }

    /// Inserts the element built by `f` at `index`.
    ///
    /// - Reallocating path: the new element is constructed into the new block at
    ///   offset `index` first, then the prefix and suffix are moved around it.
    /// - In-place path: `f` runs before anything is shifted, so a panic leaves
    ///   the array untouched; the tail is then moved one slot right
    ///   (overlap-safe) and the element written into the hole.
    ///
    /// Both paths leave the array unchanged if `f` panics or an error is returned.
    pub fn insert_with<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> Result<(), Error> {
        let len = self.len;
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }
        if index == len {
            return self.push_with(f);
        }

        if len == self.cap {
            let new_cap = self.grown_capacity()?;
            let mut block = PendingBlock::<T, A>::allocate(&self.alloc, new_cap)?;
            block.write(index, f());
            let base = self.ptr.as_ptr();
            // SAFETY: the prefix and suffix are each moved exactly once; the old
            // block is released by `install` without dropping them.
            unsafe {
                block.move_from(0, base, index);
                block.move_from(index + 1, base.add(index), len - index);
            }
            let parts = block.into_parts();
            self.install(parts);
            return Ok(());
        }

        let value = f();
        // SAFETY: `len < cap`, so slot `len` exists; `ptr::copy` handles the
        // overlap of `[index, len)` and `[index + 1, len + 1)`.
        unsafe {
            let hole = self.ptr.as_ptr().add(index);
            ptr::copy(hole, hole.add(1), len - index);
            hole.write(value);
        }
        self.len = len + 1;
        Ok(())
    }
}
