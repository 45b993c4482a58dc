// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{error::Error, policy::AllocPolicy, raw::PendingBlock, vec::DynArray};

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Resizes to `new_len`, filling new slots with clones of `value`.
    #[inline]
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone())
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    #[inline]
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), Error>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len`, filling new slots with values produced by `f`.
    ///
    /// - `new_len > capacity`: a block of exactly `new_len` slots is allocated,
    ///   the new tail `[len, new_len)` is constructed in it first, then the
    ///   existing elements are moved in front. If `f` panics the array is
    ///   unchanged and the block is freed.
    /// - `len < new_len <= capacity`: elements are appended one at a time; a
    ///   panic keeps the ones already appended.
    /// - `new_len < len`: elements are destroyed from the back.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) -> Result<(), Error> {
        let len = self.len;
        if new_len > self.cap {
            let mut block = PendingBlock::<T, A>::allocate(&self.alloc, new_len)?;
            block.fill_with(len, new_len - len, f);
            // SAFETY: every live element is moved exactly once; the old block is
            // released by `install` without dropping them.
            unsafe { block.move_from(0, self.ptr.as_ptr(), len) };
            let parts = block.into_parts();
            self.install(parts);
        } else if new_len > len {
            while self.len < new_len {
                // Cannot reallocate: `len < new_len <= cap`.
                self.push_with(&mut f)?;
            }
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }
}
