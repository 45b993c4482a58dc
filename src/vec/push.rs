// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{error::Error, policy::AllocPolicy, raw::PendingBlock, vec::DynArray};

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Appends `value`. Amortized O(1).
    ///
    /// On error the array is unchanged and `value` is dropped.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        self.push_with(move || value)
    }

    /// Appends the element built by `f`.
    ///
    /// With spare capacity, `f` runs and its result is written at the end.
    /// Otherwise a block of the grown capacity is allocated and `f` constructs
    /// the element into it *before* any existing element is touched; only
    /// after the new block is fully populated is the old one released.
    ///
    /// If `f` panics, or the allocation fails, the array is exactly as it was
    /// before the call.
    pub fn push_with<F: FnOnce() -> T>(&mut self, f: F) -> Result<(), Error> {
        if self.len < self.cap {
            let value = f();
            // SAFETY: `len < cap`, so the slot is allocated and unconstructed.
            unsafe { self.ptr.as_ptr().add(self.len).write(value) };
            self.len += 1;
            return Ok(());
        }

        let new_cap = self.grown_capacity()?;
        let mut block = PendingBlock::<T, A>::allocate(&self.alloc, new_cap)?;
        block.write(self.len, f());
        // SAFETY: every live element is moved exactly once; the old block is
        // released by `install` without dropping them.
        unsafe { block.move_from(0, self.ptr.as_ptr(), self.len) };
        let parts = block.into_parts();
        self.install(parts);
        Ok(())
    }
}
