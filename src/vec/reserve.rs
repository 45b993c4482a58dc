// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    error::Error,
    policy::AllocPolicy,
    raw::{self, PendingBlock},
    vec::DynArray,
};

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Largest number of elements this array could ever hold.
    ///
    /// The minimum of what `isize` address arithmetic allows for `T` and what
    /// the allocator reports via [`AllocPolicy::max_bytes`].
    #[inline]
    pub fn max_size(&self) -> usize {
        raw::max_size::<T, A>(&self.alloc)
    }

    /// Ensures `capacity() >= new_cap`.
    ///
    /// Does nothing if the capacity is already large enough. Otherwise moves
    /// every element into a new block of exactly `new_cap` slots. On error the
    /// array is unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::LengthExceeded`] if `new_cap > max_size()`, or
    /// [`Error::AllocFailed`] if the allocator refuses the block.
    pub fn reserve(&mut self, new_cap: usize) -> Result<(), Error> {
        if new_cap <= self.cap {
            return Ok(());
        }
        self.relocate(new_cap)
    }

    /// Ensures room for at least `additional` more elements without reallocating.
    pub fn reserve_additional(&mut self, additional: usize) -> Result<(), Error> {
        let wanted = self
            .len
            .checked_add(additional)
            .ok_or(Error::LengthExceeded {
                requested: usize::MAX,
                max: self.max_size(),
            })?;
        self.reserve(wanted)
    }

    /// Reallocates so that `capacity() == len()`.
    ///
    /// An empty array gives its block back to the allocator entirely.
    pub fn shrink_to_fit(&mut self) -> Result<(), Error> {
        if self.len < self.cap {
            self.relocate(self.len)?;
        }
        Ok(())
    }

    /// Moves all elements into a fresh block of exactly `new_cap >= len` slots.
    pub(crate) fn relocate(&mut self, new_cap: usize) -> Result<(), Error> {
        debug_assert!(new_cap >= self.len);
        let mut block = PendingBlock::<T, A>::allocate(&self.alloc, new_cap)?;
        // SAFETY: every live element is moved exactly once and the old block is
        // released without dropping them.
        unsafe { block.move_from(0, self.ptr.as_ptr(), self.len) };
        let parts = block.into_parts();
        self.install(parts);
        Ok(())
    }

    /// Capacity to grow to when one more slot is needed.
    ///
    /// Doubles the current capacity (at least 1), clamped to `max_size()`.
    pub(crate) fn grown_capacity(&self) -> Result<usize, Error> {
        let max = self.max_size();
        if self.cap >= max {
            return Err(Error::LengthExceeded {
                requested: self.cap.saturating_add(1),
                max,
            });
        }
        Ok(self.cap.saturating_mul(2).max(1).min(max))
    }
}
