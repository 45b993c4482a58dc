// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{error::Error, policy::AllocPolicy, raw::PendingBlock, uninit, vec::DynArray};

impl<T, A: AllocPolicy> Extend<T> for DynArray<T, A> {
    /// Appends every item in order.
    ///
    /// # Panics
    ///
    /// Panics if storage cannot be obtained; use
    /// [`try_extend_from_iter`](DynArray::try_extend_from_iter) to handle that.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(e) = self.try_extend_from_iter(iter) {
            panic!("DynArray::extend: {e}");
        }
    }
}

impl<'a, T: Copy + 'a, A: AllocPolicy> Extend<&'a T> for DynArray<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Appends clones of `src`.
    ///
    /// Reallocates at most once: to the larger of the doubled capacity and the
    /// exact length needed. All-or-nothing: on error, or if a clone panics, the
    /// array is unchanged.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        let len = self.len;
        if src.len() <= self.spare_capacity() {
            // SAFETY: `[len, len + src.len())` are spare, unconstructed slots and
            // cannot overlap `src`, which is borrowed from outside `self`.
            unsafe { uninit::uninitialized_copy(src, self.ptr.as_ptr().add(len)) };
            self.len = len + src.len();
            return Ok(());
        }

        let needed = len.checked_add(src.len()).ok_or(Error::LengthExceeded {
            requested: usize::MAX,
            max: self.max_size(),
        })?;
        let new_cap = self.cap.saturating_mul(2).min(self.max_size()).max(needed);
        let mut block = PendingBlock::<T, A>::allocate(&self.alloc, new_cap)?;
        block.clone_from_slice(len, src);
        // SAFETY: every live element is moved exactly once; the old block is
        // released by `install` without dropping them.
        unsafe { block.move_from(0, self.ptr.as_ptr(), len) };
        let parts = block.into_parts();
        self.install(parts);
        Ok(())
    }

    /// Appends every item of `iter`, growing as needed.
    ///
    /// Items already appended stay in place if an error is returned.
    pub fn try_extend_from_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), Error> {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > self.spare_capacity() {
            self.reserve_additional(lower)?;
        }
        for item in iter {
            self.push(item)?;
        }
        Ok(())
    }
}
