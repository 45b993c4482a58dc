// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    error::Error,
    policy::{AllocPolicy, interchangeable},
    raw::PendingBlock,
    uninit,
    vec::DynArray,
};

impl<T: Clone, A: AllocPolicy> DynArray<T, A> {
    /// Returns a copy whose allocator is chosen by [`AllocPolicy::select_on_copy`].
    ///
    /// The copy's capacity equals `self.len()`.
    #[inline]
    pub fn try_clone(&self) -> Result<Self, Error> {
        self.try_clone_in(self.alloc.select_on_copy())
    }

    /// Returns a copy that allocates from `alloc`.
    #[inline]
    pub fn try_clone_in(&self, alloc: A) -> Result<Self, Error> {
        Self::from_slice_in(self.as_slice(), alloc)
    }

    /// Makes `self` an element-wise copy of `source`.
    ///
    /// If the allocator propagates on copy-assignment and the two differ,
    /// `self` first drops its elements, frees its block and adopts a clone of
    /// `source`'s allocator. Then:
    ///
    /// - `source.len() > capacity()`: a block of exactly `source.len()` slots
    ///   is populated with clones, and only then are the old elements dropped
    ///   and the old block freed. A panicking clone leaves `self` unchanged.
    /// - otherwise the excess is dropped, the common prefix is overwritten
    ///   with [`Clone::clone_from`], and the rest is cloned into spare slots.
    ///   A panic here may leave a partially assigned prefix.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), Error> {
        if A::PROPAGATE_ON_COPY_ASSIGN {
            if !interchangeable(&self.alloc, &source.alloc) {
                self.release();
            }
            self.alloc = source.alloc.clone();
        }
        self.assign_cloned(source.as_slice())
    }

    /// Replaces the contents with clones of `src`, keeping the allocator.
    pub(crate) fn assign_cloned(&mut self, src: &[T]) -> Result<(), Error> {
        let n = src.len();
        if n > self.cap {
            let mut block = PendingBlock::<T, A>::allocate(&self.alloc, n)?;
            block.clone_from_slice(0, src);
            let parts = block.into_parts();
            self.release();
            self.install(parts);
            return Ok(());
        }

        self.truncate(n);
        let (head, tail) = src.split_at(self.len);
        for (dst, item) in self.as_mut_slice().iter_mut().zip(head) {
            dst.clone_from(item);
        }
        let len = self.len;
        // SAFETY: `n <= cap`, so `[len, n)` are spare unconstructed slots, and
        // `src` is borrowed from outside `self`.
        unsafe { uninit::uninitialized_copy(tail, self.ptr.as_ptr().add(len)) };
        self.len = n;
        Ok(())
    }
}

impl<T: Clone, A: AllocPolicy> Clone for DynArray<T, A> {
    /// # Panics
    ///
    /// Panics if storage for the copy cannot be obtained.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(v) => v,
            Err(e) => panic!("DynArray::clone: {e}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(e) = self.try_clone_from(source) {
            panic!("DynArray::clone_from: {e}");
        }
    }
}
