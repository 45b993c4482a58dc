// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    error::Error,
    policy::{AllocPolicy, interchangeable},
    raw::PendingBlock,
    vec::DynArray,
};

// Core imports
use core::mem;

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Exchanges the contents of `self` and `other` in O(1).
    ///
    /// Allocators are exchanged too when they propagate on swap. Otherwise the
    /// blocks may only change hands between interchangeable allocators, and
    /// [`Error::AllocatorMismatch`] is returned (with nothing exchanged) when
    /// they are not.
    pub fn swap(&mut self, other: &mut Self) -> Result<(), Error> {
        if A::PROPAGATE_ON_SWAP {
            mem::swap(&mut self.alloc, &mut other.alloc);
        } else if !interchangeable(&self.alloc, &other.alloc) {
            return Err(Error::AllocatorMismatch);
        }
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.cap, &mut other.cap);
        Ok(())
    }

    /// Moves the contents out into a new array sharing a clone of the allocator.
    ///
    /// O(1): the block changes owner and `self` is left empty with zero capacity.
    pub fn take(&mut self) -> Self {
        let (ptr, len, cap) = self.detach();
        Self::from_parts(ptr, len, cap, self.alloc.clone())
    }

    /// Moves the contents of `source` into a new array that uses `alloc`.
    ///
    /// If `alloc` is interchangeable with `source`'s allocator the block is
    /// adopted in O(1). Otherwise a block of exactly `source.len()` slots is
    /// obtained from `alloc` and the elements are moved into it. `source` is
    /// left empty on success and untouched on error.
    pub fn move_in(source: &mut Self, alloc: A) -> Result<Self, Error> {
        if interchangeable(&alloc, &source.alloc) {
            let (ptr, len, cap) = source.detach();
            return Ok(Self::from_parts(ptr, len, cap, alloc));
        }

        let n = source.len;
        let mut block = PendingBlock::<T, A>::allocate(&alloc, n)?;
        source.len = 0;
        // SAFETY: `source.len` is zero, so the moved elements are owned by the
        // block alone.
        unsafe { block.move_from(0, source.ptr.as_ptr(), n) };
        let (ptr, len, cap) = block.into_parts();
        Ok(Self::from_parts(ptr, len, cap, alloc))
    }
}
