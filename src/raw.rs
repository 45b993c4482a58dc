// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw storage blocks.
//!
//! [`allocate`] and [`deallocate`] are the only places the container talks to
//! its allocator. [`PendingBlock`] is a freshly allocated block that is being
//! populated for a reallocation: it owns the block and whatever elements have
//! been constructed in it so far, and gives both back if it is dropped before
//! [`PendingBlock::into_parts`] hands the block over to the container.

// Crate imports
use crate::{error::Error, policy::AllocPolicy, uninit};

// Core imports
use core::{
    alloc::Layout,
    mem::{ManuallyDrop, align_of, size_of},
    ptr::{self, NonNull},
};

/// Largest element count a block for `T` may hold under `alloc`.
#[inline]
pub(crate) fn max_size<T, A: AllocPolicy>(alloc: &A) -> usize {
    let size = size_of::<T>();
    if size == 0 {
        return usize::MAX;
    }
    let diff_max = isize::MAX as usize / size;
    let alloc_max = alloc.max_bytes() / size;
    diff_max.min(alloc_max)
}

/// Obtains storage for exactly `n` elements.
///
/// A zero-element request returns a dangling pointer without calling the allocator.
pub(crate) fn allocate<T, A: AllocPolicy>(alloc: &A, n: usize) -> Result<NonNull<T>, Error> {
    let max = max_size::<T, A>(alloc);
    if n > max {
        return Err(Error::LengthExceeded { requested: n, max });
    }
    if n == 0 {
        return Ok(NonNull::dangling());
    }
    let layout =
        Layout::array::<T>(n).map_err(|_| Error::LengthExceeded { requested: n, max })?;
    let block = alloc.allocate(layout).map_err(|_| Error::AllocFailed)?;
    Ok(block.cast())
}

/// Releases a block previously returned by [`allocate`] for `n` elements.
///
/// # Safety
///
/// `ptr` must come from `allocate(alloc', n)` where `alloc'` is interchangeable
/// with `alloc`, and no live element may remain in the block.
pub(crate) unsafe fn deallocate<T, A: AllocPolicy>(alloc: &A, ptr: NonNull<T>, n: usize) {
    if n == 0 {
        return;
    }
    // SAFETY: the same layout was successfully built when the block was allocated.
    let layout = unsafe { Layout::from_size_align_unchecked(size_of::<T>() * n, align_of::<T>()) };
    unsafe { alloc.deallocate(ptr.cast(), layout) }
}

/// A block under construction.
///
/// Constructed elements always form one contiguous run `[lo, hi)`; every
/// population step must extend that run at one of its ends.
pub(crate) struct PendingBlock<'a, T, A: AllocPolicy> {
    alloc: &'a A,
    ptr: NonNull<T>,
    cap: usize,
    lo: usize,
    hi: usize,
}

impl<'a, T, A: AllocPolicy> PendingBlock<'a, T, A> {
    /// Allocates an empty block of exactly `cap` slots.
    pub(crate) fn allocate(alloc: &'a A, cap: usize) -> Result<Self, Error> {
        let ptr = allocate::<T, A>(alloc, cap)?;
        Ok(Self {
            alloc,
            ptr,
            cap,
            lo: 0,
            hi: 0,
        })
    }

    #[inline]
    fn slot(&self, at: usize) -> *mut T {
        debug_assert!(at <= self.cap);
        // SAFETY: `at <= cap`, so the pointer stays within (or one past) the block.
        unsafe { self.ptr.as_ptr().add(at) }
    }

    #[inline]
    fn grow_run(&mut self, at: usize, count: usize) {
        if self.lo == self.hi {
            self.lo = at;
            self.hi = at + count;
        } else if at + count == self.lo {
            self.lo = at;
        } else {
            debug_assert_eq!(at, self.hi, "constructed run must stay contiguous");
            self.hi += count;
        }
    }

    /// Writes `value` into slot `at`.
    pub(crate) fn write(&mut self, at: usize, value: T) {
        debug_assert!(at < self.cap);
        // SAFETY: `at < cap` and the slot is outside the constructed run.
        unsafe { self.slot(at).write(value) };
        self.grow_run(at, 1);
    }

    /// Constructs `count` elements produced by `f` starting at slot `at`.
    pub(crate) fn fill_with<F: FnMut() -> T>(&mut self, at: usize, count: usize, f: F) {
        debug_assert!(at + count <= self.cap);
        // SAFETY: the target slots are inside the block and unconstructed.
        unsafe { uninit::uninitialized_fill_with(self.slot(at), count, f) };
        self.grow_run(at, count);
    }

    /// Clones `src` into the slots starting at `at`.
    pub(crate) fn clone_from_slice(&mut self, at: usize, src: &[T])
    where
        T: Clone,
    {
        debug_assert!(at + src.len() <= self.cap);
        // SAFETY: the target slots are inside the block, unconstructed, and the
        // block is freshly allocated so it cannot overlap `src`.
        unsafe { uninit::uninitialized_copy(src, self.slot(at)) };
        self.grow_run(at, src.len());
    }

    /// Moves `count` live elements from `src` into the slots starting at `at`.
    ///
    /// # Safety
    ///
    /// `src` must point at `count` live elements that the caller gives up.
    pub(crate) unsafe fn move_from(&mut self, at: usize, src: *const T, count: usize) {
        debug_assert!(at + count <= self.cap);
        unsafe { uninit::uninitialized_move(src, count, self.slot(at)) };
        self.grow_run(at, count);
    }

    /// Hands the block over as `(ptr, len, cap)`.
    ///
    /// The constructed run must start at slot 0.
    pub(crate) fn into_parts(self) -> (NonNull<T>, usize, usize) {
        debug_assert!(self.lo == 0 || self.lo == self.hi);
        let this = ManuallyDrop::new(self);
        let len = this.hi - this.lo;
        (this.ptr, len, this.cap)
    }
}

impl<T, A: AllocPolicy> Drop for PendingBlock<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: `[lo, hi)` holds exactly the elements this block constructed
        // and the block was allocated from `alloc` with `cap` slots.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.slot(self.lo),
                self.hi - self.lo,
            ));
            deallocate(self.alloc, self.ptr, self.cap);
        }
    }
}
