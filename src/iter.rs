// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Iterator support for [`DynArray`](crate::DynArray).
//!
//! - `IntoIter<T, A>` owns the block and yields elements by value; it supports
//!   `DoubleEndedIterator`, `ExactSizeIterator`, and `FusedIterator`. Elements
//!   not yet yielded are dropped, and the block freed, when it is dropped.
//! - `&DynArray` and `&mut DynArray` iterate as slices.

// Crate imports
use crate::{policy::AllocPolicy, raw, vec::DynArray};

// Core imports
use core::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    mem::ManuallyDrop,
    ptr::{self, NonNull},
};

// External imports - allocator-api2
use allocator_api2::alloc::Global;

/// Owned iterator returned by `DynArray::into_iter()`.
///
/// Yields elements by value from front to back and supports double-ended
/// iteration via [`DoubleEndedIterator`].
pub struct IntoIter<T, A: AllocPolicy = Global> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    front: usize,
    back: usize, // exclusive
    _marker: PhantomData<T>,
}

// SAFETY: same ownership as the `DynArray` it came from.
unsafe impl<T: Send, A: AllocPolicy + Send> Send for IntoIter<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: AllocPolicy + Sync> Sync for IntoIter<T, A> {}

impl<T, A: AllocPolicy> IntoIter<T, A> {
    /// Returns the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` are live and owned by the iterator.
        unsafe {
            core::slice::from_raw_parts(self.ptr.as_ptr().add(self.front), self.back - self.front)
        }
    }

    /// Returns a reference to the allocator.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Drops the live elements in `[from, to)`.
    ///
    /// The caller must already have excluded them from `[front, back)`.
    unsafe fn drop_range(&mut self, from: usize, to: usize) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr().add(from),
                to - from,
            ))
        }
    }
}

impl<T, A: AllocPolicy> Iterator for IntoIter<T, A> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if self.front < self.back {
            let i = self.front;
            self.front += 1;
            // SAFETY: slot `i` was live and is now outside `[front, back)`.
            Some(unsafe { self.ptr.as_ptr().add(i).read() })
        } else {
            None
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }
    fn nth(&mut self, n: usize) -> Option<T> {
        let rem = self.back - self.front;
        let skip = n.min(rem);
        let start = self.front;
        self.front += skip;
        // SAFETY: the skipped slots were live and are now outside `[front, back)`.
        unsafe { self.drop_range(start, start + skip) };
        self.next()
    }
}

impl<T, A: AllocPolicy> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: slot `back` was live and is now outside `[front, back)`.
            Some(unsafe { self.ptr.as_ptr().add(self.back).read() })
        } else {
            None
        }
    }
    fn nth_back(&mut self, n: usize) -> Option<T> {
        let rem = self.back - self.front;
        let skip = n.min(rem);
        let end = self.back;
        self.back -= skip;
        // SAFETY: the skipped slots were live and are now outside `[front, back)`.
        unsafe { self.drop_range(end - skip, end) };
        self.next_back()
    }
}
impl<T, A: AllocPolicy> FusedIterator for IntoIter<T, A> {}
impl<T, A: AllocPolicy> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: AllocPolicy> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let (front, back) = (self.front, self.back);
        self.front = back;
        // SAFETY: the remaining elements are dropped once, then the block is
        // returned to the allocator it came from.
        unsafe {
            self.drop_range(front, back);
            raw::deallocate(&self.alloc, self.ptr, self.cap);
        }
    }
}

impl<T: fmt::Debug, A: AllocPolicy> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<'a, T, A: AllocPolicy> IntoIterator for &'a DynArray<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
impl<'a, T, A: AllocPolicy> IntoIterator for &'a mut DynArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
impl<T, A: AllocPolicy> IntoIterator for DynArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;
    fn into_iter(self) -> Self::IntoIter {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped, so the allocator is moved out once.
        let alloc = unsafe { ptr::read(&me.alloc) };
        IntoIter {
            ptr: me.ptr,
            cap: me.cap,
            alloc,
            front: 0,
            back: me.len,
            _marker: PhantomData,
        }
    }
}
