// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk transfers into uninitialized memory.
//!
//! Every routine here writes a contiguous run of elements into raw storage and
//! returns the past-the-end pointer of what it wrote. The destination run is
//! either fully constructed on return or, when an element constructor panics,
//! fully unconstructed again: the elements already written are dropped before
//! the panic leaves the routine. Source elements are never touched on failure.
//!
//! Moving a value in Rust is a bitwise copy that cannot fail, so there is no
//! separate "move if it cannot throw, otherwise copy" variant: moves are always
//! used for relocation.

// Core imports
use core::ptr;

/// Drops the constructed prefix of a destination run if construction unwinds.
struct PartialRun<T> {
    start: *mut T,
    done: usize,
}

impl<T> Drop for PartialRun<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `done` elements starting at `start` were written and
        // nothing else owns them yet.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start, self.done)) }
    }
}

/// Clones every element of `src` into `dst[..src.len()]`.
///
/// # Safety
///
/// `dst` must be valid for writes of `src.len()` elements, must not overlap
/// `src`, and the slots must not hold live values.
pub(crate) unsafe fn uninitialized_copy<T: Clone>(src: &[T], dst: *mut T) -> *mut T {
    let mut run = PartialRun {
        start: dst,
        done: 0,
    };
    for item in src {
        let value = item.clone();
        // SAFETY: `run.done < src.len()` slots were reserved by the caller.
        unsafe { run.start.add(run.done).write(value) };
        run.done += 1;
    }
    let end = unsafe { dst.add(run.done) };
    core::mem::forget(run);
    end
}

/// Writes `count` values produced by `f` into `dst[..count]`.
///
/// # Safety
///
/// Same requirements as [`uninitialized_copy`] for `count` slots.
pub(crate) unsafe fn uninitialized_fill_with<T, F>(dst: *mut T, count: usize, mut f: F) -> *mut T
where
    F: FnMut() -> T,
{
    let mut run = PartialRun {
        start: dst,
        done: 0,
    };
    while run.done < count {
        let value = f();
        // SAFETY: `run.done < count` slots were reserved by the caller.
        unsafe { run.start.add(run.done).write(value) };
        run.done += 1;
    }
    core::mem::forget(run);
    unsafe { dst.add(count) }
}

/// Moves `count` elements from `src` into `dst`.
///
/// After the call the source slots are logically uninitialized.
///
/// # Safety
///
/// `src` must hold `count` live elements, `dst` must be valid for `count`
/// writes, and the two ranges must not overlap.
#[inline]
pub(crate) unsafe fn uninitialized_move<T>(src: *const T, count: usize, dst: *mut T) -> *mut T {
    unsafe {
        ptr::copy_nonoverlapping(src, dst, count);
        dst.add(count)
    }
}
