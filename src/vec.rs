// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `DynArray` type and its inherent API.
//!
//! `DynArray<T, A>` is a growable vector whose storage comes from an allocator
//! `A` described by an [`AllocPolicy`]. Operations are split into one file
//! per concern under `vec/`; this file holds the type, read access and the
//! comparison/formatting trait impls.

mod assign;
mod clone;
mod extend;
mod from;
mod insert;
mod new;
mod pop;
mod push;
mod remove;
mod reserve;
mod resize;
mod slice;
mod swap;

// Crate imports
use crate::{error::Error, policy::AllocPolicy};

// Core imports
use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Deref, DerefMut},
    ptr::{self, NonNull},
};

// External imports - allocator-api2
use allocator_api2::alloc::Global;

/// A growable, contiguous array with allocator-customized storage.
///
/// `DynArray<T, A>` owns one block of `capacity()` slots obtained from its
/// allocator. The first `len()` slots hold live elements; the rest are
/// allocated but unconstructed.
///
/// # Layout and invariants
///
/// - `0 <= len <= cap` always holds.
/// - Slots `[0, len)` are initialized; slots `[len, cap)` are not.
/// - `cap == 0` means no block is owned and `ptr` is dangling.
/// - The block and every live element are owned by exactly one `DynArray`.
///
/// # Growth
///
/// When an append or insert finds no spare slot, capacity becomes
/// `max(2 * capacity, 1)` (clamped to [`max_size`](DynArray::max_size)), so
/// appending `n` elements moves O(n) elements in total.
///
/// # Panic safety
///
/// Element constructors (`Clone`, `Default`, closures passed to `*_with`
/// methods) may panic. Every operation that builds a new block, including
/// push/insert/resize with reallocation, copy construction and copy
/// assignment into a larger block, gives the strong guarantee: the array is
/// exactly as it was before the call and the half-built block is freed. In
/// Rust relocating an element is a bitwise move that cannot fail, so in-place
/// inserts are strong as well.
///
/// Panics from `Drop` of an element are not supported.
///
/// # Errors
///
/// Failures raised by the container itself are returned as [`Error`] values:
/// [`Error::OutOfRange`] for checked access, [`Error::LengthExceeded`] and
/// [`Error::AllocFailed`] for storage requests, [`Error::AllocatorMismatch`]
/// for storage exchange between incompatible allocators.
///
/// # Examples
///
/// ```rust
/// use dyn_array::DynArray;
///
/// let mut v: DynArray<u32> = DynArray::new();
/// v.push(1).unwrap();
/// v.extend_from_slice(&[2, 3]).unwrap();
/// v.insert(0, 0).unwrap();
/// assert_eq!(v.as_slice(), &[0, 1, 2, 3]);
/// assert_eq!(v.capacity(), 6);
/// assert!(v.at(4).is_err());
/// ```
pub struct DynArray<T, A: AllocPolicy = Global> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: `DynArray` owns its elements and its allocator like `Vec` does.
unsafe impl<T: Send, A: AllocPolicy + Send> Send for DynArray<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: AllocPolicy + Sync> Sync for DynArray<T, A> {}

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Wraps raw parts; the caller guarantees the invariants above.
    #[inline]
    pub(crate) const fn from_parts(ptr: NonNull<T>, len: usize, cap: usize, alloc: A) -> Self {
        Self {
            ptr,
            len,
            cap,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Returns the number of slots in the owned block.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if `len == 0`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `capacity - len`, the number of pushes possible without reallocating.
    #[inline]
    pub const fn spare_capacity(&self) -> usize {
        self.cap - self.len
    }

    /// Returns a reference to the allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns `Some(&T)` if `i < len`, otherwise `None`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.as_slice().get(i)
    }

    /// Returns `Some(&mut T)` if `i < len`, otherwise `None`.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(i)
    }

    /// Bounds-checked access.
    ///
    /// Returns [`Error::OutOfRange`] when `i >= len`.
    #[inline]
    pub fn at(&self, i: usize) -> Result<&T, Error> {
        let len = self.len;
        self.get(i).ok_or(Error::OutOfRange { index: i, len })
    }

    /// Bounds-checked mutable access.
    ///
    /// Returns [`Error::OutOfRange`] when `i >= len`.
    #[inline]
    pub fn at_mut(&mut self, i: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.get_mut(i).ok_or(Error::OutOfRange { index: i, len })
    }

    // iterators
    /// Shorthand for `self.as_slice().iter()`.
    ///
    /// The iterator is double-ended; use `.rev()` for reverse traversal.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Shorthand for `self.as_mut_slice().iter_mut()`.
    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the first element, if any.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, if any.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the first element mutably, if any.
    #[inline]
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element mutably, if any.
    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Returns `true` if the array contains `x` (linear search).
    #[inline]
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(x)
    }

    /// Lexicographic three-way comparison built from `<` alone.
    ///
    /// For each pair of elements, `a < b` gives `Less`, `b < a` gives
    /// `Greater`, and anything else counts as equivalent. Incomparable values
    /// (such as `NaN`) are therefore treated as equivalent. A shorter array
    /// whose elements match the other's prefix compares `Less`.
    pub fn weak_cmp<B: AllocPolicy>(&self, other: &DynArray<T, B>) -> Ordering
    where
        T: PartialOrd,
    {
        for (a, b) in self.iter().zip(other.iter()) {
            if a < b {
                return Ordering::Less;
            }
            if b < a {
                return Ordering::Greater;
            }
        }
        self.len.cmp(&other.len)
    }
}

impl<T, A: AllocPolicy> Drop for DynArray<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: fmt::Debug, A: AllocPolicy> fmt::Debug for DynArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("len", &self.len)
            .field("capacity", &self.cap)
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T: PartialEq, A: AllocPolicy, B: AllocPolicy> PartialEq<DynArray<T, B>> for DynArray<T, A> {
    fn eq(&self, other: &DynArray<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: PartialEq, A: AllocPolicy> PartialEq<[T]> for DynArray<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}
impl<T: PartialEq, A: AllocPolicy, const N: usize> PartialEq<[T; N]> for DynArray<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}
impl<T: Eq, A: AllocPolicy> Eq for DynArray<T, A> {}
impl<T: Ord, A: AllocPolicy> Ord for DynArray<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}
impl<T: PartialOrd, A: AllocPolicy> PartialOrd for DynArray<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}
impl<T: Hash, A: AllocPolicy> Hash for DynArray<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T, A: AllocPolicy> Deref for DynArray<T, A> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
impl<T, A: AllocPolicy> DerefMut for DynArray<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: AllocPolicy> AsRef<[T]> for DynArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, A: AllocPolicy> AsMut<[T]> for DynArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// Borrow ergonomics (treat as a slice)
impl<T, A: AllocPolicy> Borrow<[T]> for DynArray<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, A: AllocPolicy> BorrowMut<[T]> for DynArray<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Drops every live element in index order and returns the block to the
    /// allocator, leaving `self` empty with zero capacity.
    pub(crate) fn release(&mut self) {
        let len = self.len;
        self.len = 0;
        // SAFETY: `[0, len)` were live; `len` is already zero so a panicking
        // destructor cannot cause a double drop.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len));
            crate::raw::deallocate(&self.alloc, self.ptr, self.cap);
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    /// Replaces the owned block with `(ptr, len, cap)`.
    ///
    /// The old block is released without dropping anything: its elements must
    /// already have been moved out or dropped.
    pub(crate) fn install(&mut self, (ptr, len, cap): (NonNull<T>, usize, usize)) {
        // SAFETY: no live element remains in the old block.
        unsafe { crate::raw::deallocate(&self.alloc, self.ptr, self.cap) };
        self.ptr = ptr;
        self.len = len;
        self.cap = cap;
    }

    /// Takes the whole block out of `self`, leaving it empty with zero capacity.
    pub(crate) fn detach(&mut self) -> (NonNull<T>, usize, usize) {
        let parts = (self.ptr, self.len, self.cap);
        self.ptr = NonNull::dangling();
        self.len = 0;
        self.cap = 0;
        parts
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::DynArray;
    use crate::{
        Error,
        testing::{Fragile, Pool, Tracker},
    };
    use core::cmp::Ordering;

    #[test]
    fn test_push_pop() {
        let mut v: DynArray<u8> = DynArray::new();
        v.push(1).unwrap();
        v.push(2).unwrap();
        assert_eq!(v.pop(), Some(2));
        assert_eq!(v.pop(), Some(1));
        assert_eq!(v.pop(), None);
    }

    #[test]
    fn test_default_is_empty_without_allocation() {
        let pool = Pool::new();
        let v: DynArray<i32, &Pool> = DynArray::new_in(&pool);
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
        assert!(v.is_empty());
        assert_eq!(pool.allocations(), 0);

        let d: DynArray<i32> = DynArray::default();
        assert_eq!(d.capacity(), 0);
    }

    #[test]
    fn test_append_order_and_doubling() {
        let mut v: DynArray<usize> = DynArray::new();
        let mut seen = std::vec::Vec::new();
        for i in 0..100 {
            v.push(i).unwrap();
            assert!(v.capacity() >= v.len());
            if seen.last() != Some(&v.capacity()) {
                seen.push(v.capacity());
            }
        }
        assert_eq!(v.len(), 100);
        assert_eq!(seen, [1, 2, 4, 8, 16, 32, 64, 128]);
        assert!(v.iter().copied().eq(0..100));
    }

    #[test]
    fn test_checked_access() {
        let mut v: DynArray<i32> = DynArray::from_slice(&[7, 8, 9]).unwrap();
        assert_eq!(v.at(0), Ok(&7));
        assert_eq!(v.at(2), Ok(&9));
        assert_eq!(v.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
        *v.at_mut(1).unwrap() = 80;
        assert_eq!(v.as_slice(), &[7, 80, 9]);
        assert_eq!(v.at_mut(7), Err(Error::OutOfRange { index: 7, len: 3 }));

        let empty: DynArray<i32> = DynArray::new();
        assert_eq!(empty.at(0), Err(Error::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_contains_and_getters() {
        let mut v: DynArray<i32> = DynArray::from_slice(&[7, 8, 9]).unwrap();
        assert!(v.contains(&7));
        assert!(!v.contains(&10));
        assert_eq!(v.first(), Some(&7));
        assert_eq!(v.last(), Some(&9));
        assert_eq!(v.get(1), Some(&8));
        assert_eq!(v.get(3), None);
        *v.get_mut(1).unwrap() = 80;
        *v.first_mut().unwrap() = 70;
        *v.last_mut().unwrap() = 90;
        assert_eq!(v.as_slice(), &[70, 80, 90]);
        assert_eq!(v.iter().rev().copied().collect::<std::vec::Vec<_>>(), [90, 80, 70]);
        for x in v.iter_mut() {
            *x += 1;
        }
        assert_eq!(v, [71, 81, 91]);
    }

    #[test]
    fn test_eq_ord_partial_ord_hash_via_slice() {
        use core::hash::{Hash, Hasher};
        use std::collections::hash_map::DefaultHasher;

        let a: DynArray<i32> = DynArray::from_slice(&[1, 2, 3]).unwrap();
        let b: DynArray<i32> = DynArray::from_slice(&[1, 2, 3]).unwrap();
        let c: DynArray<i32> = DynArray::from_slice(&[1, 2, 4]).unwrap();
        let short: DynArray<i32> = DynArray::from_slice(&[1, 2]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, short);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.partial_cmp(&c), Some(Ordering::Less));
        assert_eq!(short.cmp(&a), Ordering::Less);
        assert_eq!(c.cmp(&a), Ordering::Greater);

        let mut ha = DefaultHasher::new();
        a.hash(&mut ha);
        let mut hb = DefaultHasher::new();
        [1, 2, 3][..].hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn test_equality_across_allocators() {
        let pool = Pool::new();
        let a: DynArray<i32> = DynArray::from_slice(&[1, 2]).unwrap();
        let b: DynArray<i32, &Pool> = DynArray::from_slice_in(&[1, 2], &pool).unwrap();
        assert!(a == b);
    }

    #[test]
    fn test_weak_cmp_uses_less_than_only() {
        let a: DynArray<f64> = DynArray::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        let b: DynArray<f64> = DynArray::from_slice(&[1.0, 2.0, 4.0]).unwrap();
        let prefix: DynArray<f64> = DynArray::from_slice(&[1.0, 2.0]).unwrap();
        let nan: DynArray<f64> = DynArray::from_slice(&[f64::NAN, 5.0]).unwrap();
        let other: DynArray<f64> = DynArray::from_slice(&[0.0, 4.0]).unwrap();

        assert_eq!(a.weak_cmp(&b), Ordering::Less);
        assert_eq!(b.weak_cmp(&a), Ordering::Greater);
        assert_eq!(a.weak_cmp(&a), Ordering::Equal);
        assert_eq!(prefix.weak_cmp(&a), Ordering::Less);
        assert_eq!(a.weak_cmp(&prefix), Ordering::Greater);
        // NaN is neither less nor greater, so the second element decides.
        assert_eq!(nan.weak_cmp(&other), Ordering::Greater);
        assert_eq!(nan.partial_cmp(&other), None);
    }

    #[test]
    fn test_deref_and_as_ref() {
        let mut v: DynArray<i32> = DynArray::from_slice(&[1, 2]).unwrap();
        let s: &[i32] = &v;
        assert_eq!(s, &[1, 2]);
        let smut: &mut [i32] = &mut v;
        smut[1] = 22;
        assert_eq!(v.as_slice(), &[1, 22]);
        let aref: &[i32] = v.as_ref();
        assert_eq!(aref, &[1, 22]);
        let amut: &mut [i32] = v.as_mut();
        amut[0] = 11;
        assert_eq!(v.as_slice(), &[11, 22]);
    }

    #[test]
    fn test_debug_structure() {
        let mut v: DynArray<i32> = DynArray::with_capacity(5).unwrap();
        v.extend_from_slice(&[1, 2]).unwrap();
        let dbg = format!("{v:?}");
        assert!(dbg.contains("DynArray"));
        assert!(dbg.contains("len: 2"));
        assert!(dbg.contains("capacity: 5"));
        assert!(dbg.contains("[1, 2]"));
    }

    #[test]
    fn test_drop_releases_elements_and_block() {
        let pool = Pool::new();
        let tracker = Tracker::new();
        {
            let mut v: DynArray<Fragile, &Pool> = DynArray::new_in(&pool);
            for i in 0..5 {
                v.push(Fragile::new(&tracker, i)).unwrap();
            }
            assert_eq!(tracker.live(), 5);
            assert_eq!(pool.live_blocks(), 1);
        }
        assert_eq!(tracker.live(), 0);
        assert_eq!(pool.live_blocks(), 0);
    }

    #[test]
    fn test_drop_runs_in_index_order() {
        use std::{cell::RefCell, rc::Rc};

        struct Noisy(u8, Rc<RefCell<std::vec::Vec<u8>>>);
        impl Drop for Noisy {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let log = Rc::new(RefCell::new(std::vec::Vec::new()));
        let mut v: DynArray<Noisy> = DynArray::new();
        for i in 0..4 {
            v.push(Noisy(i, log.clone())).unwrap();
        }
        drop(v);
        assert_eq!(*log.borrow(), [0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_sized_type() {
        let mut v: DynArray<()> = DynArray::new();
        for _ in 0..10 {
            v.push(()).unwrap();
        }
        assert_eq!(v.len(), 10);
        assert_eq!(v.capacity(), 16);
        v.insert(3, ()).unwrap();
        assert_eq!(v.pop(), Some(()));
        v.truncate(2);
        assert_eq!(v.len(), 2);
        assert_eq!(v.max_size(), usize::MAX);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DynArray<u8>>();
        assert_send_sync::<DynArray<std::string::String>>();
    }

    mod proptests {
        use super::DynArray;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn append_keeps_order_and_bounds(items in proptest::collection::vec(any::<i32>(), 0..200)) {
                let mut v: DynArray<i32> = DynArray::new();
                let mut last_cap = 0;
                for &x in &items {
                    v.push(x).unwrap();
                    let cap = v.capacity();
                    prop_assert!(cap >= v.len());
                    prop_assert!(cap == last_cap || cap == (2 * last_cap).max(1));
                    last_cap = cap;
                }
                prop_assert_eq!(v.len(), items.len());
                prop_assert_eq!(v.as_slice(), &items[..]);
            }

            #[test]
            fn insert_then_remove_restores(
                items in proptest::collection::vec(any::<i16>(), 0..64),
                pos in any::<prop::sample::Index>(),
                x in any::<i16>(),
            ) {
                let mut v: DynArray<i16> = DynArray::from_slice(&items).unwrap();
                let i = pos.index(items.len() + 1);
                v.insert(i, x).unwrap();
                prop_assert_eq!(v[i], x);
                prop_assert_eq!(v.remove(i), Some(x));
                prop_assert_eq!(v.as_slice(), &items[..]);
                prop_assert_eq!(v.len(), items.len());
            }

            #[test]
            fn reserve_never_shrinks_or_changes_contents(
                items in proptest::collection::vec(any::<u8>(), 0..64),
                k in 0usize..256,
            ) {
                let mut v: DynArray<u8> = DynArray::from_slice(&items).unwrap();
                let before = v.capacity();
                v.reserve(k).unwrap();
                prop_assert!(v.capacity() >= before.max(k));
                prop_assert_eq!(v.as_slice(), &items[..]);
            }

            #[test]
            fn ordering_matches_slices(
                a in proptest::collection::vec(0u8..4, 0..8),
                b in proptest::collection::vec(0u8..4, 0..8),
            ) {
                let va: DynArray<u8> = DynArray::from_slice(&a).unwrap();
                let vb: DynArray<u8> = DynArray::from_slice(&b).unwrap();
                prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
                prop_assert_eq!(va.weak_cmp(&vb), a.cmp(&b));
                prop_assert_eq!(va == vb, a == b);
            }

            #[test]
            fn clear_then_append_matches_fresh(
                first in proptest::collection::vec(any::<u32>(), 0..32),
                second in proptest::collection::vec(any::<u32>(), 0..32),
            ) {
                let mut reused: DynArray<u32> = DynArray::from_slice(&first).unwrap();
                reused.clear();
                let mut fresh: DynArray<u32> = DynArray::new();
                for &x in &second {
                    reused.push(x).unwrap();
                    fresh.push(x).unwrap();
                }
                prop_assert_eq!(&reused, &fresh);
                prop_assert!(reused.capacity() >= reused.len());
            }
        }
    }
}
