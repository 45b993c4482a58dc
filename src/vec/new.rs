// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{error::Error, policy::AllocPolicy, raw::PendingBlock, vec::DynArray};

// Core imports
use core::{mem::ManuallyDrop, ptr::NonNull};

// External imports - allocator-api2
use allocator_api2::alloc::Global;

impl<T> DynArray<T, Global> {
    /// Constructs an empty array. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self::from_parts(NonNull::dangling(), 0, 0, Global)
    }

    /// Constructs an empty array with room for exactly `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Constructs an array of `count` clones of `value`.
    #[inline]
    pub fn from_elem(count: usize, value: &T) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_elem_in(count, value, Global)
    }

    /// Constructs an array of `count` default values.
    #[inline]
    pub fn with_len(count: usize) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::with_len_in(count, Global)
    }

    /// Constructs an array holding clones of `items`, in order.
    #[inline]
    pub fn from_slice(items: &[T]) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_slice_in(items, Global)
    }
}

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Constructs an empty array using `alloc`. Does not allocate.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self::from_parts(NonNull::dangling(), 0, 0, alloc)
    }

    /// Constructs an empty array with room for exactly `capacity` elements.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        let mut v = Self::new_in(alloc);
        v.reserve(capacity)?;
        Ok(v)
    }

    /// Constructs an array of `count` clones of `value` using `alloc`.
    ///
    /// Capacity equals `count`. If a clone panics, everything built so far is
    /// dropped and the block is freed.
    pub fn from_elem_in(count: usize, value: &T, alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_fn_in(count, || value.clone(), alloc)
    }

    /// Constructs an array of `count` default values using `alloc`.
    pub fn with_len_in(count: usize, alloc: A) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::from_fn_in(count, T::default, alloc)
    }

    /// Constructs an array holding clones of `items` using `alloc`.
    ///
    /// Capacity equals `items.len()`.
    pub fn from_slice_in(items: &[T], alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut block = PendingBlock::<T, A>::allocate(&alloc, items.len())?;
        block.clone_from_slice(0, items);
        let (ptr, len, cap) = block.into_parts();
        Ok(Self::from_parts(ptr, len, cap, alloc))
    }

    /// Constructs an array that takes ownership of `items`, in order.
    ///
    /// On error `items` is dropped.
    pub fn from_array_in<const N: usize>(items: [T; N], alloc: A) -> Result<Self, Error> {
        let mut block = PendingBlock::<T, A>::allocate(&alloc, N)?;
        let items = ManuallyDrop::new(items);
        // SAFETY: the array is wrapped in `ManuallyDrop`, so its elements are
        // handed over to the block exactly once.
        unsafe { block.move_from(0, items.as_ptr(), N) };
        let (ptr, len, cap) = block.into_parts();
        Ok(Self::from_parts(ptr, len, cap, alloc))
    }

    fn from_fn_in<F: FnMut() -> T>(count: usize, f: F, alloc: A) -> Result<Self, Error> {
        let mut block = PendingBlock::<T, A>::allocate(&alloc, count)?;
        block.fill_with(0, count, f);
        let (ptr, len, cap) = block.into_parts();
        Ok(Self::from_parts(ptr, len, cap, alloc))
    }
}

impl<T, A: AllocPolicy + Default> Default for DynArray<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}
