// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indexing support for [`DynArray`](crate::DynArray).
//!
//! `v[i]` and every range form behave exactly like slice indexing over the
//! live prefix `[0, len)`: out-of-bounds or inverted ranges panic. Use
//! [`DynArray::at`](crate::DynArray::at) for a checked, non-panicking lookup.

// Crate imports
use crate::{policy::AllocPolicy, vec::DynArray};

// Core imports
use core::{
    ops::{Index, IndexMut},
    slice::SliceIndex,
};

impl<T, I: SliceIndex<[T]>, A: AllocPolicy> Index<I> for DynArray<T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: AllocPolicy> IndexMut<I> for DynArray<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}
