// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{error::Error, policy::AllocPolicy, vec::DynArray};

impl<T: Clone, A: AllocPolicy + Default> TryFrom<&[T]> for DynArray<T, A> {
    type Error = Error;

    /// Clones `items` into a new array with capacity `items.len()`.
    #[inline]
    fn try_from(items: &[T]) -> Result<Self, Self::Error> {
        Self::from_slice_in(items, A::default())
    }
}

impl<T, A: AllocPolicy + Default, const N: usize> TryFrom<[T; N]> for DynArray<T, A> {
    type Error = Error;

    /// Moves the elements of `items` into a new array with capacity `N`.
    #[inline]
    fn try_from(items: [T; N]) -> Result<Self, Self::Error> {
        Self::from_array_in(items, A::default())
    }
}

impl<T, A: AllocPolicy + Default> FromIterator<T> for DynArray<T, A> {
    /// # Panics
    ///
    /// Panics if storage cannot be obtained; see [`DynArray::try_from_iter`].
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        match Self::try_from_iter(iter) {
            Ok(v) => v,
            Err(e) => panic!("DynArray::from_iter: {e}"),
        }
    }
}

impl<T, A: AllocPolicy + Default> DynArray<T, A> {
    /// Collects `iter` into a new array, reporting allocation failures.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, Error> {
        let mut v = Self::new_in(A::default());
        v.try_extend_from_iter(iter)?;
        Ok(v)
    }
}
