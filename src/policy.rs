// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Allocator policies for [`DynArray`](crate::DynArray).
//!
//! Raw memory comes from any [`allocator_api2::alloc::Allocator`]. On top of
//! that, [`AllocPolicy`] describes how an allocator instance behaves when the
//! container holding it is copied, moved or swapped:
//!
//! - whether the instance travels with copy-assignment, move-assignment and swap;
//! - whether every instance of the type is interchangeable (`IS_ALWAYS_EQUAL`);
//! - a runtime equality predicate deciding whether two instances can free each
//!   other's blocks;
//! - the largest block the allocator can hand out;
//! - which instance a copy-constructed container receives.
//!
//! Two containers may exchange storage in O(1) only when their allocators are
//! interchangeable. Otherwise elements are transferred one by one.

// External imports - allocator-api2
use allocator_api2::alloc::{Allocator, Global};

/// An allocator together with its container propagation policy.
///
/// All policy flags default to `false`; implementors only override what
/// differs. `same_pool` must be an equivalence relation, and two instances
/// comparing equal must be able to deallocate each other's blocks.
pub trait AllocPolicy: Allocator + Clone {
    /// Copy-assignment replaces the destination's allocator with the source's.
    const PROPAGATE_ON_COPY_ASSIGN: bool = false;
    /// Move-assignment replaces the destination's allocator with the source's.
    const PROPAGATE_ON_MOVE_ASSIGN: bool = false;
    /// Swapping two containers also swaps their allocators.
    const PROPAGATE_ON_SWAP: bool = false;
    /// Every instance of this type can free memory obtained from any other.
    const IS_ALWAYS_EQUAL: bool = false;

    /// Returns `true` if `self` can deallocate blocks obtained from `other`.
    fn same_pool(&self, other: &Self) -> bool;

    /// Largest single allocation, in bytes, this allocator can satisfy.
    #[inline]
    fn max_bytes(&self) -> usize {
        isize::MAX as usize
    }

    /// Instance handed to a container copy-constructed from one using `self`.
    #[inline]
    fn select_on_copy(&self) -> Self {
        self.clone()
    }
}

/// Returns `true` when blocks may be exchanged between `a` and `b` without
/// transferring elements.
#[inline]
pub(crate) fn interchangeable<A: AllocPolicy>(a: &A, b: &A) -> bool {
    A::IS_ALWAYS_EQUAL || a.same_pool(b)
}

impl AllocPolicy for Global {
    const PROPAGATE_ON_MOVE_ASSIGN: bool = true;
    const IS_ALWAYS_EQUAL: bool = true;

    #[inline]
    fn same_pool(&self, _other: &Self) -> bool {
        true
    }
}

/// Borrowed allocators (arenas, pools) compare by identity and never propagate.
impl<X: Allocator + ?Sized> AllocPolicy for &X {
    #[inline]
    fn same_pool(&self, other: &Self) -> bool {
        core::ptr::addr_eq(*self as *const X, *other as *const X)
    }
}
