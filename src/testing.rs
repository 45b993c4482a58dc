// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test fixtures: counting allocators and an element type whose `Clone` can
//! be told to panic.

// Crate imports
use crate::policy::AllocPolicy;

// Core imports
use core::{alloc::Layout, cell::Cell, ptr::NonNull};

// External imports - allocator-api2
use allocator_api2::alloc::{AllocError, Allocator, Global};

// Std imports
use std::rc::Rc;

/// A memory pool backed by `Global` that counts blocks and can refuse requests.
#[derive(Debug)]
pub(crate) struct Pool {
    live: Cell<usize>,
    allocations: Cell<usize>,
    budget: Cell<Option<usize>>,
    max_bytes: usize,
}

impl Pool {
    pub(crate) fn new() -> Self {
        Self::with_max_bytes(isize::MAX as usize)
    }

    pub(crate) fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            live: Cell::new(0),
            allocations: Cell::new(0),
            budget: Cell::new(None),
            max_bytes,
        }
    }

    /// Blocks currently handed out.
    pub(crate) fn live_blocks(&self) -> usize {
        self.live.get()
    }

    /// Successful allocations so far.
    pub(crate) fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Allow `n` more allocations, then fail.
    pub(crate) fn set_budget(&self, n: usize) {
        self.budget.set(Some(n));
    }
}

unsafe impl Allocator for Pool {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if let Some(left) = self.budget.get() {
            if left == 0 {
                return Err(AllocError);
            }
            self.budget.set(Some(left - 1));
        }
        let block = Global.allocate(layout)?;
        self.live.set(self.live.get() + 1);
        self.allocations.set(self.allocations.get() + 1);
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        unsafe { Global.deallocate(ptr, layout) }
    }
}

/// A handle to a [`Pool`] whose propagation flags are all `PROPAGATE`.
///
/// Handles compare equal when they refer to the same pool.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shared<'a, const PROPAGATE: bool> {
    pub(crate) pool: &'a Pool,
}

/// Handle that stays with its container.
pub(crate) type Local<'a> = Shared<'a, false>;
/// Handle that travels on copy-assign, move-assign and swap.
pub(crate) type Roaming<'a> = Shared<'a, true>;

impl<'a, const PROPAGATE: bool> Shared<'a, PROPAGATE> {
    pub(crate) fn new(pool: &'a Pool) -> Self {
        Self { pool }
    }
}

unsafe impl<const PROPAGATE: bool> Allocator for Shared<'_, PROPAGATE> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.pool.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.pool.deallocate(ptr, layout) }
    }
}

impl<const PROPAGATE: bool> AllocPolicy for Shared<'_, PROPAGATE> {
    const PROPAGATE_ON_COPY_ASSIGN: bool = PROPAGATE;
    const PROPAGATE_ON_MOVE_ASSIGN: bool = PROPAGATE;
    const PROPAGATE_ON_SWAP: bool = PROPAGATE;

    fn same_pool(&self, other: &Self) -> bool {
        core::ptr::eq(self.pool, other.pool)
    }

    fn max_bytes(&self) -> usize {
        self.pool.max_bytes
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    live: Cell<isize>,
    clones_left: Cell<Option<usize>>,
}

/// Counts live [`Fragile`] values and arms their `Clone` to panic.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tracker(Rc<TrackerState>);

impl Tracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of `Fragile` values currently alive.
    pub(crate) fn live(&self) -> isize {
        self.0.live.get()
    }

    /// Let `n` more clones succeed; the next one panics.
    pub(crate) fn allow_clones(&self, n: usize) {
        self.0.clones_left.set(Some(n));
    }

    /// Disarm the clone budget.
    pub(crate) fn allow_all_clones(&self) {
        self.0.clones_left.set(None);
    }
}

/// An element that counts itself and whose `Clone` may panic.
#[derive(Debug)]
pub(crate) struct Fragile {
    pub(crate) value: i32,
    tracker: Tracker,
}

impl Fragile {
    pub(crate) fn new(tracker: &Tracker, value: i32) -> Self {
        tracker.0.live.set(tracker.live() + 1);
        Self {
            value,
            tracker: tracker.clone(),
        }
    }
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        let state = &self.tracker.0;
        if let Some(left) = state.clones_left.get() {
            if left == 0 {
                panic!("clone of {} refused", self.value);
            }
            state.clones_left.set(Some(left - 1));
        }
        Fragile::new(&self.tracker, self.value)
    }
}

impl Drop for Fragile {
    fn drop(&mut self) {
        self.tracker.0.live.set(self.tracker.live() - 1);
    }
}

impl PartialEq for Fragile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Values of a run of `Fragile` elements.
pub(crate) fn values(items: &[Fragile]) -> Vec<i32> {
    items.iter().map(|f| f.value).collect()
}
