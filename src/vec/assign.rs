// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    error::Error,
    policy::{AllocPolicy, interchangeable},
    raw::PendingBlock,
    uninit,
    vec::DynArray,
};

// Core imports
use core::{mem::ManuallyDrop, ptr};

impl<T, A: AllocPolicy> DynArray<T, A> {
    /// Moves the contents of `source` into `self`, dropping what `self` held.
    ///
    /// When the allocator propagates on move-assignment, or the two allocators
    /// are interchangeable, `self` releases its storage and adopts `source`'s
    /// block in O(1); `source` is left with zero capacity. Otherwise the
    /// elements are moved one by one into `self`'s own storage (reallocating
    /// to exactly `source.len()` if needed) and `source` keeps its now empty
    /// block.
    ///
    /// On error both arrays are unchanged. `source` is empty on success.
    pub fn move_assign(&mut self, source: &mut Self) -> Result<(), Error> {
        if A::PROPAGATE_ON_MOVE_ASSIGN || interchangeable(&self.alloc, &source.alloc) {
            self.release();
            if A::PROPAGATE_ON_MOVE_ASSIGN {
                self.alloc = source.alloc.clone();
            }
            let parts = source.detach();
            self.install(parts);
            return Ok(());
        }

        let n = source.len;
        let src = source.ptr.as_ptr();
        if n > self.cap {
            let mut block = PendingBlock::<T, A>::allocate(&self.alloc, n)?;
            source.len = 0;
            // SAFETY: `source.len` is zero, so the moved elements are owned by
            // the block alone.
            unsafe { block.move_from(0, src, n) };
            let parts = block.into_parts();
            self.release();
            self.install(parts);
            return Ok(());
        }

        source.len = 0;
        self.truncate(n);
        let len = self.len;
        // SAFETY: `[0, n)` of `source` are live and no longer owned by it. The
        // first `len` replace live elements of `self` (dropping the old ones),
        // the rest land in spare slots since `n <= cap`.
        unsafe {
            let dst = self.ptr.as_ptr();
            for i in 0..len {
                *dst.add(i) = ptr::read(src.add(i));
            }
            uninit::uninitialized_move(src.add(len), n - len, dst.add(len));
        }
        self.len = n;
        Ok(())
    }

    /// Replaces the contents with clones of `items`.
    ///
    /// Reuses the current block when it is large enough, otherwise builds a
    /// block of exactly `items.len()` slots before dropping anything.
    pub fn assign_from_slice(&mut self, items: &[T]) -> Result<&mut Self, Error>
    where
        T: Clone,
    {
        self.assign_cloned(items)?;
        Ok(self)
    }

    /// Replaces the contents with the elements of `items`.
    ///
    /// On error `items` is dropped and `self` is unchanged.
    pub fn assign_from_array<const N: usize>(&mut self, items: [T; N]) -> Result<&mut Self, Error> {
        let items = ManuallyDrop::new(items);
        let src = items.as_ptr();
        if N > self.cap {
            let mut block = match PendingBlock::<T, A>::allocate(&self.alloc, N) {
                Ok(block) => block,
                Err(e) => {
                    drop(ManuallyDrop::into_inner(items));
                    return Err(e);
                }
            };
            // SAFETY: `items` is never dropped, so each element is handed over once.
            unsafe { block.move_from(0, src, N) };
            let parts = block.into_parts();
            self.release();
            self.install(parts);
            return Ok(self);
        }

        self.clear();
        // SAFETY: `N <= cap` and the array is empty; `items` is never dropped.
        unsafe { uninit::uninitialized_move(src, N, self.ptr.as_ptr()) };
        self.len = N;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        policy::AllocPolicy,
        testing::{Fragile, Local, Pool, Roaming, Tracker, values},
        vec::DynArray,
    };

    #[test]
    fn test_move_assign_global_adopts_block() {
        let mut dst: DynArray<i32> = DynArray::from_slice(&[1, 2]).unwrap();
        let mut src: DynArray<i32> = DynArray::from_slice(&[3, 4, 5]).unwrap();
        let ptr = src.as_ptr();
        dst.move_assign(&mut src).unwrap();
        assert_eq!(dst.as_slice(), &[3, 4, 5]);
        assert_eq!(dst.as_ptr(), ptr);
        assert!(src.is_empty());
        assert_eq!(src.capacity(), 0);
    }

    #[test]
    fn test_move_assign_same_pool_adopts_block() {
        let pool = Pool::new();
        let tracker = Tracker::new();
        let mut dst = DynArray::new_in(Local::new(&pool));
        dst.push(Fragile::new(&tracker, 1)).unwrap();
        let mut src = DynArray::new_in(Local::new(&pool));
        src.push(Fragile::new(&tracker, 2)).unwrap();

        dst.move_assign(&mut src).unwrap();
        assert_eq!(values(&dst), [2]);
        assert_eq!(tracker.live(), 1);
        assert_eq!(pool.live_blocks(), 1);
        assert_eq!(src.capacity(), 0);
    }

    #[test]
    fn test_move_assign_propagates_allocator() {
        let home = Pool::new();
        let away = Pool::new();
        let mut dst = DynArray::from_slice_in(&[1, 2], Roaming::new(&home)).unwrap();
        let mut src = DynArray::from_slice_in(&[3], Roaming::new(&away)).unwrap();
        dst.move_assign(&mut src).unwrap();
        assert_eq!(dst.as_slice(), &[3]);
        assert!(dst.allocator().same_pool(&Roaming::new(&away)));
        assert_eq!(home.live_blocks(), 0);
        assert_eq!(away.live_blocks(), 1);
    }

    #[test]
    fn test_move_assign_element_wise_between_pools() {
        let home = Pool::new();
        let away = Pool::new();
        let tracker = Tracker::new();

        // fits into the existing block
        let mut dst = DynArray::with_capacity_in(4, Local::new(&home)).unwrap();
        for i in 0..3 {
            dst.push(Fragile::new(&tracker, i)).unwrap();
        }
        let mut src = DynArray::new_in(Local::new(&away));
        src.push(Fragile::new(&tracker, 7)).unwrap();
        src.push(Fragile::new(&tracker, 8)).unwrap();
        dst.move_assign(&mut src).unwrap();
        assert_eq!(values(&dst), [7, 8]);
        assert_eq!(dst.capacity(), 4);
        assert!(src.is_empty());
        assert_eq!(src.capacity(), 2);
        assert_eq!(tracker.live(), 2);
        assert_eq!(home.allocations(), 1);

        // needs a bigger block
        for i in 0..6 {
            src.push(Fragile::new(&tracker, i)).unwrap();
        }
        dst.move_assign(&mut src).unwrap();
        assert_eq!(values(&dst), [0, 1, 2, 3, 4, 5]);
        assert_eq!(dst.capacity(), 6);
        assert_eq!(tracker.live(), 6);
        assert_eq!(home.live_blocks(), 1);
        assert!(!dst.allocator().same_pool(src.allocator()));
    }

    #[test]
    fn test_move_assign_failure_leaves_both() {
        let home = Pool::new();
        let away = Pool::new();
        let mut dst = DynArray::from_slice_in(&[1u8], Local::new(&home)).unwrap();
        let mut src = DynArray::from_slice_in(&[2u8, 3], Local::new(&away)).unwrap();
        home.set_budget(0);
        assert_eq!(dst.move_assign(&mut src), Err(Error::AllocFailed));
        assert_eq!(dst.as_slice(), &[1]);
        assert_eq!(src.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_assign_from_slice_and_array() {
        let pool = Pool::new();
        let mut v = DynArray::from_slice_in(&[1, 2, 3], &pool).unwrap();
        assert_eq!(v.assign_from_slice(&[4, 5]).unwrap().as_slice(), &[4, 5]);
        assert_eq!(v.capacity(), 3);
        v.assign_from_slice(&[6, 7, 8, 9]).unwrap().push(10).unwrap();
        assert_eq!(v.as_slice(), &[6, 7, 8, 9, 10]);

        let len = v.assign_from_array([1, 2]).unwrap().len();
        assert_eq!(len, 2);
        v.assign_from_array([0; 9]).unwrap();
        assert_eq!(v.capacity(), 9);
        assert_eq!(v.as_slice(), &[0; 9]);
    }

    #[test]
    fn test_assign_from_array_failure_drops_items() {
        let pool = Pool::new();
        let tracker = Tracker::new();
        let mut v = DynArray::new_in(&pool);
        v.push(Fragile::new(&tracker, 1)).unwrap();
        pool.set_budget(0);
        let res = v.assign_from_array([Fragile::new(&tracker, 2), Fragile::new(&tracker, 3)]);
        assert_eq!(res.err(), Some(Error::AllocFailed));
        assert_eq!(values(&v), [1]);
        assert_eq!(tracker.live(), 1);
    }
}
