//! Memo cache bound to a computation.
//!
//! [`BoundedMemoCache`] pairs a [`MemoTable`] with the computation it
//! memoizes, so callers just hand over arguments:
//!
//! ```text
//!   get(args)
//!     │
//!     ├── key = combine_hash(args)
//!     ├── hit?  ──► touch entry ──► return clone of cached value
//!     └── miss  ──► compute(&args) ──► store as MRU (evict LRU on overflow)
//!                                  └─► return value
//! ```
//!
//! Values are returned by clone. Wrap expensive values in `Arc` to make
//! hits cheap.
//!
//! ```
//! use memokit::cache::BoundedMemoCache;
//!
//! let mut tri_sum = BoundedMemoCache::from_fn(2, |&(x, y, z): &(i32, i32, i32)| x + y + z);
//!
//! assert_eq!(tri_sum.get((0, 1, 2)), 3);
//! assert_eq!(tri_sum.get((1, 2, 3)), 6);
//! assert_eq!(tri_sum.get((0, 1, 2)), 3); // hit, (1, 2, 3) is now LRU
//! assert_eq!(tri_sum.get((2, 3, 4)), 9); // evicts (1, 2, 3)
//!
//! assert!(tri_sum.contains(&(0, 1, 2)));
//! assert!(!tri_sum.contains(&(1, 2, 3)));
//! ```

use std::fmt;
use std::hash::BuildHasher;
use std::marker::PhantomData;

use crate::builder::DEFAULT_CAPACITY;
use crate::error::InvariantError;
use crate::key::{ArgTuple, DefaultHashBuilder};
use crate::table::MemoTable;
use crate::traits::{Compute, TryCompute};

/// Fixed-capacity LRU memoization of a pure computation over `Args`.
pub struct BoundedMemoCache<Args, V, F, S = DefaultHashBuilder> {
    table: MemoTable<V, S>,
    compute: F,
    _args: PhantomData<fn(&Args)>,
}

impl<Args, V, F> BoundedMemoCache<Args, V, F> {
    /// Creates an empty cache around `compute`.
    ///
    /// A capacity of 0 is allowed and caches nothing.
    pub fn new(capacity: usize, compute: F) -> Self
    where
        F: Compute<Args, Output = V>,
    {
        Self::from_parts(MemoTable::new(capacity), compute)
    }

    /// Creates an empty cache with [`DEFAULT_CAPACITY`].
    pub fn with_default_capacity(compute: F) -> Self
    where
        F: Compute<Args, Output = V>,
    {
        Self::new(DEFAULT_CAPACITY, compute)
    }

    /// Creates an empty cache around a fallible computation, for use with
    /// [`try_get`](Self::try_get).
    pub fn new_fallible(capacity: usize, compute: F) -> Self
    where
        F: TryCompute<Args, Output = V>,
    {
        Self::from_parts(MemoTable::new(capacity), compute)
    }

    /// Creates a cache around a closure, inferring `Args` from its signature.
    pub fn from_fn(capacity: usize, compute: F) -> Self
    where
        F: FnMut(&Args) -> V,
    {
        Self::from_parts(MemoTable::new(capacity), compute)
    }

    /// Creates a cache around a closure returning `Result`. Only the `Ok`
    /// value is cached.
    pub fn try_from_fn<E>(capacity: usize, compute: F) -> Self
    where
        F: FnMut(&Args) -> Result<V, E>,
    {
        Self::from_parts(MemoTable::new(capacity), compute)
    }
}

impl<Args, V, F, S: BuildHasher> BoundedMemoCache<Args, V, F, S> {
    /// Assembles a cache from a configured table and a computation.
    pub fn from_parts(table: MemoTable<V, S>, compute: F) -> Self {
        Self {
            table,
            compute,
            _args: PhantomData,
        }
    }

    /// Returns the result of the computation for `args`, from the cache when
    /// possible.
    ///
    /// On a miss the computation runs exactly once and its result becomes the
    /// most recently used entry. A panic in the computation leaves the cache
    /// as it was.
    pub fn get(&mut self, args: Args) -> V
    where
        Args: ArgTuple,
        F: Compute<Args, Output = V>,
        V: Clone,
    {
        let compute = &mut self.compute;
        self.table
            .get_or_insert_with(args, |args| <F as Compute<Args>>::compute(compute, args))
    }

    /// Like [`get`](Self::get) for a fallible computation.
    ///
    /// The computation's error is returned unchanged and nothing is cached
    /// for the attempt.
    pub fn try_get(&mut self, args: Args) -> Result<V, <F as TryCompute<Args>>::Error>
    where
        Args: ArgTuple,
        F: TryCompute<Args, Output = V>,
        V: Clone,
    {
        let compute = &mut self.compute;
        self.table.try_get_or_insert_with(args, |args| {
            <F as TryCompute<Args>>::try_compute(compute, args)
        })
    }

    /// Returns the cached value for `args` without running the computation
    /// or touching the entry.
    pub fn peek(&self, args: &Args) -> Option<&V>
    where
        Args: ArgTuple,
    {
        self.table.peek(args)
    }

    pub fn contains(&self, args: &Args) -> bool
    where
        Args: ArgTuple,
    {
        self.table.contains(args)
    }

    /// Changes the capacity. With the default lazy policy nothing is
    /// evicted until the next insertion.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.table.set_capacity(capacity);
    }

    /// Drops every cached result. The capacity is kept.
    pub fn reset(&mut self) {
        self.table.reset();
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn computation(&self) -> &F {
        &self.compute
    }

    /// Mutable access to the computation.
    ///
    /// Changing anything that affects its results makes cached values stale;
    /// call [`reset`](Self::reset) afterwards.
    pub fn computation_mut(&mut self) -> &mut F {
        &mut self.compute
    }

    pub fn table(&self) -> &MemoTable<V, S> {
        &self.table
    }

    pub fn into_parts(self) -> (MemoTable<V, S>, F) {
        (self.table, self.compute)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.table.check_invariants()
    }
}

impl<Args, V, F, S> fmt::Debug for BoundedMemoCache<Args, V, F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedMemoCache")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
