//! Configuration for memo tables and caches.
//!
//! ```rust
//! use memokit::builder::{MemoBuilder, ShrinkPolicy};
//!
//! let mut digit_count = MemoBuilder::new(64)
//!     .shrink_policy(ShrinkPolicy::Eager)
//!     .build_fn(|n: &u64| n.to_string().len());
//!
//! assert_eq!(digit_count.get(12345), 5);
//! assert_eq!(digit_count.capacity(), 64);
//! ```

use std::hash::BuildHasher;

use crate::cache::BoundedMemoCache;
use crate::key::DefaultHashBuilder;
use crate::table::MemoTable;
use crate::traits::Compute;

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 20;

/// What happens to resident entries when the capacity is lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShrinkPolicy {
    /// Lowering the capacity evicts nothing. Each later insertion that
    /// overflows evicts a single LRU entry, so the entry count only drops to
    /// the new bound through `reset`.
    #[default]
    Lazy,
    /// Lowering the capacity evicts LRU entries until the bound holds, and
    /// every insertion keeps it holding.
    Eager,
}

/// Builder for [`MemoTable`] and [`BoundedMemoCache`].
#[derive(Debug, Clone)]
pub struct MemoBuilder<S = DefaultHashBuilder> {
    capacity: usize,
    policy: ShrinkPolicy,
    hash_builder: S,
}

impl MemoBuilder {
    /// Starts a builder for the given capacity with the default hasher.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: ShrinkPolicy::default(),
            hash_builder: DefaultHashBuilder::default(),
        }
    }
}

impl Default for MemoBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<S: BuildHasher> MemoBuilder<S> {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn shrink_policy(mut self, policy: ShrinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the hasher used to hash each argument.
    ///
    /// Keys are only comparable within one hasher state, so the builder
    /// moves the state into the table it builds.
    pub fn hasher<S2: BuildHasher>(self, hash_builder: S2) -> MemoBuilder<S2> {
        MemoBuilder {
            capacity: self.capacity,
            policy: self.policy,
            hash_builder,
        }
    }

    pub fn build_table<V>(self) -> MemoTable<V, S> {
        MemoTable::with_policy(self.capacity, self.policy, self.hash_builder)
    }

    /// Builds a cache around any [`Compute`] implementation.
    pub fn build<Args, F>(self, compute: F) -> BoundedMemoCache<Args, F::Output, F, S>
    where
        F: Compute<Args>,
    {
        BoundedMemoCache::from_parts(self.build_table(), compute)
    }

    /// Like [`build`](Self::build), with closure argument inference.
    pub fn build_fn<Args, V, F>(self, compute: F) -> BoundedMemoCache<Args, V, F, S>
    where
        F: FnMut(&Args) -> V,
    {
        BoundedMemoCache::from_parts(self.build_table(), compute)
    }
}
