//! # Bounded LRU Memo Table
//!
//! The engine behind [`BoundedMemoCache`](crate::cache::BoundedMemoCache):
//! a key index plus a recency list, with no computation attached. Types
//! that want to keep their computation as an inherent method embed a
//! `MemoTable` as a field and route calls through
//! [`get_or_insert_with`](MemoTable::get_or_insert_with).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        MemoTable<V, S>                           │
//!   │                                                                  │
//!   │   args ──► ArgTuple::combine_hash(&S) ──► CacheKey               │
//!   │                                                                  │
//!   │   ┌────────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<CacheKey, SlotId>  (key index)                  │ │
//!   │   │   k_a ─────────────┐   k_b ───────────┐   k_c ──────┐      │ │
//!   │   └────────────────────┼──────────────────┼─────────────┼──────┘ │
//!   │                        ▼                  ▼             ▼        │
//!   │   ┌────────────────────────────────────────────────────────────┐ │
//!   │   │  RecencyList<Entry<V>>                                     │ │
//!   │   │  head ──► [k_b, v] ◄──► [k_a, v] ◄──► [k_c, v] ◄── tail    │ │
//!   │   │           (MRU)                        (LRU)               │ │
//!   │   └────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method                  | Complexity | Description                            |
//! |-------------------------|------------|----------------------------------------|
//! | `get_or_insert_with`    | O(1)*      | Hit: touch + clone. Miss: compute + store |
//! | `lookup(key)`           | O(1)       | Hit path only, touches                 |
//! | `store(key, v)`         | O(1)*      | Overwrite + touch, or insert + evict   |
//! | `peek` / `contains`     | O(1)       | No recency update                      |
//! | `set_capacity`          | O(1)†      | Lazy by default                        |
//! | `reset`                 | O(n)       | Drops all entries, keeps capacity      |
//!
//! \* plus the cost of hashing the arguments. † O(evicted) under
//! [`ShrinkPolicy::Eager`].
//!
//! ## Capacity
//!
//! After an insertion that leaves more entries than the capacity, the LRU
//! entry is evicted. A capacity of 0 therefore caches nothing: the entry
//! just stored is the only one and is evicted straight away.
//!
//! Lowering the capacity with the default [`ShrinkPolicy::Lazy`] evicts
//! nothing, and each later overflowing insertion evicts one entry, so the
//! entry count stays where it was until [`reset`](MemoTable::reset).
//! [`ShrinkPolicy::Eager`] evicts down to the bound immediately.
//!
//! ## Example
//!
//! ```
//! use memokit::table::MemoTable;
//!
//! struct PlusOne {
//!     memo: MemoTable<i32>,
//! }
//!
//! impl PlusOne {
//!     fn compute(x: &i32) -> i32 {
//!         x + 1
//!     }
//!
//!     fn call(&mut self, x: i32) -> i32 {
//!         self.memo.get_or_insert_with(x, Self::compute)
//!     }
//! }
//!
//! let mut plus_one = PlusOne { memo: MemoTable::new(1) };
//! assert_eq!(plus_one.call(5), 6);
//! assert_eq!(plus_one.call(7), 8);
//! assert!(!plus_one.memo.contains(&5));
//! ```

use std::fmt;
use std::hash::BuildHasher;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::{ShrinkPolicy, DEFAULT_CAPACITY};
use crate::ds::{RecencyList, SlotId};
use crate::error::InvariantError;
use crate::key::{ArgTuple, CacheKey, DefaultHashBuilder};

/// Upper bound on storage reserved at construction time.
const MAX_PREALLOC: usize = 4096;

#[derive(Debug)]
struct Entry<V> {
    key: CacheKey,
    value: V,
}

/// Bounded LRU map from [`CacheKey`] to cached value.
pub struct MemoTable<V, S = DefaultHashBuilder> {
    index: FxHashMap<CacheKey, SlotId>,
    recency: RecencyList<Entry<V>>,
    capacity: usize,
    policy: ShrinkPolicy,
    hash_builder: S,
}

impl<V> MemoTable<V> {
    /// Creates an empty table with the default hasher and lazy shrinking.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<V> Default for MemoTable<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V, S: BuildHasher> MemoTable<V, S> {
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_policy(capacity, ShrinkPolicy::default(), hash_builder)
    }

    pub fn with_policy(capacity: usize, policy: ShrinkPolicy, hash_builder: S) -> Self {
        let reserve = capacity.saturating_add(1).min(MAX_PREALLOC);
        Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            recency: RecencyList::with_capacity(reserve),
            capacity,
            policy,
            hash_builder,
        }
    }

    /// Folds `args` into the key this table would store them under.
    #[inline]
    pub fn key_for<A: ArgTuple + ?Sized>(&self, args: &A) -> CacheKey {
        args.combine_hash(&self.hash_builder)
    }

    /// Returns the cached value for `args`, computing and storing it on a miss.
    ///
    /// `compute` runs only on a miss. If it panics nothing is stored.
    pub fn get_or_insert_with<A, F>(&mut self, args: A, compute: F) -> V
    where
        A: ArgTuple,
        F: FnOnce(&A) -> V,
        V: Clone,
    {
        let key = self.key_for(&args);
        if let Some(value) = self.lookup(key) {
            return value.clone();
        }
        let value = compute(&args);
        self.insert_new(key, value.clone());
        value
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// An `Err` from `compute` is returned as is and leaves the table
    /// exactly as it was.
    pub fn try_get_or_insert_with<A, E, F>(&mut self, args: A, compute: F) -> Result<V, E>
    where
        A: ArgTuple,
        F: FnOnce(&A) -> Result<V, E>,
        V: Clone,
    {
        let key = self.key_for(&args);
        if let Some(value) = self.lookup(key) {
            return Ok(value.clone());
        }
        let value = compute(&args)?;
        self.insert_new(key, value.clone());
        Ok(value)
    }

    /// Hit path: touches the entry for `key` and returns its value.
    pub fn lookup(&mut self, key: CacheKey) -> Option<&V> {
        let id = *self.index.get(&key)?;
        self.recency.touch(id);
        self.recency.get(id).map(|entry| &entry.value)
    }

    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// An existing entry is touched and its value overwritten; otherwise a
    /// new entry is linked in and the capacity enforced.
    pub fn store(&mut self, key: CacheKey, value: V) {
        if let Some(&id) = self.index.get(&key) {
            self.recency.touch(id);
            if let Some(entry) = self.recency.get_mut(id) {
                entry.value = value;
            }
            return;
        }
        self.insert_new(key, value);
    }

    /// Returns the cached value for `args` without touching it.
    pub fn peek<A: ArgTuple + ?Sized>(&self, args: &A) -> Option<&V> {
        self.peek_key(self.key_for(args))
    }

    pub fn peek_key(&self, key: CacheKey) -> Option<&V> {
        let id = *self.index.get(&key)?;
        self.recency.get(id).map(|entry| &entry.value)
    }

    /// Returns `true` if `args` has a resident entry. Does not touch it.
    pub fn contains<A: ArgTuple + ?Sized>(&self, args: &A) -> bool {
        self.contains_key(self.key_for(args))
    }

    pub fn contains_key(&self, key: CacheKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Drops every entry. The capacity is kept.
    pub fn reset(&mut self) {
        if !self.index.is_empty() {
            debug!(entries = self.index.len(), "resetting memo table");
        }
        self.index.clear();
        self.recency.clear();
    }

    /// Changes the capacity. See the module docs for how resident entries
    /// are treated under each [`ShrinkPolicy`].
    pub fn set_capacity(&mut self, capacity: usize) {
        debug!(
            from = self.capacity,
            to = capacity,
            policy = ?self.policy,
            "memo table capacity changed"
        );
        self.capacity = capacity;
        if self.policy == ShrinkPolicy::Eager {
            let mut evicted = 0usize;
            while self.index.len() > self.capacity && self.evict_lru().is_some() {
                evicted += 1;
            }
            if evicted > 0 {
                debug!(evicted, "eager shrink evicted entries");
            }
        }
    }

    /// Evicts and returns the key of the least recently used entry.
    pub fn evict_lru(&mut self) -> Option<CacheKey> {
        let entry = self.recency.pop_back()?;
        self.index.remove(&entry.key);
        trace!(key = entry.key.raw(), "evicted least recently used entry");
        Some(entry.key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shrink_policy(&self) -> ShrinkPolicy {
        self.policy
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Resident keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = CacheKey> + '_ {
        self.recency.iter().map(|entry| entry.key)
    }

    /// Checks that the key index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.recency.check_invariants()?;
        if self.index.len() != self.recency.len() {
            return Err(InvariantError::key_index(format!(
                "index holds {} keys but recency list holds {} entries",
                self.index.len(),
                self.recency.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.recency.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(entry) => {
                    return Err(InvariantError::key_index(format!(
                        "key {:#x} points at entry for {:#x}",
                        key.raw(),
                        entry.key.raw()
                    )));
                },
                None => {
                    return Err(InvariantError::key_index(format!(
                        "key {:#x} points at a freed slot",
                        key.raw()
                    )));
                },
            }
        }
        Ok(())
    }

    fn insert_new(&mut self, key: CacheKey, value: V) {
        let id = self.recency.push_front(Entry { key, value });
        self.index.insert(key, id);
        match self.policy {
            ShrinkPolicy::Lazy => {
                if self.index.len() > self.capacity {
                    self.evict_lru();
                }
            },
            ShrinkPolicy::Eager => {
                while self.index.len() > self.capacity && self.evict_lru().is_some() {}
            },
        }
    }
}

impl<V, S> fmt::Debug for MemoTable<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoTable")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
