//! memokit: bounded LRU memoization for pure computations.
//!
//! A computation is anything implementing [`traits::Compute`] (closures
//! included). [`cache::BoundedMemoCache`] wraps one and caches its results
//! keyed by the hash of the argument tuple, evicting the least recently used
//! entry once the capacity is exceeded. [`table::MemoTable`] is the same
//! engine without a bound computation.
//!
//! ```
//! use memokit::prelude::*;
//!
//! let mut plus_one = BoundedMemoCache::from_fn(1, |x: &i32| x + 1);
//! assert_eq!(plus_one.get(5), 6);
//! assert_eq!(plus_one.get(7), 8); // evicts 5
//! assert!(!plus_one.contains(&5));
//! ```

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod key;
pub mod prelude;
pub mod table;
pub mod traits;
