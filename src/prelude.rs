pub use crate::builder::{MemoBuilder, ShrinkPolicy, DEFAULT_CAPACITY};
pub use crate::cache::BoundedMemoCache;
pub use crate::error::{InvariantError, Structure};
pub use crate::key::{ArgTuple, CacheKey};
pub use crate::table::MemoTable;
pub use crate::traits::{Compute, TryCompute};
