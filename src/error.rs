//! Error types for memokit.
//!
//! The cache itself has no fallible operations: a failing computation hands
//! its own error back through [`try_get`](crate::cache::BoundedMemoCache::try_get)
//! untouched. The only error defined here reports a broken internal
//! invariant, found by the `check_invariants` methods.
//!
//! ```
//! use memokit::table::MemoTable;
//!
//! let mut table: MemoTable<u32> = MemoTable::new(4);
//! table.get_or_insert_with((1u32, 2u32), |&(a, b)| a + b);
//! assert!(table.check_invariants().is_ok());
//! ```

use std::fmt;

/// The internal structure whose consistency check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    /// Links, head/tail or node count of the recency list.
    RecencyList,
    /// Agreement between the key index and the recency list entries.
    KeyIndex,
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Structure::RecencyList => f.write_str("recency list"),
            Structure::KeyIndex => f.write_str("key index"),
        }
    }
}

/// A broken internal invariant, reported by the `check_invariants` methods.
///
/// Displays as `"<structure>: <detail>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError {
    structure: Structure,
    detail: String,
}

impl InvariantError {
    pub(crate) fn recency_list(detail: impl Into<String>) -> Self {
        Self {
            structure: Structure::RecencyList,
            detail: detail.into(),
        }
    }

    pub(crate) fn key_index(detail: impl Into<String>) -> Self {
        Self {
            structure: Structure::KeyIndex,
            detail: detail.into(),
        }
    }

    /// Which structure is inconsistent.
    pub fn structure(&self) -> Structure {
        self.structure
    }

    /// What exactly disagrees.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.structure, self.detail)
    }
}

impl std::error::Error for InvariantError {}
