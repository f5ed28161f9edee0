//! # Computation Capabilities
//!
//! A memo cache is generic over the computation it wraps. Anything that can
//! turn an argument tuple into a value implements [`Compute`]; anything that
//! can fail doing so implements [`TryCompute`]. Closures get both for free.
//!
//! ```text
//!   ┌──────────────────────────────┐      ┌──────────────────────────────┐
//!   │        Compute<Args>         │      │       TryCompute<Args>       │
//!   │                              │      │                              │
//!   │  type Output                 │      │  type Output                 │
//!   │  compute(&mut, &Args)        │      │  type Error                  │
//!   │      → Output                │      │  try_compute(&mut, &Args)    │
//!   │                              │      │      → Result<Output, Error> │
//!   └──────────────┬───────────────┘      └──────────────┬───────────────┘
//!                  │ blanket                             │ blanket
//!        FnMut(&Args) -> V                     FnMut(&Args) -> Result<V, E>
//! ```
//!
//! The computation must be a pure function of its arguments. The cache
//! calls it at most once per distinct key while the entry stays resident and
//! never re-invokes it for a cached key, so side effects would be skipped on
//! every hit.
//!
//! ## Implementing for a type
//!
//! ```
//! use memokit::cache::BoundedMemoCache;
//! use memokit::traits::Compute;
//!
//! struct TriSum;
//!
//! impl Compute<(i32, i32, i32)> for TriSum {
//!     type Output = i32;
//!
//!     fn compute(&mut self, &(x, y, z): &(i32, i32, i32)) -> i32 {
//!         x + y + z
//!     }
//! }
//!
//! let mut tri_sum = BoundedMemoCache::new(2, TriSum);
//! assert_eq!(tri_sum.get((0, 1, 2)), 3);
//! ```

/// A pure computation from an argument tuple to a value.
pub trait Compute<Args: ?Sized> {
    type Output;

    fn compute(&mut self, args: &Args) -> Self::Output;
}

/// A pure computation that may fail.
///
/// A failure is handed back to the caller unchanged and nothing is cached
/// for the attempt.
pub trait TryCompute<Args: ?Sized> {
    type Output;
    type Error;

    fn try_compute(&mut self, args: &Args) -> Result<Self::Output, Self::Error>;
}

impl<Args, V, F> Compute<Args> for F
where
    Args: ?Sized,
    F: FnMut(&Args) -> V,
{
    type Output = V;

    #[inline]
    fn compute(&mut self, args: &Args) -> V {
        self(args)
    }
}

impl<Args, V, E, F> TryCompute<Args> for F
where
    Args: ?Sized,
    F: FnMut(&Args) -> Result<V, E>,
{
    type Output = V;
    type Error = E;

    #[inline]
    fn try_compute(&mut self, args: &Args) -> Result<V, E> {
        self(args)
    }
}
