//! Cache keys derived from argument tuples.
//!
//! A call's key is the XOR-fold of the per-argument hashes:
//!
//! ```text
//!   h(a0)              = hash(a0)
//!   h(a0, a1, ..., an) = hash(a0) ^ h(a1, ..., an)
//! ```
//!
//! Each argument is hashed on its own with a fresh hasher from the table's
//! [`BuildHasher`], so equal values always give equal keys for as long as
//! the hasher state lives. The fold is cheap and deterministic but not
//! collision resistant:
//!
//! - permutations collide: `(1, 2)` and `(2, 1)` share a key
//! - equal pairs cancel: `(x, x, z)` shares a key with `(y, y, z)` and `(z,)`
//!
//! Two argument tuples with the same key are the same cache entry. Callers
//! whose arguments are adversarial or order-sensitive in that way should pack
//! them into a single struct deriving `Hash` and pass that as a one-element
//! argument.

use std::hash::{BuildHasher, Hash};

pub use rustc_hash::FxBuildHasher;

/// Hasher used when a table is built without an explicit [`BuildHasher`].
pub type DefaultHashBuilder = FxBuildHasher;

/// Composite hash of an argument tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(u64);

impl CacheKey {
    /// Key of the empty argument list, and the identity of the fold.
    pub const EMPTY: CacheKey = CacheKey(0);

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        CacheKey(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// An ordered argument list that can be folded into a [`CacheKey`].
///
/// Implemented for tuples of up to twelve `Hash` elements, for the unit
/// tuple, and for common scalar types so that single-argument computations
/// can take the bare value. A scalar and its one-element tuple produce the
/// same key.
pub trait ArgTuple {
    fn combine_hash<S: BuildHasher>(&self, build: &S) -> CacheKey;
}

impl<T: ArgTuple + ?Sized> ArgTuple for &T {
    #[inline]
    fn combine_hash<S: BuildHasher>(&self, build: &S) -> CacheKey {
        (**self).combine_hash(build)
    }
}

impl ArgTuple for () {
    #[inline]
    fn combine_hash<S: BuildHasher>(&self, _build: &S) -> CacheKey {
        CacheKey::EMPTY
    }
}

macro_rules! impl_arg_tuple {
    ($($name:ident)+) => {
        impl<$($name: Hash),+> ArgTuple for ($($name,)+) {
            #[inline]
            #[allow(non_snake_case)]
            fn combine_hash<S: BuildHasher>(&self, build: &S) -> CacheKey {
                let ($($name,)+) = self;
                CacheKey(0 $(^ build.hash_one($name))+)
            }
        }
    };
}

impl_arg_tuple!(A);
impl_arg_tuple!(A B);
impl_arg_tuple!(A B C);
impl_arg_tuple!(A B C D);
impl_arg_tuple!(A B C D E);
impl_arg_tuple!(A B C D E F);
impl_arg_tuple!(A B C D E F G);
impl_arg_tuple!(A B C D E F G H);
impl_arg_tuple!(A B C D E F G H I);
impl_arg_tuple!(A B C D E F G H I J);
impl_arg_tuple!(A B C D E F G H I J K);
impl_arg_tuple!(A B C D E F G H I J K L);

macro_rules! impl_arg_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ArgTuple for $ty {
                #[inline]
                fn combine_hash<S: BuildHasher>(&self, build: &S) -> CacheKey {
                    CacheKey(build.hash_one(self))
                }
            }
        )+
    };
}

impl_arg_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, str, String,
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::RandomState;

    fn key<A: ArgTuple + ?Sized>(args: &A) -> CacheKey {
        args.combine_hash(&DefaultHashBuilder::default())
    }

    #[test]
    fn equal_tuples_share_a_key() {
        assert_eq!(key(&(0, 1, 2)), key(&(0, 1, 2)));
        assert_eq!(
            key(&(String::from("a"), 3u32, -4i64)),
            key(&(String::from("a"), 3u32, -4i64))
        );
    }

    #[test]
    fn distinct_tuples_usually_differ() {
        assert_ne!(key(&(0, 1, 2)), key(&(1, 2, 3)));
        assert_ne!(key(&(5,)), key(&(7,)));
    }

    #[test]
    fn scalar_matches_single_element_tuple() {
        assert_eq!(key(&5i32), key(&(5i32,)));
        assert_eq!(key(&"abc"), key(&("abc",)));
        assert_eq!(key("abc"), key(&String::from("abc")));
    }

    #[test]
    fn key_is_xor_of_argument_hashes() {
        let build = DefaultHashBuilder::default();
        let expected = build.hash_one(1u8) ^ build.hash_one("two") ^ build.hash_one(3i64);
        assert_eq!((1u8, "two", 3i64).combine_hash(&build).raw(), expected);
    }

    #[test]
    fn permutations_collide() {
        assert_eq!(key(&(1, 2)), key(&(2, 1)));
        assert_eq!(key(&(1, 2, 3)), key(&(3, 1, 2)));
    }

    #[test]
    fn equal_pairs_cancel() {
        assert_eq!(key(&(4, 4)), CacheKey::EMPTY);
        assert_eq!(key(&(4, 4)), key(&(9, 9)));
        assert_eq!(key(&(4, 4, 7)), key(&(7,)));
        assert_eq!(key(&()), CacheKey::EMPTY);
    }

    #[test]
    fn stable_for_one_hasher_instance() {
        let build = RandomState::new();
        let a = ("x", 1u64).combine_hash(&build);
        let b = ("x", 1u64).combine_hash(&build);
        assert_eq!(a, b);
    }

    #[test]
    fn twelve_element_tuple_is_supported() {
        let args = (1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12u8);
        assert_eq!(key(&args), key(&args));
    }

    #[test]
    fn raw_round_trip() {
        assert_eq!(CacheKey::from_raw(42).raw(), 42);
    }
}
