// ==============================================
// PROPERTY TESTS AGAINST A REFERENCE MODEL
// ==============================================
//
// Drives `MemoTable` with random operation sequences and compares it with a
// naive MRU-first vector after every step.

use memokit::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    SetCapacity(usize),
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0u8..32).prop_map(Op::Get),
        1 => (0usize..12).prop_map(Op::SetCapacity),
        1 => Just(Op::Reset),
    ]
}

/// Reference LRU: keys ordered most to least recently used.
struct Model {
    order: Vec<u8>,
    capacity: usize,
    policy: ShrinkPolicy,
}

impl Model {
    /// Returns `true` on a hit.
    fn get(&mut self, key: u8) -> bool {
        if let Some(pos) = self.order.iter().position(|&k| k == key) {
            self.order.remove(pos);
            self.order.insert(0, key);
            return true;
        }
        self.order.insert(0, key);
        match self.policy {
            ShrinkPolicy::Lazy => {
                if self.order.len() > self.capacity {
                    self.order.pop();
                }
            },
            ShrinkPolicy::Eager => self.order.truncate(self.capacity),
        }
        false
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.policy == ShrinkPolicy::Eager {
            self.order.truncate(capacity);
        }
    }
}

fn compute(key: &u8) -> u32 {
    u32::from(*key) * 7 + 1
}

fn run_against_model(policy: ShrinkPolicy, capacity: usize, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut table = MemoBuilder::new(capacity)
        .shrink_policy(policy)
        .build_table::<u32>();
    let mut model = Model {
        order: Vec::new(),
        capacity,
        policy,
    };

    for op in ops {
        match op {
            Op::Get(key) => {
                let mut computed = false;
                let value = table.get_or_insert_with(key, |k| {
                    computed = true;
                    compute(k)
                });
                prop_assert_eq!(value, compute(&key));
                let hit = model.get(key);
                prop_assert_eq!(computed, !hit);
            },
            Op::SetCapacity(c) => {
                table.set_capacity(c);
                model.set_capacity(c);
            },
            Op::Reset => {
                table.reset();
                model.order.clear();
            },
        }

        let expected: Vec<CacheKey> = model.order.iter().map(|k| table.key_for(k)).collect();
        let actual: Vec<CacheKey> = table.keys_by_recency().collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(table.check_invariants().is_ok());
    }
    Ok(())
}

proptest! {
    /// Lazy table behaves exactly like the reference model.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lazy_matches_model(
        capacity in 0usize..10,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        run_against_model(ShrinkPolicy::Lazy, capacity, ops)?;
    }

    /// Eager table behaves exactly like the reference model.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_eager_matches_model(
        capacity in 0usize..10,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        run_against_model(ShrinkPolicy::Eager, capacity, ops)?;
    }

    /// len() never exceeds capacity when the capacity is never lowered.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_len_within_capacity(
        capacity in 0usize..50,
        keys in prop::collection::vec((0u16..500, 0u16..500), 0..300)
    ) {
        let mut cache = BoundedMemoCache::from_fn(capacity, |packed: &u32| packed.rotate_left(7));
        for (a, b) in keys {
            let packed = u32::from(a) << 16 | u32::from(b);
            prop_assert_eq!(cache.get(packed), packed.rotate_left(7));
            prop_assert!(cache.len() <= cache.capacity());
        }
    }

    /// A key read twice in a row is a hit the second time.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_immediate_reread_hits(
        capacity in 1usize..20,
        keys in prop::collection::vec(any::<u32>(), 1..100)
    ) {
        let mut table = MemoTable::<u64>::new(capacity);
        for key in keys {
            table.get_or_insert_with(key, |k| u64::from(*k));
            let mut recomputed = false;
            table.get_or_insert_with(key, |k| {
                recomputed = true;
                u64::from(*k)
            });
            prop_assert!(!recomputed);
        }
    }

    /// Reset always empties the table and keeps the capacity.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_reset_empties(
        capacity in 0usize..30,
        keys in prop::collection::vec(any::<i16>(), 0..60),
        resets in 1usize..4
    ) {
        let mut table = MemoTable::<i32>::new(capacity);
        for key in keys {
            table.get_or_insert_with(key, |k| i32::from(*k));
        }
        for _ in 0..resets {
            table.reset();
        }
        prop_assert!(table.is_empty());
        prop_assert_eq!(table.capacity(), capacity);
        prop_assert!(table.check_invariants().is_ok());
    }
}
