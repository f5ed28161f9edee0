#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::builder::{MemoBuilder, ShrinkPolicy};

// Fuzz arbitrary operation sequences on MemoTable
//
// The first byte picks the shrink policy and initial capacity; the rest are
// (op, operand) pairs driving lookups, stores, capacity changes and resets.
fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let policy = if head & 0x80 == 0 {
        ShrinkPolicy::Lazy
    } else {
        ShrinkPolicy::Eager
    };
    let mut table = MemoBuilder::new(usize::from(head & 0x0f))
        .shrink_policy(policy)
        .build_table::<u16>();

    for pair in rest.chunks_exact(2) {
        let op = pair[0] % 5;
        let arg = pair[1];

        match op {
            0 => {
                let v = table.get_or_insert_with(arg, |a| u16::from(*a) * 3);
                assert_eq!(v, u16::from(arg) * 3);
            },
            1 => {
                let v = table
                    .get_or_insert_with((arg, arg >> 1), |&(a, b)| u16::from(a) + u16::from(b));
                assert_eq!(v, u16::from(arg) + u16::from(arg >> 1));
            },
            2 => {
                let key = table.key_for(&arg);
                table.store(key, u16::from(arg) * 3);
                if table.capacity() > 0 {
                    assert_eq!(table.peek(&arg), Some(&(u16::from(arg) * 3)));
                }
            },
            3 => {
                table.set_capacity(usize::from(arg % 16));
                if policy == ShrinkPolicy::Eager {
                    assert!(table.len() <= table.capacity());
                }
            },
            4 => {
                table.reset();
                assert!(table.is_empty());
            },
            _ => unreachable!(),
        }

        if policy == ShrinkPolicy::Eager {
            assert!(table.len() <= table.capacity());
        }
        assert!(table.check_invariants().is_ok());
    }
});
