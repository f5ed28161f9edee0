#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Pairs of bytes pick an operation and an operand: push_front, pop_back,
// touch, remove, get_mut, clear.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                let id = list.push_front(value);
                ids.push(id);
                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.get(id), Some(&value));
            },
            1 => {
                let old_len = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            },
            2 => {
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    if list.touch(id) {
                        assert_eq!(list.front_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            },
            3 => {
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            },
            4 => {
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    let front = list.front_id();
                    if let Some(v) = list.get_mut(id) {
                        *v = v.wrapping_add(1);
                    }
                    assert_eq!(list.front_id(), front);
                }
            },
            5 => {
                list.clear();
                ids.clear();
                assert!(list.is_empty());
            },
            _ => unreachable!(),
        }

        assert!(list.check_invariants().is_ok());
        assert_eq!(list.iter().count(), list.len());
    }
});
