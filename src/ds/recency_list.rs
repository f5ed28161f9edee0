//! Recency-ordered doubly linked list backed by a [`SlotArena`].
//!
//! Nodes live in the arena and link to each other by [`SlotId`], so a handle
//! obtained from [`RecencyList::push_front`] stays valid while the node is in
//! the list and can be used to relink it in O(1).
//!
//! ```text
//!   head (MRU) ─► [id_3] ◄──► [id_1] ◄──► [id_2] ◄── tail (LRU)
//! ```
//!
//! - `push_front`: O(1)
//! - `pop_back`: O(1)
//! - `touch`: O(1), no-op when the node is already the head
//! - `iter`: O(n), front to back

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Linked list ordered from most to least recently used.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with node storage reserved up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Most recently used value.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|id| &self.arena[id].value)
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Least recently used value.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|id| &self.arena[id].value)
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Links `value` in as the new head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => self.arena[old_head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Unlinks the tail and returns its value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks `id` and returns its value; `None` if `id` is not in the list.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves `id` to the head. Returns `false` if `id` is not in the list.
    pub fn touch(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from head (MRU) to tail (LRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Walks the links and checks them against the arena.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.arena.is_empty() {
                return Err(InvariantError::recency_list(
                    "head/tail disagree on emptiness with the arena",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| {
                    InvariantError::recency_list(format!("dangling link to slot {}", id.0))
                })?;
            if node.prev != prev {
                return Err(InvariantError::recency_list(format!(
                    "slot {} has a back link that does not match its predecessor",
                    id.0
                )));
            }
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::recency_list("cycle in recency list"));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::recency_list("last reachable node is not the tail"));
            }
            prev = Some(id);
            current = node.next;
        }

        if count != self.arena.len() {
            return Err(InvariantError::recency_list(format!(
                "{} nodes reachable but arena holds {}",
                count,
                self.arena.len()
            )));
        }
        Ok(())
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => self.arena[prev_id].next = next,
            None => self.head = next,
        }
        match next {
            Some(next_id) => self.arena[next_id].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.arena[id];
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        {
            let node = &mut self.arena[id];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.arena[old_head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.arena.get(self.current?)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &RecencyList<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_mru_first() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(order(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        list.check_invariants().unwrap();
    }

    #[test]
    fn touch_moves_middle_and_tail_to_front() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        list.push_front(3);

        assert!(list.touch(b));
        assert_eq!(order(&list), vec![2, 3, 1]);
        list.check_invariants().unwrap();

        assert!(list.touch(a));
        assert_eq!(order(&list), vec![1, 2, 3]);
        assert_eq!(list.front_id(), Some(a));
        list.check_invariants().unwrap();
    }

    #[test]
    fn touch_head_is_noop() {
        let mut list = RecencyList::new();
        list.push_front(1);
        let head = list.push_front(2);
        assert!(list.touch(head));
        assert_eq!(order(&list), vec![2, 1]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn touch_stale_id_returns_false() {
        let mut list = RecencyList::new();
        let id = list.push_front(1);
        assert_eq!(list.remove(id), Some(1));
        assert!(!list.touch(id));
        assert!(list.is_empty());
    }

    #[test]
    fn pop_back_drains_lru_first() {
        let mut list = RecencyList::new();
        for v in 1..=3 {
            list.push_front(v);
        }
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.back_id(), list.front_id());
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_single_node_resets_ends() {
        let mut list = RecencyList::with_capacity(1);
        let id = list.push_front(9);
        assert_eq!(list.remove(id), Some(9));
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn get_mut_overwrites_value_without_reordering() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.push_front(2);
        if let Some(v) = list.get_mut(a) {
            *v = 10;
        }
        assert_eq!(order(&list), vec![2, 10]);
    }

    #[test]
    fn clear_empties_list() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.check_invariants().unwrap();
    }
}
