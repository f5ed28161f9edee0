//! Slot storage for memo entries.
//!
//! Every entry of a memo table lives in one slot of a `Vec`. A vacated slot
//! keeps the index of the next vacant slot, so the free chain is threaded
//! through the storage itself and an insert after an eviction reuses memory
//! instead of growing. A [`SlotId`] names an occupied slot until that slot is
//! vacated; the key index and the recency list both hold `SlotId`s instead of
//! pointers.
//!
//! `clear` drops the values but keeps the allocation, which is what a memo
//! table wants on `reset`: it usually refills to the same size.

use std::ops::{Index, IndexMut};

/// Handle to an occupied slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Position of the slot in the arena's backing storage.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_vacant: Option<usize> },
}

/// Growable slot storage with an embedded free chain.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    first_vacant: Option<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Reserves room for `capacity` entries up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            first_vacant: None,
            occupied: 0,
        }
    }

    /// Places `value` in the most recently vacated slot, or a new one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        let Some(idx) = self.first_vacant else {
            self.slots.push(Slot::Occupied(value));
            return SlotId(self.slots.len() - 1);
        };
        if let Slot::Vacant { next_vacant } = &self.slots[idx] {
            self.first_vacant = *next_vacant;
        }
        self.slots[idx] = Slot::Occupied(value);
        SlotId(idx)
    }

    /// Vacates the slot and hands back its value; `None` if it was not occupied.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacated = std::mem::replace(
            slot,
            Slot::Vacant {
                next_vacant: self.first_vacant,
            },
        );
        self.first_vacant = Some(id.0);
        self.occupied -= 1;
        match vacated {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Drops every value; the backing allocation is kept. All ids become stale.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.first_vacant = None;
        self.occupied = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics on a stale or foreign id, like slice indexing.
impl<T> Index<SlotId> for SlotArena<T> {
    type Output = T;

    fn index(&self, id: SlotId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("stale SlotId {}", id.0),
        }
    }
}

impl<T> IndexMut<SlotId> for SlotArena<T> {
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("stale SlotId {}", id.0),
        }
    }
}
