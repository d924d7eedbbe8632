//! Recency-ordered entry list for `LruCache`.
//!
//! Entries sit in a slot vector and link to each other by [`SlotId`]. A
//! handle returned by [`RecencyList::push_mru`] stays valid until that entry
//! leaves the list, which is what lets the cache index store handles instead
//! of entries. Vacated slots are recycled before the vector grows, so a list
//! that never holds more than `n` entries never allocates more than `n`
//! slots.
//!
//! ```text
//!   lru ─► [k1, v1] ◄──► [k2, v2] ◄──► [k3, v3] ◄─ mru
//! ```
//!
//! ## Performance
//! - `push_mru` / `pop_lru` / `touch` / `remove`: O(1)
//! - `iter`: O(n), LRU to MRU

use std::ops::Index;

/// Stable handle to an entry in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

/// A cached key and its value.
#[derive(Debug, PartialEq)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

struct Node<K, V> {
    entry: Entry<K, V>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    vacant: Vec<SlotId>,
    lru: Option<SlotId>,
    mru: Option<SlotId>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            lru: None,
            mru: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The entry the next `pop_lru` would return.
    pub(crate) fn lru(&self) -> Option<&Entry<K, V>> {
        self.lru.and_then(|id| self.node(id)).map(|node| &node.entry)
    }

    pub(crate) fn entry_mut(&mut self, id: SlotId) -> Option<&mut Entry<K, V>> {
        self.node_mut(id).map(|node| &mut node.entry)
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.lru,
        }
    }

    /// Adds an entry at the MRU end.
    pub(crate) fn push_mru(&mut self, key: K, value: V) -> SlotId {
        let node = Node {
            entry: Entry { key, value },
            prev: None,
            next: None,
        };
        let id = match self.vacant.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            },
            None => {
                self.slots.push(Some(node));
                SlotId(self.slots.len() - 1)
            },
        };
        self.len += 1;
        self.link_mru(id);
        id
    }

    /// Moves `id` to the MRU end. Stale ids are ignored.
    pub(crate) fn touch(&mut self, id: SlotId) {
        if self.mru == Some(id) || self.node(id).is_none() {
            return;
        }
        self.unlink(id);
        self.link_mru(id);
    }

    pub(crate) fn pop_lru(&mut self) -> Option<Entry<K, V>> {
        let id = self.lru?;
        self.remove(id)
    }

    pub(crate) fn remove(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        self.unlink(id);
        let node = self.slots.get_mut(id.0)?.take()?;
        self.vacant.push(id);
        self.len -= 1;
        Some(node.entry)
    }

    /// Drops every entry and releases the slots. Outstanding ids go stale.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
        self.lru = None;
        self.mru = None;
        self.len = 0;
    }

    fn node(&self, id: SlotId) -> Option<&Node<K, V>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    // `at = None` means "before the LRU end", so `next` becomes the new LRU.
    fn set_next(&mut self, at: Option<SlotId>, next: Option<SlotId>) {
        match at {
            Some(id) => {
                if let Some(node) = self.node_mut(id) {
                    node.next = next;
                }
            },
            None => self.lru = next,
        }
    }

    // `at = None` means "after the MRU end", so `prev` becomes the new MRU.
    fn set_prev(&mut self, at: Option<SlotId>, prev: Option<SlotId>) {
        match at {
            Some(id) => {
                if let Some(node) = self.node_mut(id) {
                    node.prev = prev;
                }
            },
            None => self.mru = prev,
        }
    }

    fn unlink(&mut self, id: SlotId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let (prev, next) = (node.prev.take(), node.next.take());
        self.set_next(prev, next);
        self.set_prev(next, prev);
    }

    fn link_mru(&mut self, id: SlotId) {
        let old_mru = self.mru;
        if let Some(node) = self.node_mut(id) {
            node.prev = old_mru;
            node.next = None;
        }
        self.set_next(old_mru, Some(id));
        self.mru = Some(id);
    }

    /// Slots allocated so far, occupied or vacant.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn allocated_slots(&self) -> usize {
        self.slots.len()
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        let mut walked = 0usize;
        let mut expected_prev = None;
        let mut cursor = self.lru;
        while let Some(id) = cursor {
            assert!(walked < self.len, "walk longer than len: cycle");
            let node = &self.slots[id.0];
            let Some(node) = node else {
                panic!("vacant slot {} is linked", id.0);
            };
            assert_eq!(node.prev, expected_prev, "broken back link at {}", id.0);
            expected_prev = Some(id);
            cursor = node.next;
            walked += 1;
        }
        assert_eq!(walked, self.len);
        assert_eq!(self.mru, expected_prev);
        assert_eq!(self.slots.len(), self.len + self.vacant.len());
        for id in &self.vacant {
            assert!(self.slots[id.0].is_none(), "slot {} both vacant and used", id.0);
        }
    }
}

impl<K, V> Index<SlotId> for RecencyList<K, V> {
    type Output = Entry<K, V>;

    /// # Panics
    ///
    /// Panics if `id` no longer refers to an entry.
    fn index(&self, id: SlotId) -> &Entry<K, V> {
        match self.node(id) {
            Some(node) => &node.entry,
            None => panic!("stale slot id {}", id.0),
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<char, u32>) -> String {
        list.iter().map(|entry| entry.key).collect()
    }

    fn filled(keys: &str) -> (RecencyList<char, u32>, Vec<SlotId>) {
        let mut list = RecencyList::with_capacity(keys.len());
        let ids = keys
            .chars()
            .enumerate()
            .map(|(i, key)| list.push_mru(key, i as u32))
            .collect();
        (list, ids)
    }

    #[test]
    fn pushes_append_at_mru_end() {
        let (list, ids) = filled("abc");
        assert_eq!(keys(&list), "abc");
        assert_eq!(list.len(), 3);
        assert_eq!(list.lru().map(|e| e.key), Some('a'));
        assert_eq!(list[ids[2]], Entry { key: 'c', value: 2 });
        list.debug_validate_invariants();
    }

    #[test]
    fn touch_moves_any_position_to_mru() {
        let (mut list, ids) = filled("abcd");
        list.touch(ids[0]);
        assert_eq!(keys(&list), "bcda");
        list.touch(ids[2]);
        assert_eq!(keys(&list), "bdac");
        list.touch(ids[2]);
        assert_eq!(keys(&list), "bdac");
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_lru_hands_back_the_entry() {
        let (mut list, _) = filled("xy");
        assert_eq!(list.pop_lru(), Some(Entry { key: 'x', value: 0 }));
        assert_eq!(list.pop_lru(), Some(Entry { key: 'y', value: 1 }));
        assert_eq!(list.pop_lru(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_from_middle_relinks_neighbours() {
        let (mut list, ids) = filled("abc");
        assert_eq!(list.remove(ids[1]).map(|e| e.key), Some('b'));
        assert_eq!(keys(&list), "ac");
        assert_eq!(list.remove(ids[1]), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn vacated_slots_are_recycled_first() {
        let (mut list, _) = filled("ab");
        for (i, key) in "cdefg".chars().enumerate() {
            list.pop_lru();
            list.push_mru(key, i as u32);
            assert_eq!(list.allocated_slots(), 2);
        }
        assert_eq!(keys(&list), "fg");
        list.debug_validate_invariants();
    }

    #[test]
    fn stale_ids_are_ignored() {
        let (mut list, ids) = filled("ab");
        list.remove(ids[0]);
        list.touch(ids[0]);
        assert!(list.entry_mut(ids[0]).is_none());
        assert_eq!(keys(&list), "b");
    }

    #[test]
    fn entry_mut_edits_in_place() {
        let (mut list, ids) = filled("ab");
        if let Some(entry) = list.entry_mut(ids[0]) {
            entry.value = 99;
        }
        assert_eq!(list[ids[0]].value, 99);
        assert_eq!(keys(&list), "ab");
    }

    #[test]
    fn clear_empties_everything() {
        let (mut list, _) = filled("abc");
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        assert!(list.lru().is_none());
        list.debug_validate_invariants();
    }

    #[test]
    #[should_panic(expected = "stale slot id")]
    fn indexing_a_removed_entry_panics() {
        let (mut list, ids) = filled("a");
        list.remove(ids[0]);
        let _ = &list[ids[0]];
    }
}
