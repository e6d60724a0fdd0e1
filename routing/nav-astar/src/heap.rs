//! Indexed binary min-heap for the open set.
//!
//! Entries are addressed by their packed position key so that a node already
//! in the open set can be found and have its priority changed in place.
//! Ordering is `(priority, heuristic, depth)` ascending, compared with
//! `f64::total_cmp`.

use std::cmp::Ordering;

use hashbrown::HashMap;

use crate::node::NodeId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: i64,
    priority: f64,
    heuristic: f64,
    depth: usize,
    node: NodeId,
}

impl Entry {
    fn order(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.heuristic.total_cmp(&other.heuristic))
            .then_with(|| self.depth.cmp(&other.depth))
    }
}

#[derive(Debug, Default)]
pub(crate) struct IndexedMinHeap {
    entries: Vec<Entry>,
    slots: HashMap<i64, usize>,
}

impl IndexedMinHeap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: i64) -> bool {
        self.slots.contains_key(&key)
    }

    /// The node stored under `key`, if it is in the heap.
    pub(crate) fn node_of(&self, key: i64) -> Option<NodeId> {
        self.slots.get(&key).map(|&slot| self.entries[slot].node)
    }

    /// The current priority of `key`, if it is in the heap.
    pub(crate) fn priority_of(&self, key: i64) -> Option<f64> {
        self.slots.get(&key).map(|&slot| self.entries[slot].priority)
    }

    /// Inserts `key`, or replaces its entry and restores heap order.
    pub(crate) fn insert_or_update(
        &mut self,
        key: i64,
        priority: f64,
        heuristic: f64,
        depth: usize,
        node: NodeId,
    ) {
        let entry = Entry {
            key,
            priority,
            heuristic,
            depth,
            node,
        };

        if let Some(&slot) = self.slots.get(&key) {
            self.entries[slot] = entry;
            let slot = self.sift_up(slot);
            self.sift_down(slot);
        } else {
            let slot = self.entries.len();
            self.entries.push(entry);
            self.slots.insert(key, slot);
            self.sift_up(slot);
        }
    }

    /// Removes the minimum entry, returning its key and node.
    pub(crate) fn extract_min(&mut self) -> Option<(i64, NodeId)> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(0, last);
        let entry = self.entries.pop()?;
        self.slots.remove(&entry.key);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.node))
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.slots.insert(self.entries[a].key, a);
        self.slots.insert(self.entries[b].key, b);
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].order(&self.entries[parent]) != Ordering::Less {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left].order(&self.entries[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && self.entries[right].order(&self.entries[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn drain(heap: &mut IndexedMinHeap) -> Vec<i64> {
        std::iter::from_fn(|| heap.extract_min().map(|(key, _)| key)).collect()
    }

    #[test]
    fn test_extracts_in_priority_order() {
        let mut heap = IndexedMinHeap::new();
        for (key, priority) in [(1, 5.0), (2, 1.0), (3, 3.0), (4, 4.0), (5, 2.0)] {
            heap.insert_or_update(key, priority, 0.0, 0, NodeId(0));
        }
        assert_eq!(heap.len(), 5);
        assert_eq!(drain(&mut heap), vec![2, 5, 3, 4, 1]);
        assert!(heap.is_empty());
        assert!(heap.extract_min().is_none());
    }

    #[test]
    fn test_ties_break_on_heuristic_then_depth() {
        let mut heap = IndexedMinHeap::new();
        heap.insert_or_update(10, 2.0, 1.0, 5, NodeId(0));
        heap.insert_or_update(11, 2.0, 0.5, 9, NodeId(1));
        heap.insert_or_update(12, 2.0, 0.5, 3, NodeId(2));
        assert_eq!(drain(&mut heap), vec![12, 11, 10]);
    }

    #[test]
    fn test_decrease_and_increase_key() {
        let mut heap = IndexedMinHeap::new();
        heap.insert_or_update(1, 1.0, 0.0, 0, NodeId(1));
        heap.insert_or_update(2, 2.0, 0.0, 0, NodeId(2));
        heap.insert_or_update(3, 3.0, 0.0, 0, NodeId(3));

        heap.insert_or_update(3, 0.5, 0.0, 0, NodeId(7));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.priority_of(3), Some(0.5));
        assert_eq!(heap.node_of(3), Some(NodeId(7)));

        heap.insert_or_update(1, 9.0, 0.0, 0, NodeId(1));
        assert_eq!(drain(&mut heap), vec![3, 2, 1]);
    }

    #[test]
    fn test_contains_tracks_membership() {
        let mut heap = IndexedMinHeap::new();
        heap.insert_or_update(42, 1.0, 0.0, 0, NodeId(0));
        assert!(heap.contains(42));
        assert!(!heap.contains(43));
        heap.extract_min();
        assert!(!heap.contains(42));
        assert_eq!(heap.priority_of(42), None);

        heap.insert_or_update(1, 1.0, 0.0, 0, NodeId(0));
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(1));
    }

    #[test]
    fn test_many_random_updates_stay_ordered() {
        let mut heap = IndexedMinHeap::new();
        let mut latest = std::collections::HashMap::new();
        let mut state = 0x2545_f491_u64;
        for i in 0..500_i64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            #[allow(clippy::cast_precision_loss)]
            let priority = (state % 1000) as f64;
            heap.insert_or_update(i % 97, priority, 0.0, 0, NodeId(0));
            latest.insert(i % 97, priority);
        }

        assert_eq!(heap.len(), latest.len());
        let order: Vec<f64> = drain(&mut heap).iter().map(|k| latest[k]).collect();
        assert_eq!(order.len(), 97);
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
    }
}
