//! Min-heap of entries keyed by `(priority, tie)`.
//!
//! [`BinaryHeap`] is a max-heap, so [`Node`] orders in reverse. The tie
//! component comes from the queue's [`PriorityConfig`](crate::PriorityConfig);
//! with the default `Unordered` strategy it is always zero and equal
//! priorities have no defined order.

use crate::queue::entry::Entry;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Upper bound on the storage reserved up front.
const MAX_PREALLOC: usize = 1024;

#[derive(Debug)]
struct Node {
    entry: Entry,
    tie: u64,
}

impl Node {
    fn key(&self) -> (isize, u64) {
        (self.entry.priority(), self.tie)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest key sits at the top.
        other.key().cmp(&self.key())
    }
}

#[derive(Debug)]
pub(crate) struct MinHeap {
    nodes: BinaryHeap<Node>,
}

impl MinHeap {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: BinaryHeap::with_capacity(capacity.min(MAX_PREALLOC)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn peek(&self) -> Option<&Entry> {
        self.nodes.peek().map(|node| &node.entry)
    }

    pub(crate) fn push(&mut self, entry: Entry, tie: u64) {
        self.nodes.push(Node { entry, tie });
    }

    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.nodes.pop().map(|node| node.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// xorshift64, enough to shuffle priorities without extra dependencies
    fn next(state: &mut u64) -> u64 {
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        *state
    }

    #[test]
    fn test_pop_returns_minimum_first() {
        let mut heap = MinHeap::with_capacity(8);
        for (i, priority) in [5, 3, 8, 1, 9, 2].into_iter().enumerate() {
            heap.push(Entry::new(format!("k{i}"), priority), 0);
        }

        assert_eq!(heap.peek().map(Entry::priority), Some(1));

        let order: Vec<isize> = std::iter::from_fn(|| heap.pop().map(|e| e.priority())).collect();
        assert_eq!(order, vec![1, 2, 3, 5, 8, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_pop_on_empty() {
        let mut heap = MinHeap::with_capacity(0);
        assert!(heap.pop().is_none());
        assert!(heap.peek().is_none());
    }

    #[test]
    fn test_pops_minimum_under_mixed_operations() {
        let mut heap = MinHeap::with_capacity(64);
        let mut model: Vec<isize> = Vec::new();
        let mut rng = 0x9E37_79B9_7F4A_7C15u64;

        for round in 0..2_000u64 {
            if next(&mut rng) % 3 == 0 {
                let expected = model.iter().copied().min();
                if let Some(min) = expected {
                    let pos = model.iter().position(|p| *p == min).unwrap();
                    model.swap_remove(pos);
                }
                assert_eq!(heap.pop().map(|e| e.priority()), expected, "round {round}");
            } else {
                let priority = (next(&mut rng) % 50) as isize - 25;
                heap.push(Entry::new(format!("r{round}"), priority), 0);
                model.push(priority);
            }
            assert_eq!(heap.len(), model.len());
        }
    }

    #[test]
    fn test_tie_key_breaks_equal_priorities() {
        let mut heap = MinHeap::with_capacity(4);
        heap.push(Entry::new("third", 1), 3);
        heap.push(Entry::new("first", 1), 1);
        heap.push(Entry::new("second", 1), 2);
        heap.push(Entry::new("urgent", 0), 9);

        let keys: Vec<String> = std::iter::from_fn(|| heap.pop().map(Entry::into_key)).collect();
        assert_eq!(keys, vec!["urgent", "first", "second", "third"]);
    }

    #[test]
    fn test_prealloc_is_bounded() {
        // Would abort on allocation if the capacity were reserved verbatim.
        let mut heap = MinHeap::with_capacity(usize::MAX);
        heap.push(Entry::new("only", 0), 0);
        assert_eq!(heap.len(), 1);
    }
}
