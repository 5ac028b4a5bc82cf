//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::HashMap;

// Sentinel slots in the node arena.
const HEAD: usize = 0; // most recently used end
const TAIL: usize = 1; // least recently used end
const NULL: usize = usize::MAX;

#[derive(Debug)]
struct Node {
    /// `None` for the sentinels and for freed slots
    key: Option<String>,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in an index-linked list where:
/// - Front (after HEAD) = Most recently used
/// - Back (before TAIL) = Least recently used
///
/// A key -> slot index makes `touch`, `remove` and `evict_oldest` O(1).
#[derive(Debug)]
pub struct LruTracker {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    /// Freed slots available for reuse
    free: Vec<usize>,
}

impl Default for LruTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            nodes: vec![
                Node {
                    key: None,
                    prev: NULL,
                    next: TAIL,
                },
                Node {
                    key: None,
                    prev: HEAD,
                    next: NULL,
                },
            ],
            index: HashMap::new(),
            free: Vec::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If key exists, it is unlinked and relinked at the front.
    /// If key is new, a slot is allocated at the front.
    pub fn touch(&mut self, key: &str) {
        if let Some(&idx) = self.index.get(key) {
            self.unlink(idx);
            self.link_front(idx);
            return;
        }

        let idx = self.alloc(key.to_string());
        self.index.insert(key.to_string(), idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Removes a key from the tracker. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(idx) = self.index.remove(key) {
            self.unlink(idx);
            self.release(idx);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let idx = self.nodes[TAIL].prev;
        if idx == HEAD {
            return None;
        }
        self.unlink(idx);
        let key = self.release(idx)?;
        self.index.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.nodes[self.nodes[TAIL].prev].key.as_ref()
    }

    // == Clear ==
    /// Forgets every tracked key.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &String> + '_ {
        let mut cursor = self.nodes[HEAD].next;
        std::iter::from_fn(move || {
            if cursor == TAIL {
                return None;
            }
            let node = &self.nodes[cursor];
            cursor = node.next;
            node.key.as_ref()
        })
    }

    fn alloc(&mut self, key: String) -> usize {
        if let Some(idx) = self.free.pop() {
            let node = &mut self.nodes[idx];
            node.key = Some(key);
            node.prev = NULL;
            node.next = NULL;
            idx
        } else {
            self.nodes.push(Node {
                key: Some(key),
                prev: NULL,
                next: NULL,
            });
            self.nodes.len() - 1
        }
    }

    fn release(&mut self, idx: usize) -> Option<String> {
        self.free.push(idx);
        self.nodes[idx].key.take()
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[HEAD].next = idx;
        self.nodes[first].prev = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[idx].prev = NULL;
        self.nodes[idx].next = NULL;
    }
}
