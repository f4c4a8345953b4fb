//! LRU Cache Module
//!
//! Fixed-capacity key/value store with least-recently-used eviction.
//!
//! Entries live in a dense `Vec` and are threaded into a doubly-linked
//! recency list through slot indices:
//! - Head = most recently used
//! - Tail = least recently used (next eviction candidate)
//!
//! A `HashMap` from key to slot gives O(1) lookup, and relinking a slot is
//! O(1), so `get`, `put` and `remove` never scan.
//!
//! # Concurrency
//! `LruCache` is not synchronized. Even `get` mutates the recency list, so a
//! cache shared between tasks must sit behind a lock
//! (`Arc<tokio::sync::RwLock<LruCache<_, _>>>`, taking the write guard for reads).

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::cache::CacheStats;
use crate::error::{AppError, Result};

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Cache ==
/// Bounded cache evicting the least recently touched entry.
///
/// Both `get` and `put` count as a touch.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to slot in `nodes`
    index: HashMap<K, usize>,
    /// Dense slot storage, linked by recency
    nodes: Vec<Node<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A zero capacity is rejected with [`AppError::InvalidCapacity`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AppError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
            stats: CacheStats::with_capacity(capacity),
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key).copied() {
            Some(slot) => {
                self.stats.record_hit();
                self.promote(slot);
                Some(&self.nodes[slot].value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the value for `key` without touching recency or stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.nodes[slot].value)
    }

    // == Put ==
    /// Inserts or replaces `key`, making it most recently used.
    ///
    /// A new key arriving at a full cache first evicts the tail entry.
    /// Returns the replaced value when `key` was already cached.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            let old = std::mem::replace(&mut self.nodes[slot].value, value);
            self.promote(slot);
            return Some(old);
        }

        if self.nodes.len() >= self.capacity {
            if let Some(tail) = self.tail {
                self.release(tail);
                self.stats.record_eviction();
            }
        }

        let slot = self.nodes.len();
        self.nodes.push(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, slot);
        self.push_front(slot);
        self.stats.total_entries = self.nodes.len();
        None
    }

    // == Remove ==
    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.get(key).copied()?;
        let node = self.release(slot);
        Some(node.value)
    }

    // == Clear ==
    /// Drops every entry. Hit/miss/eviction counters are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.stats.total_entries = 0;
    }

    /// Current number of entries, never above `capacity()`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Linear scan comparing with `V`'s own equality.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.nodes.iter().any(|node| &node.value == value)
    }

    pub fn keys(&self) -> HashSet<K> {
        self.index.keys().cloned().collect()
    }

    /// Values from most to least recently used.
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Iterates `(key, value)` from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    // == Stats ==
    /// Returns a copy of the current counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Recency List ==

    fn promote(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.unlink(slot);
        self.push_front(slot);
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[slot].prev = None;
        self.nodes[slot].next = None;
    }

    fn push_front(&mut self, slot: usize) {
        self.nodes[slot].prev = None;
        self.nodes[slot].next = self.head;

        if let Some(old_head) = self.head {
            self.nodes[old_head].prev = Some(slot);
        }
        self.head = Some(slot);

        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }

    /// Unlinks and removes `slot`, moving the last slot into the hole so the
    /// storage stays dense.
    fn release(&mut self, slot: usize) -> Node<K, V> {
        self.unlink(slot);
        let node = self.nodes.swap_remove(slot);
        self.index.remove(&node.key);

        // `slot` now holds what used to be the last node; repoint its links.
        if slot < self.nodes.len() {
            let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
            match prev {
                Some(p) => self.nodes[p].next = Some(slot),
                None => self.head = Some(slot),
            }
            match next {
                Some(n) => self.nodes[n].prev = Some(slot),
                None => self.tail = Some(slot),
            }
            if let Some(entry) = self.index.get_mut(&self.nodes[slot].key) {
                *entry = slot;
            }
        }

        self.stats.total_entries = self.nodes.len();
        node
    }
}

// == Iterator ==
/// Recency-ordered iterator returned by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = &self.nodes[slot];
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(cache: &LruCache<i64, &'static str>) -> Vec<i64> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = LruCache::<i64, String>::new(0);
        assert!(matches!(result, Err(AppError::InvalidCapacity(0))));
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut cache: LruCache<i64, &str> = LruCache::new(2).unwrap();
        assert_eq!(cache.get(&99), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&"A"));
        assert_eq!(cache.get(&2), Some(&"B"));
    }

    #[test]
    fn test_put_existing_replaces_and_keeps_size() {
        let mut cache = LruCache::new(2).unwrap();
        assert_eq!(cache.put(1, "v1"), None);
        assert_eq!(cache.put(1, "v2"), Some("v1"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), Some(&"v2"));
    }

    #[test]
    fn test_touch_then_insert_evicts_other_key() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");
        cache.put(1, "A");
        cache.put(3, "C");

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key(&2));
        assert_eq!(cache.keys(), HashSet::from([1, 3]));
    }

    #[test]
    fn test_eviction_sequence() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");
        cache.put(1, "A");
        cache.put(3, "C");
        cache.put(4, "D");
        cache.put(1, "A");

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key(&2));
        assert!(!cache.contains_key(&3));
        assert_eq!(cache.get(&1), Some(&"A"));
        assert_eq!(cache.get(&4), Some(&"D"));
        assert_eq!(cache.stats().evictions, 3);
    }

    #[test]
    fn test_get_promotes() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");
        cache.put(3, "C");
        assert_eq!(order(&cache), vec![3, 2, 1]);

        cache.get(&1);
        assert_eq!(order(&cache), vec![1, 3, 2]);

        cache.put(4, "D");
        assert!(!cache.contains_key(&2));
        assert_eq!(order(&cache), vec![4, 1, 3]);
    }

    #[test]
    fn test_peek_does_not_promote() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");

        assert_eq!(cache.peek(&1), Some(&"A"));
        cache.put(3, "C");

        assert!(!cache.contains_key(&1));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_capacity_one() {
        let mut cache = LruCache::new(1).unwrap();
        cache.put(1, "A");
        cache.get(&1);
        cache.put(2, "B");

        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key(&2));
        assert!(!cache.contains_key(&1));
    }

    #[test]
    fn test_remove_middle_keeps_links() {
        let mut cache = LruCache::new(4).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");
        cache.put(3, "C");
        cache.put(4, "D");

        assert_eq!(cache.remove(&2), Some("B"));
        assert_eq!(order(&cache), vec![4, 3, 1]);

        // slot of the removed entry is reused without breaking the order
        cache.put(5, "E");
        assert_eq!(order(&cache), vec![5, 4, 3, 1]);
        cache.get(&1);
        assert_eq!(order(&cache), vec![1, 5, 4, 3]);
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");
        cache.put(3, "C");

        cache.remove(&3);
        cache.remove(&1);
        assert_eq!(order(&cache), vec![2]);

        cache.remove(&2);
        assert!(cache.is_empty());
        assert_eq!(cache.iter().count(), 0);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "A");

        assert_eq!(cache.remove(&42), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");
        cache.get(&1);

        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.contains_key(&1));
        assert_eq!(cache.stats().total_entries, 0);
        assert_eq!(cache.stats().hits, 1);

        cache.put(3, "C");
        assert_eq!(order(&cache), vec![3]);
    }

    #[test]
    fn test_keys_values_and_contains() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, "A");
        cache.put(2, "B");

        assert_eq!(cache.keys(), HashSet::from([1, 2]));
        assert_eq!(cache.values(), vec![&"B", &"A"]);
        assert!(cache.contains_value(&"A"));
        assert!(!cache.contains_value(&"Z"));
        assert!(cache.is_not_empty());
    }

    #[test]
    fn test_borrowed_key_lookup() {
        let mut cache: LruCache<String, u32> = LruCache::new(2).unwrap();
        cache.put("alpha".to_string(), 1);

        assert_eq!(cache.get("alpha"), Some(&1));
        assert!(cache.contains_key("alpha"));
        assert_eq!(cache.remove("alpha"), Some(1));
    }
}
