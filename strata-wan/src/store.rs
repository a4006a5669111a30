//! Delegate store abstraction and the in-memory implementation.

use dashmap::DashMap;
use std::hash::Hash;

/// The key/value store wrapped by the gating layer.
///
/// No ordering guarantees are assumed beyond per-key linearizability.
pub trait DelegateStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn put(&self, key: K, value: V);
    fn remove(&self, key: &K) -> Option<V>;
    fn clear(&self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn contains_key(&self, key: &K) -> bool;
}

/// Concurrent in-memory store, used for local tiers and tests.
pub struct InMemoryStore<K, V> {
    map: DashMap<K, V>,
}

impl<K: Eq + Hash, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> DelegateStore<K, V> for InMemoryStore<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: K, value: V) {
        self.map.insert(key, value);
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.map.remove(key).map(|(_, value)| value)
    }

    fn clear(&self) {
        self.map.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }
}
