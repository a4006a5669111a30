//! Field metadata cache: per-type memoization of filtered field sets.
//!
//! Shared across all concurrent walks. Correctness only requires "may be
//! absent, must be recomputable", so the cache is bounded with simple
//! recency-based eviction instead of relying on memory-pressure signals.
//! Two walks racing to compute the same type's metadata insert equivalent
//! results; last write wins.

use crate::filter::FilterPolicy;
use crate::node::TypeToken;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct MetadataEntry {
    fields: Arc<[&'static str]>,
    last_used: AtomicU64,
}

/// Bounded, concurrent cache of filtered field names keyed by type identity.
pub struct FieldMetadataCache {
    entries: DashMap<TypeToken, MetadataEntry>,
    capacity: usize,
    clock: AtomicU64,
}

impl FieldMetadataCache {
    /// Create a cache retaining at most `capacity` type entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
            clock: AtomicU64::new(0),
        }
    }

    /// Filtered field names for a type, computing and caching them on first
    /// use. Repeated lookups for the same type return identical content.
    pub fn filtered_fields(
        &self,
        token: TypeToken,
        declared: &'static [&'static str],
        policy: &dyn FilterPolicy,
    ) -> Arc<[&'static str]> {
        let tick = self.clock.fetch_add(1, Ordering::Relaxed);

        if let Some(entry) = self.entries.get(&token) {
            entry.last_used.store(tick, Ordering::Relaxed);
            return Arc::clone(&entry.fields);
        }

        let fields: Arc<[&'static str]> = policy.filter_fields(&token, declared).into();
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(
            token,
            MetadataEntry {
                fields: Arc::clone(&fields),
                last_used: AtomicU64::new(tick),
            },
        );
        fields
    }

    /// Number of type entries currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().last_used.load(Ordering::Relaxed))
            .map(|entry| *entry.key());
        if let Some(token) = oldest {
            self.entries.remove(&token);
            tracing::trace!(type_name = token.name(), "evicted field metadata entry");
        }
    }
}
