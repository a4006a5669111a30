//! Monotonic-version acceptance for orchestrator-issued mutations.
//!
//! A versioned write is applied only if its version is not older than the
//! version currently recorded for the key, or than the cache-wide clear
//! floor. Stale or duplicate deliveries over a WAN link are thereby
//! discarded without external deduplication.
//!
//! Callers serialize versioned mutations through the activation lock; the
//! ledger itself performs no cross-key atomicity.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-key version records plus the cache-wide clear floor.
pub struct VersionLedger<K> {
    keys: DashMap<K, u64>,
    clear_floor: AtomicU64,
}

impl<K: Eq + Hash> Default for VersionLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> VersionLedger<K> {
    pub fn new() -> Self {
        Self {
            keys: DashMap::new(),
            clear_floor: AtomicU64::new(0),
        }
    }

    /// Version currently recorded for a key. Keys absent from the ledger
    /// inherit the clear floor.
    pub fn recorded(&self, key: &K) -> u64 {
        let floor = self.clear_floor.load(Ordering::Acquire);
        self.keys
            .get(key)
            .map(|entry| (*entry.value()).max(floor))
            .unwrap_or(floor)
    }

    /// Accept a versioned mutation for `key` iff `version` is not older
    /// than the recorded version; records it when accepted.
    pub fn accept(&self, key: K, version: u64) -> bool {
        if version < self.recorded(&key) {
            return false;
        }
        self.keys.insert(key, version);
        true
    }

    /// Accept a cache-wide versioned clear iff `version` is not older than
    /// the clear floor; wipes per-key records and raises the floor when
    /// accepted.
    pub fn accept_clear(&self, version: u64) -> bool {
        if version < self.clear_floor.load(Ordering::Acquire) {
            return false;
        }
        self.keys.clear();
        self.clear_floor.store(version, Ordering::Release);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_version_rejected() {
        let ledger: VersionLedger<String> = VersionLedger::new();
        assert!(ledger.accept("k1".to_string(), 5));
        assert!(!ledger.accept("k1".to_string(), 4));
        assert_eq!(ledger.recorded(&"k1".to_string()), 5);
    }

    #[test]
    fn equal_version_accepted_as_idempotent_redelivery() {
        let ledger: VersionLedger<String> = VersionLedger::new();
        assert!(ledger.accept("k1".to_string(), 5));
        assert!(ledger.accept("k1".to_string(), 5));
    }

    #[test]
    fn keys_are_independent() {
        let ledger: VersionLedger<String> = VersionLedger::new();
        assert!(ledger.accept("k1".to_string(), 9));
        assert!(ledger.accept("k2".to_string(), 1));
    }

    #[test]
    fn clear_raises_the_floor_for_absent_keys() {
        let ledger: VersionLedger<String> = VersionLedger::new();
        assert!(ledger.accept("k1".to_string(), 3));
        assert!(ledger.accept_clear(7));
        // Wiped key inherits the floor.
        assert!(!ledger.accept("k1".to_string(), 6));
        assert!(ledger.accept("k1".to_string(), 7));
    }

    #[test]
    fn stale_clear_rejected() {
        let ledger: VersionLedger<String> = VersionLedger::new();
        assert!(ledger.accept_clear(10));
        assert!(!ledger.accept_clear(9));
    }
}
