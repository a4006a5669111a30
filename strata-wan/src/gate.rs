//! Replication gating state machine.
//!
//! Wraps one delegate store participating in WAN replication. Ordinary
//! client operations must not observe the cache before it has synchronized
//! with its replication peer; orchestrator-privileged operations always
//! proceed.
//!
//! # States
//!
//! ```text
//! Inactive ── activate() ──→ activated ── go_live() ──→ ready
//!     ↑                                                    │
//!     └────────────── deactivate() ───────────────────────┘
//! ```
//!
//! Readiness requires both steps. Activation-state reads use an optimistic
//! fast path; transitions take the activation lock and re-check under it.

use crate::lock::{ActivationLock, LockSession};
use crate::store::DelegateStore;
use crate::version::VersionLedger;
use parking_lot::{Condvar, Mutex};
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use strata_core::{ConfigError, Directionality, ReplicationConfig, Role};

/// Gating wrapper around a delegate store under WAN replication.
///
/// Shared by many client threads. Threads forced to wait suspend
/// cooperatively on a readiness condition; completed activation transitions
/// wake all of them. There is deliberately no timeout: a replica whose
/// orchestrator never completes synchronization blocks callers indefinitely
/// (consistency is favored over availability).
pub struct WanGatedCache<K, V, S, L>
where
    K: Eq + Hash,
    S: DelegateStore<K, V>,
    L: ActivationLock,
{
    name: String,
    delegate: Arc<S>,
    lock: Arc<L>,
    role: Role,
    activated: AtomicBool,
    live: AtomicBool,
    orchestrator_alive: AtomicBool,
    ready_gate: Mutex<()>,
    ready_signal: Condvar,
    versions: VersionLedger<K>,
    _value: PhantomData<fn() -> V>,
}

impl<K, V, S, L> WanGatedCache<K, V, S, L>
where
    K: Eq + Hash + Clone,
    S: DelegateStore<K, V>,
    L: ActivationLock,
{
    /// Build a gated cache from a validated replication configuration.
    pub fn new(
        name: impl Into<String>,
        delegate: Arc<S>,
        lock: Arc<L>,
        config: &ReplicationConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_role(name, delegate, lock, config.validate()?))
    }

    /// Build a gated cache with an already-validated role.
    pub fn with_role(name: impl Into<String>, delegate: Arc<S>, lock: Arc<L>, role: Role) -> Self {
        Self {
            name: name.into(),
            delegate,
            lock,
            role,
            activated: AtomicBool::new(false),
            live: AtomicBool::new(false),
            orchestrator_alive: AtomicBool::new(true),
            ready_gate: Mutex::new(()),
            ready_signal: Condvar::new(),
            versions: VersionLedger::new(),
            _value: PhantomData,
        }
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// True once both `activate()` and `go_live()` have completed.
    pub fn is_ready(&self) -> bool {
        self.activated.load(Ordering::Acquire) && self.live.load(Ordering::Acquire)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn orchestrator_alive(&self) -> bool {
        self.orchestrator_alive.load(Ordering::Acquire)
    }

    /// First activation step. Idempotent.
    pub fn activate(&self) {
        if self.activated.load(Ordering::Acquire) {
            return;
        }
        let _session = LockSession::acquire(self.lock.as_ref());
        if self.activated.load(Ordering::Acquire) {
            return;
        }
        self.activated.store(true, Ordering::Release);
        tracing::debug!(cache = %self.name, role = %self.role, "cache activated");
    }

    /// Second activation step; completes readiness and wakes all waiters.
    ///
    /// # Panics
    ///
    /// Panics if called before `activate()`: that ordering is a caller
    /// contract, not a recoverable runtime condition.
    pub fn go_live(&self) {
        assert!(
            self.activated.load(Ordering::Acquire),
            "go_live() called before activate()"
        );
        if self.live.load(Ordering::Acquire) {
            return;
        }
        {
            let _session = LockSession::acquire(self.lock.as_ref());
            if self.live.load(Ordering::Acquire) {
                return;
            }
            self.live.store(true, Ordering::Release);
            tracing::debug!(cache = %self.name, role = %self.role, "cache live");
        }
        self.wake_waiters();
    }

    /// Return to the inactive state, e.g. on detected desynchronization.
    pub fn deactivate(&self) {
        if !self.activated.load(Ordering::Acquire) && !self.live.load(Ordering::Acquire) {
            return;
        }
        let _session = LockSession::acquire(self.lock.as_ref());
        self.live.store(false, Ordering::Release);
        self.activated.store(false, Ordering::Release);
        tracing::debug!(cache = %self.name, role = %self.role, "cache deactivated");
    }

    /// Record that the replication orchestrator is unreachable. Terminal for
    /// this instance; also deactivates, since a dead orchestrator can no
    /// longer keep the cache synchronized.
    pub fn mark_orchestrator_dead(&self) {
        if !self.orchestrator_alive.swap(false, Ordering::AcqRel) {
            return;
        }
        tracing::warn!(cache = %self.name, role = %self.role, "replication orchestrator dead");
        {
            let _session = LockSession::acquire(self.lock.as_ref());
            self.live.store(false, Ordering::Release);
            self.activated.store(false, Ordering::Release);
        }
        // Callers that just became bypass-eligible must unblock.
        self.wake_waiters();
    }

    // ========================================================================
    // GATED CLIENT OPERATIONS
    // ========================================================================

    pub fn get(&self, key: &K) -> Option<V> {
        self.await_ready();
        self.delegate.get(key)
    }

    pub fn put(&self, key: K, value: V) {
        self.await_ready();
        self.delegate.put(key, value);
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.await_ready();
        self.delegate.remove(key)
    }

    pub fn clear(&self) {
        self.await_ready();
        self.delegate.clear();
    }

    pub fn len(&self) -> usize {
        self.await_ready();
        self.delegate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.await_ready();
        self.delegate.contains_key(key)
    }

    // ========================================================================
    // ORCHESTRATOR-PRIVILEGED OPERATIONS
    // ========================================================================

    /// Apply a replication-origin put. Never gated; serialized with
    /// activation transitions. Returns whether the mutation was applied or
    /// discarded as stale.
    pub fn put_versioned(&self, key: K, value: V, version: u64) -> bool {
        let _session = LockSession::acquire(self.lock.as_ref());
        if !self.versions.accept(key.clone(), version) {
            tracing::trace!(cache = %self.name, version, "discarded stale versioned put");
            return false;
        }
        self.delegate.put(key, value);
        true
    }

    /// Apply a replication-origin remove under the monotonic-version rule.
    pub fn remove_versioned(&self, key: K, version: u64) -> bool {
        let _session = LockSession::acquire(self.lock.as_ref());
        if !self.versions.accept(key.clone(), version) {
            tracing::trace!(cache = %self.name, version, "discarded stale versioned remove");
            return false;
        }
        self.delegate.remove(&key);
        true
    }

    /// Apply a replication-origin cache-wide clear under the
    /// monotonic-version rule.
    pub fn clear_versioned(&self, version: u64) -> bool {
        let _session = LockSession::acquire(self.lock.as_ref());
        if !self.versions.accept_clear(version) {
            tracing::trace!(cache = %self.name, version, "discarded stale versioned clear");
            return false;
        }
        self.delegate.clear();
        true
    }

    // ========================================================================
    // GATING
    // ========================================================================

    /// Bypass is allowed only when the orchestrator is dead and the role can
    /// never be brought online by it again:
    ///
    /// | role                    | orchestrator | blocks?     |
    /// |-------------------------|--------------|-------------|
    /// | master                  | alive        | yes         |
    /// | master                  | dead         | no (bypass) |
    /// | replica(bidirectional)  | alive/dead   | yes         |
    /// | replica(unidirectional) | alive        | yes         |
    /// | replica(unidirectional) | dead         | no (bypass) |
    fn bypass_allowed(&self) -> bool {
        if self.orchestrator_alive.load(Ordering::Acquire) {
            return false;
        }
        match self.role {
            Role::Master => true,
            Role::Replica(Directionality::Unidirectional) => true,
            Role::Replica(Directionality::Bidirectional) => false,
        }
    }

    /// Suspend until the cache is ready, unless bypass applies or the
    /// current thread is itself driving a transition.
    fn await_ready(&self) {
        if self.is_ready() || self.bypass_allowed() || self.lock.is_held_by_current_thread() {
            return;
        }
        tracing::debug!(cache = %self.name, role = %self.role, "operation waiting for activation");
        let mut gate = self.ready_gate.lock();
        while !self.is_ready() && !self.bypass_allowed() {
            self.ready_signal.wait(&mut gate);
        }
    }

    /// Broadcast wake: an unbounded number of waiters may be pending.
    fn wake_waiters(&self) {
        drop(self.ready_gate.lock());
        self.ready_signal.notify_all();
    }
}
