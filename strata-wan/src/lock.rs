//! Activation lock: mutual exclusion with reentrancy introspection.
//!
//! Gated code uses `is_held_by_current_thread` to detect whether it is
//! itself on the path of a state transition in progress, so a transition
//! thread never blocks on the readiness signal it is about to raise.

use parking_lot::{Condvar, Mutex};
use std::thread::{self, ThreadId};

/// Mutual-exclusion primitive guarding activation-state transitions and
/// serializing orchestrator-privileged operations.
pub trait ActivationLock: Send + Sync {
    fn acquire(&self);
    fn release(&self);
    fn is_held_by_current_thread(&self) -> bool;
}

/// Thread-based activation lock. Non-reentrant: acquiring while already
/// holding is a caller contract violation.
#[derive(Debug, Default)]
pub struct ThreadActivationLock {
    holder: Mutex<Option<ThreadId>>,
    available: Condvar,
}

impl ThreadActivationLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivationLock for ThreadActivationLock {
    fn acquire(&self) {
        let current = thread::current().id();
        let mut holder = self.holder.lock();
        assert_ne!(
            *holder,
            Some(current),
            "activation lock acquired reentrantly"
        );
        while holder.is_some() {
            self.available.wait(&mut holder);
        }
        *holder = Some(current);
    }

    fn release(&self) {
        let current = thread::current().id();
        let mut holder = self.holder.lock();
        assert_eq!(
            *holder,
            Some(current),
            "activation lock released by a non-holder"
        );
        *holder = None;
        self.available.notify_one();
    }

    fn is_held_by_current_thread(&self) -> bool {
        *self.holder.lock() == Some(thread::current().id())
    }
}

/// RAII session over an [`ActivationLock`]; releases on drop.
pub(crate) struct LockSession<'a, L: ActivationLock + ?Sized> {
    lock: &'a L,
}

impl<'a, L: ActivationLock + ?Sized> LockSession<'a, L> {
    pub(crate) fn acquire(lock: &'a L) -> Self {
        lock.acquire();
        Self { lock }
    }
}

impl<L: ActivationLock + ?Sized> Drop for LockSession<'_, L> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn held_by_current_thread_reflects_holder() {
        let lock = ThreadActivationLock::new();
        assert!(!lock.is_held_by_current_thread());
        lock.acquire();
        assert!(lock.is_held_by_current_thread());
        lock.release();
        assert!(!lock.is_held_by_current_thread());
    }

    #[test]
    fn other_threads_do_not_observe_holding() {
        let lock = Arc::new(ThreadActivationLock::new());
        lock.acquire();

        let observer = Arc::clone(&lock);
        let held_elsewhere = std::thread::spawn(move || observer.is_held_by_current_thread())
            .join()
            .expect("observer thread panicked");
        assert!(!held_elsewhere);

        lock.release();
    }

    #[test]
    fn contended_acquire_waits_for_release() {
        let lock = Arc::new(ThreadActivationLock::new());
        lock.acquire();

        let contender = Arc::clone(&lock);
        let handle = std::thread::spawn(move || {
            let _session = LockSession::acquire(contender.as_ref());
        });

        std::thread::sleep(std::time::Duration::from_millis(20));
        lock.release();
        handle.join().expect("contender thread panicked");
    }

    #[test]
    #[should_panic(expected = "acquired reentrantly")]
    fn reentrant_acquire_panics() {
        let lock = ThreadActivationLock::new();
        lock.acquire();
        lock.acquire();
    }
}
