//! STRATA WAN - Replication Gating
//!
//! Wraps a cache store participating in wide-area replication and enforces
//! availability/consistency invariants: ordinary operations must not observe
//! a cache before it has synchronized with its replication peer, while
//! replication-control operations always proceed under a monotonic-version
//! acceptance rule.

pub mod gate;
pub mod lock;
pub mod store;
pub mod version;

pub use gate::WanGatedCache;
pub use lock::{ActivationLock, ThreadActivationLock};
pub use store::{DelegateStore, InMemoryStore};
pub use version::VersionLedger;
