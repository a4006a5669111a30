//! STRATA Core - Shared Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

pub mod config;
pub mod error;
pub mod replication;

pub use config::{FootprintConfig, ReplicationConfig, RoleKind};
pub use error::{ConfigError, FootprintError};
pub use replication::{Directionality, OrchestratorLiveness, Role};
