//! Replication role and liveness types shared by the gating layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction in which a replica participates in WAN replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directionality {
    /// Receives mutations from the master and ships local mutations back.
    Bidirectional,
    /// Passive receiver only.
    Unidirectional,
}

impl fmt::Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directionality::Bidirectional => write!(f, "bidirectional"),
            Directionality::Unidirectional => write!(f, "unidirectional"),
        }
    }
}

/// Replication role of a cache under WAN replication.
///
/// Directionality is only meaningful for replicas, so it lives inside the
/// `Replica` variant. A master with a directionality is unrepresentable here;
/// the serde-facing [`crate::ReplicationConfig`] rejects it at validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Authoritative for its keyspace.
    Master,
    /// Receives mutations from a master site.
    Replica(Directionality),
}

impl Role {
    /// True for the master role.
    pub fn is_master(&self) -> bool {
        matches!(self, Role::Master)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Master => write!(f, "master"),
            Role::Replica(d) => write!(f, "replica({d})"),
        }
    }
}

/// Liveness of the external replication orchestrator.
///
/// Written once terminally per cache instance lifetime; read without locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrchestratorLiveness {
    Alive,
    Dead,
}
