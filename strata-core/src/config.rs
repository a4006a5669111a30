//! Configuration types

use crate::error::ConfigError;
use crate::replication::{Directionality, Role};
use serde::{Deserialize, Serialize};

/// Serde-facing role names, paired with an optional directionality in
/// [`ReplicationConfig`] and collapsed into [`Role`] by `validate()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Master,
    Replica,
}

/// Replication configuration for one gated cache instance.
///
/// Validation is eager: an invalid role/directionality pairing is a
/// construction-time error, never discovered during gating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationConfig {
    pub role: RoleKind,
    /// Required for replicas, forbidden for masters.
    pub directionality: Option<Directionality>,
}

impl ReplicationConfig {
    /// Configuration for a master cache.
    pub fn master() -> Self {
        Self {
            role: RoleKind::Master,
            directionality: None,
        }
    }

    /// Configuration for a replica cache with the given directionality.
    pub fn replica(directionality: Directionality) -> Self {
        Self {
            role: RoleKind::Replica,
            directionality: Some(directionality),
        }
    }

    /// Collapse into a validated [`Role`].
    pub fn validate(&self) -> Result<Role, ConfigError> {
        match (self.role, self.directionality) {
            (RoleKind::Master, None) => Ok(Role::Master),
            (RoleKind::Master, Some(d)) => Err(ConfigError::MasterWithDirectionality {
                directionality: d.to_string(),
            }),
            (RoleKind::Replica, Some(d)) => Ok(Role::Replica(d)),
            (RoleKind::Replica, None) => Err(ConfigError::MissingDirectionality),
        }
    }
}

/// Configuration for the footprint accounting engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintConfig {
    /// Maximum number of per-type field metadata entries retained.
    /// Evicted entries are transparently recomputed on next use.
    pub metadata_cache_capacity: usize,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            metadata_cache_capacity: 1024,
        }
    }
}

impl FootprintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata cache capacity.
    pub fn with_metadata_capacity(mut self, capacity: usize) -> Self {
        self.metadata_cache_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata_cache_capacity == 0 {
            return Err(ConfigError::ZeroMetadataCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_config_validates() {
        assert_eq!(ReplicationConfig::master().validate(), Ok(Role::Master));
    }

    #[test]
    fn replica_config_validates() {
        let config = ReplicationConfig::replica(Directionality::Unidirectional);
        assert_eq!(
            config.validate(),
            Ok(Role::Replica(Directionality::Unidirectional))
        );
    }

    #[test]
    fn master_with_directionality_rejected() {
        let config = ReplicationConfig {
            role: RoleKind::Master,
            directionality: Some(Directionality::Unidirectional),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MasterWithDirectionality { .. })
        ));
    }

    #[test]
    fn replica_without_directionality_rejected() {
        let config = ReplicationConfig {
            role: RoleKind::Replica,
            directionality: None,
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingDirectionality));
    }

    #[test]
    fn zero_metadata_capacity_rejected() {
        let config = FootprintConfig::new().with_metadata_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMetadataCapacity));
    }
}
