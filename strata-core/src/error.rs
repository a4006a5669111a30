//! Error types for STRATA operations

use thiserror::Error;

/// Errors raised by the footprint accounting engine.
///
/// Introspection failure is fatal for the walk that hit it: no partial
/// size is ever returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FootprintError {
    #[error("Introspection failed for {type_name}: {reason}")]
    Introspection {
        type_name: &'static str,
        reason: String,
    },
}

/// Configuration errors, rejected eagerly at construction time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Role master cannot carry a directionality ({directionality})")]
    MasterWithDirectionality { directionality: String },

    #[error("Role replica requires a directionality")]
    MissingDirectionality,

    #[error("Field metadata cache capacity must be non-zero")]
    ZeroMetadataCapacity,
}
