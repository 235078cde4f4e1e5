//! Error types for the venue engine.

use thiserror::Error;
use venue_model::{ExhibitorId, ModelError, ZoneId};

/// Problems with the venue data that prevent a snapshot from being built.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Zone id must not be empty")]
    EmptyZoneId,

    #[error("Duplicate zone id: {0}")]
    DuplicateZone(ZoneId),

    #[error("Edge {a} - {b} references unknown zone {zone}")]
    UnknownEdgeZone { a: ZoneId, b: ZoneId, zone: ZoneId },

    #[error("Edge joins zone {0} to itself")]
    SelfLoop(ZoneId),

    #[error("Edge {a} - {b} has zero length")]
    ZeroDistance { a: ZoneId, b: ZoneId },

    #[error("Edge {a} - {b} is declared more than once")]
    DuplicateEdge { a: ZoneId, b: ZoneId },

    #[error("Zone {zone} cannot be reached from zone {from}")]
    Disconnected { zone: ZoneId, from: ZoneId },

    #[error("Booth {booth} of exhibitor {exhibitor} is not assigned to any zone")]
    UnassignedBooth { booth: String, exhibitor: ExhibitorId },

    #[error("Booth {booth} is assigned to unknown zone {zone}")]
    UnknownBoothZone { booth: String, zone: ZoneId },

    #[error("Keywords reference unknown zone {0}")]
    UnknownKeywordZone(ZoneId),

    #[error("Invalid venue data: {0}")]
    Model(#[from] ModelError),
}

/// Recoverable misses returned from queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Location not found: {token}")]
    LocationNotFound { token: String },

    #[error("No route from zone {from} to zone {to}")]
    NoRoute { from: ZoneId, to: ZoneId },
}

impl QueryError {
    pub(crate) fn not_found(token: &str) -> Self {
        QueryError::LocationNotFound {
            token: token.to_string(),
        }
    }
}
