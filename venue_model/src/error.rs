//! Errors raised while loading or validating venue data.

use thiserror::Error;

use crate::catalog::{EventId, ExhibitorId};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read venue file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse venue config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseCatalog(#[from] serde_json::Error),

    #[error("Event {id} ends at or before its start")]
    InvalidEventWindow { id: EventId },

    #[error("Exhibitor {exhibitor} has an invalid booth number: {booth:?}")]
    InvalidBooth { exhibitor: ExhibitorId, booth: String },

    #[error("Exhibitor {exhibitor} has an invalid email: {email}")]
    InvalidEmail { exhibitor: ExhibitorId, email: String },

    #[error("Duplicate exhibitor id: {0}")]
    DuplicateExhibitor(ExhibitorId),

    #[error("Duplicate event id: {0}")]
    DuplicateEvent(EventId),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
