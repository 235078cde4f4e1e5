//! Catalog of exhibitors and events.
//!
//! Records keep the order in which the venue declared them; that order is
//! the tie-break for every listing built on top of the catalog.

mod event;
mod exhibitor;

pub use event::*;
pub use exhibitor::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ModelError;

/// A validated, read-only set of exhibitor and event records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    exhibitors: Vec<ExhibitorRecord>,
    events: Vec<EventRecord>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    exhibitors: Vec<ExhibitorRecord>,
    #[serde(default)]
    events: Vec<EventRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, booth numbers shorter than
    /// two characters, emails without `@` and events whose end is not after
    /// their start. Booth numbers are stored normalized.
    pub fn new(
        mut exhibitors: Vec<ExhibitorRecord>,
        events: Vec<EventRecord>,
    ) -> Result<Self, ModelError> {
        for exhibitor in &mut exhibitors {
            let booth = exhibitor.normalized_booth();
            if booth.chars().count() < 2 {
                return Err(ModelError::InvalidBooth {
                    exhibitor: exhibitor.id.clone(),
                    booth: exhibitor.booth_number.clone(),
                });
            }
            exhibitor.booth_number = booth;

            if let Some(email) = exhibitor.email.as_deref() {
                if !email.is_empty() && !email.contains('@') {
                    return Err(ModelError::InvalidEmail {
                        exhibitor: exhibitor.id.clone(),
                        email: email.to_string(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for exhibitor in &exhibitors {
            if !seen.insert(&exhibitor.id) {
                return Err(ModelError::DuplicateExhibitor(exhibitor.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for event in &events {
            if !event.has_valid_window() {
                return Err(ModelError::InvalidEventWindow {
                    id: event.id.clone(),
                });
            }
            if !seen.insert(&event.id) {
                return Err(ModelError::DuplicateEvent(event.id.clone()));
            }
        }

        Ok(Self { exhibitors, events })
    }

    /// Parse a catalog from a JSON document with `exhibitors` and `events`
    /// arrays.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.exhibitors, raw.events)
    }

    pub fn exhibitors(&self) -> &[ExhibitorRecord] {
        &self.exhibitors
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Find an exhibitor by its booth number (normalized comparison).
    pub fn exhibitor_by_booth(&self, booth: &str) -> Option<&ExhibitorRecord> {
        let wanted = normalize_booth(booth);
        self.exhibitors
            .iter()
            .find(|e| e.normalized_booth() == wanted)
    }

    pub fn exhibitor(&self, id: &ExhibitorId) -> Option<&ExhibitorRecord> {
        self.exhibitors.iter().find(|e| &e.id == id)
    }

    pub fn event(&self, id: &EventId) -> Option<&EventRecord> {
        self.events.iter().find(|e| &e.id == id)
    }
}
