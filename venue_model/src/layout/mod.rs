//! Venue layout - zones and the walkways connecting them.

use serde::{Deserialize, Serialize};

/// Identifier of a venue zone, as declared by the venue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw token.
    pub fn matches(&self, token: &str) -> bool {
        self.0.to_lowercase() == token.to_lowercase()
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named region of the venue holding booths and/or facilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub display_name: String,
    /// Facilities offered in the zone, in declared order, without duplicates.
    pub facilities: Vec<String>,
}

impl Zone {
    /// Create a zone with no facilities.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: ZoneId::new(id),
            display_name: display_name.into(),
            facilities: Vec::new(),
        }
    }

    /// Add a facility, ignoring case-insensitive duplicates.
    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        let facility = facility.into();
        if !self.has_facility(&facility) {
            self.facilities.push(facility);
        }
        self
    }

    /// Add several facilities.
    pub fn with_facilities<I, S>(self, facilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        facilities
            .into_iter()
            .fold(self, |zone, facility| zone.with_facility(facility))
    }

    /// Check whether the zone offers a facility (exact, case-insensitive).
    pub fn has_facility(&self, facility: &str) -> bool {
        let wanted = facility.to_lowercase();
        self.facilities.iter().any(|f| f.to_lowercase() == wanted)
    }
}

/// An undirected walkway between two zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEdge {
    pub a: ZoneId,
    pub b: ZoneId,
    pub distance_meters: u32,
}

impl ZoneEdge {
    pub fn new(a: impl Into<String>, b: impl Into<String>, distance_meters: u32) -> Self {
        Self {
            a: ZoneId::new(a),
            b: ZoneId::new(b),
            distance_meters,
        }
    }

    /// Check if this edge joins the two zones, in either direction.
    pub fn joins(&self, x: &ZoneId, y: &ZoneId) -> bool {
        (&self.a == x && &self.b == y) || (&self.a == y && &self.b == x)
    }

    /// The endpoint opposite `zone`, if `zone` is an endpoint.
    pub fn other(&self, zone: &ZoneId) -> Option<&ZoneId> {
        if &self.a == zone {
            Some(&self.b)
        } else if &self.b == zone {
            Some(&self.a)
        } else {
            None
        }
    }
}
