//! Exhibitor records.

use serde::{Deserialize, Serialize};

/// Unique identifier for exhibitors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExhibitorId(pub String);

impl From<&str> for ExhibitorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ExhibitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A company exhibiting at the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhibitorRecord {
    pub id: ExhibitorId,
    pub name: String,
    pub category: String,
    pub booth_number: String,
    pub description: String,
    pub contact_person: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub special_offers: Vec<String>,

    // Optional contact details
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub is_sponsor: bool,
}

impl ExhibitorRecord {
    /// Create an exhibitor with the required fields; the rest start empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        booth_number: impl Into<String>,
    ) -> Self {
        Self {
            id: ExhibitorId(id.into()),
            name: name.into(),
            category: category.into(),
            booth_number: booth_number.into(),
            description: String::new(),
            contact_person: String::new(),
            tags: Vec::new(),
            special_offers: Vec::new(),
            email: None,
            phone: None,
            website: None,
            is_sponsor: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_contact(mut self, contact_person: impl Into<String>) -> Self {
        self.contact_person = contact_person.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_offer(mut self, offer: impl Into<String>) -> Self {
        self.special_offers.push(offer.into());
        self
    }

    /// The booth number trimmed and upper-cased, as used for booth lookups.
    pub fn normalized_booth(&self) -> String {
        normalize_booth(&self.booth_number)
    }
}

/// Normalize a booth number for comparison.
pub fn normalize_booth(booth: &str) -> String {
    booth.trim().to_uppercase()
}
