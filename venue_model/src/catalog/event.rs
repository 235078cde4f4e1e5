//! Event records - talks, workshops and demonstrations on the programme.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled event. `end_time` is always after `start_time` once the
/// record has gone through [`crate::Catalog`] validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub speaker: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Room or stage where the event takes place.
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub additional_speakers: Vec<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registration_required: bool,
    #[serde(default)]
    pub language: Option<String>,
}

impl EventRecord {
    /// Create an event with the required fields; the rest start empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId(id.into()),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            speaker: String::new(),
            start_time,
            end_time,
            location: String::new(),
            tags: Vec::new(),
            additional_speakers: Vec::new(),
            capacity: None,
            registration_required: false,
            language: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Whether the end time is strictly after the start time.
    pub fn has_valid_window(&self) -> bool {
        self.end_time > self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_duration() {
        let start = Utc.with_ymd_and_hms(2026, 3, 12, 14, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 12, 15, 30, 0).unwrap();
        let event = EventRecord::new("ev-1", "Keynote IA", start, end).with_speaker("Dr. Martin");

        assert_eq!(event.duration_minutes(), 90);
        assert!(event.has_valid_window());
    }

    #[test]
    fn test_event_window_validity() {
        let start = Utc.with_ymd_and_hms(2026, 3, 12, 14, 0, 0).unwrap();
        let event = EventRecord::new("ev-1", "Instant", start, start);
        assert!(!event.has_valid_window());
    }
}
