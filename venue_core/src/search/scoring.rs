//! Relevance scoring - additive per-field weights over query tokens.

use serde::Serialize;

use venue_model::{EventRecord, ExhibitorRecord};

/// A record paired with its relevance score for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult<T> {
    pub record: T,
    pub score: u32,
}

pub const NAME_WEIGHT: u32 = 5;
pub const DESCRIPTION_WEIGHT: u32 = 3;
pub const SPEAKER_WEIGHT: u32 = 2;
pub const TAG_WEIGHT: u32 = 2;
pub const CATEGORY_WEIGHT: u32 = 1;

/// Split a query into lower-cased whitespace-separated tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

fn field_score(tokens: &[String], field: &str, weight: u32) -> u32 {
    let field = field.to_lowercase();
    tokens
        .iter()
        .filter(|t| field.contains(t.as_str()))
        .count() as u32
        * weight
}

fn tags_score(tokens: &[String], tags: &[String]) -> u32 {
    tags.iter()
        .map(|tag| field_score(tokens, tag, TAG_WEIGHT))
        .sum()
}

/// Score an exhibitor: name +5, description +3, each tag +2, category +1,
/// for every token that occurs in the field.
pub fn score_exhibitor(tokens: &[String], exhibitor: &ExhibitorRecord) -> u32 {
    field_score(tokens, &exhibitor.name, NAME_WEIGHT)
        + field_score(tokens, &exhibitor.description, DESCRIPTION_WEIGHT)
        + tags_score(tokens, &exhibitor.tags)
        + field_score(tokens, &exhibitor.category, CATEGORY_WEIGHT)
}

/// Score an event: title +5, description +3, speaker +2, each tag +2,
/// category +1, for every token that occurs in the field.
pub fn score_event(tokens: &[String], event: &EventRecord) -> u32 {
    field_score(tokens, &event.title, NAME_WEIGHT)
        + field_score(tokens, &event.description, DESCRIPTION_WEIGHT)
        + field_score(tokens, &event.speaker, SPEAKER_WEIGHT)
        + tags_score(tokens, &event.tags)
        + field_score(tokens, &event.category, CATEGORY_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  Robots   IoT\t"), vec!["robots", "iot"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_exhibitor_name_and_category() {
        let exhibitor = ExhibitorRecord::new("ex-1", "TechInnovation SARL", "Innovation", "B08")
            .with_description("Solutions IoT");

        assert_eq!(score_exhibitor(&tokenize("innovation"), &exhibitor), 6);
    }

    #[test]
    fn test_each_matching_tag_counts() {
        let exhibitor = ExhibitorRecord::new("ex-1", "Acme", "Services", "A1")
            .with_tag("data")
            .with_tag("big data")
            .with_tag("cloud");

        assert_eq!(score_exhibitor(&tokenize("data"), &exhibitor), 4);
    }

    #[test]
    fn test_scores_add_across_tokens() {
        let exhibitor = ExhibitorRecord::new("ex-1", "GreenPower", "Technologie", "D2")
            .with_description("Énergie solaire");

        // "green" hits the name, "solaire" the description.
        assert_eq!(score_exhibitor(&tokenize("green solaire"), &exhibitor), 8);
    }

    #[test]
    fn test_event_weights() {
        let event = EventRecord::new("ev-1", "Atelier IoT", at(12, 11, 0), at(12, 12, 0))
            .with_description("Capteurs IoT")
            .with_speaker("Marc Iotti")
            .with_category("Atelier")
            .with_tag("iot");

        // title 5 + description 3 + speaker 2 + tag 2
        assert_eq!(score_event(&tokenize("iot"), &event), 12);
        assert_eq!(score_event(&tokenize("atelier"), &event), 6);
        assert_eq!(score_event(&tokenize("quantique"), &event), 0);
    }
}
