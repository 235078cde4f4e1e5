//! Relevance Search - ranks exhibitors and events against free text.
//!
//! Matching is plain substring containment on lower-cased fields: no
//! stemming, no fuzzy matching, so the same query always produces the same
//! ranking. Exhibitors with equal scores keep catalog order; events with
//! equal scores are ordered soonest first.

mod scoring;

pub use scoring::*;

use tracing::debug;

use venue_model::{Catalog, EventRecord, ExhibitorRecord};

/// Exhibitors sharing a category, for grouped listings.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub exhibitors: Vec<&'a ExhibitorRecord>,
}

/// Linear-scan search over one catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceSearchEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> RelevanceSearchEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Exhibitors matching the query, best first, catalog order on ties.
    pub fn search_exhibitors(&self, query: &str) -> Vec<ScoredResult<&'a ExhibitorRecord>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<_> = self
            .catalog
            .exhibitors()
            .iter()
            .map(|e| ScoredResult {
                score: score_exhibitor(&tokens, e),
                record: e,
            })
            .filter(|r| r.score > 0)
            .collect();

        // Stable sort keeps catalog order among equal scores.
        results.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(query = %query, matches = results.len(), "exhibitor_search");
        results
    }

    /// Events matching the query, best first, earliest start on ties.
    pub fn search_events(&self, query: &str) -> Vec<ScoredResult<&'a EventRecord>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<_> = self
            .catalog
            .events()
            .iter()
            .map(|e| ScoredResult {
                score: score_event(&tokens, e),
                record: e,
            })
            .filter(|r| r.score > 0)
            .collect();

        results.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.record.start_time.cmp(&b.record.start_time))
        });

        debug!(query = %query, matches = results.len(), "event_search");
        results
    }

    /// First exhibitor whose name contains the query or whose booth number
    /// equals it.
    pub fn find_exhibitor(&self, query: &str) -> Option<&'a ExhibitorRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.catalog.exhibitors().iter().find(|e| {
            e.name.to_lowercase().contains(&needle) || e.booth_number.trim().to_lowercase() == needle
        })
    }

    /// Exhibitors worth suggesting when [`Self::find_exhibitor`] misses:
    /// a query word occurs in the name, or the whole query in the category.
    pub fn suggest_exhibitors(&self, query: &str, limit: usize) -> Vec<&'a ExhibitorRecord> {
        let needle = query.trim().to_lowercase();
        let words = tokenize(&needle);
        if words.is_empty() {
            return Vec::new();
        }

        self.catalog
            .exhibitors()
            .iter()
            .filter(|e| {
                let name = e.name.to_lowercase();
                words.iter().any(|w| name.contains(w.as_str()))
                    || e.category.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }

    /// Exhibitors whose category contains `category`, in catalog order.
    pub fn exhibitors_in_category(&self, category: &str) -> Vec<&'a ExhibitorRecord> {
        let needle = category.trim().to_lowercase();
        self.catalog
            .exhibitors()
            .iter()
            .filter(|e| e.category.to_lowercase().contains(&needle))
            .collect()
    }

    /// All exhibitors grouped by category, groups in order of first
    /// appearance.
    pub fn exhibitors_by_category(&self) -> Vec<CategoryGroup<'a>> {
        let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
        for exhibitor in self.catalog.exhibitors() {
            match groups
                .iter_mut()
                .find(|g| g.category == exhibitor.category)
            {
                Some(group) => group.exhibitors.push(exhibitor),
                None => groups.push(CategoryGroup {
                    category: &exhibitor.category,
                    exhibitors: vec![exhibitor],
                }),
            }
        }
        groups
    }
}
