//! Location resolution - turning what a visitor typed into a zone.
//!
//! Tokens are trimmed and compared without case. Four tiers are tried in
//! order and the first one with a match wins:
//!
//! 1. **ZoneId**: the token is a zone id
//! 2. **Booth**: the token is a booth number
//! 3. **Substring**: the token occurs in an exhibitor name or booth number
//! 4. **Keyword**: a configured keyword occurs in the token
//!
//! When several zones match within a tier, the one declared first wins.

use serde::Serialize;
use tracing::debug;

use venue_model::{Catalog, ZoneId};

use crate::error::QueryError;
use crate::zone_graph::{BoothIndex, ZoneGraph};

/// The tier that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ResolutionTier {
    ZoneId,
    Booth,
    Substring,
    Keyword,
}

/// A resolved location and how it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub zone: ZoneId,
    pub tier: ResolutionTier,
}

/// Resolves raw tokens against one venue snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver<'a> {
    graph: &'a ZoneGraph,
    booths: &'a BoothIndex,
    catalog: &'a Catalog,
    /// Lower-cased keywords per zone, in declared zone order.
    keywords: &'a [(ZoneId, Vec<String>)],
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        graph: &'a ZoneGraph,
        booths: &'a BoothIndex,
        catalog: &'a Catalog,
        keywords: &'a [(ZoneId, Vec<String>)],
    ) -> Self {
        Self {
            graph,
            booths,
            catalog,
            keywords,
        }
    }

    /// Resolve a token to a zone id.
    pub fn resolve(&self, token: &str) -> Result<ZoneId, QueryError> {
        self.resolve_detailed(token).map(|r| r.zone)
    }

    /// Resolve a token, reporting which tier matched.
    pub fn resolve_detailed(&self, token: &str) -> Result<Resolution, QueryError> {
        let needle = token.trim().to_lowercase();
        if needle.is_empty() {
            return Err(QueryError::not_found(token));
        }

        let found = self
            .by_zone_id(&needle)
            .map(|zone| (zone, ResolutionTier::ZoneId))
            .or_else(|| self.by_booth(&needle).map(|zone| (zone, ResolutionTier::Booth)))
            .or_else(|| {
                self.by_substring(&needle)
                    .map(|zone| (zone, ResolutionTier::Substring))
            })
            .or_else(|| {
                self.by_keyword(&needle)
                    .map(|zone| (zone, ResolutionTier::Keyword))
            });

        match found {
            Some((zone, tier)) => {
                debug!(token = %token, zone = %zone, tier = ?tier, "location_resolved");
                Ok(Resolution { zone, tier })
            }
            None => {
                debug!(token = %token, "location_not_found");
                Err(QueryError::not_found(token))
            }
        }
    }

    fn by_zone_id(&self, needle: &str) -> Option<ZoneId> {
        self.graph.find_zone(needle).map(|z| z.id.clone())
    }

    fn by_booth(&self, needle: &str) -> Option<ZoneId> {
        self.booths.zone_of(needle).cloned()
    }

    fn by_substring(&self, needle: &str) -> Option<ZoneId> {
        self.catalog
            .exhibitors()
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(needle)
                    || e.booth_number.to_lowercase().contains(needle)
            })
            .filter_map(|e| self.booths.zone_of(&e.booth_number))
            .min_by_key(|zone| self.graph.declared_index(zone).unwrap_or(usize::MAX))
            .cloned()
    }

    fn by_keyword(&self, needle: &str) -> Option<ZoneId> {
        self.keywords
            .iter()
            .find(|(_, words)| words.iter().any(|w| needle.contains(w.as_str())))
            .map(|(zone, _)| zone.clone())
    }
}
