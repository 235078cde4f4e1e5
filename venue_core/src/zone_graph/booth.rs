//! Booth assignment - which zone each booth number belongs to.

use std::collections::HashMap;

use venue_model::{normalize_booth, BoothRuleConfig, Catalog, ZoneId};

use super::ZoneGraph;
use crate::error::ConfigurationError;

/// Derives the zone of a booth from its number.
///
/// Rules receive the normalized (trimmed, upper-cased) booth number. The
/// returned id is matched against the declared zones ignoring case.
pub trait BoothRule: Send + Sync {
    fn zone_for(&self, booth: &str) -> Option<ZoneId>;
}

impl<F> BoothRule for F
where
    F: Fn(&str) -> Option<ZoneId> + Send + Sync,
{
    fn zone_for(&self, booth: &str) -> Option<ZoneId> {
        self(booth)
    }
}

/// Zone taken from the leading characters of the booth number.
#[derive(Debug, Clone)]
pub struct PrefixRule {
    prefix_len: usize,
    /// Prefix -> zone renames; prefixes not listed are used as the zone id.
    remap: HashMap<String, ZoneId>,
}

impl PrefixRule {
    pub fn new(prefix_len: usize) -> Self {
        Self {
            prefix_len: prefix_len.max(1),
            remap: HashMap::new(),
        }
    }

    /// Send booths starting with `prefix` to `zone`.
    pub fn with_mapping(mut self, prefix: &str, zone: impl Into<String>) -> Self {
        self.remap
            .insert(normalize_booth(prefix), ZoneId::new(zone));
        self
    }
}

impl BoothRule for PrefixRule {
    fn zone_for(&self, booth: &str) -> Option<ZoneId> {
        if booth.is_empty() {
            return None;
        }
        let prefix: String = booth.chars().take(self.prefix_len).collect();
        Some(
            self.remap
                .get(&prefix)
                .cloned()
                .unwrap_or(ZoneId(prefix)),
        )
    }
}

/// Every booth listed individually.
#[derive(Debug, Clone, Default)]
pub struct ExplicitRule {
    assignments: HashMap<String, ZoneId>,
}

impl ExplicitRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(mut self, booth: &str, zone: impl Into<String>) -> Self {
        self.assignments
            .insert(normalize_booth(booth), ZoneId::new(zone));
        self
    }
}

impl BoothRule for ExplicitRule {
    fn zone_for(&self, booth: &str) -> Option<ZoneId> {
        self.assignments.get(booth).cloned()
    }
}

/// Build the rule described by the venue configuration.
pub fn rule_from_config(config: &BoothRuleConfig) -> Box<dyn BoothRule> {
    match config {
        BoothRuleConfig::Prefix { prefix_len, zones } => {
            let rule = zones
                .iter()
                .fold(PrefixRule::new(*prefix_len), |rule, (prefix, zone)| {
                    rule.with_mapping(prefix, zone.clone())
                });
            Box::new(rule)
        }
        BoothRuleConfig::Explicit { assignments } => {
            let rule = assignments
                .iter()
                .fold(ExplicitRule::new(), |rule, (booth, zone)| {
                    rule.assign(booth, zone.clone())
                });
            Box::new(rule)
        }
    }
}

/// Booth -> zone index derived from the catalog at load time.
#[derive(Debug, Clone, Default)]
pub struct BoothIndex {
    /// Normalized booth number -> zone.
    by_booth: HashMap<String, ZoneId>,

    /// Zone -> positions of its exhibitors in the catalog, in catalog order.
    exhibitors_by_zone: HashMap<ZoneId, Vec<usize>>,
}

impl BoothIndex {
    /// Assign every exhibitor's booth to a declared zone.
    ///
    /// Fails when the rule cannot place a booth or names a zone the graph
    /// does not declare.
    pub fn build(
        catalog: &Catalog,
        rule: &dyn BoothRule,
        graph: &ZoneGraph,
    ) -> Result<Self, ConfigurationError> {
        let mut index = Self::default();

        for (position, exhibitor) in catalog.exhibitors().iter().enumerate() {
            let booth = exhibitor.normalized_booth();
            let derived = rule
                .zone_for(&booth)
                .ok_or_else(|| ConfigurationError::UnassignedBooth {
                    booth: booth.clone(),
                    exhibitor: exhibitor.id.clone(),
                })?;
            let zone = graph
                .find_zone(derived.as_str())
                .map(|z| z.id.clone())
                .ok_or_else(|| ConfigurationError::UnknownBoothZone {
                    booth: booth.clone(),
                    zone: derived.clone(),
                })?;

            index
                .exhibitors_by_zone
                .entry(zone.clone())
                .or_default()
                .push(position);
            index.by_booth.insert(booth, zone);
        }

        Ok(index)
    }

    /// Zone of a booth number (normalized before lookup).
    pub fn zone_of(&self, booth: &str) -> Option<&ZoneId> {
        self.by_booth.get(&normalize_booth(booth))
    }

    /// Catalog positions of the exhibitors in a zone.
    pub fn exhibitor_positions(&self, zone: &ZoneId) -> &[usize] {
        self.exhibitors_by_zone
            .get(zone)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Zones holding at least one booth.
    pub fn occupied_zones(&self) -> impl Iterator<Item = &ZoneId> {
        self.exhibitors_by_zone.keys()
    }

    pub fn booth_count(&self) -> usize {
        self.by_booth.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{salon_catalog, salon_edges, salon_zones};
    use venue_model::ExhibitorRecord;

    fn graph() -> ZoneGraph {
        ZoneGraph::new(salon_zones(), &salon_edges()).unwrap()
    }

    #[test]
    fn test_prefix_rule() {
        let rule = PrefixRule::new(1).with_mapping("h", "E");

        assert_eq!(rule.zone_for("B12"), Some(ZoneId::from("B")));
        assert_eq!(rule.zone_for("H3"), Some(ZoneId::from("E")));
        assert_eq!(rule.zone_for(""), None);
    }

    #[test]
    fn test_multi_char_prefix() {
        let rule = PrefixRule::new(2);
        assert_eq!(rule.zone_for("H1-204"), Some(ZoneId::from("H1")));
        assert_eq!(rule.zone_for("H"), Some(ZoneId::from("H")));
    }

    #[test]
    fn test_closure_rule() {
        let rule = |booth: &str| -> Option<ZoneId> {
            booth.ends_with('X').then(|| ZoneId::from("C"))
        };
        assert_eq!(rule.zone_for("12X"), Some(ZoneId::from("C")));
        assert_eq!(rule.zone_for("12"), None);
    }

    #[test]
    fn test_build_index_from_catalog() {
        let catalog = salon_catalog();
        let index = BoothIndex::build(&catalog, &PrefixRule::new(1), &graph()).unwrap();

        assert_eq!(index.zone_of("b08"), Some(&ZoneId::from("B")));
        assert_eq!(index.zone_of(" D2 "), Some(&ZoneId::from("D")));
        assert_eq!(index.zone_of("Z99"), None);
        assert_eq!(index.booth_count(), catalog.exhibitors().len());
        assert!(!index.exhibitor_positions(&ZoneId::from("A")).is_empty());
    }

    #[test]
    fn test_lowercase_zone_ids_still_match() {
        let rule = |_: &str| Some(ZoneId::from("b"));
        let catalog =
            Catalog::new(vec![ExhibitorRecord::new("ex-1", "Solo", "Tech", "Q1")], vec![]).unwrap();
        let index = BoothIndex::build(&catalog, &rule, &graph()).unwrap();

        assert_eq!(index.zone_of("Q1"), Some(&ZoneId::from("B")));
    }

    #[test]
    fn test_unknown_booth_zone_rejected() {
        let catalog =
            Catalog::new(vec![ExhibitorRecord::new("ex-1", "Lost", "Tech", "Z1")], vec![]).unwrap();
        let result = BoothIndex::build(&catalog, &PrefixRule::new(1), &graph());

        assert!(matches!(
            result,
            Err(ConfigurationError::UnknownBoothZone { booth, .. }) if booth == "Z1"
        ));
    }

    #[test]
    fn test_unassigned_booth_rejected() {
        let catalog =
            Catalog::new(vec![ExhibitorRecord::new("ex-1", "Lost", "Tech", "A1")], vec![]).unwrap();
        let result = BoothIndex::build(&catalog, &ExplicitRule::new(), &graph());

        assert!(matches!(result, Err(ConfigurationError::UnassignedBooth { .. })));
    }

    #[test]
    fn test_rule_from_config() {
        let config = BoothRuleConfig::Explicit {
            assignments: HashMap::from([("a1".to_string(), "C".to_string())]),
        };
        let rule = rule_from_config(&config);
        assert_eq!(rule.zone_for("A1"), Some(ZoneId::from("C")));
    }
}
