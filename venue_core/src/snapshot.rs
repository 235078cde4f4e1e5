//! Venue snapshots and the engine that swaps them.
//!
//! A [`VenueSnapshot`] is the complete venue state a query runs against: the
//! zone graph, the booth index, the catalog, the keyword table and the query
//! settings. It is built once, validated as a whole and never mutated.
//!
//! [`VenueEngine`] holds the current snapshot. Readers clone an `Arc` under a
//! short read lock; a reload replaces that `Arc` under the write lock, so
//! every query sees one snapshot from start to finish.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use venue_model::{
    Catalog, EventRecord, ExhibitorRecord, ProximityConfig, RoutingConfig, ScheduleConfig,
    VenueConfig, Zone, ZoneEdge, ZoneId,
};

use crate::error::{ConfigurationError, QueryError};
use crate::navigation::{Route, RouteEngine};
use crate::proximity::{ProximityEngine, ProximityResult};
use crate::resolver::LocationResolver;
use crate::schedule::{Clock, EventStatus, ScheduleQueryEngine, SystemClock};
use crate::search::{RelevanceSearchEngine, ScoredResult};
use crate::zone_graph::{rule_from_config, BoothIndex, BoothRule, PrefixRule, ZoneGraph};

/// Unique identifier of a built snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(pub Uuid);

impl SnapshotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable venue state.
#[derive(Debug)]
pub struct VenueSnapshot {
    id: SnapshotId,
    name: String,
    built_at: DateTime<Utc>,
    graph: ZoneGraph,
    booths: BoothIndex,
    catalog: Arc<Catalog>,
    /// Lower-cased keywords per zone, in declared zone order.
    keywords: Vec<(ZoneId, Vec<String>)>,
    routing: RoutingConfig,
    proximity: ProximityConfig,
    schedule: ScheduleConfig,
    /// `schedule.soon_threshold_minutes`, checked at build time.
    soon: Duration,
    utc_offset: FixedOffset,
}

impl VenueSnapshot {
    pub fn builder() -> VenueSnapshotBuilder {
        VenueSnapshotBuilder::default()
    }

    /// Build a snapshot from a loaded configuration and catalog.
    pub fn from_config(
        config: &VenueConfig,
        catalog: Arc<Catalog>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let mut builder = Self::builder()
            .name(config.venue.name.clone())
            .zones(config.layout_zones())
            .edges(config.edges.clone())
            .keywords(config.keyword_table())
            .routing(config.routing.clone())
            .proximity(config.proximity.clone())
            .schedule(config.schedule.clone())
            .utc_offset(config.utc_offset()?);
        builder.booth_rule = rule_from_config(&config.booths);
        builder.build(catalog)
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn graph(&self) -> &ZoneGraph {
        &self.graph
    }

    pub fn booths(&self) -> &BoothIndex {
        &self.booths
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn resolver(&self) -> LocationResolver<'_> {
        LocationResolver::new(&self.graph, &self.booths, &self.catalog, &self.keywords)
    }

    pub fn routes(&self) -> RouteEngine<'_> {
        RouteEngine::new(&self.graph, self.resolver(), &self.routing)
    }

    pub fn proximity(&self) -> ProximityEngine<'_> {
        ProximityEngine::new(
            &self.graph,
            &self.booths,
            &self.catalog,
            self.resolver(),
            &self.proximity,
        )
    }

    pub fn search(&self) -> RelevanceSearchEngine<'_> {
        RelevanceSearchEngine::new(&self.catalog)
    }

    pub fn schedule(&self) -> ScheduleQueryEngine<'_> {
        ScheduleQueryEngine::new(self.catalog.events(), self.utc_offset, self.soon)
    }

    pub fn resolve(&self, token: &str) -> Result<ZoneId, QueryError> {
        self.resolver().resolve(token)
    }

    pub fn route(&self, from: &str, to: &str) -> Result<Route, QueryError> {
        self.routes().route(from, to)
    }

    pub fn nearby(&self, token: &str) -> Result<ProximityResult<'_>, QueryError> {
        self.proximity().nearby(token)
    }

    pub fn search_exhibitors(&self, query: &str) -> Vec<ScoredResult<&ExhibitorRecord>> {
        self.search().search_exhibitors(query)
    }

    pub fn search_events(&self, query: &str) -> Vec<ScoredResult<&EventRecord>> {
        self.search().search_events(query)
    }

    pub fn events_in_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&EventRecord> {
        self.schedule().events_in_window(start, end)
    }

    pub fn events_within_minutes(&self, now: DateTime<Utc>, minutes: i64) -> Vec<&EventRecord> {
        self.schedule().events_within_minutes(now, minutes)
    }

    pub fn events_on_day(&self, date: NaiveDate) -> Vec<&EventRecord> {
        self.schedule().events_on_day(date)
    }

    pub fn status(&self, event: &EventRecord, now: DateTime<Utc>) -> EventStatus {
        self.schedule().status(event, now)
    }
}

/// Assembles and validates a [`VenueSnapshot`].
pub struct VenueSnapshotBuilder {
    name: String,
    zones: Vec<Zone>,
    edges: Vec<ZoneEdge>,
    keywords: Vec<(ZoneId, Vec<String>)>,
    booth_rule: Box<dyn BoothRule>,
    routing: RoutingConfig,
    proximity: ProximityConfig,
    schedule: ScheduleConfig,
    utc_offset: FixedOffset,
}

impl Default for VenueSnapshotBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            zones: Vec::new(),
            edges: Vec::new(),
            keywords: Vec::new(),
            booth_rule: Box::new(PrefixRule::new(1)),
            routing: RoutingConfig::default(),
            proximity: ProximityConfig::default(),
            schedule: ScheduleConfig::default(),
            utc_offset: Utc.fix(),
        }
    }
}

impl VenueSnapshotBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Zones in declared order.
    pub fn zones(mut self, zones: Vec<Zone>) -> Self {
        self.zones = zones;
        self
    }

    pub fn edges(mut self, edges: Vec<ZoneEdge>) -> Self {
        self.edges = edges;
        self
    }

    /// Keywords per zone. Zone ids match the declared zones ignoring case.
    pub fn keywords(mut self, keywords: Vec<(ZoneId, Vec<String>)>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn booth_rule(mut self, rule: impl BoothRule + 'static) -> Self {
        self.booth_rule = Box::new(rule);
        self
    }

    pub fn routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = routing;
        self
    }

    pub fn proximity(mut self, proximity: ProximityConfig) -> Self {
        self.proximity = proximity;
        self
    }

    pub fn schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Validate everything and produce the snapshot.
    pub fn build(self, catalog: Arc<Catalog>) -> Result<VenueSnapshot, ConfigurationError> {
        let name = self.name.clone();
        self.assemble(catalog).map_err(|err| {
            warn!(venue = %name, error = %err, "venue_snapshot_rejected");
            err
        })
    }

    fn assemble(self, catalog: Arc<Catalog>) -> Result<VenueSnapshot, ConfigurationError> {
        self.routing.validate()?;
        let soon = self.schedule.soon_threshold()?;
        let graph = ZoneGraph::new(self.zones, &self.edges)?;
        let booths = BoothIndex::build(&catalog, self.booth_rule.as_ref(), &graph)?;
        graph.ensure_connected(booths.occupied_zones())?;
        let keywords = keyword_table(&graph, self.keywords)?;

        let snapshot = VenueSnapshot {
            id: SnapshotId::new(),
            name: self.name,
            built_at: Utc::now(),
            graph,
            booths,
            catalog,
            keywords,
            routing: self.routing,
            proximity: self.proximity,
            schedule: self.schedule,
            soon,
            utc_offset: self.utc_offset,
        };

        info!(
            snapshot = %snapshot.id,
            venue = %snapshot.name,
            zones = snapshot.graph.zone_count(),
            edges = snapshot.graph.edge_count(),
            booths = snapshot.booths.booth_count(),
            events = snapshot.catalog.events().len(),
            "venue_snapshot_built"
        );
        Ok(snapshot)
    }
}

/// Canonicalize keyword zones, lower-case the words and order the table by
/// declared zone index. Entries for the same zone are merged.
fn keyword_table(
    graph: &ZoneGraph,
    raw: Vec<(ZoneId, Vec<String>)>,
) -> Result<Vec<(ZoneId, Vec<String>)>, ConfigurationError> {
    let mut table: Vec<(usize, ZoneId, Vec<String>)> = Vec::new();

    for (zone, words) in raw {
        let canonical = graph
            .find_zone(zone.as_str())
            .map(|z| z.id.clone())
            .ok_or(ConfigurationError::UnknownKeywordZone(zone))?;
        let words = words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty());

        match table.iter().position(|(_, id, _)| *id == canonical) {
            Some(pos) => table[pos].2.extend(words),
            None => {
                let index = graph.declared_index(&canonical).unwrap_or(usize::MAX);
                table.push((index, canonical, words.collect()));
            }
        }
    }

    table.sort_by_key(|(index, _, _)| *index);
    Ok(table.into_iter().map(|(_, zone, words)| (zone, words)).collect())
}

/// Holds the current snapshot and swaps it atomically on reload.
pub struct VenueEngine {
    current: RwLock<Arc<VenueSnapshot>>,
    clock: Arc<dyn Clock>,
}

impl VenueEngine {
    pub fn new(snapshot: VenueSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different time source for the clock-driven queries.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<VenueSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Run `f` against the current snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&VenueSnapshot) -> R) -> R {
        let snapshot = self.snapshot();
        f(&snapshot)
    }

    /// Replace the current snapshot, returning the previous one.
    pub fn reload(&self, snapshot: VenueSnapshot) -> Arc<VenueSnapshot> {
        let (previous, _) = self.install(snapshot);
        previous
    }

    /// Swap in `snapshot`, returning the previous and the installed `Arc`.
    fn install(&self, snapshot: VenueSnapshot) -> (Arc<VenueSnapshot>, Arc<VenueSnapshot>) {
        let next = Arc::new(snapshot);
        let previous = std::mem::replace(&mut *self.current.write(), Arc::clone(&next));
        info!(
            previous = %previous.id,
            current = %next.id,
            zones = next.graph.zone_count(),
            "venue_snapshot_swapped"
        );
        (previous, next)
    }

    /// Build a snapshot from configuration and swap it in. On failure the
    /// current snapshot stays in effect.
    pub fn reload_from_config(
        &self,
        config: &VenueConfig,
        catalog: Arc<Catalog>,
    ) -> Result<Arc<VenueSnapshot>, ConfigurationError> {
        let snapshot = VenueSnapshot::from_config(config, catalog)?;
        let (_, installed) = self.install(snapshot);
        Ok(installed)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Events running at the engine's current time.
    pub fn happening_now(&self) -> Vec<EventRecord> {
        let now = self.now();
        self.read(|s| {
            s.schedule()
                .ongoing_events(now)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Events starting within the configured "soon" threshold.
    pub fn starting_soon(&self) -> Vec<EventRecord> {
        let now = self.now();
        self.read(|s| {
            s.schedule()
                .starting_soon(now)
                .into_iter()
                .cloned()
                .collect()
        })
    }
}
