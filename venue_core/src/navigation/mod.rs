//! Route Engine - walking routes between two locations in the venue.
//!
//! Routing works as follows:
//! 1. **Resolve**: Both tokens go through the location resolver
//! 2. **Same zone**: A fixed distance band is returned without searching
//! 3. **Search**: Dijkstra over the zone graph, from the endpoint declared
//!    first so that a route and its reverse always agree
//! 4. **Describe**: Each zone on the path becomes a step with leg distances

mod path;

use serde::Serialize;
use tracing::debug;

use venue_model::{RoutingConfig, ZoneId};

use crate::error::QueryError;
use crate::resolver::LocationResolver;
use crate::zone_graph::ZoneGraph;

/// Result of a route query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Route {
    /// Both ends are in the same zone.
    SameZone(SameZoneRoute),
    /// A path through one or more walkways.
    Path(RoutePath),
}

impl Route {
    /// Zones visited, start first.
    pub fn zone_sequence(&self) -> Vec<ZoneId> {
        match self {
            Route::SameZone(r) => vec![r.zone.clone()],
            Route::Path(p) => p.zone_sequence.clone(),
        }
    }

    pub fn is_same_zone(&self) -> bool {
        matches!(self, Route::SameZone(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SameZoneRoute {
    pub zone: ZoneId,
    pub min_meters: u32,
    pub max_meters: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePath {
    pub zone_sequence: Vec<ZoneId>,
    /// Sum of the true walkway distances.
    pub total_distance: u32,
    pub estimated_minutes: u32,
    pub steps: Vec<RouteStep>,
}

/// One zone on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    pub zone: ZoneId,
    pub display_name: String,
    /// Meters from the previous step (0 for the start).
    pub leg_meters: u32,
    pub cumulative_meters: u32,
}

/// Computes routes over one venue snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RouteEngine<'a> {
    graph: &'a ZoneGraph,
    resolver: LocationResolver<'a>,
    config: &'a RoutingConfig,
}

impl<'a> RouteEngine<'a> {
    pub fn new(
        graph: &'a ZoneGraph,
        resolver: LocationResolver<'a>,
        config: &'a RoutingConfig,
    ) -> Self {
        Self {
            graph,
            resolver,
            config,
        }
    }

    /// Route between two free-text locations.
    pub fn route(&self, from: &str, to: &str) -> Result<Route, QueryError> {
        let source = self.resolver.resolve(from)?;
        let target = self.resolver.resolve(to)?;
        self.route_between(&source, &target)
    }

    /// Route between two known zones.
    pub fn route_between(&self, from: &ZoneId, to: &ZoneId) -> Result<Route, QueryError> {
        let source = self
            .graph
            .declared_index(from)
            .ok_or_else(|| QueryError::not_found(from.as_str()))?;
        let target = self
            .graph
            .declared_index(to)
            .ok_or_else(|| QueryError::not_found(to.as_str()))?;

        if source == target {
            debug!(zone = %from, "route_same_zone");
            return Ok(Route::SameZone(SameZoneRoute {
                zone: from.clone(),
                min_meters: self.config.same_zone_min_meters,
                max_meters: self.config.same_zone_max_meters,
            }));
        }

        let (low, high) = (source.min(target), source.max(target));
        let (distance, mut indices) =
            path::shortest_path(self.graph, low, high).ok_or_else(|| QueryError::NoRoute {
                from: from.clone(),
                to: to.clone(),
            })?;
        if low != source {
            indices.reverse();
        }

        let path = self.describe(&indices, distance);
        debug!(
            from = %from,
            to = %to,
            meters = path.total_distance,
            zones = path.zone_sequence.len(),
            "route_computed"
        );
        Ok(Route::Path(path))
    }

    fn describe(&self, indices: &[usize], total_distance: u32) -> RoutePath {
        let mut steps = Vec::with_capacity(indices.len());
        let mut cumulative = 0u32;
        let mut previous: Option<&ZoneId> = None;

        for &index in indices {
            let zone = self.graph.zone_at(index);
            let leg = previous
                .and_then(|prev| self.graph.edge_distance(prev, &zone.id))
                .unwrap_or(0);
            cumulative += leg;
            steps.push(RouteStep {
                zone: zone.id.clone(),
                display_name: zone.display_name.clone(),
                leg_meters: leg,
                cumulative_meters: cumulative,
            });
            previous = Some(&zone.id);
        }

        RoutePath {
            zone_sequence: steps.iter().map(|s| s.zone.clone()).collect(),
            total_distance,
            estimated_minutes: self.config.estimate.minutes(steps.len(), total_distance),
            steps,
        }
    }
}
