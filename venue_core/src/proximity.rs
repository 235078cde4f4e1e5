//! Proximity Engine - what is in and around a zone.

use serde::Serialize;
use tracing::debug;

use venue_model::{Catalog, ExhibitorRecord, ProximityConfig, Zone};

use crate::error::QueryError;
use crate::resolver::LocationResolver;
use crate::zone_graph::{BoothIndex, ZoneGraph};

/// A zone one walkway away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacentZone<'a> {
    pub zone: &'a Zone,
    pub distance_meters: u32,
}

/// Everything near a resolved location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResult<'a> {
    pub zone: &'a Zone,
    /// Exhibitors in the zone, catalog order, capped at the configured limit.
    pub exhibitors: Vec<&'a ExhibitorRecord>,
    pub exhibitor_total: usize,
    /// Exhibitors left out by the cap.
    pub overflow: usize,
    pub facilities: &'a [String],
    /// Neighboring zones, nearest first.
    pub adjacent: Vec<AdjacentZone<'a>>,
}

/// A zone with its booths, for venue overviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneOverview<'a> {
    pub zone: &'a Zone,
    pub booths: Vec<&'a str>,
}

/// Read-only projections of one zone and its neighbors.
#[derive(Debug, Clone, Copy)]
pub struct ProximityEngine<'a> {
    graph: &'a ZoneGraph,
    booths: &'a BoothIndex,
    catalog: &'a Catalog,
    resolver: LocationResolver<'a>,
    config: &'a ProximityConfig,
}

impl<'a> ProximityEngine<'a> {
    pub fn new(
        graph: &'a ZoneGraph,
        booths: &'a BoothIndex,
        catalog: &'a Catalog,
        resolver: LocationResolver<'a>,
        config: &'a ProximityConfig,
    ) -> Self {
        Self {
            graph,
            booths,
            catalog,
            resolver,
            config,
        }
    }

    /// What is near a free-text location.
    pub fn nearby(&self, token: &str) -> Result<ProximityResult<'a>, QueryError> {
        let zone_id = self.resolver.resolve(token)?;
        let zone = self
            .graph
            .zone(&zone_id)
            .ok_or_else(|| QueryError::not_found(token))?;

        let in_zone = self.exhibitors_in(zone);
        let exhibitor_total = in_zone.len();
        let exhibitors: Vec<_> = in_zone
            .into_iter()
            .take(self.config.exhibitor_limit)
            .collect();

        let mut adjacent: Vec<_> = self
            .graph
            .neighbors(&zone.id)
            .into_iter()
            .filter_map(|(id, meters)| {
                self.graph.zone(id).map(|z| AdjacentZone {
                    zone: z,
                    distance_meters: meters,
                })
            })
            .collect();
        adjacent.sort_by_key(|a| {
            (
                a.distance_meters,
                self.graph.declared_index(&a.zone.id).unwrap_or(usize::MAX),
            )
        });

        debug!(
            token = %token,
            zone = %zone.id,
            exhibitors = exhibitor_total,
            adjacent = adjacent.len(),
            "nearby_computed"
        );

        Ok(ProximityResult {
            zone,
            overflow: exhibitor_total - exhibitors.len(),
            exhibitor_total,
            exhibitors,
            facilities: &zone.facilities,
            adjacent,
        })
    }

    /// Zones offering a facility whose name contains `facility`, in
    /// declared order.
    pub fn zones_with_facility(&self, facility: &str) -> Vec<&'a Zone> {
        let wanted = facility.trim().to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.graph
            .all_zones()
            .iter()
            .filter(|z| z.facilities.iter().any(|f| f.to_lowercase().contains(&wanted)))
            .collect()
    }

    /// Every zone with its booth numbers, in declared order.
    pub fn venue_overview(&self) -> Vec<ZoneOverview<'a>> {
        self.graph
            .all_zones()
            .iter()
            .map(|zone| ZoneOverview {
                zone,
                booths: self
                    .exhibitors_in(zone)
                    .into_iter()
                    .map(|e| e.booth_number.as_str())
                    .collect(),
            })
            .collect()
    }

    fn exhibitors_in(&self, zone: &Zone) -> Vec<&'a ExhibitorRecord> {
        let exhibitors = self.catalog.exhibitors();
        self.booths
            .exhibitor_positions(&zone.id)
            .iter()
            .filter_map(|&i| exhibitors.get(i))
            .collect()
    }
}
