//! Zone Graph - the spatial model of the venue.

use std::collections::{HashMap, HashSet, VecDeque};

use venue_model::{Zone, ZoneEdge, ZoneId};

use crate::error::ConfigurationError;

/// Weighted undirected graph of venue zones.
///
/// Zones keep the order the venue declared them in. That order is exposed as
/// a declared index and is the tie-break used by resolution, routing and
/// proximity listings.
#[derive(Debug, Clone)]
pub struct ZoneGraph {
    /// Zones in declared order.
    zones: Vec<Zone>,

    /// Index: zone id -> declared index.
    index: HashMap<ZoneId, usize>,

    /// Adjacency list by declared index: (neighbor index, meters).
    adjacency: Vec<Vec<(usize, u32)>>,

    edge_count: usize,
}

impl ZoneGraph {
    /// Build a graph, validating ids and edges.
    ///
    /// Connectivity of booked zones is checked separately by
    /// [`ZoneGraph::ensure_connected`] once the booth assignments are known.
    pub fn new(zones: Vec<Zone>, edges: &[ZoneEdge]) -> Result<Self, ConfigurationError> {
        let mut index = HashMap::with_capacity(zones.len());
        for (i, zone) in zones.iter().enumerate() {
            if zone.id.as_str().trim().is_empty() {
                return Err(ConfigurationError::EmptyZoneId);
            }
            if index.insert(zone.id.clone(), i).is_some() {
                return Err(ConfigurationError::DuplicateZone(zone.id.clone()));
            }
        }

        let mut adjacency = vec![Vec::new(); zones.len()];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for edge in edges {
            let lookup = |zone: &ZoneId| {
                index
                    .get(zone)
                    .copied()
                    .ok_or_else(|| ConfigurationError::UnknownEdgeZone {
                        a: edge.a.clone(),
                        b: edge.b.clone(),
                        zone: zone.clone(),
                    })
            };
            let a = lookup(&edge.a)?;
            let b = lookup(&edge.b)?;

            if a == b {
                return Err(ConfigurationError::SelfLoop(edge.a.clone()));
            }
            if edge.distance_meters == 0 {
                return Err(ConfigurationError::ZeroDistance {
                    a: edge.a.clone(),
                    b: edge.b.clone(),
                });
            }
            if !seen.insert((a.min(b), a.max(b))) {
                return Err(ConfigurationError::DuplicateEdge {
                    a: edge.a.clone(),
                    b: edge.b.clone(),
                });
            }

            adjacency[a].push((b, edge.distance_meters));
            adjacency[b].push((a, edge.distance_meters));
        }

        Ok(Self {
            zones,
            index,
            adjacency,
            edge_count: seen.len(),
        })
    }

    /// Check that every booked zone can reach every other booked zone.
    ///
    /// A zone counts as booked when it offers a facility or appears in
    /// `occupied` (zones holding at least one booth).
    pub fn ensure_connected<'a, I>(&self, occupied: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = &'a ZoneId>,
    {
        let mut booked = vec![false; self.zones.len()];
        for (i, zone) in self.zones.iter().enumerate() {
            booked[i] = !zone.facilities.is_empty();
        }
        for zone in occupied {
            if let Some(&i) = self.index.get(zone) {
                booked[i] = true;
            }
        }

        let Some(first) = booked.iter().position(|b| *b) else {
            return Ok(());
        };

        let reached = self.reachable_from(first);
        match (0..self.zones.len()).find(|&i| booked[i] && !reached[i]) {
            Some(i) => Err(ConfigurationError::Disconnected {
                zone: self.zones[i].id.clone(),
                from: self.zones[first].id.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Breadth-first reachability from a declared index.
    fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut reached = vec![false; self.zones.len()];
        let mut queue = VecDeque::from([start]);
        reached[start] = true;

        while let Some(current) = queue.pop_front() {
            for &(next, _) in &self.adjacency[current] {
                if !reached[next] {
                    reached[next] = true;
                    queue.push_back(next);
                }
            }
        }

        reached
    }

    /// Neighbors of a zone with the walking distance to each.
    pub fn neighbors(&self, zone: &ZoneId) -> Vec<(&ZoneId, u32)> {
        self.index
            .get(zone)
            .map(|&i| {
                self.adjacency[i]
                    .iter()
                    .map(|&(j, meters)| (&self.zones[j].id, meters))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All zones in declared order.
    pub fn all_zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.index.get(id).map(|&i| &self.zones[i])
    }

    /// Find a zone whose id equals `token`, ignoring case.
    pub fn find_zone(&self, token: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id.matches(token))
    }

    /// Distance of the direct edge between two zones, if there is one.
    pub fn edge_distance(&self, a: &ZoneId, b: &ZoneId) -> Option<u32> {
        let (&i, &j) = (self.index.get(a)?, self.index.get(b)?);
        self.adjacency[i]
            .iter()
            .find(|(n, _)| *n == j)
            .map(|(_, meters)| *meters)
    }

    /// Position of a zone in the venue's declared order.
    pub fn declared_index(&self, id: &ZoneId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn zone_at(&self, index: usize) -> &Zone {
        &self.zones[index]
    }

    pub(crate) fn adjacent(&self, index: usize) -> &[(usize, u32)] {
        &self.adjacency[index]
    }
}
