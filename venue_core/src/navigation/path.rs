//! Dijkstra search over the zone graph with a deterministic tie-break.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::zone_graph::ZoneGraph;

/// A partial route on the search frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frontier {
    distance: u32,
    /// Declared indices of the zones visited so far, source first.
    path: Vec<usize>,
}

impl Ord for Frontier {
    // Reversed so the max-heap yields the shortest, then lexicographically
    // smallest, path first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.path.cmp(&self.path))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path between two declared indices.
///
/// Among paths of equal length, the one whose sequence of declared indices
/// is lexicographically smallest is returned. Edge weights are strictly
/// positive, which the graph guarantees at construction.
pub(crate) fn shortest_path(
    graph: &ZoneGraph,
    source: usize,
    target: usize,
) -> Option<(u32, Vec<usize>)> {
    let mut best: Vec<Option<(u32, Vec<usize>)>> = vec![None; graph.zone_count()];
    let mut settled = vec![false; graph.zone_count()];
    let mut heap = BinaryHeap::new();

    best[source] = Some((0, vec![source]));
    heap.push(Frontier {
        distance: 0,
        path: vec![source],
    });

    while let Some(Frontier { distance, path }) = heap.pop() {
        let Some(&node) = path.last() else {
            continue;
        };
        if settled[node] {
            continue;
        }
        settled[node] = true;

        if node == target {
            return Some((distance, path));
        }

        for &(next, meters) in graph.adjacent(node) {
            if settled[next] {
                continue;
            }
            let Some(next_distance) = distance.checked_add(meters) else {
                continue;
            };

            let mut next_path = path.clone();
            next_path.push(next);

            let improves = match &best[next] {
                None => true,
                Some((d, p)) => (next_distance, &next_path) < (*d, p),
            };
            if improves {
                best[next] = Some((next_distance, next_path.clone()));
                heap.push(Frontier {
                    distance: next_distance,
                    path: next_path,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use venue_model::{Zone, ZoneEdge};

    fn graph(zones: &[&str], edges: &[(&str, &str, u32)]) -> ZoneGraph {
        ZoneGraph::new(
            zones.iter().map(|z| Zone::new(*z, *z)).collect(),
            &edges
                .iter()
                .map(|(a, b, d)| ZoneEdge::new(*a, *b, *d))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn test_prefers_shorter_detour() {
        let g = graph(&["A", "B", "C"], &[("A", "B", 50), ("B", "C", 30), ("A", "C", 200)]);

        let (distance, path) = shortest_path(&g, 0, 2).unwrap();
        assert_eq!(distance, 80);
        assert_eq!(path, vec![0, 1, 2]);
    }

    #[test]
    fn test_equal_paths_take_lowest_declared_zones() {
        // A-B-D and A-C-D are both 20 long.
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "C", 10), ("C", "D", 10), ("A", "B", 10), ("B", "D", 10)],
        );

        let (distance, path) = shortest_path(&g, 0, 3).unwrap();
        assert_eq!(distance, 20);
        assert_eq!(path, vec![0, 1, 3]);
    }

    #[test]
    fn test_unreachable_target() {
        let g = graph(&["A", "B", "C"], &[("A", "B", 10)]);
        assert!(shortest_path(&g, 0, 2).is_none());
    }

    #[test]
    fn test_source_equals_target() {
        let g = graph(&["A", "B"], &[("A", "B", 10)]);
        assert_eq!(shortest_path(&g, 1, 1), Some((0, vec![1])));
    }
}
