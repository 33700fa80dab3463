// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Shortest routes over the campus map (Dijkstra with a binary heap)
//!
//! Among routes of equal cost the returned node sequence is whichever the
//! frontier happens to finalize first; only the cost is guaranteed minimal.

use crate::graph::GraphStore;
use crate::types::Route;
use petgraph::graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// Frontier entry, ordered so the heap pops the smallest cost first
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    cost: f64,
    node: NodeIndex,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for a min-heap; index breaks ties so ordering stays total
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the cheapest route from `start` to `end`
///
/// Returns [`Route::unreachable`] when either node is unknown or no path
/// connects them, and a single-node route of cost 0 when they are equal.
#[must_use]
pub fn shortest_path(graph: &GraphStore, start: &str, end: &str) -> Route {
    let (Some(source), Some(target)) = (graph.index_of(start), graph.index_of(end)) else {
        debug!("No route {} -> {}: endpoint not on the map", start, end);
        return Route::unreachable();
    };

    if source == target {
        return Route::trivial(start);
    }

    let bound = graph.index_bound();
    let mut dist = vec![f64::INFINITY; bound];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; bound];
    let mut frontier = BinaryHeap::new();

    dist[source.index()] = 0.0;
    frontier.push(Frontier {
        cost: 0.0,
        node: source,
    });

    while let Some(Frontier { cost, node }) = frontier.pop() {
        if cost > dist[node.index()] {
            continue;
        }
        if node == target {
            break;
        }
        for (next, weight) in graph.adjacent(node) {
            // saturate so a connected pair never reads as unreachable
            let next_cost = (cost + weight).min(f64::MAX);
            if next_cost < dist[next.index()] {
                trace!(
                    "Relax {} via {}: {:.2}",
                    graph.node_at(next).id,
                    graph.node_at(node).id,
                    next_cost
                );
                dist[next.index()] = next_cost;
                prev[next.index()] = Some(node);
                frontier.push(Frontier {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let cost = dist[target.index()];
    if cost.is_infinite() {
        debug!("No route {} -> {}: disconnected", start, end);
        return Route::unreachable();
    }

    let mut nodes = vec![graph.node_at(target).id.clone()];
    let mut current = target;
    while let Some(p) = prev[current.index()] {
        nodes.push(graph.node_at(p).id.clone());
        current = p;
    }
    nodes.reverse();

    debug!("Route {} -> {}: {} hops, {:.2}", start, end, nodes.len() - 1, cost);
    Route { nodes, cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeRecord, NodeRecord};

    /// ```text
    /// A --1-- B --1-- C
    ///  \             /
    ///   `----5------'        D (isolated)
    /// ```
    fn campus() -> GraphStore {
        GraphStore::build(
            vec![
                NodeRecord::new("A", 0.0, 0.0),
                NodeRecord::new("B", 1.0, 0.0),
                NodeRecord::new("C", 2.0, 0.0),
                NodeRecord::new("D", 9.0, 9.0),
            ],
            vec![
                EdgeRecord::with_length("A", "B", 1.0),
                EdgeRecord::with_length("B", "C", 1.0),
                EdgeRecord::with_length("A", "C", 5.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_prefers_cheaper_detour() {
        let route = shortest_path(&campus(), "A", "C");
        assert_eq!(route.nodes, vec!["A", "B", "C"]);
        assert!((route.cost - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_node() {
        let route = shortest_path(&campus(), "B", "B");
        assert_eq!(route, Route::trivial("B"));
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_unreachable() {
        let route = shortest_path(&campus(), "A", "D");
        assert!(route.nodes.is_empty());
        assert!(route.cost.is_infinite());
        assert!(!route.is_reachable());
    }

    #[test]
    fn test_unknown_endpoint_is_unreachable() {
        assert!(!shortest_path(&campus(), "A", "Z").is_reachable());
        assert!(!shortest_path(&campus(), "Z", "Z").is_reachable());
    }

    #[test]
    fn test_reverse_direction_same_cost() {
        let graph = campus();
        let forward = shortest_path(&graph, "A", "C");
        let backward = shortest_path(&graph, "C", "A");
        assert_eq!(forward.cost, backward.cost);
        assert_eq!(backward.origin(), Some("C"));
        assert_eq!(backward.destination(), Some("A"));
    }

    #[test]
    fn test_derived_weights_used() {
        let graph = GraphStore::build(
            vec![NodeRecord::new("P", 0.0, 0.0), NodeRecord::new("Q", 3.0, 4.0)],
            vec![EdgeRecord::new("P", "Q")],
        )
        .unwrap();
        let route = shortest_path(&graph, "P", "Q");
        assert_eq!(route.cost, 5.0);
    }

    #[test]
    fn test_frontier_pops_smallest_first() {
        let mut heap = BinaryHeap::new();
        for (cost, i) in [(3.0, 0), (1.0, 1), (2.0, 2)] {
            heap.push(Frontier {
                cost,
                node: NodeIndex::new(i),
            });
        }
        let order: Vec<f64> = std::iter::from_fn(|| heap.pop().map(|f| f.cost)).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_overflowing_sum_stays_reachable() {
        let graph = GraphStore::build(
            vec![
                NodeRecord::new("A", 0.0, 0.0),
                NodeRecord::new("B", 1.0, 0.0),
                NodeRecord::new("C", 2.0, 0.0),
            ],
            vec![
                EdgeRecord::with_length("A", "B", 1e308),
                EdgeRecord::with_length("B", "C", 1e308),
            ],
        )
        .unwrap();
        let route = shortest_path(&graph, "A", "C");
        assert!(route.is_reachable());
        assert_eq!(route.nodes, vec!["A", "B", "C"]);
        assert_eq!(route.cost, f64::MAX);
    }
}
