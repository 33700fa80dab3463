// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Campus map graph with petgraph backing for algorithms

use crate::error::{NavError, NavResult};
use crate::types::{EdgeRecord, Node, NodeId, NodeRecord, Route};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::{EdgeRef, NodeIndexable};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The loaded campus map
///
/// Built once from flat node/edge rows and never patched afterwards; a data
/// refresh builds a new store and swaps it in through [`SharedGraph`].
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Undirected graph, node weights are locations, edge weights are lengths
    graph: UnGraph<Node, f64>,
    /// Map from node ID to node index
    node_indices: HashMap<NodeId, NodeIndex>,
    /// Edge rows rejected during build
    dropped_edges: usize,
}

impl GraphStore {
    /// Build the map from node and edge rows
    ///
    /// Nodes sharing an identifier collapse to the last row. Edges with a
    /// missing endpoint, an unparseable length, or identical endpoints are
    /// dropped. Missing or non-positive lengths become the straight-line
    /// distance between the endpoints. A repeated pair keeps the last length.
    ///
    /// # Errors
    ///
    /// [`NavError::EmptyGraph`] when no node rows are supplied and
    /// [`NavError::InvalidNode`] when a row has a blank identifier or a
    /// non-finite coordinate.
    pub fn build<N, E>(nodes: N, edges: E) -> NavResult<Self>
    where
        N: IntoIterator<Item = NodeRecord>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = UnGraph::<Node, f64>::default();
        let mut node_indices: HashMap<NodeId, NodeIndex> = HashMap::new();

        for record in nodes {
            validate_node(&record)?;
            let node = Node::from(record);
            if let Some(&idx) = node_indices.get(&node.id) {
                debug!("Duplicate node {}, keeping the later row", node.id);
                graph[idx] = node;
            } else {
                let id = node.id.clone();
                let idx = graph.add_node(node);
                node_indices.insert(id, idx);
            }
        }

        if node_indices.is_empty() {
            return Err(NavError::EmptyGraph);
        }

        let mut dropped_edges = 0;
        for record in edges {
            let (Some(&a), Some(&b)) = (
                node_indices.get(&record.from),
                node_indices.get(&record.to),
            ) else {
                debug!(
                    "Dropping edge {} - {}: unknown endpoint",
                    record.from, record.to
                );
                dropped_edges += 1;
                continue;
            };

            if a == b {
                debug!("Dropping self-loop on {}", record.from);
                dropped_edges += 1;
                continue;
            }

            let weight = match record.length.as_ref().map(|raw| raw.parse()) {
                Some(None) => {
                    debug!(
                        "Dropping edge {} - {}: unparseable length",
                        record.from, record.to
                    );
                    dropped_edges += 1;
                    continue;
                }
                Some(Some(length)) if length > 0.0 => length,
                _ => {
                    let derived = graph[a].distance_to(&graph[b]);
                    debug!(
                        "Derived length {:.2} for {} - {}",
                        derived, record.from, record.to
                    );
                    derived
                }
            };

            if !weight.is_finite() {
                debug!(
                    "Dropping edge {} - {}: length overflows",
                    record.from, record.to
                );
                dropped_edges += 1;
                continue;
            }

            graph.update_edge(a, b, weight);
        }

        if dropped_edges > 0 {
            warn!("Dropped {} malformed edge row(s) while building the map", dropped_edges);
        }
        info!(
            "Built campus map: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            node_indices,
            dropped_edges,
        })
    }

    /// Neighbors of a node with the connecting edge weights
    ///
    /// Unknown nodes have no neighbors.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> BTreeMap<&str, f64> {
        let Some(idx) = self.index_of(id) else {
            return BTreeMap::new();
        };
        self.adjacent(idx)
            .map(|(other, weight)| (self.graph[other].id.as_str(), weight))
            .collect()
    }

    /// Check whether a node is on the map
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Get a node by ID
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Display label of a node, falling back to the ID itself
    #[must_use]
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.node(id).map_or(id, |n| n.label.as_str())
    }

    /// All nodes in load order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Every undirected edge once, as (endpoint, endpoint, weight)
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].id.as_str(),
                self.graph[e.target()].id.as_str(),
                *e.weight(),
            )
        })
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of edge rows rejected during build
    #[must_use]
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Number of mutually unreachable regions of the map
    #[must_use]
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub(crate) fn index_bound(&self) -> usize {
        self.graph.node_bound()
    }

    /// Adjacent node indices with weights, independent of stored direction
    pub(crate) fn adjacent(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph.edges(idx).map(move |e| {
            let other = if e.source() == idx { e.target() } else { e.source() };
            (other, *e.weight())
        })
    }

    /// Edge indices traversed by a route
    fn route_edges(&self, route: Option<&Route>) -> HashSet<EdgeIndex> {
        route
            .into_iter()
            .flat_map(|r| r.segments())
            .filter_map(|(a, b)| self.graph.find_edge(self.index_of(a)?, self.index_of(b)?))
            .collect()
    }

    /// Export to DOT format for Graphviz
    ///
    /// Nodes are pinned to their map coordinates. A route, when given, is
    /// drawn in red with its origin blue and its destination green.
    #[must_use]
    pub fn to_dot(&self, route: Option<&Route>) -> String {
        let highlighted = self.route_edges(route);
        let origin = route.and_then(Route::origin);
        let destination = route.and_then(Route::destination);

        let mut dot = String::from("graph campus {\n");
        dot.push_str("  layout=neato;\n");
        dot.push_str("  node [shape=circle, style=filled, fillcolor=black, fontcolor=white];\n\n");

        for node in self.nodes() {
            let fill = if Some(node.id.as_str()) == origin {
                ", fillcolor=blue"
            } else if Some(node.id.as_str()) == destination {
                ", fillcolor=green"
            } else {
                ""
            };
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\", pos=\"{},{}!\"{}];\n",
                escape(&node.id),
                escape(&node.label),
                node.x,
                node.y,
                fill
            ));
        }

        dot.push('\n');

        for e in self.graph.edge_references() {
            let style = if highlighted.contains(&e.id()) {
                ", color=red, penwidth=4"
            } else {
                ""
            };
            dot.push_str(&format!(
                "  \"{}\" -- \"{}\" [label=\"{:.1}\"{}];\n",
                escape(&self.graph[e.source()].id),
                escape(&self.graph[e.target()].id),
                e.weight(),
                style
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Export to JSON, with resolved edge weights and an optional route
    pub fn to_json(&self, route: Option<&Route>) -> Result<String> {
        #[derive(Serialize)]
        struct ExportEdge<'a> {
            from: &'a str,
            to: &'a str,
            length: f64,
        }

        #[derive(Serialize)]
        struct Export<'a> {
            nodes: Vec<&'a Node>,
            edges: Vec<ExportEdge<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            route: Option<&'a Route>,
        }

        let export = Export {
            nodes: self.nodes().collect(),
            edges: self
                .edges()
                .map(|(from, to, length)| ExportEdge { from, to, length })
                .collect(),
            route,
        };

        serde_json::to_string_pretty(&export).context("Failed to serialize map to JSON")
    }
}

fn validate_node(record: &NodeRecord) -> NavResult<()> {
    if record.id.trim().is_empty() {
        return Err(NavError::InvalidNode {
            id: record.id.clone(),
            reason: "blank identifier".into(),
        });
    }
    if !record.x.is_finite() || !record.y.is_finite() {
        return Err(NavError::InvalidNode {
            id: record.id.clone(),
            reason: format!("coordinates ({}, {}) are not finite", record.x, record.y),
        });
    }
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// A replaceable, lock-free reference to the current map
///
/// Readers take a snapshot and keep using it even if the map is replaced
/// mid-query. Replacement is a single pointer swap.
#[derive(Debug)]
pub struct SharedGraph {
    inner: ArcSwap<GraphStore>,
}

impl SharedGraph {
    /// Wrap a freshly built map
    #[must_use]
    pub fn new(store: GraphStore) -> Self {
        Self {
            inner: ArcSwap::from_pointee(store),
        }
    }

    /// Current map
    #[must_use]
    pub fn snapshot(&self) -> Arc<GraphStore> {
        self.inner.load_full()
    }

    /// Swap in a new map, returning the previous one
    pub fn replace(&self, store: GraphStore) -> Arc<GraphStore> {
        self.inner.swap(Arc::new(store))
    }

    /// Rebuild from fresh rows; the current map stays visible if building fails
    ///
    /// # Errors
    ///
    /// Any [`GraphStore::build`] error; nothing is swapped in that case.
    pub fn reload<N, E>(&self, nodes: N, edges: E) -> NavResult<Arc<GraphStore>>
    where
        N: IntoIterator<Item = NodeRecord>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let store = GraphStore::build(nodes, edges)?;
        self.replace(store);
        Ok(self.snapshot())
    }
}
